//! Fallback question corpus adapters.

mod static_corpus;

pub use static_corpus::{CorpusError, StaticCorpus};
