//! Infrastructure layer for trivia-rush
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: layered configuration loading, the remote
//! question generator, the static fallback corpus, the JSON score store
//! and the JSONL session event log.

pub mod config;
pub mod corpus;
pub mod generator;
pub mod logging;
pub mod store;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileCorpusConfig, FileGeneratorConfig,
    FileScoringConfig, FileSessionConfig, FileStorageConfig, FileSupplyConfig, FileTimerConfig,
};
pub use corpus::{CorpusError, StaticCorpus};
pub use generator::{DisabledGenerator, build_generator};
#[cfg(feature = "openai")]
pub use generator::{OpenAiGeneratorConfig, OpenAiQuestionGenerator};
pub use logging::JsonlSessionLogger;
pub use store::JsonFileStore;
