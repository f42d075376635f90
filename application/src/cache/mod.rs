//! In-memory question cache.

pub mod question_cache;

pub use question_cache::QuestionCache;
