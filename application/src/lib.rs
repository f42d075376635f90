//! Application layer for trivia-rush
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod cache;
pub mod config;
pub mod ports;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use cache::QuestionCache;
pub use config::{SessionParams, SupplyParams};
pub use ports::{
    fallback_corpus::FallbackCorpus,
    question_generator::{GeneratorError, QuestionGenerator},
    score_store::{InMemoryStore, KeyValueStore, StoreError},
    session_observer::{NoSessionObserver, SessionObserver},
};
pub use use_cases::high_score::{HighScoreBook, HighScoreRecord};
pub use use_cases::preload_topics::PreloadTopicsUseCase;
pub use use_cases::session_controller::{SessionAction, SessionController};
pub use use_cases::session_runtime::{SessionInput, SessionRuntime};
pub use use_cases::supply_questions::{QuestionSupplier, SupplierHandle, SupplyError, SupplyStatus};
