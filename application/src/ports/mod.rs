//! Port definitions (interfaces for external adapters)
//!
//! Ports define the boundaries between the application layer and
//! the outside world. Adapters in the infrastructure and presentation
//! layers implement these ports.

pub mod fallback_corpus;
pub mod question_generator;
pub mod score_store;
pub mod session_observer;
