//! Logging infrastructure - structured session event logging.
//!
//! Provides [`JsonlSessionLogger`], a JSONL file writer that implements
//! the [`SessionObserver`](trivia_application::SessionObserver) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlSessionLogger;
