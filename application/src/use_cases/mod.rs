//! Use cases - application-specific business logic
//!
//! - [`supply_questions`]: the cache → generator → fallback supplier actor
//! - [`session_controller`]: pacing state machine of one session
//! - [`session_runtime`]: event queue that drives the controller
//! - [`high_score`]: persisted best score
//! - [`preload_topics`]: cache warm-up at startup

pub mod high_score;
pub mod preload_topics;
pub mod session_controller;
pub mod session_runtime;
pub mod supply_questions;
