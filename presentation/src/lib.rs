//! Presentation layer for trivia-rush
//!
//! This crate contains the CLI definition, keyboard input parsing,
//! console formatting and the countdown display.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use cli::input::{parse_line, spawn_input_reader};
pub use output::console::ConsoleFormatter;
pub use output::presenter::ConsolePresenter;
pub use progress::reporter::PhaseProgress;
