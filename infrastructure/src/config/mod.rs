//! Configuration file loading for trivia-rush
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `TRIVIA_*` environment variables (`__` separates section and key)
//! 2. `--config <path>` specified file
//! 3. Project root: `./trivia.toml` or `./.trivia.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/trivia-rush/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileCorpusConfig, FileGeneratorConfig,
    FileGradeThresholds, FileScoringConfig, FileSessionConfig, FileStorageConfig,
    FileSupplyConfig, FileTimerConfig,
};
pub use loader::ConfigLoader;
