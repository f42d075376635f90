//! Persistent storage configuration from TOML (`[storage]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// ```toml
/// [storage]
/// high_score_path = "~/.local/share/trivia-rush/scores.json"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStorageConfig {
    pub high_score_path: Option<PathBuf>,
}

impl FileStorageConfig {
    /// Configured path, else `$XDG_DATA_HOME/trivia-rush/scores.json`.
    ///
    /// `None` when no data directory can be determined.
    pub fn resolve_high_score_path(&self) -> Option<PathBuf> {
        self.high_score_path
            .clone()
            .or_else(|| dirs::data_dir().map(|d| d.join("trivia-rush").join("scores.json")))
    }
}
