//! Session configuration from TOML (`[session]` section)

use serde::{Deserialize, Serialize};
use trivia_domain::Topic;

/// Batch sizing, default topic and startup preloading.
///
/// ```toml
/// [session]
/// batch_size = 3
/// default_topic = "general"
/// preload_topics = ["science", "history"]
/// preload_count = 20
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSessionConfig {
    /// Questions requested from the supplier at a time.
    pub batch_size: usize,
    /// Topic played when none is given on the command line.
    pub default_topic: String,
    /// Topics warmed in the cache at startup.
    pub preload_topics: Vec<String>,
    pub preload_count: usize,
}

impl Default for FileSessionConfig {
    fn default() -> Self {
        Self {
            batch_size: 3,
            default_topic: "general".to_string(),
            preload_topics: Vec::new(),
            preload_count: 20,
        }
    }
}

impl FileSessionConfig {
    /// Non-empty preload topics, trimmed.
    pub fn preload_topics(&self) -> Vec<Topic> {
        self.preload_topics
            .iter()
            .map(Topic::new)
            .filter(|t| !t.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_config_default() {
        let config = FileSessionConfig::default();
        assert_eq!(config.batch_size, 3);
        assert_eq!(config.default_topic, "general");
        assert!(config.preload_topics().is_empty());
    }

    #[test]
    fn test_preload_topics_skip_blank_entries() {
        let toml_str = r#"
[session]
preload_topics = ["science", "  ", " history "]
preload_count = 5
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.session.preload_topics(),
            vec![Topic::new("science"), Topic::new("history")]
        );
        assert_eq!(config.session.preload_count, 5);
    }
}
