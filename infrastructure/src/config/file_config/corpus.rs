//! Fallback corpus configuration from TOML (`[corpus]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// ```toml
/// [corpus]
/// path = "~/trivia/extra-questions.toml"
/// default_topic = "general"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCorpusConfig {
    /// Extra questions merged over the built-in corpus.
    pub path: Option<PathBuf>,
    /// Topic served when a request names none.
    pub default_topic: String,
}

impl Default for FileCorpusConfig {
    fn default() -> Self {
        Self {
            path: None,
            default_topic: "general".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corpus_config_deserialize() {
        let toml_str = r#"
[corpus]
path = "/tmp/questions.toml"
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.corpus.path, Some(PathBuf::from("/tmp/questions.toml")));
        assert_eq!(config.corpus.default_topic, "general");
    }
}
