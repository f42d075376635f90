//! Remote question generator configuration from TOML (`[generator]` section)
//!
//! ```toml
//! [generator]
//! enabled = true
//! base_url = "https://api.openai.com/v1"
//! model = "gpt-4.1-nano"
//! api_key_env = "OPENAI_API_KEY"
//! temperature = 0.7
//! max_completion_tokens = 2000
//! ```
//!
//! The key itself never lives in the file; only the name of the
//! environment variable holding it does.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGeneratorConfig {
    /// `false` forces offline play from the fallback corpus.
    pub enabled: bool,
    /// OpenAI-compatible API root; `/chat/completions` is appended.
    pub base_url: String,
    pub model: String,
    pub api_key_env: String,
    pub temperature: f32,
    pub max_completion_tokens: u32,
}

impl Default for FileGeneratorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4.1-nano".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            temperature: 0.7,
            max_completion_tokens: 2000,
        }
    }
}

impl FileGeneratorConfig {
    /// Read the API key from the configured environment variable.
    ///
    /// Blank values count as missing.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}
