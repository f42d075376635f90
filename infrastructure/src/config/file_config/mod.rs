//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly; conversion into the application's
//! parameter types is fallible and reports the offending key.

mod corpus;
mod generator;
mod scoring;
mod session;
mod storage;
mod supply;
mod timer;

pub use corpus::FileCorpusConfig;
pub use generator::FileGeneratorConfig;
pub use scoring::{FileGradeThresholds, FileScoringConfig};
pub use session::FileSessionConfig;
pub use storage::FileStorageConfig;
pub use supply::FileSupplyConfig;
pub use timer::FileTimerConfig;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use trivia_application::{SessionParams, SupplyParams};
use trivia_domain::{ConfigIssue, DomainError, Topic};

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("{key}: {message}")]
    Invalid { key: String, message: String },
}

impl ConfigValidationError {
    pub fn invalid(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid {
            key: key.into(),
            message: message.into(),
        }
    }

    pub(crate) fn from_domain(key: &str, error: DomainError) -> Self {
        Self::invalid(key, error.to_string())
    }

    pub fn key(&self) -> &str {
        match self {
            Self::Invalid { key, .. } => key,
        }
    }

    pub fn to_issue(&self) -> ConfigIssue {
        match self {
            Self::Invalid { key, message } => ConfigIssue::error(key.clone(), message.clone()),
        }
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Cache bounds and retry policy
    pub supply: FileSupplyConfig,
    /// Answer and reveal windows
    pub timer: FileTimerConfig,
    /// Points, lives, combo and grades
    pub scoring: FileScoringConfig,
    /// Batching, default topic, preloading
    pub session: FileSessionConfig,
    /// Remote question generator
    pub generator: FileGeneratorConfig,
    /// Fallback question corpus
    pub corpus: FileCorpusConfig,
    /// High-score persistence
    pub storage: FileStorageConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Errors are the same conditions [`Self::to_supply_params`] and
    /// [`Self::to_session_params`] reject; warnings flag settings that work
    /// but probably do not do what was meant.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if let Err(e) = self.supply.to_supply_params() {
            issues.push(e.to_issue());
        }
        if let Err(e) = self.timer.to_durations() {
            issues.push(e.to_issue());
        }
        if let Err(e) = self.scoring.to_scoring_rules() {
            issues.push(e.to_issue());
        }
        if self.session.batch_size == 0 {
            issues.push(ConfigIssue::error("session.batch_size", "must be at least 1"));
        }
        if Topic::new(self.session.default_topic.as_str()).is_empty() {
            issues.push(ConfigIssue::error("session.default_topic", "must not be empty"));
        }

        // Settings that run, but not as intended
        if self.session.batch_size > self.supply.max_cache_size {
            issues.push(ConfigIssue::warning(
                "session.batch_size",
                format!(
                    "larger than supply.max_cache_size ({}); surplus questions are evicted",
                    self.supply.max_cache_size
                ),
            ));
        }
        if !self.session.preload_topics().is_empty()
            && self.session.preload_count > self.supply.max_cache_size
        {
            issues.push(ConfigIssue::warning(
                "session.preload_count",
                format!(
                    "larger than supply.max_cache_size ({}); only the newest questions are kept",
                    self.supply.max_cache_size
                ),
            ));
        }
        if self.generator.enabled {
            if self.generator.base_url.trim().is_empty() {
                issues.push(ConfigIssue::error("generator.base_url", "must not be empty"));
            }
            if self.generator.model.trim().is_empty() {
                issues.push(ConfigIssue::error("generator.model", "must not be empty"));
            }
            if !(0.0..=2.0).contains(&self.generator.temperature) {
                issues.push(ConfigIssue::warning(
                    "generator.temperature",
                    format!(
                        "{} is outside 0.0..=2.0 and may be rejected by the API",
                        self.generator.temperature
                    ),
                ));
            }
        }
        if let Some(path) = &self.corpus.path
            && !path.exists()
        {
            issues.push(ConfigIssue::warning(
                "corpus.path",
                format!("{} does not exist; using the built-in corpus only", path.display()),
            ));
        }

        issues
    }

    pub fn to_supply_params(&self) -> Result<SupplyParams, ConfigValidationError> {
        self.supply.to_supply_params()
    }

    pub fn to_session_params(&self) -> Result<SessionParams, ConfigValidationError> {
        if self.session.batch_size == 0 {
            return Err(ConfigValidationError::invalid(
                "session.batch_size",
                "must be at least 1",
            ));
        }
        let default_topic = Topic::new(self.session.default_topic.as_str());
        if default_topic.is_empty() {
            return Err(ConfigValidationError::invalid(
                "session.default_topic",
                "must not be empty",
            ));
        }
        let (answer, reveal) = self.timer.to_durations()?;

        let params = SessionParams::default()
            .with_batch_size(self.session.batch_size)
            .with_durations(answer, reveal)
            .with_scoring(self.scoring.to_scoring_rules()?)
            .with_default_topic(default_topic)
            .with_preload(self.session.preload_topics(), self.session.preload_count);
        params
            .validate()
            .map_err(|e| ConfigValidationError::from_domain("session", e))?;
        Ok(params)
    }
}
