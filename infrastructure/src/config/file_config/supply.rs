//! Question supply configuration from TOML (`[supply]` section)

use super::ConfigValidationError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use trivia_application::SupplyParams;

/// Cache bounds and remote retry policy.
///
/// # Example
///
/// ```toml
/// [supply]
/// max_cache_size = 50
/// cache_ttl_secs = 300
/// max_attempts = 2
/// retry_delay_secs = 2
/// request_timeout_secs = 30
/// min_generation_batch = 0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSupplyConfig {
    /// Per-topic cache capacity; oldest entries are evicted beyond it.
    pub max_cache_size: usize,
    pub cache_ttl_secs: u64,
    /// Total number of remote attempts per generation.
    pub max_attempts: u32,
    pub retry_delay_secs: u64,
    pub request_timeout_secs: u64,
    pub min_generation_batch: usize,
}

impl Default for FileSupplyConfig {
    fn default() -> Self {
        let params = SupplyParams::default();
        Self {
            max_cache_size: params.max_cache_size,
            cache_ttl_secs: params.cache_ttl.as_secs(),
            max_attempts: params.max_attempts,
            retry_delay_secs: params.retry_delay.as_secs(),
            request_timeout_secs: params.request_timeout.as_secs(),
            min_generation_batch: params.min_generation_batch,
        }
    }
}

impl FileSupplyConfig {
    /// Convert to [`SupplyParams`], rejecting values the supplier cannot run with.
    pub fn to_supply_params(&self) -> Result<SupplyParams, ConfigValidationError> {
        if self.max_cache_size == 0 {
            return Err(ConfigValidationError::invalid(
                "supply.max_cache_size",
                "must be at least 1",
            ));
        }
        if self.cache_ttl_secs == 0 {
            return Err(ConfigValidationError::invalid(
                "supply.cache_ttl_secs",
                "must be at least 1",
            ));
        }
        if self.max_attempts == 0 {
            return Err(ConfigValidationError::invalid(
                "supply.max_attempts",
                "must be at least 1",
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigValidationError::invalid(
                "supply.request_timeout_secs",
                "must be at least 1",
            ));
        }

        Ok(SupplyParams::default()
            .with_max_cache_size(self.max_cache_size)
            .with_cache_ttl(Duration::from_secs(self.cache_ttl_secs))
            .with_max_attempts(self.max_attempts)
            .with_retry_delay(Duration::from_secs(self.retry_delay_secs))
            .with_request_timeout(Duration::from_secs(self.request_timeout_secs))
            .with_min_generation_batch(self.min_generation_batch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supply_config_default_matches_params() {
        let params = FileSupplyConfig::default().to_supply_params().unwrap();
        assert_eq!(params, SupplyParams::default());
    }

    #[test]
    fn test_supply_config_deserialize() {
        let toml_str = r#"
[supply]
max_cache_size = 10
cache_ttl_secs = 60
max_attempts = 3
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.supply.max_cache_size, 10);
        assert_eq!(config.supply.max_attempts, 3);
        // Untouched keys keep their defaults
        assert_eq!(config.supply.request_timeout_secs, 30);

        let params = config.supply.to_supply_params().unwrap();
        assert_eq!(params.cache_ttl, Duration::from_secs(60));
    }

    #[test]
    fn test_zero_cache_size_rejected() {
        let config = FileSupplyConfig {
            max_cache_size: 0,
            ..Default::default()
        };
        let err = config.to_supply_params().unwrap_err();
        assert_eq!(err.key(), "supply.max_cache_size");
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let config = FileSupplyConfig {
            max_attempts: 0,
            ..Default::default()
        };
        assert!(config.to_supply_params().is_err());
    }
}
