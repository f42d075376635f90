//! Supply parameters - cache bounds and remote retry policy.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use trivia_domain::DomainError;

/// Parameters of the question supplier and its cache.
///
/// | Field | Default |
/// |-------|---------|
/// | `max_cache_size` | 50 per topic |
/// | `cache_ttl` | 300s |
/// | `max_attempts` | 2 remote attempts in total |
/// | `retry_delay` | 2s after each failed attempt |
/// | `request_timeout` | 30s per attempt |
/// | `min_generation_batch` | 0 (ask for exactly what is missing) |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplyParams {
    pub max_cache_size: usize,
    pub cache_ttl: Duration,
    pub max_attempts: u32,
    pub retry_delay: Duration,
    pub request_timeout: Duration,
    /// Lower bound on how many questions one remote call asks for; the
    /// surplus is cached for later requests.
    pub min_generation_batch: usize,
}

impl Default for SupplyParams {
    fn default() -> Self {
        Self {
            max_cache_size: 50,
            cache_ttl: Duration::from_secs(300),
            max_attempts: 2,
            retry_delay: Duration::from_secs(2),
            request_timeout: Duration::from_secs(30),
            min_generation_batch: 0,
        }
    }
}

impl SupplyParams {
    // ==================== Builder Methods ====================

    pub fn with_max_cache_size(mut self, size: usize) -> Self {
        self.max_cache_size = size;
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_min_generation_batch(mut self, batch: usize) -> Self {
        self.min_generation_batch = batch;
        self
    }

    /// Number of questions a remote call should ask for to satisfy `count`.
    pub fn generation_batch(&self, count: usize) -> usize {
        count.max(self.min_generation_batch)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.max_cache_size == 0 {
            return Err(DomainError::configuration(
                "max_cache_size must be at least 1",
            ));
        }
        if self.cache_ttl.is_zero() {
            return Err(DomainError::configuration(
                "cache_ttl must be greater than zero",
            ));
        }
        if self.max_attempts == 0 {
            return Err(DomainError::configuration(
                "max_attempts must be at least 1",
            ));
        }
        if self.request_timeout.is_zero() {
            return Err(DomainError::configuration(
                "request_timeout must be greater than zero",
            ));
        }
        Ok(())
    }
}
