//! Question generator port
//!
//! Defines the interface to the remote service that writes new questions.

use async_trait::async_trait;
use thiserror::Error;
use trivia_domain::{QuestionDraft, Topic};

/// Errors that can occur during a generation attempt
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Timeout")]
    Timeout,

    #[error("HTTP status {0}")]
    HttpStatus(u16),

    /// The whole payload could not be parsed into a batch.
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// The generator is switched off (offline mode, no credentials).
    #[error("Generator disabled")]
    Disabled,
}

impl GeneratorError {
    /// Whether another attempt could succeed.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, GeneratorError::Disabled)
    }
}

/// Remote question generation
///
/// Returns unvalidated drafts; the caller validates each one and drops the
/// malformed ones. Implementations live in the infrastructure layer.
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    async fn generate(
        &self,
        topic: &Topic,
        count: usize,
    ) -> Result<Vec<QuestionDraft>, GeneratorError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_disabled_is_final() {
        assert!(GeneratorError::Timeout.is_retryable());
        assert!(GeneratorError::Connection("reset".into()).is_retryable());
        assert!(GeneratorError::HttpStatus(503).is_retryable());
        assert!(GeneratorError::Malformed("eof".into()).is_retryable());
        assert!(!GeneratorError::Disabled.is_retryable());
    }
}
