//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Rejected at construction time (cache size, grade table, durations, ...)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A question candidate failed structural validation
    #[error("Malformed question: {0}")]
    MalformedQuestion(String),
}

impl DomainError {
    pub fn configuration(message: impl Into<String>) -> Self {
        DomainError::Configuration(message.into())
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        DomainError::MalformedQuestion(message.into())
    }

    /// Check if this error was raised while validating configuration
    pub fn is_configuration(&self) -> bool {
        matches!(self, DomainError::Configuration(_))
    }
}
