//! Generator used for offline play.

use async_trait::async_trait;
use trivia_application::{GeneratorError, QuestionGenerator};
use trivia_domain::{QuestionDraft, Topic};

/// Always reports [`GeneratorError::Disabled`], which the supplier does not
/// retry, so every request goes straight to the fallback corpus.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledGenerator;

#[async_trait]
impl QuestionGenerator for DisabledGenerator {
    async fn generate(
        &self,
        _topic: &Topic,
        _count: usize,
    ) -> Result<Vec<QuestionDraft>, GeneratorError> {
        Err(GeneratorError::Disabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_generator_is_not_retryable() {
        let err = DisabledGenerator
            .generate(&Topic::new("science"), 3)
            .await
            .unwrap_err();
        assert!(matches!(err, GeneratorError::Disabled));
        assert!(!err.is_retryable());
    }
}
