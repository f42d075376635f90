//! Question generator adapters.
//!
//! With the `openai` feature and an API key in the environment, questions
//! come from an OpenAI-compatible chat-completions endpoint. Otherwise the
//! [`DisabledGenerator`] sends every request to the fallback corpus.

mod disabled;
#[cfg(feature = "openai")]
mod openai;
pub mod payload;

pub use disabled::DisabledGenerator;
#[cfg(feature = "openai")]
pub use openai::{OpenAiGeneratorConfig, OpenAiQuestionGenerator};

use crate::config::FileGeneratorConfig;
use std::sync::Arc;
use tracing::info;
use trivia_application::QuestionGenerator;

/// Pick the generator for this run.
pub fn build_generator(config: &FileGeneratorConfig, offline: bool) -> Arc<dyn QuestionGenerator> {
    if offline || !config.enabled {
        info!("Question generator disabled; playing from the fallback corpus");
        return Arc::new(DisabledGenerator);
    }

    #[cfg(feature = "openai")]
    {
        if let Some(settings) = OpenAiGeneratorConfig::from_file(config) {
            info!("Generating questions with {} via {}", settings.model, settings.base_url);
            return Arc::new(OpenAiQuestionGenerator::new(settings));
        }
        info!(
            "{} is not set; playing from the fallback corpus",
            config.api_key_env
        );
    }

    #[cfg(not(feature = "openai"))]
    info!("Built without the openai feature; playing from the fallback corpus");

    Arc::new(DisabledGenerator)
}
