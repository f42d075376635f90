//! OpenAI-compatible chat-completions question generator.

use super::payload::{build_prompt, parse_questions};
use crate::config::FileGeneratorConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;
use trivia_application::{GeneratorError, QuestionGenerator};
use trivia_domain::{QuestionDraft, Topic};

#[derive(Clone, Debug)]
pub struct OpenAiGeneratorConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub max_completion_tokens: u32,
}

impl OpenAiGeneratorConfig {
    /// Build from the `[generator]` section, reading the key from the
    /// environment. `None` when disabled or no key is set.
    #[must_use]
    pub fn from_file(config: &FileGeneratorConfig) -> Option<Self> {
        if !config.enabled {
            return None;
        }
        let api_key = config.api_key()?;
        Some(Self {
            base_url: config.base_url.clone(),
            api_key,
            model: config.model.clone(),
            temperature: config.temperature,
            max_completion_tokens: config.max_completion_tokens,
        })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

/// Generates questions through `POST {base_url}/chat/completions`.
///
/// Per-attempt timeouts and retries are applied by the supplier, so the
/// client itself carries no timeout.
#[derive(Clone)]
pub struct OpenAiQuestionGenerator {
    client: Client,
    config: OpenAiGeneratorConfig,
}

impl OpenAiQuestionGenerator {
    #[must_use]
    pub fn new(config: OpenAiGeneratorConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn request_body(&self, topic: &Topic, count: usize) -> ChatRequest {
        ChatRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage {
                role: "user",
                content: build_prompt(topic, count),
            }],
            temperature: self.config.temperature,
            max_completion_tokens: self.config.max_completion_tokens,
        }
    }
}

fn transport_error(error: reqwest::Error) -> GeneratorError {
    if error.is_timeout() {
        GeneratorError::Timeout
    } else if error.is_decode() {
        GeneratorError::Malformed(error.to_string())
    } else {
        GeneratorError::Connection(error.to_string())
    }
}

#[async_trait]
impl QuestionGenerator for OpenAiQuestionGenerator {
    async fn generate(
        &self,
        topic: &Topic,
        count: usize,
    ) -> Result<Vec<QuestionDraft>, GeneratorError> {
        debug!(
            "Requesting {} questions on '{}' from {}",
            count, topic, self.config.model
        );

        let response = self
            .client
            .post(self.config.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&self.request_body(topic, count))
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeneratorError::HttpStatus(status.as_u16()));
        }

        let body: ChatResponse = response.json().await.map_err(transport_error)?;
        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| GeneratorError::Malformed("response has no content".to_string()))?;

        parse_questions(&content)
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_completion_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}
