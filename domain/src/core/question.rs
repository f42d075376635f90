//! Question value object and its unvalidated draft form

use super::error::DomainError;
use super::topic::Topic;
use serde::{Deserialize, Serialize};

/// Every question offers exactly this many options.
pub const OPTION_COUNT: usize = 4;

/// A multiple-choice trivia question (Value Object)
///
/// Immutable once built. Construction validates that the prompt is
/// non-empty, that all four options are non-empty and that the correct
/// index points at one of them. Deserialization runs the same checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "QuestionRecord")]
pub struct Question {
    prompt: String,
    options: [String; OPTION_COUNT],
    correct_index: usize,
    hint: Option<String>,
    topic: Topic,
}

impl Question {
    /// Build a validated question.
    pub fn new(
        prompt: impl Into<String>,
        options: [String; OPTION_COUNT],
        correct_index: usize,
        hint: Option<String>,
        topic: Topic,
    ) -> Result<Self, DomainError> {
        let prompt = prompt.into().trim().to_string();
        if prompt.is_empty() {
            return Err(DomainError::malformed("prompt is empty"));
        }
        if let Some(position) = options.iter().position(|o| o.trim().is_empty()) {
            return Err(DomainError::malformed(format!(
                "option {} is empty",
                position
            )));
        }
        if correct_index >= OPTION_COUNT {
            return Err(DomainError::malformed(format!(
                "correct index {} out of range 0..{}",
                correct_index, OPTION_COUNT
            )));
        }
        let hint = hint
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty());

        Ok(Self {
            prompt,
            options: options.map(|o| o.trim().to_string()),
            correct_index,
            hint,
            topic,
        })
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn options(&self) -> &[String; OPTION_COUNT] {
        &self.options
    }

    pub fn option(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(String::as_str)
    }

    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_index]
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    pub fn topic(&self) -> &Topic {
        &self.topic
    }

    /// Whether `index` selects the correct option. Negative indices
    /// (the "no answer" sentinel) are never correct.
    pub fn is_correct(&self, index: i32) -> bool {
        usize::try_from(index).is_ok_and(|i| i == self.correct_index)
    }
}

/// Serialized shape of a [`Question`], validated on the way in.
#[derive(Deserialize)]
struct QuestionRecord {
    prompt: String,
    options: [String; OPTION_COUNT],
    correct_index: usize,
    #[serde(default)]
    hint: Option<String>,
    topic: Topic,
}

impl TryFrom<QuestionRecord> for Question {
    type Error = DomainError;

    fn try_from(record: QuestionRecord) -> Result<Self, Self::Error> {
        Question::new(
            record.prompt,
            record.options,
            record.correct_index,
            record.hint,
            record.topic,
        )
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.prompt)
    }
}

/// An unvalidated question candidate as produced by a generator.
///
/// Field aliases accept the camelCase payload shape the remote generator
/// answers with (`question`, `answers`, `correctAnswerIndex`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestionDraft {
    #[serde(alias = "question")]
    pub prompt: String,
    #[serde(alias = "answers")]
    pub options: Vec<String>,
    #[serde(alias = "correctAnswerIndex", alias = "correct_answer_index")]
    pub correct_index: i64,
    #[serde(default)]
    pub hint: Option<String>,
}

impl QuestionDraft {
    pub fn new(prompt: impl Into<String>, options: Vec<String>, correct_index: i64) -> Self {
        Self {
            prompt: prompt.into(),
            options,
            correct_index,
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Validate into a [`Question`] tagged with `topic`.
    pub fn validate(self, topic: &Topic) -> Result<Question, DomainError> {
        let count = self.options.len();
        let options: [String; OPTION_COUNT] = self.options.try_into().map_err(|_| {
            DomainError::malformed(format!(
                "expected {} options, got {}",
                OPTION_COUNT, count
            ))
        })?;
        let correct_index = usize::try_from(self.correct_index).map_err(|_| {
            DomainError::malformed(format!("correct index {} is negative", self.correct_index))
        })?;
        Question::new(self.prompt, options, correct_index, self.hint, topic.clone())
    }
}
