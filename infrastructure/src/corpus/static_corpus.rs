//! Static fallback corpus: built-in questions plus an optional TOML file.
//!
//! File format:
//!
//! ```toml
//! [[topic]]
//! name = "space"
//!
//! [[topic.questions]]
//! question = "Closest star to Earth?"
//! answers = ["Sirius", "The Sun", "Vega", "Polaris"]
//! correctAnswerIndex = 1
//! hint = "You see it every day."
//! ```
//!
//! A topic defined in the file replaces the built-in topic of the same name.

use crate::config::FileCorpusConfig;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};
use trivia_application::FallbackCorpus;
use trivia_domain::{Question, QuestionDraft, Topic};

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("failed to read corpus file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse corpus file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Deserialize)]
struct CorpusFile {
    #[serde(default)]
    topic: Vec<CorpusTopic>,
}

#[derive(Debug, Deserialize)]
struct CorpusTopic {
    name: String,
    #[serde(default)]
    questions: Vec<QuestionDraft>,
}

// (prompt, options, correct index, hint)
type Entry = (&'static str, [&'static str; 4], i64, &'static str);

const GENERAL: &[Entry] = &[
    (
        "Which is the largest planet in the solar system?",
        ["Earth", "Jupiter", "Saturn", "Mars"],
        1,
        "A giant made mostly of gas.",
    ),
    (
        "What is the capital of South Korea?",
        ["Busan", "Seoul", "Daegu", "Incheon"],
        1,
        "It sits near the middle of the peninsula.",
    ),
    (
        "What is Earth's natural satellite?",
        ["Mars", "The Moon", "The Sun", "Jupiter"],
        1,
        "It orbits the Earth.",
    ),
];

const SCIENCE: &[Entry] = &[
    (
        "What is the chemical formula of water?",
        ["H2O", "CO2", "O2", "H2"],
        0,
        "Two hydrogens and one oxygen.",
    ),
    (
        "Who formulated the law of universal gravitation?",
        ["Einstein", "Newton", "Galileo", "Copernicus"],
        1,
        "A falling apple is part of the story.",
    ),
];

const MATH: &[Entry] = &[
    ("2 + 2 = ?", ["3", "4", "5", "6"], 1, "Basic addition."),
    (
        "What is the value of pi, to two decimals?",
        ["3.14", "2.71", "1.41", "2.14"],
        0,
        "Circumference divided by diameter.",
    ),
];

const HISTORY: &[Entry] = &[
    (
        "Which king founded the Joseon dynasty?",
        ["Sejong the Great", "Taejo", "Jeongjo", "Gwanghaegun"],
        1,
        "Better known as Yi Seong-gye.",
    ),
    (
        "Which king created the Korean alphabet, Hangul?",
        ["Sejong the Great", "Taejo", "Jeongjo", "Gwanghaegun"],
        0,
        "Hunminjeongeum was proclaimed in 1443.",
    ),
];

/// Read-only, in-memory fallback corpus.
#[derive(Debug, Clone)]
pub struct StaticCorpus {
    topics: BTreeMap<Topic, Vec<Question>>,
    default_topic: Topic,
}

impl StaticCorpus {
    /// The built-in corpus: `general` (default), `science`, `math`, `history`.
    pub fn builtin() -> Self {
        let mut corpus = Self {
            topics: BTreeMap::new(),
            default_topic: Topic::new("general"),
        };
        for (name, entries) in [
            ("general", GENERAL),
            ("science", SCIENCE),
            ("math", MATH),
            ("history", HISTORY),
        ] {
            let topic = Topic::new(name);
            let drafts = entries.iter().map(|(prompt, options, correct, hint)| {
                QuestionDraft::new(*prompt, options.map(String::from).to_vec(), *correct)
                    .with_hint(*hint)
            });
            corpus.insert_topic(topic, drafts);
        }
        corpus
    }

    /// Built-in corpus, merged with `config.path` when set.
    ///
    /// An unreadable file is logged and ignored.
    pub fn from_config(config: &FileCorpusConfig) -> Self {
        let mut corpus = Self::builtin().with_default_topic(config.default_topic.as_str());
        if let Some(path) = &config.path {
            match corpus.merge_file(path) {
                Ok(added) => info!("Loaded {} corpus questions from {}", added, path.display()),
                Err(e) => warn!("Ignoring corpus file {}: {}", path.display(), e),
            }
        }
        corpus
    }

    pub fn with_default_topic(mut self, topic: impl Into<Topic>) -> Self {
        let topic = topic.into();
        if !topic.is_empty() {
            self.default_topic = topic;
        }
        self
    }

    /// Merge a TOML corpus file. Returns how many questions it contributed.
    pub fn merge_file(&mut self, path: &Path) -> Result<usize, CorpusError> {
        let text = std::fs::read_to_string(path)?;
        self.merge_str(&text)
    }

    pub fn merge_str(&mut self, text: &str) -> Result<usize, CorpusError> {
        let file: CorpusFile = toml::from_str(text)?;
        let mut added = 0;
        for entry in file.topic {
            let topic = Topic::new(entry.name);
            if topic.is_empty() {
                warn!("Skipping corpus topic without a name");
                continue;
            }
            added += self.insert_topic(topic, entry.questions);
        }
        Ok(added)
    }

    /// Replace `topic` with the valid drafts; empty results are not stored.
    fn insert_topic(
        &mut self,
        topic: Topic,
        drafts: impl IntoIterator<Item = QuestionDraft>,
    ) -> usize {
        let questions: Vec<Question> = drafts
            .into_iter()
            .filter_map(|draft| match draft.validate(&topic) {
                Ok(question) => Some(question),
                Err(e) => {
                    warn!("Dropping corpus question in '{}': {}", topic, e);
                    None
                }
            })
            .collect();

        let added = questions.len();
        if added > 0 {
            self.topics.insert(topic, questions);
        }
        added
    }
}

impl Default for StaticCorpus {
    fn default() -> Self {
        Self::builtin()
    }
}

impl FallbackCorpus for StaticCorpus {
    fn lookup(&self, topic: &Topic) -> Vec<Question> {
        self.topics.get(topic).cloned().unwrap_or_default()
    }

    fn default_topic(&self) -> Topic {
        self.default_topic.clone()
    }

    fn topics(&self) -> Vec<Topic> {
        self.topics.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_topics() {
        let corpus = StaticCorpus::builtin();
        assert_eq!(
            corpus.topics(),
            ["general", "history", "math", "science"].map(Topic::new).to_vec()
        );
        assert_eq!(corpus.default_topic(), Topic::new("general"));
        assert_eq!(corpus.lookup(&Topic::new("general")).len(), 3);
        assert_eq!(corpus.lookup(&Topic::new("science")).len(), 2);
    }

    #[test]
    fn test_builtin_questions_carry_hints_and_topic() {
        let corpus = StaticCorpus::builtin();
        for topic in corpus.topics() {
            for question in corpus.lookup(&topic) {
                assert!(question.hint().is_some());
                assert_eq!(question.topic(), &topic);
            }
        }
        let water = &corpus.lookup(&Topic::new("science"))[0];
        assert_eq!(water.correct_option(), "H2O");
    }

    #[test]
    fn test_unknown_topic_is_empty() {
        assert!(StaticCorpus::builtin().lookup(&Topic::new("opera")).is_empty());
    }

    #[test]
    fn test_merge_adds_and_replaces_topics() {
        let mut corpus = StaticCorpus::builtin();
        let added = corpus
            .merge_str(
                r#"
[[topic]]
name = "space"

[[topic.questions]]
question = "Closest star to Earth?"
answers = ["Sirius", "The Sun", "Vega", "Polaris"]
correctAnswerIndex = 1

[[topic]]
name = "math"

[[topic.questions]]
question = "3 x 3?"
answers = ["6", "9", "12", "33"]
correctAnswerIndex = 1
hint = "Square of three"
"#,
            )
            .unwrap();

        assert_eq!(added, 2);
        assert_eq!(corpus.lookup(&Topic::new("space")).len(), 1);
        let math = corpus.lookup(&Topic::new("math"));
        assert_eq!(math.len(), 1);
        assert_eq!(math[0].prompt(), "3 x 3?");
    }

    #[test]
    fn test_malformed_entries_dropped() {
        let mut corpus = StaticCorpus::builtin();
        let added = corpus
            .merge_str(
                r#"
[[topic]]
name = "science"

[[topic.questions]]
question = "Only three options"
answers = ["a", "b", "c"]
correctAnswerIndex = 0

[[topic.questions]]
question = "Index out of range"
answers = ["a", "b", "c", "d"]
correctAnswerIndex = 7
"#,
            )
            .unwrap();

        assert_eq!(added, 0);
        // Nothing valid, so the built-in topic survives
        assert_eq!(corpus.lookup(&Topic::new("science")).len(), 2);
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let mut corpus = StaticCorpus::builtin();
        assert!(matches!(
            corpus.merge_str("[[topic]\nname ="),
            Err(CorpusError::Parse(_))
        ));
    }

    #[test]
    fn test_from_config_reads_file_and_default_topic() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[[topic]]\nname = \"space\"\n\n[[topic.questions]]\nquestion = \"Red planet?\"\n\
             answers = [\"Mars\", \"Venus\", \"Earth\", \"Mercury\"]\ncorrectAnswerIndex = 0"
        )
        .unwrap();

        let corpus = StaticCorpus::from_config(&FileCorpusConfig {
            path: Some(file.path().to_path_buf()),
            default_topic: "space".to_string(),
        });
        assert_eq!(corpus.default_topic(), Topic::new("space"));
        assert_eq!(corpus.lookup(&Topic::new("space")).len(), 1);
    }

    #[test]
    fn test_from_config_ignores_missing_file() {
        let corpus = StaticCorpus::from_config(&FileCorpusConfig {
            path: Some("/nonexistent/trivia/corpus.toml".into()),
            default_topic: "general".to_string(),
        });
        assert_eq!(corpus.topics().len(), 4);
    }
}
