//! Scripted port implementations shared by the use case tests.

use crate::ports::fallback_corpus::FallbackCorpus;
use crate::ports::question_generator::{GeneratorError, QuestionGenerator};
use crate::ports::session_observer::SessionObserver;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use trivia_domain::{AnswerOutcome, FinalStats, Question, QuestionDraft, TimerPhase, Topic};

pub fn question(topic: &str, prompt: &str, correct_index: usize) -> Question {
    Question::new(
        prompt,
        ["a", "b", "c", "d"].map(String::from),
        correct_index,
        None,
        Topic::new(topic),
    )
    .unwrap()
}

/// `n` valid drafts named "`topic` question i", correct index `i % 4`.
pub fn drafts(topic: &str, n: usize) -> Vec<QuestionDraft> {
    (0..n)
        .map(|i| {
            QuestionDraft::new(
                format!("{} question {}", topic, i),
                ["a", "b", "c", "d"].map(String::from).to_vec(),
                (i % 4) as i64,
            )
        })
        .collect()
}

enum Behavior {
    Scripted,
    AlwaysFail,
    Hang,
}

/// Generator that replays scripted outcomes and counts calls.
///
/// Once the script runs out every call fails with a connection error.
pub struct ScriptedGenerator {
    script: Mutex<VecDeque<Result<Vec<QuestionDraft>, GeneratorError>>>,
    behavior: Behavior,
    delay: Duration,
    calls: AtomicUsize,
    requested: Mutex<Vec<usize>>,
}

impl ScriptedGenerator {
    pub fn new(script: Vec<Result<Vec<QuestionDraft>, GeneratorError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            behavior: Behavior::Scripted,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            behavior: Behavior::AlwaysFail,
            ..Self::new(Vec::new())
        }
    }

    pub fn hanging() -> Self {
        Self {
            behavior: Behavior::Hang,
            ..Self::new(Vec::new())
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requested_counts(&self) -> Vec<usize> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl QuestionGenerator for ScriptedGenerator {
    async fn generate(
        &self,
        _topic: &Topic,
        count: usize,
    ) -> Result<Vec<QuestionDraft>, GeneratorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().unwrap().push(count);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match self.behavior {
            Behavior::Hang => std::future::pending().await,
            Behavior::AlwaysFail => Err(GeneratorError::Connection("unreachable".into())),
            Behavior::Scripted => self
                .script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(GeneratorError::Connection("script exhausted".into()))),
        }
    }
}

/// In-memory corpus keyed by topic name, default topic "general".
#[derive(Default)]
pub struct MapCorpus {
    topics: HashMap<Topic, Vec<Question>>,
}

impl MapCorpus {
    /// Add `n` questions named "fallback `name` i".
    pub fn with_topic(mut self, name: &str, n: usize) -> Self {
        let questions = (0..n)
            .map(|i| question(name, &format!("fallback {} {}", name, i), 0))
            .collect();
        self.topics.insert(Topic::new(name), questions);
        self
    }
}

impl FallbackCorpus for MapCorpus {
    fn lookup(&self, topic: &Topic) -> Vec<Question> {
        self.topics.get(topic).cloned().unwrap_or_default()
    }

    fn default_topic(&self) -> Topic {
        Topic::new("general")
    }

    fn topics(&self) -> Vec<Topic> {
        let mut topics: Vec<Topic> = self.topics.keys().cloned().collect();
        topics.sort();
        topics
    }
}

/// Observer that records every callback as a short string.
#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<String>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    /// Recorded events excluding the per-tick phase updates.
    pub fn milestones(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter(|e| !e.starts_with("phase:"))
            .collect()
    }

    fn push(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

impl SessionObserver for RecordingObserver {
    fn on_question_ready(&self, question: &Question) {
        self.push(format!("question:{}", question.prompt()));
    }

    fn on_score_changed(&self, total_score: u64) {
        self.push(format!("score:{}", total_score));
    }

    fn on_combo_changed(&self, combo: u32, multiplier: f64) {
        self.push(format!("combo:{}x{}", combo, multiplier));
    }

    fn on_phase_changed(&self, phase: TimerPhase, _fill_fraction: f32) {
        self.push(format!("phase:{}", phase));
    }

    fn on_answer_revealed(&self, _question: &Question, outcome: &AnswerOutcome, lives: u32) {
        let kind = match outcome {
            AnswerOutcome::Correct { .. } => "correct",
            AnswerOutcome::Wrong { .. } => "wrong",
            AnswerOutcome::TimedOut { .. } => "timeout",
        };
        self.push(format!("reveal:{}:lives={}", kind, lives));
    }

    fn on_awaiting_supply(&self, topic: &Topic) {
        self.push(format!("awaiting:{}", topic));
    }

    fn on_supply_unavailable(&self, topic: &Topic) {
        self.push(format!("unavailable:{}", topic));
    }

    fn on_hint_revealed(&self, hint: &str) {
        self.push(format!("hint:{}", hint));
    }

    fn on_paused(&self, paused: bool) {
        self.push(format!("paused:{}", paused));
    }

    fn on_game_over(&self, stats: &FinalStats) {
        self.push(format!("game_over:{}", stats.total_score));
    }
}
