//! Session parameters - pacing, scoring and batch sizes.

use std::time::Duration;
use trivia_domain::{
    DomainError, PhaseTimer, ScoreEngine, ScoringRules, Topic,
    timer::phase_timer::{DEFAULT_ACTIVE_DURATION, DEFAULT_REVEAL_DURATION},
};

/// Parameters of one play session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionParams {
    /// How many questions to request from the supplier at a time.
    pub batch_size: usize,
    pub answer_duration: Duration,
    pub reveal_duration: Duration,
    pub scoring: ScoringRules,
    /// Topic played when none is given.
    pub default_topic: Topic,
    /// Topics warmed in the cache at startup.
    pub preload_topics: Vec<Topic>,
    pub preload_count: usize,
}

impl Default for SessionParams {
    fn default() -> Self {
        Self {
            batch_size: 3,
            answer_duration: DEFAULT_ACTIVE_DURATION,
            reveal_duration: DEFAULT_REVEAL_DURATION,
            scoring: ScoringRules::default(),
            default_topic: Topic::new("general"),
            preload_topics: Vec::new(),
            preload_count: 20,
        }
    }
}

impl SessionParams {
    // ==================== Builder Methods ====================

    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size;
        self
    }

    pub fn with_durations(mut self, answer: Duration, reveal: Duration) -> Self {
        self.answer_duration = answer;
        self.reveal_duration = reveal;
        self
    }

    pub fn with_scoring(mut self, scoring: ScoringRules) -> Self {
        self.scoring = scoring;
        self
    }

    pub fn with_default_topic(mut self, topic: impl Into<Topic>) -> Self {
        self.default_topic = topic.into();
        self
    }

    pub fn with_preload(mut self, topics: Vec<Topic>, count: usize) -> Self {
        self.preload_topics = topics;
        self.preload_count = count;
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.batch_size == 0 {
            return Err(DomainError::configuration("batch_size must be at least 1"));
        }
        self.build_timer()?;
        self.scoring.validate()
    }

    pub fn build_timer(&self) -> Result<PhaseTimer, DomainError> {
        PhaseTimer::new(self.answer_duration, self.reveal_duration)
    }

    pub fn build_score_engine(&self) -> Result<ScoreEngine, DomainError> {
        ScoreEngine::new(self.scoring.clone())
    }
}
