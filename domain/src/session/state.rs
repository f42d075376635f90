//! Per-session state owned by the session controller.

use crate::core::question::Question;
use crate::core::topic::Topic;
use crate::scoring::{Grade, ScoreEngine};
use serde::Serialize;
use std::collections::VecDeque;
use std::time::Duration;

/// Where a session currently stands.
///
/// ```text
/// AwaitingSupply ──► Active ──► Reveal ──► Active | AwaitingSupply | Terminated
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    AwaitingSupply,
    Active,
    Reveal,
    /// Absorbing: nothing is accepted once here.
    Terminated,
}

impl SessionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionPhase::AwaitingSupply => "awaiting_supply",
            SessionPhase::Active => "active",
            SessionPhase::Reveal => "reveal",
            SessionPhase::Terminated => "terminated",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionPhase::Terminated)
    }
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a question was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnswerOutcome {
    Correct { chosen: usize },
    Wrong { chosen: i32, correct_index: usize },
    /// The answer window ran out with no submission.
    TimedOut { correct_index: usize },
}

impl AnswerOutcome {
    pub fn is_correct(&self) -> bool {
        matches!(self, AnswerOutcome::Correct { .. })
    }

    pub fn correct_index(&self) -> usize {
        match *self {
            AnswerOutcome::Correct { chosen } => chosen,
            AnswerOutcome::Wrong { correct_index, .. }
            | AnswerOutcome::TimedOut { correct_index } => correct_index,
        }
    }
}

/// Summary handed to the host when a session ends.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinalStats {
    pub topic: Topic,
    pub total_score: u64,
    pub correct_answers: u32,
    pub wrong_answers: u32,
    pub questions_seen: u32,
    pub max_combo: u32,
    pub grade: Grade,
    pub accuracy_percent: u32,
    pub new_high_score: bool,
}

/// Mutable state of one play session.
///
/// Holds the question being asked, the locally queued questions and the
/// score engine. Answers are resolved here; pacing lives in the controller.
#[derive(Debug, Clone)]
pub struct SessionState {
    topic: Topic,
    phase: SessionPhase,
    current: Option<Question>,
    queue: VecDeque<Question>,
    answered: bool,
    hint_used: bool,
    score: ScoreEngine,
}

impl SessionState {
    /// A new session starts out waiting for its first batch.
    pub fn new(topic: Topic, score: ScoreEngine) -> Self {
        Self {
            topic,
            phase: SessionPhase::AwaitingSupply,
            current: None,
            queue: VecDeque::new(),
            answered: false,
            hint_used: false,
            score,
        }
    }

    pub fn enqueue(&mut self, questions: impl IntoIterator<Item = Question>) {
        self.queue.extend(questions);
    }

    /// Move the next queued question into place. Returns `None` (and clears
    /// the current question) when the queue is empty.
    pub fn advance(&mut self) -> Option<&Question> {
        self.current = self.queue.pop_front();
        self.answered = false;
        self.hint_used = false;
        self.current.as_ref()
    }

    /// Resolve a submitted choice against the current question.
    ///
    /// Returns `None` if there is no question or it was already resolved.
    pub fn resolve_answer(
        &mut self,
        choice: i32,
        remaining: Duration,
    ) -> Option<AnswerOutcome> {
        let question = self.current.as_ref().filter(|_| !self.answered)?;
        let correct_index = question.correct_index();
        let outcome = if question.is_correct(choice) {
            AnswerOutcome::Correct {
                chosen: correct_index,
            }
        } else {
            AnswerOutcome::Wrong {
                chosen: choice,
                correct_index,
            }
        };

        self.answered = true;
        self.score.record_seen();
        if outcome.is_correct() {
            self.score.record_correct(remaining);
        } else {
            self.score.record_wrong();
        }
        Some(outcome)
    }

    /// Resolve the current question as unanswered.
    ///
    /// Scored exactly like a wrong submission.
    pub fn resolve_timeout(&mut self) -> Option<AnswerOutcome> {
        let question = self.current.as_ref().filter(|_| !self.answered)?;
        let correct_index = question.correct_index();
        self.answered = true;
        self.score.record_seen();
        self.score.record_wrong();
        Some(AnswerOutcome::TimedOut { correct_index })
    }

    /// Reveal the current hint, charging `cost` the first time per question.
    ///
    /// Returns `None` when there is nothing to reveal: no question, already
    /// answered, or the question carries no hint.
    pub fn take_hint(&mut self, cost: u64) -> Option<String> {
        let hint = self
            .current
            .as_ref()
            .filter(|_| !self.answered)?
            .hint()?
            .to_string();
        if !self.hint_used {
            self.hint_used = true;
            self.score.deduct_score(cost);
        }
        Some(hint)
    }

    pub fn final_stats(&self, new_high_score: bool) -> FinalStats {
        FinalStats {
            topic: self.topic.clone(),
            total_score: self.score.total_score(),
            correct_answers: self.score.correct_answers(),
            wrong_answers: self.score.wrong_answers(),
            questions_seen: self.score.questions_seen(),
            max_combo: self.score.max_combo(),
            grade: self.score.grade(),
            accuracy_percent: self.score.accuracy_percent(),
            new_high_score,
        }
    }

    pub fn set_phase(&mut self, phase: SessionPhase) {
        self.phase = phase;
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn topic(&self) -> &Topic {
        &self.topic
    }

    pub fn current(&self) -> Option<&Question> {
        self.current.as_ref()
    }

    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    pub fn is_answered(&self) -> bool {
        self.answered
    }

    pub fn hint_used(&self) -> bool {
        self.hint_used
    }

    pub fn score(&self) -> &ScoreEngine {
        &self.score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::ScoringRules;

    fn question(prompt: &str, correct: usize, hint: Option<&str>) -> Question {
        Question::new(
            prompt,
            ["a", "b", "c", "d"].map(String::from),
            correct,
            hint.map(String::from),
            Topic::new("science"),
        )
        .unwrap()
    }

    fn state() -> SessionState {
        SessionState::new(
            Topic::new("science"),
            ScoreEngine::new(ScoringRules::default()).unwrap(),
        )
    }

    #[test]
    fn test_starts_awaiting_supply() {
        let s = state();
        assert_eq!(s.phase(), SessionPhase::AwaitingSupply);
        assert!(s.current().is_none());
        assert_eq!(s.queued(), 0);
    }

    #[test]
    fn test_advance_pops_in_order() {
        let mut s = state();
        s.enqueue([question("q1", 0, None), question("q2", 1, None)]);
        assert_eq!(s.advance().map(|q| q.prompt().to_string()), Some("q1".into()));
        assert_eq!(s.advance().map(|q| q.prompt().to_string()), Some("q2".into()));
        assert!(s.advance().is_none());
        assert!(s.current().is_none());
    }

    #[test]
    fn test_answer_resolves_once() {
        let mut s = state();
        s.enqueue([question("q1", 2, None)]);
        s.advance();

        let outcome = s.resolve_answer(2, Duration::from_secs(5)).unwrap();
        assert!(outcome.is_correct());
        assert_eq!(s.score().total_score(), 1050);
        assert_eq!(s.score().questions_seen(), 1);

        assert!(s.resolve_answer(2, Duration::from_secs(5)).is_none());
        assert!(s.resolve_timeout().is_none());
        assert_eq!(s.score().questions_seen(), 1);
    }

    #[test]
    fn test_wrong_and_timeout_score_identically() {
        let mut wrong = state();
        wrong.enqueue([question("q1", 0, None)]);
        wrong.advance();
        let outcome = wrong.resolve_answer(-1, Duration::ZERO).unwrap();
        assert_eq!(
            outcome,
            AnswerOutcome::Wrong {
                chosen: -1,
                correct_index: 0
            }
        );

        let mut timed_out = state();
        timed_out.enqueue([question("q1", 0, None)]);
        timed_out.advance();
        let outcome = timed_out.resolve_timeout().unwrap();
        assert_eq!(outcome, AnswerOutcome::TimedOut { correct_index: 0 });

        for s in [&wrong, &timed_out] {
            assert_eq!(s.score().wrong_answers(), 1);
            assert_eq!(s.score().questions_seen(), 1);
            assert_eq!(s.score().current_combo(), 0);
        }
    }

    #[test]
    fn test_hint_charged_once_per_question() {
        let mut s = state();
        s.enqueue([question("q1", 0, Some("think small")), question("q2", 0, Some("again"))]);
        s.advance();
        s.resolve_answer(0, Duration::ZERO);
        s.advance();

        assert_eq!(s.take_hint(500).as_deref(), Some("again"));
        assert_eq!(s.score().total_score(), 500);
        assert_eq!(s.take_hint(500).as_deref(), Some("again"));
        assert_eq!(s.score().total_score(), 500);
        assert!(s.hint_used());
    }

    #[test]
    fn test_no_hint_no_charge() {
        let mut s = state();
        s.enqueue([question("q1", 0, None)]);
        s.advance();
        assert!(s.take_hint(500).is_none());
        assert!(!s.hint_used());
    }

    #[test]
    fn test_final_stats() {
        let mut s = state();
        s.enqueue([question("q1", 0, None), question("q2", 0, None)]);
        s.advance();
        s.resolve_answer(0, Duration::ZERO);
        s.advance();
        s.resolve_timeout();

        let stats = s.final_stats(true);
        assert_eq!(stats.total_score, 1000);
        assert_eq!(stats.correct_answers, 1);
        assert_eq!(stats.wrong_answers, 1);
        assert_eq!(stats.questions_seen, 2);
        assert_eq!(stats.accuracy_percent, 50);
        assert_eq!(stats.grade, Grade::F);
        assert!(stats.new_high_score);
    }
}
