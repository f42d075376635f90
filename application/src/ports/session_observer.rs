//! Session observer port
//!
//! Host callbacks emitted by the session controller. The core never renders;
//! presenters and loggers implement this trait and subscribe.

use trivia_domain::{AnswerOutcome, FinalStats, Question, TimerPhase, Topic};

/// Receiver of session events.
///
/// All methods default to no-ops so implementations only override what
/// they display or record. Callbacks run on the session's event loop and
/// must not block.
pub trait SessionObserver: Send + Sync {
    fn on_question_ready(&self, _question: &Question) {}

    fn on_score_changed(&self, _total_score: u64) {}

    fn on_combo_changed(&self, _combo: u32, _multiplier: f64) {}

    /// Emitted on every tick while a phase is counting down.
    fn on_phase_changed(&self, _phase: TimerPhase, _fill_fraction: f32) {}

    fn on_answer_revealed(&self, _question: &Question, _outcome: &AnswerOutcome, _lives: u32) {}

    /// The local queue ran dry and a batch was requested.
    fn on_awaiting_supply(&self, _topic: &Topic) {}

    /// Every tier failed; the host may trigger a retry.
    fn on_supply_unavailable(&self, _topic: &Topic) {}

    fn on_hint_revealed(&self, _hint: &str) {}

    fn on_paused(&self, _paused: bool) {}

    fn on_game_over(&self, _stats: &FinalStats) {}
}

/// No-op observer for tests and headless runs.
pub struct NoSessionObserver;

impl SessionObserver for NoSessionObserver {}
