//! Session controller - the pacing state machine of one play session.
//!
//! Composes the [`PhaseTimer`], the [`SessionState`] (and its score engine)
//! and the observer list. The controller is synchronous: every input returns
//! a [`SessionAction`] telling the host what to do next, which keeps all
//! mutation on one thread. [`SessionRuntime`](super::session_runtime::SessionRuntime)
//! is the async host that drives it.
//!
//! ```text
//! start_session ──► AwaitingSupply ──on_supplied──► Active ──submit / timeout──► Reveal
//!                        ▲                            ▲                           │
//!                        │ queue empty                │ next queued question      │ AdvanceRequested
//!                        └────────────────────────────┴───────────────────────────┤
//!                                                                                 ▼
//!                                                                  Terminated (game over / quit)
//! ```

use super::high_score::HighScoreBook;
use super::supply_questions::SupplyError;
use crate::config::SessionParams;
use crate::ports::session_observer::SessionObserver;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use trivia_domain::{
    AnswerOutcome, DomainError, FinalStats, PhaseTimer, Question, ScoreEngine, SessionPhase,
    SessionState, TimerEvent, Topic,
};

/// What the host must do after an input.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionAction {
    None,
    /// Ask the supplier for `count` questions and feed the result back
    /// through [`SessionController::on_supplied`] with the same `session_id`.
    RequestSupply {
        topic: Topic,
        count: usize,
        session_id: u64,
    },
    /// The session ended; no further input is accepted.
    GameOver(FinalStats),
}

pub struct SessionController {
    params: SessionParams,
    timer: PhaseTimer,
    /// Template engine; every session starts from a fresh copy.
    score_template: ScoreEngine,
    state: Option<SessionState>,
    /// Bumped by every `start_session`; supply results tagged with an
    /// older id are dropped.
    session_id: u64,
    supply_pending: bool,
    paused: bool,
    observers: Vec<Arc<dyn SessionObserver>>,
    high_scores: Option<HighScoreBook>,
}

impl SessionController {
    pub fn new(params: SessionParams) -> Result<Self, DomainError> {
        params.validate()?;
        let timer = params.build_timer()?;
        let score_template = params.build_score_engine()?;
        Ok(Self {
            params,
            timer,
            score_template,
            state: None,
            session_id: 0,
            supply_pending: false,
            paused: false,
            observers: Vec::new(),
            high_scores: None,
        })
    }

    pub fn with_high_scores(mut self, book: HighScoreBook) -> Self {
        self.high_scores = Some(book);
        self
    }

    pub fn subscribe(&mut self, observer: Arc<dyn SessionObserver>) {
        self.observers.push(observer);
    }

    // ==================== Host inputs ====================

    /// Begin a new session on `topic` (the default topic if empty).
    pub fn start_session(&mut self, topic: Topic) -> SessionAction {
        let topic = if topic.is_empty() {
            self.params.default_topic.clone()
        } else {
            topic
        };
        info!("Starting session on '{}'", topic);

        self.session_id += 1;
        self.state = Some(SessionState::new(topic, self.score_template.fresh()));
        self.timer.stop();
        self.supply_pending = false;
        self.paused = false;

        self.emit(|o| o.on_score_changed(0));
        self.request_supply()
    }

    /// Feed back the outcome of a [`SessionAction::RequestSupply`].
    ///
    /// Results issued for an earlier session are ignored.
    pub fn on_supplied(
        &mut self,
        session_id: u64,
        result: Result<Vec<Question>, SupplyError>,
    ) -> SessionAction {
        if session_id != self.session_id {
            debug!(
                "Dropping supply result for session {} (current {})",
                session_id, self.session_id
            );
            return SessionAction::None;
        }
        self.supply_pending = false;
        let Some(state) = self.state.as_mut() else {
            return SessionAction::None;
        };
        if state.phase().is_terminal() {
            return SessionAction::None;
        }

        match result {
            Ok(questions) if !questions.is_empty() => {
                debug!("Received {} question(s)", questions.len());
                state.enqueue(questions);
                if state.phase() == SessionPhase::AwaitingSupply {
                    return self.present_next();
                }
                SessionAction::None
            }
            Ok(_) => self.supply_failed("supplier returned no questions".to_string()),
            Err(e) => self.supply_failed(e.to_string()),
        }
    }

    /// Submit the player's choice. Negative values mean "no answer".
    ///
    /// Only the first submission per question counts.
    pub fn submit_answer(&mut self, choice: i32) -> SessionAction {
        if self.paused || self.phase() != Some(SessionPhase::Active) {
            return SessionAction::None;
        }
        let remaining = self.timer.remaining();
        let Some(state) = self.state.as_mut() else {
            return SessionAction::None;
        };
        let Some(outcome) = state.resolve_answer(choice, remaining) else {
            return SessionAction::None;
        };

        self.timer.cancel();
        self.reveal(outcome);
        SessionAction::None
    }

    /// Advance the phase timer by `dt`.
    pub fn tick(&mut self, dt: Duration) -> SessionAction {
        if self.paused {
            return SessionAction::None;
        }
        match self.phase() {
            None | Some(SessionPhase::Terminated) => return SessionAction::None,
            Some(_) => {}
        }

        let event = self.timer.tick(dt);
        if self.timer.is_running() {
            let (phase, fill) = (self.timer.phase(), self.timer.fill_fraction());
            self.emit(|o| o.on_phase_changed(phase, fill));
        }

        match event {
            Some(TimerEvent::RevealStarted) => {
                if let Some(outcome) = self.state.as_mut().and_then(SessionState::resolve_timeout) {
                    debug!("Answer window closed without a submission");
                    self.reveal(outcome);
                }
                SessionAction::None
            }
            Some(TimerEvent::AdvanceRequested) => self.advance(),
            None => SessionAction::None,
        }
    }

    pub fn pause(&mut self) {
        if self.paused || !self.is_live() {
            return;
        }
        self.paused = true;
        self.timer.pause();
        self.emit(|o| o.on_paused(true));
    }

    pub fn resume(&mut self) {
        if !self.paused {
            return;
        }
        self.paused = false;
        self.timer.resume();
        self.emit(|o| o.on_paused(false));
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Re-issue the supply request after every tier came back empty.
    pub fn retry_supply(&mut self) -> SessionAction {
        if self.phase() != Some(SessionPhase::AwaitingSupply) {
            return SessionAction::None;
        }
        self.request_supply()
    }

    /// Reveal the current question's hint, charging the hint cost once.
    pub fn request_hint(&mut self) -> Option<String> {
        if self.paused || self.phase() != Some(SessionPhase::Active) {
            return None;
        }
        let cost = self.params.scoring.hint_cost;
        let state = self.state.as_mut()?;
        let before = state.score().total_score();
        let hint = state.take_hint(cost)?;
        let after = state.score().total_score();

        self.emit(|o| o.on_hint_revealed(&hint));
        if after != before {
            self.emit(|o| o.on_score_changed(after));
        }
        Some(hint)
    }

    /// End the session now.
    pub fn quit(&mut self) -> SessionAction {
        if !self.is_live() {
            return SessionAction::None;
        }
        info!("Session ended by player");
        self.terminate()
    }

    // ==================== Accessors ====================

    pub fn phase(&self) -> Option<SessionPhase> {
        self.state.as_ref().map(SessionState::phase)
    }

    pub fn state(&self) -> Option<&SessionState> {
        self.state.as_ref()
    }

    pub fn timer(&self) -> &PhaseTimer {
        &self.timer
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn session_id(&self) -> u64 {
        self.session_id
    }

    pub fn supply_pending(&self) -> bool {
        self.supply_pending
    }

    pub fn params(&self) -> &SessionParams {
        &self.params
    }

    // ==================== Transitions ====================

    fn is_live(&self) -> bool {
        matches!(self.phase(), Some(phase) if !phase.is_terminal())
    }

    fn request_supply(&mut self) -> SessionAction {
        let Some(state) = self.state.as_mut() else {
            return SessionAction::None;
        };
        state.set_phase(SessionPhase::AwaitingSupply);
        if self.supply_pending {
            return SessionAction::None;
        }

        self.supply_pending = true;
        let topic = state.topic().clone();
        debug!("Requesting {} question(s) for '{}'", self.params.batch_size, topic);
        self.emit(|o| o.on_awaiting_supply(&topic));
        SessionAction::RequestSupply {
            topic,
            count: self.params.batch_size,
            session_id: self.session_id,
        }
    }

    fn supply_failed(&mut self, reason: String) -> SessionAction {
        let Some(state) = self.state.as_ref() else {
            return SessionAction::None;
        };
        if state.phase() != SessionPhase::AwaitingSupply {
            return SessionAction::None;
        }
        let topic = state.topic().clone();
        warn!("No questions available for '{}': {}", topic, reason);
        self.emit(|o| o.on_supply_unavailable(&topic));
        SessionAction::None
    }

    fn present_next(&mut self) -> SessionAction {
        let Some(state) = self.state.as_mut() else {
            return SessionAction::None;
        };
        let Some(question) = state.advance().cloned() else {
            self.timer.stop();
            return self.request_supply();
        };

        state.set_phase(SessionPhase::Active);
        self.timer.start();
        self.emit(|o| o.on_question_ready(&question));
        SessionAction::None
    }

    fn reveal(&mut self, outcome: AnswerOutcome) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        state.set_phase(SessionPhase::Reveal);

        let score = state.score();
        let (total, combo, multiplier, lives) = (
            score.total_score(),
            score.current_combo(),
            score.current_multiplier(),
            score.remaining_lives(),
        );
        let Some(question) = state.current().cloned() else {
            return;
        };

        self.emit(|o| o.on_answer_revealed(&question, &outcome, lives));
        self.emit(|o| o.on_score_changed(total));
        self.emit(|o| o.on_combo_changed(combo, multiplier));
    }

    fn advance(&mut self) -> SessionAction {
        let game_over = self
            .state
            .as_ref()
            .is_some_and(|s| s.score().is_game_over());
        if game_over {
            return self.terminate();
        }
        self.present_next()
    }

    fn terminate(&mut self) -> SessionAction {
        self.timer.stop();
        self.paused = false;
        let Some(state) = self.state.as_mut() else {
            return SessionAction::None;
        };
        state.set_phase(SessionPhase::Terminated);

        let new_high_score = match &self.high_scores {
            Some(book) => {
                let today = chrono::Local::now().date_naive();
                book.record(&state.final_stats(false), today)
                    .unwrap_or_else(|e| {
                        warn!("Failed to save high score: {}", e);
                        false
                    })
            }
            None => false,
        };

        let stats = state.final_stats(new_high_score);
        info!(
            "Game over: score {} grade {} ({}/{} correct)",
            stats.total_score, stats.grade, stats.correct_answers, stats.questions_seen
        );
        self.emit(|o| o.on_game_over(&stats));
        SessionAction::GameOver(stats)
    }

    fn emit(&self, f: impl Fn(&dyn SessionObserver)) {
        for observer in &self.observers {
            f(observer.as_ref());
        }
    }
}
