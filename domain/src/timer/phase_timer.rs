//! Two-phase countdown pacing each round.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default length of the answering window.
pub const DEFAULT_ACTIVE_DURATION: Duration = Duration::from_secs(10);
/// Default length of the result display window.
pub const DEFAULT_REVEAL_DURATION: Duration = Duration::from_secs(3);

/// Phase of the round timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerPhase {
    /// Answer window - the player may choose an option
    Active,
    /// Result display window
    Reveal,
}

impl TimerPhase {
    pub fn as_str(&self) -> &str {
        match self {
            TimerPhase::Active => "active",
            TimerPhase::Reveal => "reveal",
        }
    }
}

impl std::fmt::Display for TimerPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transition raised by [`PhaseTimer::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// `Active → Reveal`: the answer window closed (by timeout or cancel).
    RevealStarted,
    /// `Reveal → Active`: the next question should be loaded now.
    AdvanceRequested,
}

/// Deterministic countdown alternating `Active` and `Reveal` phases.
///
/// The timer is idle until [`start`](Self::start) is called and has no
/// opinion on frame rate: the host drives it with [`tick`](Self::tick).
/// At most one phase transition happens per tick.
#[derive(Debug, Clone)]
pub struct PhaseTimer {
    active_duration: Duration,
    reveal_duration: Duration,
    phase: TimerPhase,
    remaining: Duration,
    running: bool,
    paused: bool,
    advance_pending: bool,
}

impl Default for PhaseTimer {
    fn default() -> Self {
        Self {
            active_duration: DEFAULT_ACTIVE_DURATION,
            reveal_duration: DEFAULT_REVEAL_DURATION,
            phase: TimerPhase::Active,
            remaining: DEFAULT_ACTIVE_DURATION,
            running: false,
            paused: false,
            advance_pending: false,
        }
    }
}

impl PhaseTimer {
    /// Create an idle timer. Both durations must be non-zero.
    pub fn new(active_duration: Duration, reveal_duration: Duration) -> Result<Self, DomainError> {
        if active_duration.is_zero() {
            return Err(DomainError::configuration(
                "active phase duration must be greater than zero",
            ));
        }
        if reveal_duration.is_zero() {
            return Err(DomainError::configuration(
                "reveal phase duration must be greater than zero",
            ));
        }
        Ok(Self {
            active_duration,
            reveal_duration,
            remaining: active_duration,
            ..Default::default()
        })
    }

    /// Reset to a full `Active` phase and begin ticking.
    ///
    /// Clears any pending advance request and any pause.
    pub fn start(&mut self) {
        self.phase = TimerPhase::Active;
        self.remaining = self.active_duration;
        self.running = true;
        self.paused = false;
        self.advance_pending = false;
    }

    /// Return to idle. Remaining time is reset to a full `Active` phase.
    pub fn stop(&mut self) {
        self.running = false;
        self.paused = false;
        self.phase = TimerPhase::Active;
        self.remaining = self.active_duration;
    }

    /// Force the current phase to end; the transition happens on the next tick.
    pub fn cancel(&mut self) {
        self.remaining = Duration::ZERO;
    }

    pub fn pause(&mut self) {
        if self.running {
            self.paused = true;
        }
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Advance the countdown by `dt`.
    pub fn tick(&mut self, dt: Duration) -> Option<TimerEvent> {
        if !self.running || self.paused {
            return None;
        }

        self.remaining = self.remaining.saturating_sub(dt);
        if !self.remaining.is_zero() {
            return None;
        }

        match self.phase {
            TimerPhase::Active => {
                self.phase = TimerPhase::Reveal;
                self.remaining = self.reveal_duration;
                Some(TimerEvent::RevealStarted)
            }
            TimerPhase::Reveal => {
                self.phase = TimerPhase::Active;
                self.remaining = self.active_duration;
                self.advance_pending = true;
                Some(TimerEvent::AdvanceRequested)
            }
        }
    }

    /// Host convenience taking seconds; negative or non-finite values count as zero.
    pub fn tick_seconds(&mut self, dt: f64) -> Option<TimerEvent> {
        let dt = if dt.is_finite() && dt > 0.0 {
            Duration::try_from_secs_f64(dt).unwrap_or(Duration::MAX)
        } else {
            Duration::ZERO
        };
        self.tick(dt)
    }

    /// `remaining / phase_duration`, in `0.0..=1.0`.
    pub fn fill_fraction(&self) -> f32 {
        let total = self.phase_duration().as_secs_f32();
        if total <= 0.0 {
            return 0.0;
        }
        (self.remaining.as_secs_f32() / total).clamp(0.0, 1.0)
    }

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub fn phase_duration(&self) -> Duration {
        match self.phase {
            TimerPhase::Active => self.active_duration,
            TimerPhase::Reveal => self.reveal_duration,
        }
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    pub fn active_duration(&self) -> Duration {
        self.active_duration
    }

    pub fn reveal_duration(&self) -> Duration {
        self.reveal_duration
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Whether a `Reveal → Active` transition happened since the last `start()`.
    pub fn advance_pending(&self) -> bool {
        self.advance_pending
    }
}
