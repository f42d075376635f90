//! Round pacing.

pub mod phase_timer;

pub use phase_timer::{PhaseTimer, TimerEvent, TimerPhase};
