//! Play session domain.
//!
//! - [`state::SessionState`]: question queue, current question and score
//! - [`state::SessionPhase`]: where the session stands
//! - [`state::FinalStats`]: summary emitted on game over

pub mod state;

pub use state::{AnswerOutcome, FinalStats, SessionPhase, SessionState};
