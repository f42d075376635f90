//! Domain layer for trivia-rush
//!
//! This crate contains the core game rules: question value objects, the
//! phase timer and the scoring engine. It has no dependencies on
//! infrastructure or presentation concerns, and nothing in it performs I/O.
//!
//! # Core Concepts
//!
//! ## Questions
//!
//! A [`Question`] is an immutable multiple-choice item with exactly four
//! options. Generators produce loosely-typed [`QuestionDraft`]s which are
//! validated into questions one by one; invalid drafts are dropped.
//!
//! ## Pacing
//!
//! The [`PhaseTimer`] alternates an `Active` (answering) phase and a
//! `Reveal` (result display) phase. The host drives it with `tick(dt)`.
//!
//! ## Scoring
//!
//! The [`ScoreEngine`] turns correctness events into a score, a combo
//! multiplier, remaining lives and a letter [`Grade`].

pub mod config;
pub mod core;
pub mod scoring;
pub mod session;
pub mod timer;

// Re-export commonly used types
pub use config::{ConfigIssue, Severity};
pub use core::{
    error::DomainError,
    question::{OPTION_COUNT, Question, QuestionDraft},
    string::preview,
    topic::Topic,
};
pub use scoring::{ComboStep, ComboTable, Grade, GradeTable, ScoreEngine, ScoringRules};
pub use session::{AnswerOutcome, FinalStats, SessionPhase, SessionState};
pub use timer::{PhaseTimer, TimerEvent, TimerPhase};
