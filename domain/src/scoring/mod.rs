//! Scoring: combo multipliers, grades, lives and the score engine.

pub mod combo;
pub mod engine;
pub mod grade;
pub mod rules;

pub use combo::{ComboStep, ComboTable};
pub use engine::ScoreEngine;
pub use grade::{Grade, GradeTable};
pub use rules::ScoringRules;
