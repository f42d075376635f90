//! Scoring rules - the tunable constants of the score engine.

use super::combo::ComboTable;
use super::grade::GradeTable;
use crate::core::error::DomainError;
use serde::Serialize;

/// Scoring configuration.
///
/// | Field | Default |
/// |-------|---------|
/// | `base_score_per_question` | 1000 |
/// | `time_bonus_multiplier` | 10.0 (points per remaining second) |
/// | `max_wrong_answers` | 3 |
/// | `hint_cost` | 500 |
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoringRules {
    pub base_score_per_question: u64,
    pub time_bonus_multiplier: f64,
    pub max_wrong_answers: u32,
    pub hint_cost: u64,
    pub combo: ComboTable,
    pub grades: GradeTable,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            base_score_per_question: 1000,
            time_bonus_multiplier: 10.0,
            max_wrong_answers: 3,
            hint_cost: 500,
            combo: ComboTable::default(),
            grades: GradeTable::default(),
        }
    }
}

impl ScoringRules {
    // ==================== Builder Methods ====================

    pub fn with_base_score(mut self, base: u64) -> Self {
        self.base_score_per_question = base;
        self
    }

    pub fn with_time_bonus_multiplier(mut self, multiplier: f64) -> Self {
        self.time_bonus_multiplier = multiplier;
        self
    }

    pub fn with_max_wrong_answers(mut self, max: u32) -> Self {
        self.max_wrong_answers = max;
        self
    }

    pub fn with_hint_cost(mut self, cost: u64) -> Self {
        self.hint_cost = cost;
        self
    }

    pub fn with_combo(mut self, combo: ComboTable) -> Self {
        self.combo = combo;
        self
    }

    pub fn with_grades(mut self, grades: GradeTable) -> Self {
        self.grades = grades;
        self
    }

    /// Reject rule sets the engine cannot work with.
    ///
    /// Combo and grade tables validate themselves when built.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.max_wrong_answers == 0 {
            return Err(DomainError::configuration(
                "max_wrong_answers must be at least 1",
            ));
        }
        if !self.time_bonus_multiplier.is_finite() || self.time_bonus_multiplier < 0.0 {
            return Err(DomainError::configuration(
                "time_bonus_multiplier must be a non-negative number",
            ));
        }
        Ok(())
    }
}
