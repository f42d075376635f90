//! Combo multiplier table

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// One step of the combo table: streaks of at least `min_streak` score
/// with `multiplier`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComboStep {
    pub min_streak: u32,
    pub multiplier: f64,
}

/// Piecewise step function from streak length to score multiplier.
///
/// Steps are sorted by strictly increasing `min_streak`, the first step
/// starts at 0, and multipliers never decrease. The highest step whose
/// threshold is `<= streak` wins.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComboTable {
    steps: Vec<ComboStep>,
}

impl Default for ComboTable {
    fn default() -> Self {
        Self {
            steps: [(0, 1.0), (2, 1.2), (4, 1.5), (6, 2.0), (8, 2.5), (10, 3.0)]
                .into_iter()
                .map(|(min_streak, multiplier)| ComboStep {
                    min_streak,
                    multiplier,
                })
                .collect(),
        }
    }
}

impl ComboTable {
    pub fn new(steps: impl IntoIterator<Item = (u32, f64)>) -> Result<Self, DomainError> {
        let steps: Vec<ComboStep> = steps
            .into_iter()
            .map(|(min_streak, multiplier)| ComboStep {
                min_streak,
                multiplier,
            })
            .collect();

        let Some(first) = steps.first() else {
            return Err(DomainError::configuration("combo table is empty"));
        };
        if first.min_streak != 0 {
            return Err(DomainError::configuration(
                "combo table must start at a streak of 0",
            ));
        }
        if let Some(bad) = steps
            .iter()
            .find(|s| !s.multiplier.is_finite() || s.multiplier <= 0.0)
        {
            return Err(DomainError::configuration(format!(
                "combo multiplier {} for streak {} must be a positive number",
                bad.multiplier, bad.min_streak
            )));
        }
        for pair in steps.windows(2) {
            if pair[1].min_streak <= pair[0].min_streak {
                return Err(DomainError::configuration(
                    "combo thresholds must be strictly increasing",
                ));
            }
            if pair[1].multiplier < pair[0].multiplier {
                return Err(DomainError::configuration(
                    "combo multipliers must be non-decreasing",
                ));
            }
        }

        Ok(Self { steps })
    }

    pub fn multiplier(&self, streak: u32) -> f64 {
        self.steps
            .iter()
            .rev()
            .find(|s| s.min_streak <= streak)
            .map_or(1.0, |s| s.multiplier)
    }

    pub fn steps(&self) -> &[ComboStep] {
        &self.steps
    }
}
