//! Scoring configuration from TOML (`[scoring]` section)
//!
//! ```toml
//! [scoring]
//! base_score_per_question = 1000
//! time_bonus_multiplier = 10.0
//! max_wrong_answers = 3
//! hint_cost = 500
//! combo = [[0, 1.0], [2, 1.2], [4, 1.5], [6, 2.0], [8, 2.5], [10, 3.0]]
//!
//! [scoring.grades]
//! F = 0
//! D = 5000
//! C = 10000
//! B = 15000
//! A = 20000
//! S = 30000
//! ```

use super::ConfigValidationError;
use serde::{Deserialize, Serialize};
use trivia_domain::{ComboTable, Grade, GradeTable, ScoringRules};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileScoringConfig {
    pub base_score_per_question: u64,
    /// Points per remaining second at the moment of a correct answer.
    pub time_bonus_multiplier: f64,
    /// Lives: wrong answers (and timeouts) allowed before game over.
    pub max_wrong_answers: u32,
    pub hint_cost: u64,
    /// `[min_streak, multiplier]` pairs.
    pub combo: Vec<(u32, f64)>,
    pub grades: FileGradeThresholds,
}

/// Minimum total score per grade letter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGradeThresholds {
    #[serde(rename = "F")]
    pub f: u64,
    #[serde(rename = "D")]
    pub d: u64,
    #[serde(rename = "C")]
    pub c: u64,
    #[serde(rename = "B")]
    pub b: u64,
    #[serde(rename = "A")]
    pub a: u64,
    #[serde(rename = "S")]
    pub s: u64,
}

impl Default for FileGradeThresholds {
    fn default() -> Self {
        let table = GradeTable::default();
        Self {
            f: table.threshold(Grade::F),
            d: table.threshold(Grade::D),
            c: table.threshold(Grade::C),
            b: table.threshold(Grade::B),
            a: table.threshold(Grade::A),
            s: table.threshold(Grade::S),
        }
    }
}

impl FileGradeThresholds {
    fn as_array(&self) -> [u64; 6] {
        [self.f, self.d, self.c, self.b, self.a, self.s]
    }
}

impl Default for FileScoringConfig {
    fn default() -> Self {
        let rules = ScoringRules::default();
        Self {
            base_score_per_question: rules.base_score_per_question,
            time_bonus_multiplier: rules.time_bonus_multiplier,
            max_wrong_answers: rules.max_wrong_answers,
            hint_cost: rules.hint_cost,
            combo: rules
                .combo
                .steps()
                .iter()
                .map(|step| (step.min_streak, step.multiplier))
                .collect(),
            grades: FileGradeThresholds::default(),
        }
    }
}

impl FileScoringConfig {
    pub fn to_scoring_rules(&self) -> Result<ScoringRules, ConfigValidationError> {
        let combo = ComboTable::new(self.combo.iter().copied())
            .map_err(|e| ConfigValidationError::from_domain("scoring.combo", e))?;
        let grades = GradeTable::new(self.grades.as_array())
            .map_err(|e| ConfigValidationError::from_domain("scoring.grades", e))?;

        let rules = ScoringRules::default()
            .with_base_score(self.base_score_per_question)
            .with_time_bonus_multiplier(self.time_bonus_multiplier)
            .with_max_wrong_answers(self.max_wrong_answers)
            .with_hint_cost(self.hint_cost)
            .with_combo(combo)
            .with_grades(grades);
        rules
            .validate()
            .map_err(|e| ConfigValidationError::from_domain("scoring", e))?;
        Ok(rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scoring_config_default_matches_rules() {
        let rules = FileScoringConfig::default().to_scoring_rules().unwrap();
        assert_eq!(rules, ScoringRules::default());
    }

    #[test]
    fn test_scoring_config_deserialize() {
        let toml_str = r#"
[scoring]
hint_cost = 250
combo = [[0, 1], [3, 2.0]]

[scoring.grades]
S = 50000
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        let rules = config.scoring.to_scoring_rules().unwrap();

        assert_eq!(rules.hint_cost, 250);
        assert_eq!(rules.combo.multiplier(2), 1.0);
        assert_eq!(rules.combo.multiplier(3), 2.0);
        assert_eq!(rules.grades.threshold(Grade::S), 50_000);
        assert_eq!(rules.grades.threshold(Grade::A), 20_000);
    }

    #[test]
    fn test_combo_not_starting_at_zero_rejected() {
        let config = FileScoringConfig {
            combo: vec![(1, 1.0), (2, 1.5)],
            ..Default::default()
        };
        let err = config.to_scoring_rules().unwrap_err();
        assert_eq!(err.key(), "scoring.combo");
    }

    #[test]
    fn test_decreasing_combo_rejected() {
        let config = FileScoringConfig {
            combo: vec![(0, 2.0), (2, 1.5)],
            ..Default::default()
        };
        assert!(config.to_scoring_rules().is_err());
    }

    #[test]
    fn test_non_increasing_grades_rejected() {
        let config = FileScoringConfig {
            grades: FileGradeThresholds {
                c: 5_000,
                ..Default::default()
            },
            ..Default::default()
        };
        let err = config.to_scoring_rules().unwrap_err();
        assert_eq!(err.key(), "scoring.grades");
    }

    #[test]
    fn test_zero_lives_rejected() {
        let config = FileScoringConfig {
            max_wrong_answers: 0,
            ..Default::default()
        };
        let err = config.to_scoring_rules().unwrap_err();
        assert_eq!(err.key(), "scoring");
    }
}
