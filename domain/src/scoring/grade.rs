//! Letter grades and their score thresholds

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Letter grade, ordered from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    F,
    D,
    C,
    B,
    A,
    S,
}

impl Grade {
    /// All grades in ascending order.
    pub const ALL: [Grade; 6] = [Grade::F, Grade::D, Grade::C, Grade::B, Grade::A, Grade::S];

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::F => "F",
            Grade::D => "D",
            Grade::C => "C",
            Grade::B => "B",
            Grade::A => "A",
            Grade::S => "S",
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Grade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "F" => Ok(Grade::F),
            "D" => Ok(Grade::D),
            "C" => Ok(Grade::C),
            "B" => Ok(Grade::B),
            "A" => Ok(Grade::A),
            "S" => Ok(Grade::S),
            other => Err(format!("unknown grade '{}'", other)),
        }
    }
}

/// Minimum total score for each grade, indexed in [`Grade::ALL`] order.
///
/// The table is exhaustive from 0 (grade `F` starts at 0) and strictly
/// increasing, so every score maps to exactly one grade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GradeTable {
    thresholds: [u64; 6],
}

impl Default for GradeTable {
    fn default() -> Self {
        Self {
            thresholds: [0, 5_000, 10_000, 15_000, 20_000, 30_000],
        }
    }
}

impl GradeTable {
    pub fn new(thresholds: [u64; 6]) -> Result<Self, DomainError> {
        if thresholds[0] != 0 {
            return Err(DomainError::configuration(
                "grade thresholds must start at 0",
            ));
        }
        if thresholds.windows(2).any(|w| w[1] <= w[0]) {
            return Err(DomainError::configuration(
                "grade thresholds must be strictly increasing",
            ));
        }
        Ok(Self { thresholds })
    }

    pub fn grade_for(&self, score: u64) -> Grade {
        Grade::ALL
            .iter()
            .zip(self.thresholds.iter())
            .rev()
            .find(|(_, min)| score >= **min)
            .map_or(Grade::F, |(grade, _)| *grade)
    }

    pub fn threshold(&self, grade: Grade) -> u64 {
        self.thresholds[grade as usize]
    }
}
