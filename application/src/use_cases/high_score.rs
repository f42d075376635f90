//! High-score bookkeeping on top of the key-value store port.

use crate::ports::score_store::{KeyValueStore, StoreError};
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::info;
use trivia_domain::{FinalStats, Grade};

pub const HIGH_SCORE_KEY: &str = "HighScore";
pub const HIGH_SCORE_DATE_KEY: &str = "HighScoreDate";
pub const HIGH_SCORE_GRADE_KEY: &str = "HighScoreGrade";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// The best session on record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighScoreRecord {
    pub score: u64,
    pub date: Option<NaiveDate>,
    pub grade: Option<Grade>,
}

/// Reads and updates the persisted high score.
#[derive(Clone)]
pub struct HighScoreBook {
    store: Arc<dyn KeyValueStore>,
}

impl HighScoreBook {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn current(&self) -> HighScoreRecord {
        let score = self.store.get_int(HIGH_SCORE_KEY, 0).max(0) as u64;
        let date = NaiveDate::parse_from_str(&self.store.get_string(HIGH_SCORE_DATE_KEY, ""), DATE_FORMAT).ok();
        let grade = self.store.get_string(HIGH_SCORE_GRADE_KEY, "").parse().ok();
        HighScoreRecord { score, date, grade }
    }

    /// Store `stats` if they beat the current record, then save.
    ///
    /// Returns whether a new record was set.
    pub fn record(&self, stats: &FinalStats, today: NaiveDate) -> Result<bool, StoreError> {
        let best = self.current().score;
        if stats.total_score <= best {
            return Ok(false);
        }

        let score = i64::try_from(stats.total_score).unwrap_or(i64::MAX);
        self.store.set_int(HIGH_SCORE_KEY, score);
        self.store
            .set_string(HIGH_SCORE_DATE_KEY, &today.format(DATE_FORMAT).to_string());
        self.store.set_string(HIGH_SCORE_GRADE_KEY, stats.grade.as_str());
        self.store.save()?;

        info!(
            "New high score {} (previous {}) grade {}",
            stats.total_score, best, stats.grade
        );
        Ok(true)
    }
}
