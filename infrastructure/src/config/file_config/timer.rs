//! Phase timer configuration from TOML (`[timer]` section)

use super::ConfigValidationError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use trivia_domain::timer::phase_timer::{DEFAULT_ACTIVE_DURATION, DEFAULT_REVEAL_DURATION};

/// Answer and reveal window lengths, in seconds.
///
/// ```toml
/// [timer]
/// answer_secs = 10.0
/// reveal_secs = 3.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTimerConfig {
    pub answer_secs: f64,
    pub reveal_secs: f64,
}

impl Default for FileTimerConfig {
    fn default() -> Self {
        Self {
            answer_secs: DEFAULT_ACTIVE_DURATION.as_secs_f64(),
            reveal_secs: DEFAULT_REVEAL_DURATION.as_secs_f64(),
        }
    }
}

impl FileTimerConfig {
    /// Returns `(answer, reveal)` durations.
    pub fn to_durations(&self) -> Result<(Duration, Duration), ConfigValidationError> {
        Ok((
            positive_secs("timer.answer_secs", self.answer_secs)?,
            positive_secs("timer.reveal_secs", self.reveal_secs)?,
        ))
    }
}

fn positive_secs(key: &str, secs: f64) -> Result<Duration, ConfigValidationError> {
    match Duration::try_from_secs_f64(secs) {
        Ok(duration) if !duration.is_zero() => Ok(duration),
        _ => Err(ConfigValidationError::invalid(
            key,
            format!("must be a positive number of seconds, got {}", secs),
        )),
    }
}
