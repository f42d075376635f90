//! JSONL file writer for session events.
//!
//! Each observed event is serialized as a single JSON line with a `type`
//! field and `timestamp`, appended to the file via a buffered writer.

use serde_json::{Value, json};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;
use trivia_application::SessionObserver;
use trivia_domain::{AnswerOutcome, FinalStats, Question, TimerPhase, Topic};

/// Session event log that writes one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes on `Drop`. Per-tick
/// timer updates are collapsed: only phase changes are written.
pub struct JsonlSessionLogger {
    writer: Mutex<BufWriter<File>>,
    last_phase: Mutex<Option<TimerPhase>>,
    path: PathBuf,
}

impl JsonlSessionLogger {
    /// Create a new logger writing to the given path.
    ///
    /// Creates the file (and parent directories) if they don't exist.
    /// Returns `None` if the file cannot be created.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create event log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match File::create(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not create event log file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            last_phase: Mutex::new(None),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn log(&self, event_type: &str, payload: Value) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let record = if let Value::Object(mut map) = payload {
            map.insert("type".to_string(), Value::String(event_type.to_string()));
            map.insert("timestamp".to_string(), Value::String(timestamp));
            Value::Object(map)
        } else {
            json!({
                "type": event_type,
                "timestamp": timestamp,
                "data": payload,
            })
        };

        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

impl SessionObserver for JsonlSessionLogger {
    fn on_question_ready(&self, question: &Question) {
        self.log(
            "question_ready",
            json!({
                "topic": question.topic(),
                "question": question.prompt(),
                "answers": question.options(),
            }),
        );
    }

    fn on_score_changed(&self, total_score: u64) {
        self.log("score_changed", json!({ "total_score": total_score }));
    }

    fn on_combo_changed(&self, combo: u32, multiplier: f64) {
        self.log(
            "combo_changed",
            json!({ "combo": combo, "multiplier": multiplier }),
        );
    }

    fn on_phase_changed(&self, phase: TimerPhase, _fill_fraction: f32) {
        let Ok(mut last) = self.last_phase.lock() else {
            return;
        };
        if *last == Some(phase) {
            return;
        }
        *last = Some(phase);
        drop(last);
        self.log("phase_changed", json!({ "phase": phase.as_str() }));
    }

    fn on_answer_revealed(&self, question: &Question, outcome: &AnswerOutcome, lives: u32) {
        // A new question starts a fresh active phase.
        if let Ok(mut last) = self.last_phase.lock() {
            *last = None;
        }
        self.log(
            "answer_revealed",
            json!({
                "question": question.prompt(),
                "outcome": outcome,
                "correct_answer": question.correct_option(),
                "lives": lives,
            }),
        );
    }

    fn on_awaiting_supply(&self, topic: &Topic) {
        self.log("awaiting_supply", json!({ "topic": topic }));
    }

    fn on_supply_unavailable(&self, topic: &Topic) {
        self.log("supply_unavailable", json!({ "topic": topic }));
    }

    fn on_hint_revealed(&self, hint: &str) {
        self.log("hint_revealed", json!({ "hint": hint }));
    }

    fn on_paused(&self, paused: bool) {
        self.log("paused", json!({ "paused": paused }));
    }

    fn on_game_over(&self, stats: &FinalStats) {
        self.log("game_over", json!(stats));
    }
}

impl Drop for JsonlSessionLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}
