//! Console presenter: renders session events to the terminal.

use super::console::ConsoleFormatter;
use crate::progress::reporter::{PhaseProgress, paused_banner};
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use trivia_application::SessionObserver;
use trivia_domain::{AnswerOutcome, FinalStats, Question, TimerPhase, Topic};

/// [`SessionObserver`] that prints questions, reveals and score changes,
/// with a countdown bar for the running phase.
pub struct ConsolePresenter {
    progress: PhaseProgress,
    question_number: AtomicU32,
    last_score: AtomicU64,
}

impl ConsolePresenter {
    pub fn new(show_progress: bool) -> Self {
        Self {
            progress: if show_progress {
                PhaseProgress::new()
            } else {
                PhaseProgress::hidden()
            },
            question_number: AtomicU32::new(0),
            last_score: AtomicU64::new(0),
        }
    }

    fn print(&self, text: &str) {
        self.progress.println(text);
    }
}

impl SessionObserver for ConsolePresenter {
    fn on_question_ready(&self, question: &Question) {
        self.progress.clear();
        let number = self.question_number.fetch_add(1, Ordering::Relaxed) + 1;
        self.print(&ConsoleFormatter::question(question, number));
    }

    fn on_score_changed(&self, total_score: u64) {
        if self.last_score.swap(total_score, Ordering::Relaxed) != total_score {
            self.print(&ConsoleFormatter::score(total_score));
        }
    }

    fn on_combo_changed(&self, combo: u32, multiplier: f64) {
        if combo >= 2 {
            self.print(&ConsoleFormatter::combo(combo, multiplier));
        }
    }

    fn on_phase_changed(&self, phase: TimerPhase, fill_fraction: f32) {
        self.progress.update(phase, fill_fraction);
    }

    fn on_answer_revealed(&self, question: &Question, outcome: &AnswerOutcome, lives: u32) {
        self.print(&ConsoleFormatter::reveal(question, outcome, lives));
    }

    fn on_awaiting_supply(&self, topic: &Topic) {
        self.progress.clear();
        self.print(&ConsoleFormatter::awaiting(topic));
    }

    fn on_supply_unavailable(&self, topic: &Topic) {
        self.progress.clear();
        self.print(&ConsoleFormatter::unavailable(topic));
    }

    fn on_hint_revealed(&self, hint: &str) {
        self.print(&ConsoleFormatter::hint(hint));
    }

    fn on_paused(&self, paused: bool) {
        self.print(&paused_banner(paused));
    }

    fn on_game_over(&self, _stats: &FinalStats) {
        // The host prints the summary together with the stored record.
        self.progress.clear();
    }
}
