//! Countdown bar for the answer and reveal windows

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use trivia_domain::TimerPhase;

const BAR_LENGTH: u64 = 1000;

/// Draws the remaining time of the current phase as a shrinking bar.
///
/// One bar per phase: a phase change finishes the old bar and starts a
/// new one. Console lines printed through [`PhaseProgress::println`] do not
/// tear the bar.
pub struct PhaseProgress {
    current: Mutex<Option<(TimerPhase, ProgressBar)>>,
    enabled: bool,
}

impl PhaseProgress {
    pub fn new() -> Self {
        Self {
            current: Mutex::new(None),
            enabled: true,
        }
    }

    /// Never draws; lines are printed directly.
    pub fn hidden() -> Self {
        Self {
            current: Mutex::new(None),
            enabled: false,
        }
    }

    fn style(phase: TimerPhase) -> ProgressStyle {
        let template = match phase {
            TimerPhase::Active => "{prefix:.bold.cyan} [{bar:40.green/red}]",
            TimerPhase::Reveal => "{prefix:.bold.dim} [{bar:40.dim}]",
        };
        ProgressStyle::default_bar()
            .template(template)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ")
    }

    fn prefix(phase: TimerPhase) -> &'static str {
        match phase {
            TimerPhase::Active => "Time",
            TimerPhase::Reveal => "Next",
        }
    }

    /// Show `fill_fraction` (1.0 = full window left) for `phase`.
    pub fn update(&self, phase: TimerPhase, fill_fraction: f32) {
        if !self.enabled {
            return;
        }
        let Ok(mut current) = self.current.lock() else {
            return;
        };

        let same_phase = matches!(current.as_ref(), Some((p, _)) if *p == phase);
        if !same_phase {
            if let Some((_, old)) = current.take() {
                old.finish_and_clear();
            }
            let bar = ProgressBar::new(BAR_LENGTH);
            bar.set_style(Self::style(phase));
            bar.set_prefix(Self::prefix(phase));
            *current = Some((phase, bar));
        }

        if let Some((_, bar)) = current.as_ref() {
            let position = (fill_fraction.clamp(0.0, 1.0) * BAR_LENGTH as f32).round() as u64;
            bar.set_position(position);
        }
    }

    /// Remove the bar, e.g. while waiting for questions.
    pub fn clear(&self) {
        if let Ok(mut current) = self.current.lock()
            && let Some((_, bar)) = current.take()
        {
            bar.finish_and_clear();
        }
    }

    /// Print a line above the bar.
    pub fn println(&self, line: &str) {
        match self.current.lock() {
            Ok(current) => match current.as_ref() {
                Some((_, bar)) => bar.suspend(|| println!("{}", line)),
                None => println!("{}", line),
            },
            Err(_) => println!("{}", line),
        }
    }

    pub fn is_drawing(&self) -> bool {
        self.current.lock().map(|c| c.is_some()).unwrap_or(false)
    }
}

impl Default for PhaseProgress {
    fn default() -> Self {
        Self::new()
    }
}

/// Short pause banner.
pub fn paused_banner(paused: bool) -> String {
    if paused {
        format!("{} (p to resume)", "-- Paused --".yellow().bold())
    } else {
        format!("{}", "-- Resumed --".green())
    }
}
