//! Console formatting for questions, reveals and final results

use colored::Colorize;
use trivia_application::HighScoreRecord;
use trivia_domain::{AnswerOutcome, ConfigIssue, FinalStats, Grade, Question, Severity, Topic};

/// Formats session output for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Question header, prompt and numbered options.
    pub fn question(question: &Question, number: u32) -> String {
        let mut output = String::new();
        output.push_str(&Self::section_header(&format!(
            "Question {} [{}]",
            number,
            question.topic()
        )));
        output.push_str(&format!("{}\n", question.prompt().bold()));
        for (i, option) in question.options().iter().enumerate() {
            output.push_str(&format!("  {} {}\n", format!("{})", i + 1).cyan(), option));
        }
        output.push_str(&format!("{}", "Answer 1-4, h = hint, p = pause, q = quit".dimmed()));
        output
    }

    pub fn reveal(question: &Question, outcome: &AnswerOutcome, lives: u32) -> String {
        let answer = format!(
            "{}) {}",
            outcome.correct_index() + 1,
            question.correct_option()
        );
        let verdict = match outcome {
            AnswerOutcome::Correct { .. } => format!("{} {}", "Correct!".green().bold(), answer),
            AnswerOutcome::Wrong { .. } => {
                format!("{} The answer was {}", "Wrong!".red().bold(), answer)
            }
            AnswerOutcome::TimedOut { .. } => {
                format!("{} The answer was {}", "Time's up!".yellow().bold(), answer)
            }
        };
        format!("{}  {}", verdict, Self::lives(lives))
    }

    pub fn lives(lives: u32) -> String {
        format!("Lives: {}", "♥".repeat(lives as usize).red())
    }

    pub fn score(total: u64) -> String {
        format!("{} {}", "Score:".cyan().bold(), total)
    }

    pub fn combo(combo: u32, multiplier: f64) -> String {
        format!(
            "{} {} in a row (x{:.1})",
            "Combo!".magenta().bold(),
            combo,
            multiplier
        )
    }

    pub fn hint(hint: &str) -> String {
        format!("{} {}", "Hint:".yellow().bold(), hint)
    }

    pub fn awaiting(topic: &Topic) -> String {
        format!("{}", format!("Fetching questions on {}...", topic).dimmed())
    }

    pub fn unavailable(topic: &Topic) -> String {
        format!(
            "{} No questions available for {}. Press r to retry or q to quit.",
            "!".red().bold(),
            topic
        )
    }

    /// End-of-session summary.
    pub fn final_stats(stats: &FinalStats, record: &HighScoreRecord) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Game Over"));
        output.push('\n');
        output.push_str(&format!("{} {}\n", "Topic:".cyan().bold(), stats.topic));
        output.push_str(&format!(
            "{} {}  {} {}\n",
            "Score:".cyan().bold(),
            stats.total_score,
            "Grade:".cyan().bold(),
            Self::grade(stats.grade)
        ));
        output.push_str(&format!(
            "{} {}/{} ({}%)  {} {}  {} {}\n",
            "Correct:".cyan().bold(),
            stats.correct_answers,
            stats.questions_seen,
            stats.accuracy_percent,
            "Wrong:".cyan().bold(),
            stats.wrong_answers,
            "Best combo:".cyan().bold(),
            stats.max_combo
        ));

        if stats.new_high_score {
            output.push_str(&format!("\n{}\n", "New high score!".green().bold()));
        } else if record.score > 0 {
            output.push_str(&format!("\n{}\n", Self::high_score(record)));
        }

        output.push_str(&Self::footer());
        output
    }

    pub fn high_score(record: &HighScoreRecord) -> String {
        if record.score == 0 {
            return "No high score yet.".to_string();
        }
        let mut line = format!("{} {}", "High score:".cyan().bold(), record.score);
        if let Some(grade) = record.grade {
            line.push_str(&format!(" ({})", Self::grade(grade)));
        }
        if let Some(date) = record.date {
            line.push_str(&format!(" on {}", date.format("%Y-%m-%d")));
        }
        line
    }

    pub fn topics(topics: &[Topic], default_topic: &Topic) -> String {
        let mut output = format!("{}\n", "Fallback topics:".cyan().bold());
        for topic in topics {
            if topic == default_topic {
                output.push_str(&format!("  * {} {}\n", topic, "(default)".dimmed()));
            } else {
                output.push_str(&format!("  * {}\n", topic));
            }
        }
        output.push_str(&format!(
            "{}",
            "Any other topic works when the generator is available.".dimmed()
        ));
        output
    }

    pub fn config_issue(issue: &ConfigIssue) -> String {
        match issue.severity {
            Severity::Error => format!("{} {}", "config error:".red().bold(), issue),
            Severity::Warning => format!("{} {}", "config warning:".yellow().bold(), issue),
        }
    }

    fn grade(grade: Grade) -> String {
        let letter = grade.as_str();
        match grade {
            Grade::S | Grade::A => letter.green().bold().to_string(),
            Grade::B | Grade::C => letter.yellow().bold().to_string(),
            Grade::D | Grade::F => letter.red().bold().to_string(),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(48);
        format!("{}\n{:^48}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(48).cyan())
    }
}
