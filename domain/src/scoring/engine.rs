//! Score engine - correctness events in, score/combo/lives/grade out.

use super::grade::Grade;
use super::rules::ScoringRules;
use crate::core::error::DomainError;
use serde::Serialize;
use std::time::Duration;

/// Pure state machine over correctness events.
///
/// All counters are mutated only through the `record_*` and
/// [`deduct_score`](Self::deduct_score) methods. Every operation is total.
///
/// `total_score = round(correct × base × combo_multiplier(current_combo))
///              + round(time_bonus) − deductions`, floored at 0.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreEngine {
    #[serde(skip)]
    rules: ScoringRules,
    correct_answers: u32,
    wrong_answers: u32,
    questions_seen: u32,
    current_combo: u32,
    max_combo: u32,
    total_score: u64,
    time_bonus: f64,
    deducted: u64,
}

impl ScoreEngine {
    pub fn new(rules: ScoringRules) -> Result<Self, DomainError> {
        rules.validate()?;
        Ok(Self {
            rules,
            correct_answers: 0,
            wrong_answers: 0,
            questions_seen: 0,
            current_combo: 0,
            max_combo: 0,
            total_score: 0,
            time_bonus: 0.0,
            deducted: 0,
        })
    }

    /// A fresh engine with the same rules and all counters at zero.
    pub fn fresh(&self) -> Self {
        Self {
            rules: self.rules.clone(),
            correct_answers: 0,
            wrong_answers: 0,
            questions_seen: 0,
            current_combo: 0,
            max_combo: 0,
            total_score: 0,
            time_bonus: 0.0,
            deducted: 0,
        }
    }

    pub fn record_correct(&mut self, remaining_at_answer: Duration) {
        self.correct_answers += 1;
        self.current_combo += 1;
        self.max_combo = self.max_combo.max(self.current_combo);
        self.time_bonus += remaining_at_answer.as_secs_f64() * self.rules.time_bonus_multiplier;
        self.recompute();
    }

    /// Counts a wrong (or timed-out) answer and breaks the combo.
    /// The score itself is not reduced.
    pub fn record_wrong(&mut self) {
        self.wrong_answers += 1;
        self.current_combo = 0;
    }

    pub fn record_seen(&mut self) {
        self.questions_seen += 1;
    }

    /// Charge `amount` points (e.g. for a hint), never going below zero.
    ///
    /// The deduction sticks: later recomputations keep it applied.
    pub fn deduct_score(&mut self, amount: u64) {
        let charged = amount.min(self.total_score);
        self.deducted += charged;
        self.total_score -= charged;
    }

    fn recompute(&mut self) {
        let multiplier = self.combo_multiplier(self.current_combo);
        let base = (f64::from(self.correct_answers)
            * self.rules.base_score_per_question as f64
            * multiplier)
            .round();
        let raw = (base + self.time_bonus.round()).max(0.0) as u64;
        self.total_score = raw.saturating_sub(self.deducted);
    }

    pub fn combo_multiplier(&self, streak: u32) -> f64 {
        self.rules.combo.multiplier(streak)
    }

    pub fn current_multiplier(&self) -> f64 {
        self.combo_multiplier(self.current_combo)
    }

    pub fn is_game_over(&self) -> bool {
        self.wrong_answers >= self.rules.max_wrong_answers
    }

    pub fn remaining_lives(&self) -> u32 {
        self.rules.max_wrong_answers.saturating_sub(self.wrong_answers)
    }

    pub fn grade(&self) -> Grade {
        self.rules.grades.grade_for(self.total_score)
    }

    /// Share of seen questions answered correctly, rounded to a whole percent.
    pub fn accuracy_percent(&self) -> u32 {
        if self.questions_seen == 0 {
            return 0;
        }
        (f64::from(self.correct_answers) / f64::from(self.questions_seen) * 100.0).round() as u32
    }

    pub fn correct_answers(&self) -> u32 {
        self.correct_answers
    }

    pub fn wrong_answers(&self) -> u32 {
        self.wrong_answers
    }

    pub fn questions_seen(&self) -> u32 {
        self.questions_seen
    }

    pub fn current_combo(&self) -> u32 {
        self.current_combo
    }

    pub fn max_combo(&self) -> u32 {
        self.max_combo
    }

    pub fn total_score(&self) -> u64 {
        self.total_score
    }

    pub fn time_bonus(&self) -> f64 {
        self.time_bonus
    }

    pub fn rules(&self) -> &ScoringRules {
        &self.rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::combo::ComboTable;

    fn engine() -> ScoreEngine {
        ScoreEngine::new(ScoringRules::default()).unwrap()
    }

    fn two_step_engine() -> ScoreEngine {
        let rules = ScoringRules::default()
            .with_combo(ComboTable::new([(0, 1.0), (2, 1.2)]).unwrap());
        ScoreEngine::new(rules).unwrap()
    }

    #[test]
    fn test_consecutive_correct_applies_combo() {
        let mut e = two_step_engine();
        e.record_correct(Duration::ZERO);
        assert_eq!(e.total_score(), 1000);
        e.record_correct(Duration::ZERO);
        assert_eq!(e.total_score(), 2400);
        assert_eq!(e.current_combo(), 2);
        assert_eq!(e.max_combo(), 2);
    }

    #[test]
    fn test_time_bonus_added() {
        let mut e = engine();
        e.record_correct(Duration::from_millis(4_250));
        // 1000 + round(4.25 * 10)
        assert_eq!(e.total_score(), 1043);
        assert!((e.time_bonus() - 42.5).abs() < 1e-9);
    }

    #[test]
    fn test_wrong_resets_combo_without_touching_score() {
        let mut e = two_step_engine();
        e.record_correct(Duration::ZERO);
        e.record_correct(Duration::ZERO);
        e.record_wrong();
        assert_eq!(e.current_combo(), 0);
        assert_eq!(e.max_combo(), 2);
        assert_eq!(e.total_score(), 2400);

        e.record_correct(Duration::ZERO);
        assert_eq!(e.total_score(), 3000);
    }

    #[test]
    fn test_three_wrong_answers_end_the_game() {
        let mut e = engine();
        assert_eq!(e.remaining_lives(), 3);
        e.record_wrong();
        e.record_wrong();
        assert!(!e.is_game_over());
        e.record_wrong();
        assert!(e.is_game_over());
        assert_eq!(e.remaining_lives(), 0);
        e.record_wrong();
        assert_eq!(e.remaining_lives(), 0);
    }

    #[test]
    fn test_deduct_score_clamps_at_zero() {
        let mut e = engine();
        e.deduct_score(500);
        assert_eq!(e.total_score(), 0);

        e.record_correct(Duration::ZERO);
        assert_eq!(e.total_score(), 1000);
        e.deduct_score(300);
        assert_eq!(e.total_score(), 700);
        assert_eq!(e.current_combo(), 1);
    }

    #[test]
    fn test_deduction_survives_recompute() {
        let mut e = engine();
        e.record_correct(Duration::ZERO);
        e.deduct_score(500);
        e.record_correct(Duration::ZERO);
        // 2 * 1000 * 1.2 - 500
        assert_eq!(e.total_score(), 1900);
    }

    #[test]
    fn test_grade_follows_total_score() {
        let mut e = engine();
        assert_eq!(e.grade(), Grade::F);
        for _ in 0..4 {
            e.record_correct(Duration::ZERO);
        }
        // 4 * 1000 * 1.5
        assert_eq!(e.total_score(), 6000);
        assert_eq!(e.grade(), Grade::D);
    }

    #[test]
    fn test_accuracy_percent() {
        let mut e = engine();
        assert_eq!(e.accuracy_percent(), 0);
        e.record_seen();
        e.record_correct(Duration::ZERO);
        e.record_seen();
        e.record_wrong();
        e.record_seen();
        e.record_wrong();
        assert_eq!(e.accuracy_percent(), 33);
    }

    #[test]
    fn test_fresh_resets_counters_but_keeps_rules() {
        let mut e = engine().clone();
        e.record_correct(Duration::from_secs(3));
        e.record_wrong();
        let f = e.fresh();
        assert_eq!(f.total_score(), 0);
        assert_eq!(f.wrong_answers(), 0);
        assert_eq!(f.rules(), e.rules());
    }

    #[test]
    fn test_invalid_rules_rejected() {
        let rules = ScoringRules::default().with_max_wrong_answers(0);
        assert!(ScoreEngine::new(rules).is_err());
    }
}
