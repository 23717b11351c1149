//! Raw and weighted scoring of a quiz run.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::AnswerStatus;
use crate::results::QuestionOutcome;

/// Overall judgement of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Perfect,
    Passed,
    KeepPracticing,
}

impl Verdict {
    /// The closing line printed after a run.
    pub fn message(&self) -> &'static str {
        match self {
            Verdict::Perfect => "Perfect Score! Excellent work.",
            Verdict::Passed => "Great job! You passed.",
            Verdict::KeepPracticing => "Keep practicing!",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Perfect => write!(f, "perfect"),
            Verdict::Passed => write!(f, "passed"),
            Verdict::KeepPracticing => write!(f, "keep practicing"),
        }
    }
}

/// Aggregate score for a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub total: usize,
    pub correct: usize,
    pub wrong: usize,
    pub timed_out: usize,
    /// Number of correct answers.
    pub raw_score: usize,
    /// Number of questions asked.
    pub max_raw_score: usize,
    /// Correct answers as a fraction of questions asked (0.0–1.0).
    pub percentage: f64,
    /// Weight of correct answers over total weight, scaled to 0–100.
    pub weighted_score: f64,
    pub verdict: Verdict,
}

impl ScoreSummary {
    /// Score a sequence of outcomes against a pass threshold (0.0–1.0).
    pub fn compute(outcomes: &[QuestionOutcome], pass_threshold: f64) -> Self {
        let total = outcomes.len();
        let count = |status: AnswerStatus| outcomes.iter().filter(|o| o.status == status).count();
        let correct = count(AnswerStatus::Correct);
        let wrong = count(AnswerStatus::Wrong);
        let timed_out = count(AnswerStatus::Timeout);

        let percentage = if total == 0 {
            0.0
        } else {
            correct as f64 / total as f64
        };

        let total_weight: f64 = outcomes.iter().map(|o| o.weight).sum();
        let correct_weight: f64 = outcomes
            .iter()
            .filter(|o| o.status == AnswerStatus::Correct)
            .map(|o| o.weight)
            .sum();
        let weighted_score = if total_weight > 0.0 {
            correct_weight / total_weight * 100.0
        } else {
            0.0
        };

        Self {
            total,
            correct,
            wrong,
            timed_out,
            raw_score: correct,
            max_raw_score: total,
            percentage,
            weighted_score,
            verdict: verdict_for(correct, total, pass_threshold),
        }
    }
}

/// Judge a run. An empty run never passes.
pub fn verdict_for(correct: usize, total: usize, pass_threshold: f64) -> Verdict {
    if total == 0 {
        return Verdict::KeepPracticing;
    }
    if correct == total {
        return Verdict::Perfect;
    }
    if correct as f64 / total as f64 >= pass_threshold {
        Verdict::Passed
    } else {
        Verdict::KeepPracticing
    }
}
