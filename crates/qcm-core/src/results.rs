//! Per-question outcome records.

use serde::{Deserialize, Serialize};

use crate::model::{AnswerStatus, Question};

/// Sentinel shown in place of an answer when time ran out.
pub const TIMEOUT_SENTINEL: &str = "TIMEOUT";

/// What happened on one question of a quiz run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionOutcome {
    /// 1-based position in the run.
    pub index: usize,
    /// The question text.
    pub prompt: String,
    /// The normalized submitted answer, or `None` on timeout.
    pub submitted: Option<String>,
    /// The normalized expected answer key.
    pub expected_key: String,
    /// Expected answer with option text, for display.
    pub expected_display: String,
    /// Classification of the answer.
    pub status: AnswerStatus,
    /// Question weight, copied from the bank.
    pub weight: f64,
    /// Time spent on the question in milliseconds.
    pub elapsed_ms: u64,
}

impl QuestionOutcome {
    /// Build an outcome for an answered question.
    pub fn answered(index: usize, question: &Question, submitted: String, elapsed_ms: u64) -> Self {
        let status = if question.is_correct(&submitted) {
            AnswerStatus::Correct
        } else {
            AnswerStatus::Wrong
        };
        Self {
            index,
            prompt: question.question.clone(),
            submitted: Some(submitted),
            expected_key: question.expected_key(),
            expected_display: question.expected_display(),
            status,
            weight: question.weight,
            elapsed_ms,
        }
    }

    /// Build an outcome for a question whose time budget expired.
    pub fn timed_out(index: usize, question: &Question, elapsed_ms: u64) -> Self {
        Self {
            index,
            prompt: question.question.clone(),
            submitted: None,
            expected_key: question.expected_key(),
            expected_display: question.expected_display(),
            status: AnswerStatus::Timeout,
            weight: question.weight,
            elapsed_ms,
        }
    }

    /// The submitted answer, or the `TIMEOUT` sentinel.
    pub fn submitted_display(&self) -> &str {
        self.submitted.as_deref().unwrap_or(TIMEOUT_SENTINEL)
    }
}
