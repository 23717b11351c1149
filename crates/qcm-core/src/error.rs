//! Quiz loop error types.
//!
//! Defined here so the CLI can downcast an `anyhow::Error` and pick an exit
//! code without string matching.

use thiserror::Error;

/// Errors that end a quiz run early.
#[derive(Debug, Error)]
pub enum QuizError {
    /// The question bank has no questions to ask.
    #[error("question bank '{0}' has no questions")]
    EmptyBank(String),

    /// Standard input closed before every question was answered.
    #[error("input closed after {answered} of {total} questions")]
    InputClosed { answered: usize, total: usize },

    /// The user interrupted the quiz (Ctrl-C).
    #[error("quiz interrupted by user")]
    Interrupted,
}

impl QuizError {
    /// Returns `true` if the user asked to stop, as opposed to a failure.
    pub fn is_user_abort(&self) -> bool {
        matches!(self, QuizError::Interrupted)
    }
}
