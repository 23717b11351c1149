//! Input seam between the quiz loop and the terminal.
//!
//! The quiz loop only knows how to ask for an answer; `qcm-term` implements
//! [`AnswerInput`] on top of a real terminal, and tests use scripted inputs.

use std::time::Instant;

/// Result of a deadline-bounded read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimedResponse {
    /// The user pressed Enter; raw text, not yet normalized.
    Answered(String),
    /// The deadline passed first.
    TimedOut,
    /// Input ended before an answer arrived.
    Closed,
}

/// Source of user answers.
pub trait AnswerInput {
    /// Blocking read of one line after printing `prompt`.
    ///
    /// Returns `Ok(None)` when input is exhausted.
    fn read_line(&mut self, prompt: &str) -> anyhow::Result<Option<String>>;

    /// Read one answer, giving up at `deadline`.
    fn read_before(&mut self, prompt: &str, deadline: Instant) -> anyhow::Result<TimedResponse>;
}
