//! Capture error types.

use std::io;

use thiserror::Error;

/// Errors that can occur while capturing a timed answer.
///
/// Running out of time is not an error; see
/// [`CaptureOutcome::TimedOut`](crate::capture::CaptureOutcome::TimedOut).
#[derive(Debug, Error)]
pub enum CaptureError {
    /// Stdin or stdout is not an interactive terminal (e.g. redirected).
    /// The caller should fall back to plain line input.
    #[error("standard input is not an interactive terminal")]
    NotATerminal,

    /// The platform refused to query or switch terminal modes.
    #[error("failed to {action}: {source}")]
    TerminalModeFailure {
        action: &'static str,
        #[source]
        source: io::Error,
    },

    /// An input event could not be mapped to a key. The poller swallows
    /// these and reports no key.
    #[error("undecodable input: {0}")]
    Decode(String),

    /// Reading input events failed.
    #[error("failed to read terminal input: {0}")]
    Input(#[source] io::Error),

    /// Drawing the status line failed.
    #[error("failed to draw status line: {0}")]
    Render(#[source] io::Error),

    /// The user pressed Ctrl-C during the capture.
    #[error("capture interrupted")]
    Interrupted,
}

impl CaptureError {
    /// Returns `true` if the caller should retry with plain line input.
    pub fn wants_line_fallback(&self) -> bool {
        matches!(self, CaptureError::NotATerminal)
    }
}
