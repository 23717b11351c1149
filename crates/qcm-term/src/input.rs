//! Console implementation of the quiz loop's `AnswerInput`.

use std::io::{self, BufRead, StdinLock};
use std::time::{Duration, Instant};

use anyhow::Context;

use qcm_core::error::QuizError;
use qcm_core::traits::{AnswerInput, TimedResponse};

use crate::capture::{CaptureOutcome, TimedCapture};
use crate::error::CaptureError;
use crate::terminal::{CrosstermTerminal, Terminal};

/// Reads answers from a terminal: timed captures when a deadline is given,
/// plain lines otherwise.
///
/// If a timed capture finds that input is not interactive, the time limit
/// is dropped for the rest of the run and answers are read as plain lines.
pub struct ConsoleInput<T: Terminal, R: BufRead> {
    terminal: T,
    reader: R,
    capture: TimedCapture,
    timed_available: bool,
}

impl ConsoleInput<CrosstermTerminal, StdinLock<'static>> {
    /// Console input on the process's stdin/stdout.
    pub fn stdio(poll_interval: Duration) -> Self {
        Self::new(
            CrosstermTerminal::new(),
            io::stdin().lock(),
            TimedCapture::new(poll_interval),
        )
    }
}

impl<T: Terminal, R: BufRead> ConsoleInput<T, R> {
    pub fn new(terminal: T, reader: R, capture: TimedCapture) -> Self {
        Self {
            terminal,
            reader,
            capture,
            timed_available: true,
        }
    }

    /// Whether timed captures are still in use.
    pub fn is_timed(&self) -> bool {
        self.timed_available
    }

    pub fn terminal(&self) -> &T {
        &self.terminal
    }
}

impl<T: Terminal, R: BufRead> AnswerInput for ConsoleInput<T, R> {
    fn read_line(&mut self, prompt: &str) -> anyhow::Result<Option<String>> {
        self.terminal
            .write_str(prompt)
            .context("failed to write prompt")?;

        let mut line = String::new();
        let read = self
            .reader
            .read_line(&mut line)
            .context("failed to read answer")?;
        if read == 0 {
            return Ok(None);
        }

        // Piped input is not echoed; end the prompt line ourselves.
        if !self.terminal.is_interactive() {
            self.terminal.write_str("\n").context("failed to write prompt")?;
        }

        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn read_before(&mut self, prompt: &str, deadline: Instant) -> anyhow::Result<TimedResponse> {
        if self.timed_available {
            match self.capture.run(&mut self.terminal, prompt, deadline) {
                Ok(CaptureOutcome::Completed(text)) => return Ok(TimedResponse::Answered(text)),
                Ok(CaptureOutcome::TimedOut) => return Ok(TimedResponse::TimedOut),
                Err(CaptureError::Interrupted) => return Err(QuizError::Interrupted.into()),
                Err(e) if e.wants_line_fallback() => {
                    tracing::warn!("{e}; time limit disabled, reading plain lines");
                    self.timed_available = false;
                }
                Err(e) => return Err(e.into()),
            }
        }

        Ok(match self.read_line(prompt)? {
            Some(line) => TimedResponse::Answered(line),
            None => TimedResponse::Closed,
        })
    }
}
