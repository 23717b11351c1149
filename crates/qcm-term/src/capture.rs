//! The countdown render loop.
//!
//! Each tick checks the deadline, redraws the status line, polls for one key
//! with a short bound, and applies it. The poll bound doubles as the tick
//! rate, so the countdown keeps refreshing while no key arrives. A
//! termination signal is picked up at the start of the next tick.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use unicode_width::UnicodeWidthStr;

use crate::buffer::AnswerBuffer;
use crate::error::CaptureError;
use crate::keys::{poll_key, KeyEvent};
use crate::session::RawModeSession;
use crate::signals::termination_watch;
use crate::terminal::Terminal;

/// Default upper bound on one key poll.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// How a capture ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// Enter was pressed; the buffer contents, untrimmed.
    Completed(String),
    /// The deadline passed first.
    TimedOut,
}

/// Whole seconds left before `deadline`, truncated.
///
/// 4.9 seconds left shows as 4, and the final fractional second shows as 0
/// until the deadline fires.
pub fn seconds_left(deadline: Instant, now: Instant) -> u64 {
    deadline.saturating_duration_since(now).as_secs()
}

/// The status line text for one tick.
pub fn format_status(prompt: &str, seconds_left: u64, answer: &str) -> String {
    format!("{prompt}{seconds_left}s | {answer}")
}

/// A single terminal line redrawn in place with carriage returns.
///
/// No escape sequences are used: a shorter redraw is padded with spaces over
/// the previous one, then the content is written again so the cursor sits
/// right after it. Widths are display columns, so wide characters are
/// blanked in full.
#[derive(Debug, Default)]
struct StatusLine {
    width: usize,
}

impl StatusLine {
    fn draw<T: Terminal>(&mut self, terminal: &mut T, content: &str) -> io::Result<()> {
        let width = content.width();
        let mut frame = String::with_capacity(content.len() * 2 + 2);
        frame.push('\r');
        frame.push_str(content);
        if width < self.width {
            frame.extend(std::iter::repeat(' ').take(self.width - width));
            frame.push('\r');
            frame.push_str(content);
        }
        self.width = width;
        terminal.write_str(&frame)
    }

    fn clear<T: Terminal>(&mut self, terminal: &mut T) -> io::Result<()> {
        let mut frame = String::with_capacity(self.width + 2);
        frame.push('\r');
        frame.extend(std::iter::repeat(' ').take(self.width));
        frame.push('\r');
        self.width = 0;
        terminal.write_str(&frame)
    }

    /// Keep the line and move to the next one. Raw mode needs the explicit
    /// carriage return.
    fn finish<T: Terminal>(&mut self, terminal: &mut T) -> io::Result<()> {
        self.width = 0;
        terminal.write_str("\r\n")
    }
}

/// Runs timed captures.
#[derive(Debug, Clone)]
pub struct TimedCapture {
    poll_interval: Duration,
}

impl Default for TimedCapture {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL)
    }
}

impl TimedCapture {
    pub fn new(poll_interval: Duration) -> Self {
        Self { poll_interval }
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Capture one answer before `deadline`.
    ///
    /// The terminal is in raw mode only for the duration of this call and
    /// is restored exactly once before it returns. A failed restore is
    /// logged; the outcome is still returned. SIGTERM and SIGHUP received
    /// meanwhile end the capture with [`CaptureError::Interrupted`].
    pub fn run<T: Terminal>(
        &self,
        terminal: &mut T,
        prompt: &str,
        deadline: Instant,
    ) -> Result<CaptureOutcome, CaptureError> {
        match termination_watch() {
            Some(watch) => {
                let armed = watch.arm();
                self.run_until(terminal, prompt, deadline, armed.flag())
            }
            None => self.run_until(terminal, prompt, deadline, &AtomicBool::new(false)),
        }
    }

    /// [`TimedCapture::run`] with an explicit stop flag, checked once per tick.
    pub fn run_until<T: Terminal>(
        &self,
        terminal: &mut T,
        prompt: &str,
        deadline: Instant,
        stop: &AtomicBool,
    ) -> Result<CaptureOutcome, CaptureError> {
        let mut session = RawModeSession::acquire(terminal)?;
        let result = self.drive(&mut session, prompt, deadline, stop);
        if let Err(e) = session.release() {
            tracing::warn!("{e}");
        }
        result
    }

    fn drive<T: Terminal>(
        &self,
        session: &mut RawModeSession<'_, T>,
        prompt: &str,
        deadline: Instant,
        stop: &AtomicBool,
    ) -> Result<CaptureOutcome, CaptureError> {
        let mut buffer = AnswerBuffer::new();
        let mut status = StatusLine::default();

        loop {
            if stop.load(Ordering::SeqCst) {
                if let Err(e) = status.finish(session.terminal()) {
                    tracing::debug!("failed to end status line: {e}");
                }
                tracing::debug!("capture stopped by signal");
                return Err(CaptureError::Interrupted);
            }

            let now = Instant::now();
            let remaining = deadline.saturating_duration_since(now);
            if remaining.is_zero() {
                if let Err(e) = status.clear(session.terminal()) {
                    tracing::debug!("failed to clear status line: {e}");
                }
                tracing::debug!("capture timed out");
                return Ok(CaptureOutcome::TimedOut);
            }

            let line = format_status(prompt, seconds_left(deadline, now), &buffer.snapshot());
            status
                .draw(session.terminal(), &line)
                .map_err(CaptureError::Render)?;

            match poll_key(session, remaining.min(self.poll_interval))? {
                KeyEvent::Enter => {
                    if let Err(e) = status.finish(session.terminal()) {
                        tracing::debug!("failed to end status line: {e}");
                    }
                    return Ok(CaptureOutcome::Completed(buffer.snapshot()));
                }
                KeyEvent::Backspace => {
                    buffer.delete_last();
                }
                KeyEvent::Char(c) => buffer.append(c),
                KeyEvent::Interrupt => {
                    if let Err(e) = status.finish(session.terminal()) {
                        tracing::debug!("failed to end status line: {e}");
                    }
                    return Err(CaptureError::Interrupted);
                }
                KeyEvent::None => {}
            }
        }
    }
}
