//! Raw-mode terminal session.
//!
//! A [`RawModeSession`] holds the terminal exclusively (`&mut`) for one
//! capture, so a second session cannot be opened on the same terminal while
//! one is alive. The session is the only record of whether raw mode is on.
//!
//! Release is idempotent: the first call restores the saved mode, later
//! calls return `Ok(())` without touching the terminal. Dropping an active
//! session releases it, which covers early returns and panics.

use crate::error::CaptureError;
use crate::terminal::{PriorMode, Terminal};

/// Exclusive raw-mode access to a terminal.
#[derive(Debug)]
pub struct RawModeSession<'t, T: Terminal> {
    terminal: &'t mut T,
    prior: Option<PriorMode>,
}

impl<'t, T: Terminal> RawModeSession<'t, T> {
    /// Switch `terminal` into raw mode.
    ///
    /// Fails with [`CaptureError::NotATerminal`] without touching the mode
    /// when the terminal is not interactive.
    pub fn acquire(terminal: &'t mut T) -> Result<Self, CaptureError> {
        if !terminal.is_interactive() {
            return Err(CaptureError::NotATerminal);
        }

        let prior = terminal
            .enter_raw_mode()
            .map_err(|source| CaptureError::TerminalModeFailure {
                action: "enable raw mode",
                source,
            })?;
        tracing::trace!(was_raw = prior.was_raw, "raw mode acquired");

        Ok(Self {
            terminal,
            prior: Some(prior),
        })
    }

    /// Whether this session still owes a restore.
    pub fn is_active(&self) -> bool {
        self.prior.is_some()
    }

    /// The terminal this session controls.
    pub fn terminal(&mut self) -> &mut T {
        &mut *self.terminal
    }

    /// Restore the mode saved at acquisition. Safe to call more than once.
    pub fn release(&mut self) -> Result<(), CaptureError> {
        let Some(prior) = self.prior.take() else {
            return Ok(());
        };
        self.terminal
            .restore_mode(prior)
            .map_err(|source| CaptureError::TerminalModeFailure {
                action: "restore terminal mode",
                source,
            })?;
        tracing::trace!("raw mode released");
        Ok(())
    }
}

impl<T: Terminal> Drop for RawModeSession<'_, T> {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            tracing::warn!("{e}");
        }
    }
}
