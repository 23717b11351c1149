//! Terminal backends.
//!
//! [`Terminal`] is the seam between the capture loop and the real console.
//! [`CrosstermTerminal`] is the production backend: crossterm switches modes
//! through termios on Unix and console modes on Windows, so the platform is
//! chosen when the crate is built and the capture loop never branches on it.

use std::io::{self, IsTerminal, Write};
use std::time::Duration;

use crossterm::event::{self, Event};
use crossterm::terminal;

/// Terminal mode captured before switching to raw mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorMode {
    /// Raw mode was already on; restoring must leave it on.
    pub was_raw: bool,
}

/// A console that can be switched into raw mode and polled for input.
pub trait Terminal {
    /// Whether stdin and stdout are attached to an interactive terminal.
    fn is_interactive(&self) -> bool;

    /// Switch to raw mode (no line buffering, no echo) and report the mode
    /// that was active before.
    fn enter_raw_mode(&mut self) -> io::Result<PriorMode>;

    /// Put back the mode recorded by [`Terminal::enter_raw_mode`].
    fn restore_mode(&mut self, prior: PriorMode) -> io::Result<()>;

    /// Wait at most `max_wait` for one input event.
    fn poll_event(&mut self, max_wait: Duration) -> io::Result<Option<Event>>;

    /// Write text to the terminal and flush it.
    fn write_str(&mut self, text: &str) -> io::Result<()>;
}

/// The process's controlling terminal, driven through crossterm.
#[derive(Debug)]
pub struct CrosstermTerminal {
    out: io::Stdout,
}

impl CrosstermTerminal {
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }
}

impl Default for CrosstermTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Terminal for CrosstermTerminal {
    fn is_interactive(&self) -> bool {
        io::stdin().is_terminal() && self.out.is_terminal()
    }

    fn enter_raw_mode(&mut self) -> io::Result<PriorMode> {
        let was_raw = terminal::is_raw_mode_enabled()?;
        if !was_raw {
            terminal::enable_raw_mode()?;
        }
        Ok(PriorMode { was_raw })
    }

    fn restore_mode(&mut self, prior: PriorMode) -> io::Result<()> {
        if prior.was_raw {
            return Ok(());
        }
        terminal::disable_raw_mode()
    }

    fn poll_event(&mut self, max_wait: Duration) -> io::Result<Option<Event>> {
        // Readiness check first so the read below never blocks.
        if event::poll(max_wait)? {
            Ok(Some(event::read()?))
        } else {
            Ok(None)
        }
    }

    fn write_str(&mut self, text: &str) -> io::Result<()> {
        let mut out = self.out.lock();
        out.write_all(text.as_bytes())?;
        out.flush()
    }
}
