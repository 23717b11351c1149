//! Scripted terminal for testing captures without a real console.

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

use crate::terminal::{PriorMode, Terminal};

/// Build a key press event with no modifiers.
pub fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

/// Build a Ctrl+`c` key press event.
pub fn ctrl(c: char) -> Event {
    Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
}

/// A terminal double that replays queued events and records every call.
///
/// Each queued entry answers one poll: `Some(event)` delivers the event,
/// `None` is a poll that found nothing. Once the queue is empty every poll
/// sleeps for a short slice of its bound and reports nothing.
#[derive(Debug, Default)]
pub struct ScriptedTerminal {
    interactive: bool,
    raw: bool,
    fail_enter: bool,
    fail_restore: bool,
    script: VecDeque<Option<Event>>,
    mode_switches: usize,
    restores: usize,
    waits: Vec<Duration>,
    output: String,
}

impl ScriptedTerminal {
    /// A terminal attached to an interactive session.
    pub fn interactive() -> Self {
        Self {
            interactive: true,
            ..Self::default()
        }
    }

    /// A terminal whose stdin is redirected from a file or pipe.
    pub fn redirected() -> Self {
        Self::default()
    }

    /// Queue one key press per character of `text`.
    pub fn with_keys(mut self, text: &str) -> Self {
        self.script
            .extend(text.chars().map(|c| Some(key(KeyCode::Char(c)))));
        self
    }

    /// Queue an arbitrary event.
    pub fn with_event(mut self, event: Event) -> Self {
        self.script.push_back(Some(event));
        self
    }

    /// Queue `polls` empty polls.
    pub fn with_idle(mut self, polls: usize) -> Self {
        self.script.extend(std::iter::repeat(None).take(polls));
        self
    }

    /// Make entering raw mode fail.
    pub fn failing_enter(mut self) -> Self {
        self.fail_enter = true;
        self
    }

    /// Make restoring the mode fail.
    pub fn failing_restore(mut self) -> Self {
        self.fail_restore = true;
        self
    }

    /// Start out already in raw mode.
    pub fn already_raw(mut self) -> Self {
        self.raw = true;
        self
    }

    pub fn is_raw(&self) -> bool {
        self.raw
    }

    /// Successful and failed calls to `enter_raw_mode`.
    pub fn mode_switches(&self) -> usize {
        self.mode_switches
    }

    /// Successful and failed calls to `restore_mode`.
    pub fn restores(&self) -> usize {
        self.restores
    }

    pub fn polls(&self) -> usize {
        self.waits.len()
    }

    /// The `max_wait` passed to each poll, in order.
    pub fn waits(&self) -> &[Duration] {
        &self.waits
    }

    /// Everything written to the terminal.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// The text visible on the current line after replaying carriage
    /// returns over the output.
    pub fn visible_line(&self) -> String {
        let last = self.output.rsplit('\n').next().unwrap_or_default();
        let mut line: Vec<char> = Vec::new();
        let mut col = 0;
        for c in last.chars() {
            match c {
                '\r' => col = 0,
                c => {
                    if col < line.len() {
                        line[col] = c;
                    } else {
                        line.push(c);
                    }
                    col += 1;
                }
            }
        }
        line.into_iter().collect::<String>().trim_end().to_string()
    }
}

impl Terminal for ScriptedTerminal {
    fn is_interactive(&self) -> bool {
        self.interactive
    }

    fn enter_raw_mode(&mut self) -> io::Result<PriorMode> {
        self.mode_switches += 1;
        if self.fail_enter {
            return Err(io::Error::new(io::ErrorKind::Other, "tcsetattr refused"));
        }
        let prior = PriorMode { was_raw: self.raw };
        self.raw = true;
        Ok(prior)
    }

    fn restore_mode(&mut self, prior: PriorMode) -> io::Result<()> {
        self.restores += 1;
        if self.fail_restore {
            return Err(io::Error::new(io::ErrorKind::Other, "tcsetattr refused"));
        }
        self.raw = prior.was_raw;
        Ok(())
    }

    fn poll_event(&mut self, max_wait: Duration) -> io::Result<Option<Event>> {
        self.waits.push(max_wait);
        match self.script.pop_front() {
            Some(entry) => Ok(entry),
            None => {
                std::thread::sleep(max_wait.min(Duration::from_millis(2)));
                Ok(None)
            }
        }
    }

    fn write_str(&mut self, text: &str) -> io::Result<()> {
        self.output.push_str(text);
        Ok(())
    }
}
