//! Bounded key polling.
//!
//! Key mapping:
//! - Enter, `\n` and `\r` → [`KeyEvent::Enter`]
//! - Backspace (DEL 0x7F and BS 0x08 / Ctrl-H) and Delete → [`KeyEvent::Backspace`]
//! - Ctrl-C → [`KeyEvent::Interrupt`]
//! - any other printable character, including AltGr (Ctrl+Alt) input → [`KeyEvent::Char`]
//!
//! Everything else (arrows, function keys, other control chords, mouse,
//! resize, focus and paste events) does not decode and is reported as
//! [`KeyEvent::None`], same as no input at all. Key releases are ignored.

use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};

use crate::error::CaptureError;
use crate::session::RawModeSession;
use crate::terminal::Terminal;

/// One decoded keystroke. Produced per poll, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Enter,
    Backspace,
    Char(char),
    Interrupt,
    /// No key arrived within the poll bound, or the input did not decode.
    None,
}

/// Wait at most `max_wait` for one key.
pub fn poll_key<T: Terminal>(
    session: &mut RawModeSession<'_, T>,
    max_wait: Duration,
) -> Result<KeyEvent, CaptureError> {
    let Some(event) = session
        .terminal()
        .poll_event(max_wait)
        .map_err(CaptureError::Input)?
    else {
        return Ok(KeyEvent::None);
    };

    match decode_event(&event) {
        Ok(key) => Ok(key),
        Err(e) => {
            tracing::trace!("ignoring input: {e}");
            Ok(KeyEvent::None)
        }
    }
}

/// Map one terminal event to a key.
pub fn decode_event(event: &Event) -> Result<KeyEvent, CaptureError> {
    let Event::Key(key) = event else {
        return Err(CaptureError::Decode(format!("non-key event {event:?}")));
    };

    if key.kind == KeyEventKind::Release {
        return Ok(KeyEvent::None);
    }

    // AltGr arrives as Ctrl+Alt on Windows; those are printable characters.
    let chord = key.modifiers.contains(KeyModifiers::CONTROL)
        && !key.modifiers.contains(KeyModifiers::ALT);
    if chord {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Ok(KeyEvent::Interrupt),
            KeyCode::Char('h') | KeyCode::Char('H') => Ok(KeyEvent::Backspace),
            KeyCode::Char('j') | KeyCode::Char('m') => Ok(KeyEvent::Enter),
            other => Err(CaptureError::Decode(format!("control chord {other:?}"))),
        };
    }

    match key.code {
        KeyCode::Enter | KeyCode::Char('\n') | KeyCode::Char('\r') => Ok(KeyEvent::Enter),
        KeyCode::Backspace | KeyCode::Delete | KeyCode::Char('\x7f') | KeyCode::Char('\x08') => {
            Ok(KeyEvent::Backspace)
        }
        KeyCode::Char(c) if !c.is_control() => Ok(KeyEvent::Char(c)),
        other => Err(CaptureError::Decode(format!("unmapped key {other:?}"))),
    }
}
