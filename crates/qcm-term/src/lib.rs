//! qcm-term — Timed single-line answer capture.
//!
//! A capture puts the terminal into raw mode, redraws one status line
//! (`prompt`, seconds left, the answer typed so far) on every tick, polls
//! for a key with a short bound, and stops on Enter or when the deadline
//! passes. The terminal mode is restored on every exit path.
//!
//! The pieces, leaves first:
//! - [`session::RawModeSession`] owns raw mode for one capture.
//! - [`keys::poll_key`] waits at most a bounded time for one key.
//! - [`buffer::AnswerBuffer`] holds the in-progress answer.
//! - [`capture::TimedCapture`] runs the countdown loop.
//! - [`signals::termination_watch`] defers SIGTERM/SIGHUP while a capture
//!   holds raw mode.
//!
//! [`input::ConsoleInput`] adapts all of this to the quiz loop's
//! `AnswerInput` trait.

pub mod buffer;
pub mod capture;
pub mod error;
pub mod fake;
pub mod input;
pub mod keys;
pub mod session;
pub mod signals;
pub mod terminal;

pub use buffer::AnswerBuffer;
pub use capture::{CaptureOutcome, TimedCapture};
pub use error::CaptureError;
pub use input::ConsoleInput;
pub use keys::KeyEvent;
pub use session::RawModeSession;
pub use terminal::{CrosstermTerminal, PriorMode, Terminal};
