//! Termination signals during a capture.
//!
//! While a capture holds raw mode, SIGTERM and SIGHUP only set a flag that
//! the countdown loop checks on every tick, so the terminal mode is restored
//! on the normal return path. Outside a capture the same signals still end
//! the process right away.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

#[cfg(unix)]
use signal_hook::consts::SIGHUP;
use signal_hook::consts::SIGTERM;

#[cfg(unix)]
const WATCHED: &[i32] = &[SIGTERM, SIGHUP];
#[cfg(not(unix))]
const WATCHED: &[i32] = &[SIGTERM];

/// Flags shared with the installed signal handlers.
#[derive(Debug)]
pub struct SignalWatch {
    /// Set by the handler when a watched signal arrives.
    pending: Arc<AtomicBool>,
    /// While set, a watched signal exits the process immediately.
    idle: Arc<AtomicBool>,
}

impl SignalWatch {
    pub(crate) fn new() -> Self {
        Self {
            pending: Arc::new(AtomicBool::new(false)),
            idle: Arc::new(AtomicBool::new(true)),
        }
    }

    fn install(&self) -> std::io::Result<()> {
        for &signal in WATCHED {
            // Registered first, so an idle process exits before the flag matters.
            signal_hook::flag::register_conditional_shutdown(
                signal,
                128 + signal,
                Arc::clone(&self.idle),
            )?;
            signal_hook::flag::register(signal, Arc::clone(&self.pending))?;
        }
        Ok(())
    }

    /// Start deferring watched signals until the returned guard drops.
    pub fn arm(&self) -> ArmedWatch<'_> {
        self.pending.store(false, Ordering::SeqCst);
        self.idle.store(false, Ordering::SeqCst);
        ArmedWatch { watch: self }
    }

    pub fn is_idle(&self) -> bool {
        self.idle.load(Ordering::SeqCst)
    }
}

/// Deferral of watched signals for the duration of one capture.
#[derive(Debug)]
pub struct ArmedWatch<'w> {
    watch: &'w SignalWatch,
}

impl ArmedWatch<'_> {
    /// The flag the capture loop polls.
    pub fn flag(&self) -> &AtomicBool {
        &self.watch.pending
    }
}

impl Drop for ArmedWatch<'_> {
    fn drop(&mut self) {
        self.watch.idle.store(true, Ordering::SeqCst);
    }
}

/// The process-wide watch, installed on first use.
///
/// Returns `None` if the handlers could not be registered; captures then
/// run without signal deferral.
pub fn termination_watch() -> Option<&'static SignalWatch> {
    static WATCH: OnceLock<Option<SignalWatch>> = OnceLock::new();
    WATCH
        .get_or_init(|| {
            let watch = SignalWatch::new();
            match watch.install() {
                Ok(()) => Some(watch),
                Err(e) => {
                    tracing::warn!("failed to register termination signals: {e}");
                    None
                }
            }
        })
        .as_ref()
}
