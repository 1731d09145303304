// crates/signals/src/abort.rs
#![allow(unsafe_code)]

//! `abort(3)` that cannot be defeated by the caller.
//!
//! An ignored target is reset to default, a blocked target is unblocked, and a
//! handler that returns only buys one more delivery. The process dies by the
//! target signal or, failing that, through `exit(1)`.

use std::io::{self, Write};
use std::ptr;

use logging::DebugFlag;
use nix::sys::signal::{Signal, raise};
use posix_demos_core::Result;

use crate::disposition::{self, Action, Disposition};
use crate::mask;

/// Terminate the process with `SIGABRT`.
pub fn abort() -> ! {
    abort_with(Signal::SIGABRT)
}

/// Terminate the process with `sig`, overriding an ignore disposition, a
/// blocking mask, or a handler that returns.
///
/// Failures of the disposition and mask calls are not reported; the sequence
/// always ends in process termination.
pub fn abort_with(sig: Signal) -> ! {
    tracing::debug!(target: DebugFlag::Signal.target(), signal = sig.as_str(), "aborting");
    let disposition = reset_if_ignored(sig).unwrap_or(Disposition::Default);
    if disposition == Disposition::Default {
        flush_all();
    }

    let only_target = mask::all_except(sig);
    let _ = mask::set_mask(&only_target);
    let _ = raise(sig);

    // A handler caught the signal and returned.
    flush_all();
    let _ = disposition::set(sig, Action::Default);
    let _ = mask::set_mask(&only_target);
    let _ = raise(sig);

    std::process::exit(1)
}

/// Reset `sig` to its default disposition if it is currently ignored.
///
/// Returns the disposition in effect afterwards.
pub fn reset_if_ignored(sig: Signal) -> Result<Disposition> {
    match disposition::current(sig)? {
        Disposition::Ignore => {
            disposition::set(sig, Action::Default)?;
            Ok(Disposition::Default)
        }
        other => Ok(other),
    }
}

/// Flush Rust's stdout and stderr and every C stdio stream.
pub fn flush_all() {
    let _ = io::stdout().flush();
    let _ = io::stderr().flush();
    // SAFETY: `fflush(NULL)` flushes all open output streams.
    unsafe {
        libc::fflush(ptr::null_mut());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn ignored_signal_is_reset_to_default() {
        disposition::set(Signal::SIGABRT, Action::Ignore).unwrap();
        assert_eq!(
            reset_if_ignored(Signal::SIGABRT).unwrap(),
            Disposition::Default
        );
        assert_eq!(
            disposition::current(Signal::SIGABRT).unwrap(),
            Disposition::Default
        );
    }

    #[test]
    #[serial]
    fn default_signal_is_left_alone() {
        disposition::set(Signal::SIGABRT, Action::Default).unwrap();
        assert_eq!(
            reset_if_ignored(Signal::SIGABRT).unwrap(),
            Disposition::Default
        );
    }
}
