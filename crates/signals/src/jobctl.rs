// crates/signals/src/jobctl.rs
#![allow(unsafe_code)]

//! Cooperative `SIGTSTP` handling.
//!
//! The handler lets the default stop action happen and then puts itself back,
//! giving the program a hook on both sides of a stop/continue cycle.

use std::io::{self, Read, Write};
use std::sync::atomic::{AtomicUsize, Ordering};

use logging::DebugFlag;
use nix::errno::Errno;
use nix::sys::signal::{
    SaFlags, SigAction, SigHandler, SigSet, SigmaskHow, Signal, raise, sigaction, sigprocmask,
};
use posix_demos_core::{Error, Result};

use crate::disposition::{self, Action, Disposition};

/// Chunk size used by [`copy_stream`].
pub const BUFFSIZE: usize = 1024;

static STOPS: AtomicUsize = AtomicUsize::new(0);

extern "C" fn on_stop(_: libc::c_int) {
    let saved = Errno::last_raw();

    let mut tstp = SigSet::empty();
    tstp.add(Signal::SIGTSTP);
    let _ = sigprocmask(SigmaskHow::SIG_UNBLOCK, Some(&tstp), None);

    let default = SigAction::new(SigHandler::SigDfl, SaFlags::empty(), SigSet::empty());
    // SAFETY: only async-signal-safe calls are made from this handler.
    let _ = unsafe { sigaction(Signal::SIGTSTP, &default) };
    let _ = raise(Signal::SIGTSTP);

    // Continued.
    let again = SigAction::new(
        SigHandler::Handler(on_stop),
        SaFlags::SA_RESTART,
        SigSet::empty(),
    );
    // SAFETY: as above.
    let _ = unsafe { sigaction(Signal::SIGTSTP, &again) };
    STOPS.fetch_add(1, Ordering::SeqCst);

    Errno::set_raw(saved);
}

/// Install the stop handler unless the inherited `SIGTSTP` disposition is
/// `Ignore`, in which case job control is left alone.
///
/// Returns whether the handler was installed.
pub fn install_stop_handler() -> Result<bool> {
    if disposition::current(Signal::SIGTSTP)? == Disposition::Ignore {
        tracing::debug!(target: DebugFlag::Jobctl.target(), "SIGTSTP ignored, skipping handler");
        return Ok(false);
    }
    disposition::set(Signal::SIGTSTP, Action::Handler(on_stop))?;
    tracing::debug!(target: DebugFlag::Jobctl.target(), "stop handler installed");
    Ok(true)
}

/// Number of stop/continue cycles the handler has completed.
pub fn stop_count() -> usize {
    STOPS.load(Ordering::SeqCst)
}

/// Copy `reader` to `writer` in [`BUFFSIZE`] chunks until end of input.
///
/// Reads interrupted by a signal are retried. Returns the byte count.
pub fn copy_stream<R, W>(reader: &mut R, writer: &mut W) -> Result<u64>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut buf = [0u8; BUFFSIZE];
    let mut total = 0u64;
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(Error::io("read error", e)),
        };
        writer
            .write_all(&buf[..n])
            .map_err(|e| Error::io("write error", e))?;
        total += n as u64;
    }
    writer.flush().map_err(|e| Error::io("write error", e))?;
    tracing::trace!(target: DebugFlag::Jobctl.target(), total, "copy finished");
    Ok(total)
}
