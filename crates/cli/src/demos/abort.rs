// crates/cli/src/demos/abort.rs
#![allow(unsafe_code)]

use std::io::{self, Write};

use posix_demos_core::Result;
use signals::{Action, Signal, disposition};

use crate::options::AbortOpts;

const CAUGHT: &[u8] = b"caught SIGABRT, returning\n";

extern "C" fn returning_handler(_: libc::c_int) {
    // SAFETY: write(2) is async-signal-safe and CAUGHT is a static buffer.
    unsafe {
        libc::write(libc::STDERR_FILENO, CAUGHT.as_ptr().cast(), CAUGHT.len());
    }
}

/// Leave a partial line in the stdout buffer and abort.
pub fn run(opts: &AbortOpts) -> Result<()> {
    if opts.ignore {
        disposition::set(Signal::SIGABRT, Action::Ignore)?;
    }
    if opts.catch {
        disposition::set(Signal::SIGABRT, Action::Handler(returning_handler))?;
    }
    let mut out = io::stdout();
    let _ = write!(out, "about to abort...");
    signals::abort()
}
