// crates/process/src/os.rs
#![allow(unsafe_code)]

use std::io::{self, Write};

use nix::unistd::{ForkResult, fork};

/// Flush the Rust-side stdout and stderr buffers.
pub fn flush_stdio() {
    let _ = io::stdout().flush();
    let _ = io::stderr().flush();
}

/// Fork the current process.
///
/// Pending stdio output is flushed first so the child does not inherit and
/// later re-emit it.
///
/// # Safety
/// This wrapper is safe to call from the single-threaded demonstrations. In a
/// multi-threaded caller the child must restrict itself to async-signal-safe
/// operations until it execs or exits through [`exit_now`].
pub fn fork_process() -> nix::Result<ForkResult> {
    flush_stdio();
    // SAFETY: see the `Safety` section above.
    unsafe { fork() }
}

/// Terminate the calling process with `code` without running exit handlers or
/// destructors inherited from the parent.
pub fn exit_now(code: i32) -> ! {
    flush_stdio();
    // SAFETY: `_exit` never returns and touches no Rust state.
    unsafe { libc::_exit(code) }
}
