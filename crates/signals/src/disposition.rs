// crates/signals/src/disposition.rs
#![allow(unsafe_code)]

//! Per-signal disposition as an explicit state machine.
//!
//! A signal is in exactly one of the [`Disposition`] states. The only way to
//! move between them is [`set`], which always reports the state it replaced so
//! callers can restore it.

use std::mem::MaybeUninit;
use std::ptr;

use logging::DebugFlag;
use nix::errno::Errno;
use nix::sys::signal::{SaFlags, SigAction, SigHandler, SigSet, Signal, sigaction};
use posix_demos_core::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Default,
    Ignore,
    Custom,
}

/// Target state for [`set`].
#[derive(Debug, Clone, Copy)]
pub enum Action {
    Default,
    Ignore,
    /// Install `handler` with `SA_RESTART` so interrupted reads resume.
    Handler(extern "C" fn(libc::c_int)),
}

impl From<SigHandler> for Disposition {
    fn from(h: SigHandler) -> Self {
        match h {
            SigHandler::SigDfl => Disposition::Default,
            SigHandler::SigIgn => Disposition::Ignore,
            _ => Disposition::Custom,
        }
    }
}

/// Read the disposition of `sig` without changing it.
pub fn current(sig: Signal) -> Result<Disposition> {
    let mut old = MaybeUninit::<libc::sigaction>::uninit();
    // SAFETY: a null `act` only queries; `old` is written on success.
    let rc = unsafe { libc::sigaction(sig as libc::c_int, ptr::null(), old.as_mut_ptr()) };
    Errno::result(rc).map_err(|e| Error::errno("sigaction", e))?;
    // SAFETY: initialised by the successful call above.
    let old = unsafe { old.assume_init() };
    Ok(if old.sa_sigaction == libc::SIG_DFL {
        Disposition::Default
    } else if old.sa_sigaction == libc::SIG_IGN {
        Disposition::Ignore
    } else {
        Disposition::Custom
    })
}

/// Move `sig` to the state described by `action`, returning the previous one.
pub fn set(sig: Signal, action: Action) -> Result<Disposition> {
    let (handler, flags) = match action {
        Action::Default => (SigHandler::SigDfl, SaFlags::empty()),
        Action::Ignore => (SigHandler::SigIgn, SaFlags::empty()),
        Action::Handler(f) => (SigHandler::Handler(f), SaFlags::SA_RESTART),
    };
    let new = SigAction::new(handler, flags, SigSet::empty());
    // SAFETY: handlers passed through `Action::Handler` are required to be
    // async-signal-safe.
    let old = unsafe { sigaction(sig, &new) }.map_err(|e| Error::errno("sigaction", e))?;
    let previous = Disposition::from(old.handler());
    tracing::trace!(
        target: DebugFlag::Signal.target(),
        signal = sig.as_str(),
        ?previous,
        ?action,
        "disposition changed"
    );
    Ok(previous)
}
