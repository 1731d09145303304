// crates/signals/tests/abort.rs
#![cfg(unix)]

use nix::sys::resource::{Resource, setrlimit};
use nix::sys::wait::{WaitStatus, waitpid};
use nix::unistd::ForkResult;
use process::{exit_now, fork_process};
use serial_test::serial;
use signals::{Action, Signal, disposition, mask};

extern "C" fn returning_handler(_: libc::c_int) {}

fn in_child<F: FnOnce()>(f: F) -> WaitStatus {
    match fork_process().unwrap() {
        ForkResult::Parent { child } => waitpid(child, None).unwrap(),
        ForkResult::Child => {
            let _ = setrlimit(Resource::RLIMIT_CORE, 0, 0);
            f();
            exit_now(0)
        }
    }
}

fn killed_by(status: WaitStatus) -> Option<Signal> {
    match status {
        WaitStatus::Signaled(_, sig, _) => Some(sig),
        _ => None,
    }
}

#[test]
#[serial]
fn default_disposition_dies_by_sigabrt() {
    let status = in_child(|| signals::abort());
    assert_eq!(killed_by(status), Some(Signal::SIGABRT), "{status:?}");
}

#[test]
#[serial]
fn ignored_sigabrt_still_kills() {
    let status = in_child(|| {
        disposition::set(Signal::SIGABRT, Action::Ignore).unwrap();
        signals::abort()
    });
    assert_eq!(killed_by(status), Some(Signal::SIGABRT), "{status:?}");
}

#[test]
#[serial]
fn returning_handler_cannot_stop_abort() {
    let status = in_child(|| {
        disposition::set(Signal::SIGABRT, Action::Handler(returning_handler)).unwrap();
        signals::abort()
    });
    assert_eq!(killed_by(status), Some(Signal::SIGABRT), "{status:?}");
}

#[test]
#[serial]
fn blocked_sigabrt_is_unblocked_for_delivery() {
    let status = in_child(|| {
        mask::block(Signal::SIGABRT).unwrap();
        signals::abort()
    });
    assert_eq!(killed_by(status), Some(Signal::SIGABRT), "{status:?}");
}

#[test]
#[serial]
fn other_targets_are_honoured() {
    let status = in_child(|| {
        disposition::set(Signal::SIGTERM, Action::Ignore).unwrap();
        mask::block(Signal::SIGTERM).unwrap();
        signals::abort_with(Signal::SIGTERM)
    });
    assert_eq!(killed_by(status), Some(Signal::SIGTERM), "{status:?}");
}

#[test]
#[serial]
fn non_fatal_target_falls_back_to_exit() {
    // SIGCHLD is discarded by default, so neither delivery terminates.
    let status = in_child(|| signals::abort_with(Signal::SIGCHLD));
    assert!(matches!(status, WaitStatus::Exited(_, 1)), "{status:?}");
}
