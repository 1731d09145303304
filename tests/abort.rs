// tests/abort.rs
#![cfg(unix)]

use std::os::unix::process::ExitStatusExt;

use nix::sys::signal::Signal;

mod common;
use common::{demo_cmd, stdout_of};

fn assert_aborted(args: &[&str]) -> std::process::Output {
    let output = demo_cmd().args(args).output().unwrap();
    assert_eq!(
        output.status.signal(),
        Some(Signal::SIGABRT as i32),
        "{:?}",
        output.status
    );
    assert_eq!(stdout_of(&output), "about to abort...");
    output
}

#[test]
fn default_abort_flushes_partial_line() {
    assert_aborted(&["abort"]);
}

#[test]
fn ignored_sigabrt_still_terminates() {
    assert_aborted(&["abort", "--ignore"]);
}

#[test]
fn returning_handler_still_terminates() {
    let output = assert_aborted(&["abort", "--catch"]);
    let err = String::from_utf8_lossy(&output.stderr);
    assert!(err.contains("caught SIGABRT"), "{err}");
}
