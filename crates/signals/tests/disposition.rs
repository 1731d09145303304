// crates/signals/tests/disposition.rs
#![cfg(unix)]

use serial_test::serial;
use signals::{Action, Disposition, Signal, disposition};

extern "C" fn noop(_: libc::c_int) {}

#[test]
#[serial]
fn set_reports_the_state_it_replaced() {
    let sig = Signal::SIGUSR1;
    let start = disposition::set(sig, Action::Default).unwrap();

    assert_eq!(disposition::set(sig, Action::Ignore).unwrap(), Disposition::Default);
    assert_eq!(disposition::current(sig).unwrap(), Disposition::Ignore);
    assert_eq!(
        disposition::set(sig, Action::Handler(noop)).unwrap(),
        Disposition::Ignore
    );
    assert_eq!(disposition::current(sig).unwrap(), Disposition::Custom);
    assert_eq!(disposition::set(sig, Action::Default).unwrap(), Disposition::Custom);

    if start == Disposition::Ignore {
        disposition::set(sig, Action::Ignore).unwrap();
    }
}

#[test]
#[serial]
fn reset_if_ignored_is_observable() {
    let sig = Signal::SIGUSR2;
    disposition::set(sig, Action::Ignore).unwrap();
    assert_eq!(signals::reset_if_ignored(sig).unwrap(), Disposition::Default);
    assert_eq!(disposition::current(sig).unwrap(), Disposition::Default);

    disposition::set(sig, Action::Handler(noop)).unwrap();
    assert_eq!(signals::reset_if_ignored(sig).unwrap(), Disposition::Custom);
    disposition::set(sig, Action::Default).unwrap();
}
