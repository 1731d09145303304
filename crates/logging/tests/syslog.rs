// crates/logging/tests/syslog.rs
#![cfg(all(unix, feature = "syslog"))]

use logging::{SYSLOG_PATH_ENV, SubscriberConfig, subscriber};
use serial_test::serial;
use std::os::unix::net::UnixDatagram;
use tempfile::tempdir;
use tracing::warn;
use tracing::subscriber::with_default;

#[test]
#[serial]
fn syslog_emits_message() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("sock");
    let server = UnixDatagram::bind(&path).unwrap();
    unsafe { std::env::set_var(SYSLOG_PATH_ENV, &path) };
    let sub = subscriber(SubscriberConfig::builder().syslog(true).build()).unwrap();
    unsafe { std::env::remove_var(SYSLOG_PATH_ENV) };
    with_default(sub, || {
        warn!(target: "test", "hello");
    });
    let mut buf = [0u8; 256];
    let (n, _) = server.recv_from(&mut buf).unwrap();
    let msg = std::str::from_utf8(&buf[..n]).unwrap();
    assert!(msg.starts_with("<12>posix-demos["));
    assert!(msg.ends_with("hello"));
}

#[test]
#[serial]
fn syslog_renders_fields_like_text_output() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("sock");
    let server = UnixDatagram::bind(&path).unwrap();
    unsafe { std::env::set_var(SYSLOG_PATH_ENV, &path) };
    let sub = subscriber(SubscriberConfig::builder().syslog(true).build()).unwrap();
    unsafe { std::env::remove_var(SYSLOG_PATH_ENV) };
    with_default(sub, || {
        warn!(target: "test", child = 12, "spawned");
    });
    let mut buf = [0u8; 256];
    let (n, _) = server.recv_from(&mut buf).unwrap();
    let msg = std::str::from_utf8(&buf[..n]).unwrap();
    assert!(msg.ends_with("]: spawned child=12"), "{msg}");
}
