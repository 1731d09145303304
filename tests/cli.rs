// tests/cli.rs
use predicates::prelude::*;

mod common;
use common::demo_cmd;

#[test]
fn help_exits_zero() {
    demo_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("double-fork"))
        .stdout(predicate::str::contains("atfork"));
}

#[test]
fn version_exits_zero() {
    demo_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("posix-demos "));
}

#[test]
fn missing_subcommand_is_usage_error() {
    demo_cmd().assert().failure().code(1);
}

#[test]
fn unknown_flag_is_reported_once() {
    demo_cmd()
        .args(["limits", "--bogus"])
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("posix-demos: unexpected argument"));
}

#[test]
fn bad_template_names_the_failure() {
    demo_cmd()
        .args(["mktemp", "--template", "/tmp/no-placeholder"])
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::starts_with("posix-demos: invalid template"));
}

#[test]
fn template_env_is_honoured() {
    let dir = tempfile::tempdir().unwrap();
    let pattern = dir.path().join("envXXXXXX");
    demo_cmd()
        .arg("mktemp")
        .env("POSIX_DEMOS_TEMPLATE", &pattern)
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "temp name = {}",
            dir.path().join("env").display()
        )));
}

#[test]
fn log_file_records_debug_events() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("demo.log");
    demo_cmd()
        .args(["--debug", "rlimit", "--log-file"])
        .arg(&log)
        .args(["--log-file-format", "%T %m", "limits", "--only", "nofile"])
        .assert()
        .success();
    let text = std::fs::read_to_string(&log).unwrap();
    assert!(text.contains("debug::rlimit queried"), "{text}");
}

#[test]
fn unparsable_linger_env_is_a_usage_error() {
    demo_cmd()
        .arg("double-fork")
        .env("POSIX_DEMOS_LINGER", "soon")
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::starts_with("posix-demos: invalid value 'soon'"));
}

#[test]
fn diagnostics_carry_no_ansi_escapes() {
    demo_cmd()
        .args(["-vv", "--debug", "rlimit", "limits", "--only", "nofile"])
        .assert()
        .success()
        .stderr(predicate::str::contains("queried"))
        .stderr(predicate::str::contains("\u{1b}[").not());
}
