// tests/common/mod.rs
#![allow(dead_code)]

use assert_cmd::Command;

pub fn demo_cmd() -> Command {
    let mut cmd = Command::cargo_bin("posix-demos").unwrap();
    cmd.env("LC_ALL", "C")
        .env("LANG", "C")
        .env_remove("RUST_LOG")
        .env_remove("POSIX_DEMOS_TEMPLATE")
        .env_remove("POSIX_DEMOS_LINGER")
        .env_remove("POSIX_DEMOS_LOG_FILE");
    cmd
}

pub fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Pull the integer following `key` out of `line`.
pub fn field(line: &str, key: &str) -> i32 {
    let rest = line
        .split(key)
        .nth(1)
        .unwrap_or_else(|| panic!("{key} missing in {line:?}"));
    rest.trim_start()
        .split(|c: char| !c.is_ascii_digit())
        .next()
        .and_then(|n| n.parse().ok())
        .unwrap_or_else(|| panic!("no number after {key} in {line:?}"))
}
