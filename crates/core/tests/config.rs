// crates/core/tests/config.rs
use logging::{DebugFlag, LogFormat};
use posix_demos_core::config::DEFAULT_LINGER;
use posix_demos_core::{DemoConfig, ExitCode};
use std::path::PathBuf;
use std::time::Duration;

#[test]
fn builder_sets_fields() {
    let cfg = DemoConfig::builder()
        .log_format(LogFormat::Json)
        .verbose(2)
        .debug([DebugFlag::Signal, DebugFlag::Fork, DebugFlag::Signal])
        .quiet(true)
        .template("/var/tmp/demoXXXXXX")
        .linger(Duration::from_secs(0))
        .job_control(false)
        .build();

    assert_eq!(cfg.log_format, LogFormat::Json);
    assert_eq!(cfg.verbose, 2);
    assert_eq!(cfg.debug, vec![DebugFlag::Fork, DebugFlag::Signal]);
    assert!(cfg.quiet);
    assert_eq!(cfg.template, PathBuf::from("/var/tmp/demoXXXXXX"));
    assert_eq!(cfg.linger, Duration::ZERO);
    assert!(!cfg.job_control);

    let sub = cfg.subscriber_config();
    assert_eq!(sub.format, LogFormat::Json);
    assert_eq!(sub.debug, vec![DebugFlag::Fork, DebugFlag::Signal]);
    assert!(sub.quiet);
    assert!(!sub.timestamps);
}

#[test]
fn default_template_ends_with_placeholder() {
    let cfg = DemoConfig::default();
    assert!(cfg.template.to_string_lossy().ends_with("dirXXXXXX"));
    assert_eq!(cfg.linger, DEFAULT_LINGER);
}

#[test]
fn exit_codes_convert_to_process_status() {
    assert_eq!(u8::from(ExitCode::Ok), 0);
    assert_eq!(u8::from(ExitCode::Failure), 1);
    assert_eq!(i32::from(ExitCode::Ok), 0);
    assert_eq!(i32::from(ExitCode::Failure), 1);
}
