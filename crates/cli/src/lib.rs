// crates/cli/src/lib.rs

use std::io;

use clap::{ArgMatches, FromArgMatches};
use logging::{LogFormat, StderrMode};
use posix_demos_core::{DemoConfig, Error, Result};

pub mod demos;
pub mod options;
mod print;
mod validate;

pub use options::{
    AbortOpts, DemoCommand, DemoOpts, DoubleForkOpts, JobctlOpts, LimitsOpts, LogOpts,
    MktempOpts, cli_command,
};
pub use print::{PROGRAM_NAME, handle_clap_error};
pub use validate::exit_code_from_error_kind;

/// Fold parsed options into a [`DemoConfig`].
pub fn demo_config(opts: &DemoOpts) -> DemoConfig {
    let log = &opts.log;
    let mut builder = DemoConfig::builder()
        .log_format(log.log_format.unwrap_or(LogFormat::Text))
        .verbose(log.verbose)
        .debug(&log.debug)
        .quiet(log.quiet)
        .stderr(log.stderr.unwrap_or(StderrMode::All))
        .log_file(
            log.log_file
                .clone()
                .map(|path| (path, log.log_file_format.clone())),
        )
        .syslog(log.syslog)
        .timestamps(log.timestamps);
    match &opts.command {
        DemoCommand::Mktemp(MktempOpts {
            template: Some(t), ..
        }) => builder = builder.template(t.clone()),
        DemoCommand::DoubleFork(DoubleForkOpts { linger: Some(s) }) => {
            builder = builder.linger(std::time::Duration::from_secs(*s))
        }
        DemoCommand::Jobctl(j) => builder = builder.job_control(!j.no_job_control),
        _ => {}
    }
    builder.build()
}

pub fn init_logging(cfg: &DemoConfig) -> Result<()> {
    logging::init(cfg.subscriber_config()).map_err(|e| Error::io("log setup failed", e))
}

pub fn run(matches: &ArgMatches) -> Result<()> {
    let opts = DemoOpts::from_arg_matches(matches)
        .map_err(|e| Error::io("parsing arguments", io::Error::other(e.to_string())))?;
    let cfg = demo_config(&opts);
    init_logging(&cfg)?;
    tracing::debug!(command = ?opts.command, "starting");
    match &opts.command {
        DemoCommand::Mktemp(o) => demos::mktemp::run(o, &cfg, &mut io::stdout().lock()),
        DemoCommand::Limits(o) => demos::limits::run(o, &mut io::stdout().lock()),
        DemoCommand::DoubleFork(_) => demos::double_fork::run(&cfg),
        DemoCommand::Abort(o) => demos::abort::run(o),
        DemoCommand::Jobctl(_) => demos::jobctl::run(&cfg),
        DemoCommand::Atfork => demos::atfork::run(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::path::PathBuf;
    use std::time::Duration;

    fn parse(args: &[&str]) -> DemoOpts {
        DemoOpts::try_parse_from(std::iter::once("posix-demos").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn template_flag_reaches_config() {
        let cfg = demo_config(&parse(&["mktemp", "--template", "/var/tmp/aXXXXXX"]));
        assert_eq!(cfg.template, PathBuf::from("/var/tmp/aXXXXXX"));
    }

    #[test]
    fn linger_flag_reaches_config() {
        let cfg = demo_config(&parse(&["double-fork", "--linger", "0"]));
        assert_eq!(cfg.linger, Duration::ZERO);
    }

    #[test]
    fn job_control_can_be_disabled() {
        assert!(demo_config(&parse(&["jobctl"])).job_control);
        assert!(!demo_config(&parse(&["jobctl", "--no-job-control"])).job_control);
    }

    #[test]
    fn log_file_carries_format() {
        let cfg = demo_config(&parse(&[
            "--log-file",
            "/tmp/demo.log",
            "--log-file-format",
            "%l %m",
            "atfork",
        ]));
        assert_eq!(
            cfg.log_file,
            Some((PathBuf::from("/tmp/demo.log"), Some("%l %m".to_string())))
        );
    }
}
