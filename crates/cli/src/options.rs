// crates/cli/src/options.rs

use std::path::PathBuf;

use clap::{ArgAction, Args, CommandFactory, Parser, Subcommand};
use logging::{DebugFlag, LogFormat, StderrMode};
use posix_demos_core::config::{LINGER_ENV, LOG_FILE_ENV, TEMPLATE_ENV};

#[derive(Parser, Debug)]
#[command(
    name = "posix-demos",
    version,
    about = "Small programs exercising one POSIX process or signal facility each",
    propagate_version = true
)]
pub struct DemoOpts {
    #[command(flatten)]
    pub log: LogOpts,
    #[command(subcommand)]
    pub command: DemoCommand,
}

#[derive(Args, Debug, Clone, Default)]
pub struct LogOpts {
    #[arg(short, long, action = ArgAction::Count, global = true, help_heading = "Logging")]
    pub verbose: u8,
    #[arg(short, long, global = true, help_heading = "Logging")]
    pub quiet: bool,
    #[arg(
        long = "log-format",
        value_enum,
        value_name = "FMT",
        global = true,
        help_heading = "Logging"
    )]
    pub log_format: Option<LogFormat>,
    #[arg(
        long = "log-file",
        value_name = "FILE",
        env = LOG_FILE_ENV,
        global = true,
        help_heading = "Logging"
    )]
    pub log_file: Option<PathBuf>,
    #[arg(
        long = "log-file-format",
        value_name = "FMT",
        global = true,
        help_heading = "Logging",
        help = "line layout for --log-file: json, or %p %t %l %T %m tokens"
    )]
    pub log_file_format: Option<String>,
    #[arg(
        long,
        value_name = "FLAGS",
        value_delimiter = ',',
        value_enum,
        global = true,
        help_heading = "Logging"
    )]
    pub debug: Vec<DebugFlag>,
    #[arg(long, value_enum, value_name = "MODE", global = true, help_heading = "Logging")]
    pub stderr: Option<StderrMode>,
    #[arg(long, global = true, help_heading = "Logging")]
    pub syslog: bool,
    #[arg(long, global = true, help_heading = "Logging")]
    pub timestamps: bool,
}

#[derive(Subcommand, Debug)]
pub enum DemoCommand {
    /// Create uniquely named files from a template with mkstemp(3)
    Mktemp(MktempOpts),
    /// Print the soft and hard resource limits of this process
    Limits(LimitsOpts),
    /// Fork twice so the worker is inherited by init
    DoubleFork(DoubleForkOpts),
    /// Terminate through an abort that ignores and handlers cannot stop
    Abort(AbortOpts),
    /// Copy stdin to stdout while cooperating with job-control stops
    Jobctl(JobctlOpts),
    /// Fork with three registered prepare/parent/child handler triples
    Atfork,
}

#[derive(Args, Debug, Clone, Default)]
pub struct MktempOpts {
    /// filename template ending in XXXXXX
    #[arg(long, value_name = "PATTERN", env = TEMPLATE_ENV)]
    pub template: Option<PathBuf>,
    /// keep the file open across the unlink
    #[arg(long)]
    pub hold: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct LimitsOpts {
    #[arg(long)]
    pub json: bool,
    /// restrict output to these kinds (NOFILE or RLIMIT_NOFILE)
    #[arg(long, value_name = "NAME", value_delimiter = ',')]
    pub only: Vec<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct DoubleForkOpts {
    /// seconds the grandchild keeps running after reporting
    #[arg(long, value_name = "SECS", env = LINGER_ENV)]
    pub linger: Option<u64>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct AbortOpts {
    /// ignore SIGABRT before aborting
    #[arg(long, conflicts_with = "catch")]
    pub ignore: bool,
    /// install a SIGABRT handler that returns
    #[arg(long)]
    pub catch: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct JobctlOpts {
    /// do not install the SIGTSTP handler
    #[arg(long = "no-job-control")]
    pub no_job_control: bool,
}

pub fn cli_command() -> clap::Command {
    DemoOpts::command()
}
