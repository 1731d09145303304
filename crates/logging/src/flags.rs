// crates/logging/src/flags.rs
#![allow(missing_docs)]

use clap::ValueEnum;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
#[clap(rename_all = "kebab-case")]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, ValueEnum)]
#[clap(rename_all = "kebab-case")]
pub enum DebugFlag {
    Atfork,
    Fork,
    Jobctl,
    Rlimit,
    Signal,
    Tmpfile,
    Wait,
}

impl DebugFlag {
    pub const fn as_str(self) -> &'static str {
        match self {
            DebugFlag::Atfork => "atfork",
            DebugFlag::Fork => "fork",
            DebugFlag::Jobctl => "jobctl",
            DebugFlag::Rlimit => "rlimit",
            DebugFlag::Signal => "signal",
            DebugFlag::Tmpfile => "tmpfile",
            DebugFlag::Wait => "wait",
        }
    }

    pub const fn target(self) -> &'static str {
        match self {
            DebugFlag::Atfork => "debug::atfork",
            DebugFlag::Fork => "debug::fork",
            DebugFlag::Jobctl => "debug::jobctl",
            DebugFlag::Rlimit => "debug::rlimit",
            DebugFlag::Signal => "debug::signal",
            DebugFlag::Tmpfile => "debug::tmpfile",
            DebugFlag::Wait => "debug::wait",
        }
    }
}

impl From<&DebugFlag> for DebugFlag {
    fn from(flag: &DebugFlag) -> Self {
        *flag
    }
}

/// Which events reach stderr. Anything not routed to stderr goes to stdout.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum, Default)]
#[clap(rename_all = "kebab-case")]
pub enum StderrMode {
    #[clap(alias = "e")]
    Errors,
    #[clap(alias = "a")]
    #[default]
    All,
}

#[derive(Clone, Debug)]
pub struct SubscriberConfig {
    pub format: LogFormat,
    pub verbose: u8,
    pub debug: Vec<DebugFlag>,
    pub quiet: bool,
    pub stderr: StderrMode,
    pub log_file: Option<(PathBuf, Option<String>)>,
    pub syslog: bool,
    pub timestamps: bool,
}

impl Default for SubscriberConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Text,
            verbose: 0,
            debug: Vec::new(),
            quiet: false,
            stderr: StderrMode::All,
            log_file: None,
            syslog: false,
            timestamps: false,
        }
    }
}

#[derive(Default)]
pub struct SubscriberConfigBuilder {
    cfg: SubscriberConfig,
}

impl SubscriberConfig {
    pub fn builder() -> SubscriberConfigBuilder {
        SubscriberConfigBuilder::default()
    }
}

impl SubscriberConfigBuilder {
    pub fn format(mut self, format: LogFormat) -> Self {
        self.cfg.format = format;
        self
    }

    pub fn verbose(mut self, verbose: u8) -> Self {
        self.cfg.verbose = verbose;
        self
    }

    pub fn debug<I>(mut self, debug: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<DebugFlag>,
    {
        self.cfg.debug = debug.into_iter().map(Into::into).collect();
        self
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.cfg.quiet = quiet;
        self
    }

    pub fn stderr(mut self, stderr: StderrMode) -> Self {
        self.cfg.stderr = stderr;
        self
    }

    pub fn log_file(mut self, log_file: Option<(PathBuf, Option<String>)>) -> Self {
        self.cfg.log_file = log_file;
        self
    }

    pub fn syslog(mut self, syslog: bool) -> Self {
        self.cfg.syslog = syslog;
        self
    }

    pub fn timestamps(mut self, timestamps: bool) -> Self {
        self.cfg.timestamps = timestamps;
        self
    }

    pub fn build(self) -> SubscriberConfig {
        self.cfg
    }
}
