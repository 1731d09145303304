// crates/core/src/config.rs

use logging::{DebugFlag, LogFormat, StderrMode, SubscriberConfig};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

// Read by the clap `env` fallbacks of the command line, which is the only
// place the environment is consulted.
pub const TEMPLATE_ENV: &str = "POSIX_DEMOS_TEMPLATE";
pub const LINGER_ENV: &str = "POSIX_DEMOS_LINGER";
pub const LOG_FILE_ENV: &str = "POSIX_DEMOS_LOG_FILE";

/// How long the grandchild of the double-fork demonstration keeps running.
pub const DEFAULT_LINGER: Duration = Duration::from_secs(2);

/// Configuration shared by the demonstrations.
#[derive(Clone, Debug)]
pub struct DemoConfig {
    pub log_format: LogFormat,
    pub verbose: u8,
    pub debug: Vec<DebugFlag>,
    pub quiet: bool,
    pub stderr: StderrMode,
    pub log_file: Option<(PathBuf, Option<String>)>,
    pub syslog: bool,
    pub timestamps: bool,
    pub template: PathBuf,
    pub linger: Duration,
    pub job_control: bool,
}

pub fn default_template() -> PathBuf {
    env::temp_dir().join("dirXXXXXX")
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Text,
            verbose: 0,
            debug: Vec::new(),
            quiet: false,
            stderr: StderrMode::All,
            log_file: None,
            syslog: false,
            timestamps: false,
            template: default_template(),
            linger: DEFAULT_LINGER,
            job_control: true,
        }
    }
}

impl DemoConfig {
    /// Create a new builder for [`DemoConfig`].
    pub fn builder() -> DemoConfigBuilder {
        DemoConfigBuilder::default()
    }

    pub fn subscriber_config(&self) -> SubscriberConfig {
        SubscriberConfig::builder()
            .format(self.log_format)
            .verbose(self.verbose)
            .debug(&self.debug)
            .quiet(self.quiet)
            .stderr(self.stderr)
            .log_file(self.log_file.clone())
            .syslog(self.syslog)
            .timestamps(self.timestamps)
            .build()
    }
}

/// Builder for [`DemoConfig`].
#[derive(Debug, Default)]
#[must_use]
pub struct DemoConfigBuilder {
    cfg: DemoConfig,
}

impl DemoConfigBuilder {
    pub fn log_format(mut self, log_format: LogFormat) -> Self {
        self.cfg.log_format = log_format;
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
        let mut debug = debug.into_iter().map(Into::into).collect::<Vec<_>>();
        debug.sort_by_key(|flag| flag.as_str());
        debug.dedup();
        self.cfg.debug = debug;
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

    pub fn template(mut self, template: impl Into<PathBuf>) -> Self {
        self.cfg.template = template.into();
        self
    }

    pub fn linger(mut self, linger: Duration) -> Self {
        self.cfg.linger = linger;
        self
    }

    pub fn job_control(mut self, job_control: bool) -> Self {
        self.cfg.job_control = job_control;
        self
    }

    pub fn build(self) -> DemoConfig {
        self.cfg
    }
}
