// crates/logging/src/lib.rs

use std::fs::OpenOptions;
use std::io;
#[cfg(all(unix, feature = "syslog"))]
use std::os::unix::net::UnixDatagram;
#[cfg(all(unix, feature = "syslog"))]
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::level_filters::LevelFilter;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    EnvFilter, fmt as tracing_fmt,
    layer::{Context, Layer, SubscriberExt},
    util::SubscriberInitExt,
};

mod flags;
mod formatter;
mod sink;
mod visitor;

pub use flags::{DebugFlag, LogFormat, StderrMode, SubscriberConfig, SubscriberConfigBuilder};
pub use formatter::DemoFormatter;

use crate::sink::LogWriter;
#[cfg(all(unix, feature = "syslog"))]
use crate::visitor::FieldVisitor;

pub const SYSLOG_PATH_ENV: &str = "POSIX_DEMOS_SYSLOG_PATH";
const SYSLOG_IDENT: &str = "posix-demos";

#[cfg(all(unix, feature = "syslog"))]
struct SyslogLayer {
    sock: UnixDatagram,
}

#[cfg(all(unix, feature = "syslog"))]
impl SyslogLayer {
    fn new() -> io::Result<Self> {
        let path = std::env::var_os(SYSLOG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("/dev/log"));
        let sock = UnixDatagram::unbound()?;
        sock.connect(path)?;
        Ok(Self { sock })
    }
}

fn syslog_severity(level: Level) -> u8 {
    match level {
        Level::ERROR => 3,
        Level::WARN => 4,
        Level::INFO => 6,
        Level::DEBUG | Level::TRACE => 7,
    }
}

/// Render one syslog datagram (facility `user`).
pub fn syslog_line(level: Level, pid: u32, msg: &str) -> String {
    let pri = 8 + syslog_severity(level);
    format!("<{pri}>{SYSLOG_IDENT}[{pid}]: {msg}")
}

#[cfg(all(unix, feature = "syslog"))]
impl<S> Layer<S> for SyslogLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event, _ctx: Context<S>) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        let mut msg = visitor.render();
        if msg.is_empty() {
            msg.push_str(event.metadata().target());
        }
        let data = syslog_line(*event.metadata().level(), std::process::id(), &msg);
        let _ = self.sock.send(data.as_bytes());
    }
}

fn level_for(verbose: u8, quiet: bool, debug: &[DebugFlag]) -> LevelFilter {
    if quiet {
        return LevelFilter::ERROR;
    }
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    if !debug.is_empty() && level < LevelFilter::DEBUG {
        LevelFilter::DEBUG
    } else {
        level
    }
}

pub fn subscriber(cfg: SubscriberConfig) -> io::Result<Box<dyn Subscriber + Send + Sync>> {
    let SubscriberConfig {
        format,
        verbose,
        debug,
        quiet,
        stderr,
        log_file,
        syslog,
        timestamps,
    } = cfg;
    let level = level_for(verbose, quiet, &debug);
    let mut filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    if !quiet {
        for flag in &debug {
            let directive = format!("{}=trace", flag.target())
                .parse()
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
            filter = filter.add_directive(directive);
        }
    }

    let writer = LogWriter { mode: stderr };
    let base = tracing_fmt::layer()
        .with_writer(writer)
        .with_target(false)
        .with_level(false)
        .with_ansi(false);
    let fmt_layer = match format {
        LogFormat::Json if timestamps => base.json().boxed(),
        LogFormat::Json => base.without_time().json().boxed(),
        LogFormat::Text => base
            .event_format(DemoFormatter::new(None).with_timestamps(timestamps))
            .boxed(),
    };

    #[cfg(all(unix, feature = "syslog"))]
    let syslog_layer = if syslog { SyslogLayer::new().ok() } else { None };
    #[cfg(not(all(unix, feature = "syslog")))]
    let syslog_layer: Option<tracing_subscriber::layer::Identity> = {
        let _ = syslog;
        None
    };

    let file_layer = if let Some((path, fmt)) = log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let base = tracing_fmt::layer()
            .with_writer(Mutex::new(file))
            .with_ansi(false);
        let layer = match fmt.as_deref() {
            Some("json") => base.json().boxed(),
            Some(spec) => base
                .event_format(DemoFormatter::new(Some(spec.to_string())))
                .boxed(),
            None => base
                .event_format(DemoFormatter::new(None).with_timestamps(true))
                .boxed(),
        };
        Some(layer)
    } else {
        None
    };

    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(syslog_layer)
        .with(file_layer);
    Ok(Box::new(registry))
}

/// Install the subscriber described by `cfg` as the global default.
pub fn init(cfg: SubscriberConfig) -> io::Result<()> {
    subscriber(cfg)?
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::AlreadyExists, e))
}
