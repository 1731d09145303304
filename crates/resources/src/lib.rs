// crates/resources/src/lib.rs
//! Query the soft and hard resource limits of the calling process.
//!
//! Which kinds exist is fixed at compile time: [`kinds`] lists only the limits
//! the target platform defines, always in the same order.

use logging::DebugFlag;
use nix::errno::Errno;
use nix::sys::resource::{Resource, getrlimit};
use posix_demos_core::{Error, Result};
use serde::Serialize;

/// One side of a limit pair.
///
/// `Finite` sorts below `Unbounded`, so `soft <= hard` holds for every pair
/// the kernel reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Limit {
    Finite(u64),
    Unbounded,
}

impl Limit {
    #[allow(clippy::useless_conversion)]
    fn from_raw(raw: libc::rlim_t) -> Self {
        if raw == libc::RLIM_INFINITY {
            Limit::Unbounded
        } else {
            Limit::Finite(u64::from(raw))
        }
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, Limit::Unbounded)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LimitPair {
    pub soft: Limit,
    pub hard: Limit,
}

/// A named resource kind available on this platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceKind {
    pub name: &'static str,
    pub resource: Resource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LimitReport {
    pub name: &'static str,
    pub soft: Limit,
    pub hard: Limit,
}

macro_rules! kind {
    ($res:ident) => {
        ResourceKind {
            name: stringify!($res),
            resource: Resource::$res,
        }
    };
}

static KINDS: &[ResourceKind] = &[
    #[cfg(not(any(target_os = "freebsd", target_os = "netbsd", target_os = "openbsd")))]
    kind!(RLIMIT_AS),
    kind!(RLIMIT_CORE),
    kind!(RLIMIT_CPU),
    kind!(RLIMIT_DATA),
    kind!(RLIMIT_FSIZE),
    #[cfg(target_os = "freebsd")]
    kind!(RLIMIT_KQUEUES),
    #[cfg(any(target_os = "linux", target_os = "android"))]
    kind!(RLIMIT_LOCKS),
    #[cfg(any(
        target_os = "linux",
        target_os = "android",
        target_os = "freebsd",
        target_os = "netbsd",
        target_os = "openbsd"
    ))]
    kind!(RLIMIT_MEMLOCK),
    #[cfg(any(target_os = "linux", target_os = "android"))]
    kind!(RLIMIT_MSGQUEUE),
    #[cfg(any(target_os = "linux", target_os = "android"))]
    kind!(RLIMIT_NICE),
    kind!(RLIMIT_NOFILE),
    #[cfg(any(
        target_os = "linux",
        target_os = "android",
        target_os = "freebsd",
        target_os = "netbsd",
        target_os = "openbsd",
        target_os = "aix"
    ))]
    kind!(RLIMIT_NPROC),
    #[cfg(target_os = "freebsd")]
    kind!(RLIMIT_NPTS),
    #[cfg(any(
        target_os = "linux",
        target_os = "android",
        target_os = "freebsd",
        target_os = "netbsd",
        target_os = "openbsd",
        target_os = "aix"
    ))]
    kind!(RLIMIT_RSS),
    #[cfg(any(target_os = "linux", target_os = "android"))]
    kind!(RLIMIT_RTPRIO),
    #[cfg(target_os = "linux")]
    kind!(RLIMIT_RTTIME),
    #[cfg(any(target_os = "freebsd", target_os = "dragonfly"))]
    kind!(RLIMIT_SBSIZE),
    #[cfg(any(target_os = "linux", target_os = "android"))]
    kind!(RLIMIT_SIGPENDING),
    kind!(RLIMIT_STACK),
    #[cfg(target_os = "freebsd")]
    kind!(RLIMIT_SWAP),
    #[cfg(target_os = "freebsd")]
    kind!(RLIMIT_VMEM),
];

/// Every resource kind compiled in for this platform, in report order.
pub fn kinds() -> &'static [ResourceKind] {
    KINDS
}

/// Look up a kind by name, with or without the `RLIMIT_` prefix.
pub fn find(name: &str) -> Option<ResourceKind> {
    let upper = name.to_ascii_uppercase();
    let bare = upper.strip_prefix("RLIMIT_").unwrap_or(&upper);
    KINDS
        .iter()
        .find(|k| k.name.strip_prefix("RLIMIT_") == Some(bare))
        .copied()
}

pub fn query(kind: ResourceKind) -> Result<LimitPair> {
    let (soft, hard) = getrlimit(kind.resource).map_err(|e| match e {
        Errno::EINVAL => Error::NotSupported(kind.name.to_string()),
        other => Error::errno(format!("getrlimit {}", kind.name), other),
    })?;
    let pair = LimitPair {
        soft: Limit::from_raw(soft),
        hard: Limit::from_raw(hard),
    };
    tracing::trace!(target: DebugFlag::Rlimit.target(), kind = kind.name, ?pair, "queried");
    Ok(pair)
}

pub fn report(kind: ResourceKind) -> Result<LimitReport> {
    let LimitPair { soft, hard } = query(kind)?;
    Ok(LimitReport {
        name: kind.name,
        soft,
        hard,
    })
}

/// Query every kind in [`kinds`] order, stopping at the first failure.
pub fn enumerate() -> Result<Vec<LimitReport>> {
    KINDS.iter().map(|k| report(*k)).collect()
}

/// Render a report as one fixed-width line without a trailing newline.
pub fn format_report(r: &LimitReport) -> String {
    let soft = match r.soft {
        Limit::Unbounded => "(infinite) ".to_string(),
        Limit::Finite(n) => format!("{n:>10} "),
    };
    let hard = match r.hard {
        Limit::Unbounded => "(infinite)".to_string(),
        Limit::Finite(n) => format!("{n:>10}"),
    };
    format!("{:<20} {soft}{hard}", r.name)
}

/// Serialize reports as a JSON array.
pub fn to_json(reports: &[LimitReport]) -> Result<String> {
    serde_json::to_string_pretty(reports)
        .map_err(|e| Error::io("encoding limits", std::io::Error::other(e)))
}
