// src/lib.rs
//! Demonstrations of POSIX process and signal primitives.
//!
//! The facade re-exports the workspace crates so callers can use the
//! primitives without naming each crate:
//!
//! ```
//! use posix_demos::tmpfile::{Presence, Template, probe, remove};
//! # let dir = tempfile::tempdir().unwrap();
//! let template = Template::new(dir.path().join("dirXXXXXX")).unwrap();
//! let tmp = template.create().unwrap();
//! assert_eq!(probe(tmp.path()).unwrap(), Presence::Exists);
//! remove(tmp.path()).unwrap();
//! assert_eq!(probe(tmp.path()).unwrap(), Presence::Missing);
//! ```

pub use posix_demos_core::{DemoConfig, DemoConfigBuilder, Error, ExitCode, Result, config};

pub use logging;
pub use process;
pub use resources;
pub use signals;
pub use tmpfile;

pub use process::{AtforkRegistry, DoubleFork, ForkHandler, Forked, double_fork};
pub use resources::{Limit, LimitPair, LimitReport};
pub use signals::{Disposition, abort, abort_with};
