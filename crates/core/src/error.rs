// crates/core/src/error.rs
use std::io;

use nix::errno::Errno;
use thiserror::Error;

use crate::ExitCode;

/// Failure kinds shared by every demonstration.
///
/// None of them is recovered from locally: the binary prints the
/// [`Display`](std::fmt::Display) form on stderr and exits with
/// [`ExitCode::Failure`].
#[derive(Debug, Error)]
pub enum Error {
    #[error("fork error: {0}")]
    SpawnFailed(String),
    #[error("waitpid error: {0}")]
    WaitFailed(String),
    #[error("resource exhausted: {0}")]
    ResourceExhausted(String),
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    #[error("getrlimit error for {0}")]
    NotSupported(String),
    #[error("invalid template: {0}")]
    InvalidTemplate(String),
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
}

/// Result type for demonstration operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        Error::Io {
            context: context.into(),
            source,
        }
    }

    pub fn errno(context: impl Into<String>, errno: Errno) -> Self {
        Error::io(context, io::Error::from(errno))
    }

    pub fn spawn(errno: Errno) -> Self {
        Error::SpawnFailed(errno.desc().to_string())
    }

    pub const fn exit_code(&self) -> ExitCode {
        ExitCode::Failure
    }
}
