// crates/tmpfile/src/lib.rs
//! Exclusive creation of uniquely named files from a `...XXXXXX` template.

use std::ffi::{CString, OsStr};
use std::fs::File;
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

use logging::DebugFlag;
use nix::errno::Errno;
use nix::sys::stat::stat;
use nix::unistd::{mkstemp, unlink};
use posix_demos_core::{Error, Result};

/// Placeholder the system replaces with unique characters.
pub const PLACEHOLDER: &[u8] = b"XXXXXX";

/// A validated filename template.
///
/// Each [`create`](Template::create) works on its own copy of the pattern, so a
/// single template can be reused for any number of files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pattern: CString,
}

impl Template {
    pub fn new(pattern: impl AsRef<Path>) -> Result<Self> {
        let bytes = pattern.as_ref().as_os_str().as_bytes();
        if !bytes.ends_with(PLACEHOLDER) {
            return Err(Error::InvalidTemplate(format!(
                "{} does not end in XXXXXX",
                pattern.as_ref().display()
            )));
        }
        let pattern = CString::new(bytes)
            .map_err(|_| Error::InvalidTemplate("interior NUL byte".into()))?;
        Ok(Self { pattern })
    }

    pub fn as_path(&self) -> &Path {
        Path::new(OsStr::from_bytes(self.pattern.as_bytes()))
    }

    /// The fixed part of every generated name.
    pub fn prefix(&self) -> &Path {
        let bytes = self.pattern.as_bytes();
        Path::new(OsStr::from_bytes(&bytes[..bytes.len() - PLACEHOLDER.len()]))
    }

    /// Create and open a new file whose name is derived from the template.
    pub fn create(&self) -> Result<TempFile> {
        let (fd, path) =
            mkstemp(self.pattern.as_c_str()).map_err(|e| map_errno(e, self.as_path()))?;
        tracing::debug!(target: DebugFlag::Tmpfile.target(), path = %path.display(), "created");
        Ok(TempFile {
            path,
            file: File::from(fd),
        })
    }
}

fn map_errno(errno: Errno, template: &Path) -> Error {
    let name = template.display().to_string();
    match errno {
        Errno::EEXIST => Error::ResourceExhausted(format!("no unique name left for {name}")),
        Errno::EACCES | Errno::EPERM | Errno::EROFS => Error::PermissionDenied(name),
        Errno::EINVAL => Error::InvalidTemplate(name),
        other => Error::errno(format!("can't create temp file {name}"), other),
    }
}

/// An open, newly created file. Dropping it closes the handle but leaves the
/// name in place.
#[derive(Debug)]
pub struct TempFile {
    path: PathBuf,
    file: File,
}

impl TempFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file(&self) -> &File {
        &self.file
    }

    pub fn into_parts(self) -> (PathBuf, File) {
        (self.path, self.file)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Exists,
    Missing,
}

/// Check whether `path` names anything.
pub fn probe(path: &Path) -> Result<Presence> {
    match stat(path) {
        Ok(_) => Ok(Presence::Exists),
        Err(Errno::ENOENT) => Ok(Presence::Missing),
        Err(e) => Err(Error::errno("stat failed", e)),
    }
}

pub fn remove(path: &Path) -> Result<()> {
    unlink(path).map_err(|e| Error::errno(format!("unlink {}", path.display()), e))?;
    tracing::debug!(target: DebugFlag::Tmpfile.target(), path = %path.display(), "unlinked");
    Ok(())
}
