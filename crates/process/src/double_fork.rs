// crates/process/src/double_fork.rs
//! Fork twice so the worker is inherited by init and never becomes a zombie
//! of the caller.
//!
//! Three roles take part:
//!
//! * the *original* process spawns the intermediate and reaps it,
//! * the *intermediate* spawns the grandchild, reports its pid over a pipe and
//!   exits at once,
//! * the *grandchild* runs the workload. Nobody waits for it; its exit status
//!   is discarded.

use std::fs::File;
use std::io::{Read, Write};
use std::panic::{self, AssertUnwindSafe};
use std::thread;
use std::time::{Duration, Instant};

use logging::DebugFlag;
use nix::errno::Errno;
use nix::sys::wait::{WaitStatus, waitpid};
use nix::unistd::{ForkResult, Pid, getpid, getppid, pipe};
use posix_demos_core::{Error, Result};

use crate::os::{exit_now, fork_process};

/// Exit status of an intermediate process that failed to spawn the grandchild.
pub const INTERMEDIATE_SPAWN_FAILED: i32 = 1;

/// Exit status of a grandchild whose workload panicked.
const WORK_PANICKED: i32 = 101;

const REPARENT_POLL: Duration = Duration::from_millis(5);

/// Pids involved in a completed double fork, as seen by the original process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoubleFork {
    pub original: Pid,
    pub intermediate: Pid,
    pub grandchild: Pid,
}

/// What the grandchild knows about its ancestry when its workload starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lineage {
    pub original: Pid,
    pub intermediate: Pid,
}

impl Lineage {
    /// Wait until the intermediate has exited and the grandchild has been
    /// reparented. See [`wait_for_reparent`].
    pub fn wait_for_reparent(&self, timeout: Duration) -> Pid {
        wait_for_reparent(self.intermediate, timeout)
    }
}

/// Run `work` in a grandchild process detached from the caller's process tree.
///
/// Returns only in the original process, after the intermediate has been
/// reaped. The grandchild leaves through `_exit` with the value `work`
/// returned; the intermediate never runs any caller code.
///
/// An intermediate that cannot spawn the grandchild exits with
/// [`INTERMEDIATE_SPAWN_FAILED`], which is reported here as
/// [`Error::SpawnFailed`].
pub fn double_fork<F>(work: F) -> Result<DoubleFork>
where
    F: FnOnce(Lineage) -> i32,
{
    let original = getpid();
    let (rx, tx) = pipe().map_err(|e| Error::errno("pipe", e))?;
    let mut rx = File::from(rx);
    let tx = File::from(tx);

    match fork_process() {
        Err(e) => Err(Error::spawn(e)),
        Ok(ForkResult::Child) => {
            drop(rx);
            run_intermediate(original, tx, work)
        }
        Ok(ForkResult::Parent { child }) => {
            drop(tx);
            tracing::debug!(
                target: DebugFlag::Fork.target(),
                intermediate = child.as_raw(),
                "spawned intermediate"
            );
            reap_intermediate(child)?;
            let grandchild = read_pid(&mut rx)?;
            tracing::debug!(
                target: DebugFlag::Fork.target(),
                grandchild = grandchild.as_raw(),
                "grandchild detached"
            );
            Ok(DoubleFork {
                original,
                intermediate: child,
                grandchild,
            })
        }
    }
}

fn run_intermediate<F>(original: Pid, mut tx: File, work: F) -> !
where
    F: FnOnce(Lineage) -> i32,
{
    let lineage = Lineage {
        original,
        intermediate: getpid(),
    };
    match fork_process() {
        Err(e) => {
            eprintln!("fork error: {e}");
            exit_now(INTERMEDIATE_SPAWN_FAILED)
        }
        Ok(ForkResult::Parent { child }) => {
            let _ = tx.write_all(&child.as_raw().to_ne_bytes());
            exit_now(0)
        }
        Ok(ForkResult::Child) => {
            drop(tx);
            let code =
                panic::catch_unwind(AssertUnwindSafe(|| work(lineage))).unwrap_or(WORK_PANICKED);
            exit_now(code)
        }
    }
}

fn reap_intermediate(intermediate: Pid) -> Result<()> {
    let status = loop {
        match waitpid(intermediate, None) {
            Err(Errno::EINTR) => continue,
            Err(e) => return Err(Error::WaitFailed(e.desc().to_string())),
            Ok(status) => break status,
        }
    };
    tracing::debug!(target: DebugFlag::Wait.target(), ?status, "reaped intermediate");
    if status.pid() != Some(intermediate) {
        return Err(Error::WaitFailed(format!(
            "expected pid {intermediate}, got {status:?}"
        )));
    }
    match status {
        WaitStatus::Exited(_, 0) => Ok(()),
        WaitStatus::Exited(_, _) => Err(Error::SpawnFailed(
            "intermediate could not spawn grandchild".into(),
        )),
        other => Err(Error::WaitFailed(format!(
            "intermediate ended abnormally: {other:?}"
        ))),
    }
}

fn read_pid(rx: &mut File) -> Result<Pid> {
    let mut buf = [0u8; 4];
    rx.read_exact(&mut buf)
        .map_err(|e| Error::io("reading grandchild pid", e))?;
    Ok(Pid::from_raw(i32::from_ne_bytes(buf)))
}

/// Block until the parent of the calling process is no longer
/// `former_parent`, or until `timeout` elapses. Returns the current parent.
pub fn wait_for_reparent(former_parent: Pid, timeout: Duration) -> Pid {
    let deadline = Instant::now() + timeout;
    loop {
        let parent = getppid();
        if parent != former_parent || Instant::now() >= deadline {
            return parent;
        }
        thread::sleep(REPARENT_POLL);
    }
}
