// crates/cli/src/demos/jobctl.rs
use std::fs::File;
use std::io;
use std::os::fd::AsFd;

use posix_demos_core::{DemoConfig, Error, Result};
use signals::{copy_stream, install_stop_handler};

/// Copy stdin to stdout unbuffered, stopping and resuming with the shell.
pub fn run(cfg: &DemoConfig) -> Result<()> {
    if cfg.job_control && !install_stop_handler()? {
        tracing::info!("SIGTSTP inherited as ignored, job control left off");
    }
    let mut input = dup(io::stdin().as_fd(), "read error")?;
    let mut output = dup(io::stdout().as_fd(), "write error")?;
    copy_stream(&mut input, &mut output)?;
    Ok(())
}

fn dup(fd: std::os::fd::BorrowedFd<'_>, context: &str) -> Result<File> {
    fd.try_clone_to_owned()
        .map(File::from)
        .map_err(|e| Error::io(context, e))
}
