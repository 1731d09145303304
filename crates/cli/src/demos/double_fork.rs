// crates/cli/src/demos/double_fork.rs
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use nix::unistd::getpid;
use posix_demos_core::{DemoConfig, Result};
use process::double_fork;

/// Upper bound on how long the grandchild waits to observe its new parent.
const REPARENT_TIMEOUT: Duration = Duration::from_secs(1);

pub fn run(cfg: &DemoConfig) -> Result<()> {
    let linger = cfg.linger;
    let forked = double_fork(move |lineage| {
        let parent = lineage.wait_for_reparent(REPARENT_TIMEOUT);
        let mut out = io::stdout().lock();
        let _ = writeln!(
            out,
            "second child, pid = {}, parent pid = {parent}",
            getpid()
        );
        let _ = out.flush();
        drop(out);
        thread::sleep(linger);
        0
    })?;
    println!(
        "first child = {}, reaped by {}",
        forked.intermediate, forked.original
    );
    Ok(())
}
