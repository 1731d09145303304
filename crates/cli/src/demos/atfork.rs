// crates/cli/src/demos/atfork.rs
use nix::sys::wait::waitpid;
use posix_demos_core::{Error, Result};
use process::{AtforkRegistry, ForkHandler, Forked, exit_now};

fn triple(n: usize) -> ForkHandler {
    ForkHandler::new()
        .prepare(move || println!("prepare: {n}"))
        .parent(move || println!("parent: {n}"))
        .child(move || println!("child: {n}"))
}

/// Register triples 0, 1 and 2, fork, and reap the child.
pub fn run() -> Result<()> {
    let mut registry = AtforkRegistry::new();
    for n in 0..3 {
        registry.register(triple(n))?;
    }
    match registry.fork()? {
        Forked::Child => {
            println!("child, fork finished...");
            exit_now(0)
        }
        Forked::Parent { child } => {
            println!("parent, fork finished...");
            waitpid(child, None).map_err(|e| Error::WaitFailed(e.desc().to_string()))?;
            Ok(())
        }
    }
}
