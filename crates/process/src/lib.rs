// crates/process/src/lib.rs

pub mod atfork;
pub mod double_fork;
mod os;

pub use atfork::{AtforkRegistry, DEFAULT_LIMIT, ForkHandler, Forked};
pub use double_fork::{DoubleFork, INTERMEDIATE_SPAWN_FAILED, Lineage, double_fork, wait_for_reparent};
pub use os::{exit_now, flush_stdio, fork_process};
