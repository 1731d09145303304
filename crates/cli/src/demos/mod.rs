// crates/cli/src/demos/mod.rs
//! One driver per subcommand. Each is independent of the others.

pub mod abort;
pub mod atfork;
pub mod double_fork;
pub mod jobctl;
pub mod limits;
pub mod mktemp;
