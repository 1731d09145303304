// crates/signals/src/lib.rs

pub mod abort;
pub mod disposition;
pub mod jobctl;
pub mod mask;

pub use abort::{abort, abort_with, flush_all, reset_if_ignored};
pub use disposition::{Action, Disposition};
pub use jobctl::{BUFFSIZE, copy_stream, install_stop_handler, stop_count};
pub use nix::sys::signal::Signal;
