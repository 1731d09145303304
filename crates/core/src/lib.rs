// crates/core/src/lib.rs

pub mod config;
mod error;
mod exit;

pub use config::{DemoConfig, DemoConfigBuilder};
pub use error::{Error, Result};
pub use exit::ExitCode;
