// crates/core/src/exit.rs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    Ok = 0,
    Failure = 1,
}

impl From<ExitCode> for u8 {
    fn from(e: ExitCode) -> Self {
        e as u8
    }
}

impl From<ExitCode> for i32 {
    fn from(e: ExitCode) -> Self {
        i32::from(e as u8)
    }
}
