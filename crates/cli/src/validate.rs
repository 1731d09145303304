// crates/cli/src/validate.rs
use posix_demos_core::ExitCode;

pub fn exit_code_from_error_kind(kind: clap::error::ErrorKind) -> ExitCode {
    use clap::error::ErrorKind::*;
    match kind {
        DisplayHelp | DisplayVersion => ExitCode::Ok,
        _ => ExitCode::Failure,
    }
}
