// crates/cli/src/print.rs
use std::io::{self, Write};

use crate::validate::exit_code_from_error_kind;

pub const PROGRAM_NAME: &str = "posix-demos";

/// Report a parse failure the way the demos report everything else and exit.
///
/// Help and version output go to stdout with status 0; usage errors print one
/// `posix-demos: ...` line plus clap's hint lines on stderr and exit 1.
pub fn handle_clap_error(e: clap::Error) -> ! {
    use clap::error::ErrorKind;
    let kind = e.kind();
    let code = exit_code_from_error_kind(kind);
    if matches!(kind, ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        let _ = e.print();
        let _ = io::stdout().flush();
    } else {
        let msg = e.to_string();
        let msg = msg.strip_prefix("error: ").unwrap_or(&msg).trim_end();
        let mut lines = msg.lines();
        if let Some(first) = lines.next() {
            eprintln!("{PROGRAM_NAME}: {first}");
        }
        for line in lines.filter(|l| !l.trim().is_empty()) {
            eprintln!("{line}");
        }
    }
    std::process::exit(i32::from(code))
}

/// Write `line` and a newline, mapping failures to the `write error` kind.
pub(crate) fn emit(
    out: &mut dyn Write,
    line: std::fmt::Arguments<'_>,
) -> posix_demos_core::Result<()> {
    out.write_fmt(line)
        .and_then(|()| out.write_all(b"\n"))
        .map_err(|e| posix_demos_core::Error::io("write error", e))
}
