// src/bin/posix-demos/main.rs
use posix_demos_cli::{PROGRAM_NAME, cli_command, handle_clap_error};

fn main() {
    let matches = cli_command()
        .try_get_matches()
        .unwrap_or_else(|e| handle_clap_error(e));
    if let Err(e) = posix_demos_cli::run(&matches) {
        eprintln!("{PROGRAM_NAME}: {e}");
        std::process::exit(i32::from(e.exit_code()));
    }
}
