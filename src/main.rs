//! tasklanes - swim-lane layout for project tasks

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = tasklanes::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
