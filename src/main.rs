//! Spriteregrid - Command-line tool for repacking sprite sheets into uniform grids

use std::process::ExitCode;

use spriteregrid::cli;

fn main() -> ExitCode {
    cli::run()
}
