//! file2h - Convert any file into a PROGMEM byte array header

use std::process::ExitCode;

use progmem_assets::cli;

fn main() -> ExitCode {
    cli::file2h_main()
}
