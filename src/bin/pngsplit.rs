//! pngsplit - Split a PNG into vertical strips and emit an RGB565 PROGMEM header

use std::process::ExitCode;

use progmem_assets::cli;

fn main() -> ExitCode {
    cli::pngsplit_main()
}
