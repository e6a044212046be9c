//! pngmerge - Composite layered PNG parts into an RGB565 PROGMEM header

use std::process::ExitCode;

use progmem_assets::cli;

fn main() -> ExitCode {
    cli::pngmerge_main()
}
