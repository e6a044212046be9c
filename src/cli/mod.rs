//! Command-line interface implementation
//!
//! Each binary in `src/bin/` parses its own argument struct and hands it to
//! the matching `run_*` entry point here.

mod file2h;
mod merge;
mod split;

use std::process::ExitCode;

use clap::Parser;

pub use file2h::{run_file2h, File2hArgs};
pub use merge::{run_merge, MergeArgs};
pub use split::{run_split, SplitArgs};

/// Exit codes shared by all tools
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
#[allow(dead_code)]
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Start `env_logger` at `info` unless `RUST_LOG` says otherwise.
fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_target(false)
        .try_init();
}

/// Print a fatal error the way every tool does and return the failure code.
fn fail(err: impl std::fmt::Display) -> ExitCode {
    eprintln!("Error: {}", err);
    ExitCode::from(EXIT_ERROR)
}

/// `pngmerge` entry point.
pub fn pngmerge_main() -> ExitCode {
    init_logging();
    run_merge(&MergeArgs::parse())
}

/// `file2h` entry point.
pub fn file2h_main() -> ExitCode {
    init_logging();
    run_file2h(&File2hArgs::parse())
}

/// `pngsplit` entry point.
pub fn pngsplit_main() -> ExitCode {
    init_logging();
    run_split(&SplitArgs::parse())
}
