//! `file2h`: embed a file as a byte array

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use super::{fail, EXIT_SUCCESS};
use crate::build;
use crate::export::binary::DEFAULT_SYMBOL;

#[derive(Parser, Debug)]
#[command(name = "file2h")]
#[command(about = "Convert any file into a PROGMEM unsigned char array")]
#[command(version)]
pub struct File2hArgs {
    /// File to embed
    pub input_file: PathBuf,

    /// Header to write
    pub output_file: PathBuf,

    /// C symbol of the array
    #[arg(short, long, default_value = DEFAULT_SYMBOL)]
    pub name: String,
}

/// Run the file2h command
pub fn run_file2h(args: &File2hArgs) -> ExitCode {
    match build::run_file2h(&args.input_file, &args.output_file, &args.name) {
        Ok(_) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => fail(e),
    }
}
