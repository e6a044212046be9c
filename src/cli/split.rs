//! `pngsplit`: cut a wide PNG into strips and emit one header

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use super::{fail, EXIT_SUCCESS};
use crate::build::{self, SplitOptions, SPLIT_PREFIX};

#[derive(Parser, Debug)]
#[command(name = "pngsplit")]
#[command(about = "Split a PNG into vertical strips and emit a PROGMEM RGB565 header")]
#[command(version)]
pub struct SplitArgs {
    /// Source PNG
    pub png_file: PathBuf,

    /// Strip widths, left to right
    #[arg(required = true, value_parser = clap::value_parser!(u32).range(1..))]
    pub widths: Vec<u32>,

    /// Header to write (default: <png stem>.h next to the input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Symbol prefix for the generated arrays
    #[arg(long, default_value = SPLIT_PREFIX)]
    pub prefix: String,

    /// Also save each strip as a PNG in this directory
    #[arg(long)]
    pub segments_dir: Option<PathBuf>,
}

impl SplitArgs {
    fn options(&self) -> SplitOptions {
        SplitOptions {
            input: self.png_file.clone(),
            widths: self.widths.clone(),
            output: self.output.clone(),
            prefix: self.prefix.clone(),
            segments_dir: self.segments_dir.clone(),
        }
    }
}

/// Run the split command
pub fn run_split(args: &SplitArgs) -> ExitCode {
    match build::run_split(&args.options()) {
        Ok(_) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => fail(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_widths() {
        let args = SplitArgs::try_parse_from(["pngsplit", "room.png", "80", "160", "80"]).unwrap();
        assert_eq!(args.widths, vec![80, 160, 80]);
        assert_eq!(args.prefix, "bgimg");
        assert!(args.output.is_none());
    }

    #[test]
    fn test_widths_required() {
        assert!(SplitArgs::try_parse_from(["pngsplit", "room.png"]).is_err());
        assert!(SplitArgs::try_parse_from(["pngsplit", "room.png", "0"]).is_err());
    }
}
