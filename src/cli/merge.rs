//! `pngmerge`: composite layer PNGs into one RGB565 header

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::info;

use super::{fail, EXIT_SUCCESS};
use crate::build::{self, MergeOptions};

#[derive(Parser, Debug)]
#[command(name = "pngmerge")]
#[command(about = "Composite layered PNG parts into a PROGMEM RGB565 header")]
#[command(version)]
pub struct MergeArgs {
    /// Asset config file
    pub config_file: PathBuf,

    /// Directory holding the layer PNGs
    pub png_dir: PathBuf,

    /// Header to write (must end in .h)
    pub output_file: PathBuf,

    /// Also write a JSON manifest of the emitted images
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Worker threads (default: available parallelism)
    #[arg(short, long, value_parser = clap::value_parser!(u16).range(1..))]
    pub jobs: Option<u16>,
}

impl MergeArgs {
    fn options(&self) -> MergeOptions {
        MergeOptions {
            config_path: self.config_file.clone(),
            asset_dir: self.png_dir.clone(),
            output_path: self.output_file.clone(),
            manifest_path: self.manifest.clone(),
            jobs: self.jobs.map(usize::from),
        }
    }
}

/// Run the merge command
pub fn run_merge(args: &MergeArgs) -> ExitCode {
    match build::run_merge(&args.options()) {
        Ok(report) => {
            info!("{} images in {} parts", report.images, report.parts);
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => fail(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_positionals_and_flags() {
        let args = MergeArgs::try_parse_from([
            "pngmerge",
            "avatar.ini",
            "png",
            "avatar.h",
            "--manifest",
            "avatar.json",
            "-j",
            "3",
        ])
        .unwrap();
        let options = args.options();
        assert_eq!(options.config_path, PathBuf::from("avatar.ini"));
        assert_eq!(options.asset_dir, PathBuf::from("png"));
        assert_eq!(options.output_path, PathBuf::from("avatar.h"));
        assert_eq!(options.manifest_path, Some(PathBuf::from("avatar.json")));
        assert_eq!(options.jobs, Some(3));
    }

    #[test]
    fn test_zero_jobs_rejected() {
        assert!(MergeArgs::try_parse_from(["pngmerge", "a", "b", "c.h", "--jobs", "0"]).is_err());
    }
}
