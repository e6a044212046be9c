//! Errors surfaced to the user by the command-line tools

use std::path::PathBuf;

use thiserror::Error;

use crate::composition::CompositionError;
use crate::config::ConfigError;
use crate::export::ExportError;

/// Fatal error for a tool run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Config file path does not exist
    #[error("config-file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),
    /// Asset directory does not exist
    #[error("png-dir not found: {}", .0.display())]
    AssetDirNotFound(PathBuf),
    /// Output path lacks the `.h` extension
    #[error("output-file is not .h: {}", .0.display())]
    InvalidOutputPath(PathBuf),
    /// Input file for a conversion does not exist
    #[error("input file not found: {}", .0.display())]
    InputNotFound(PathBuf),
    /// A layer referenced by a data entry is missing
    #[error("'{}' file not found", .0.display())]
    MissingAsset(PathBuf),
    /// Strip widths do not fit the source image
    #[error("Split widths must be non-zero and total at most {image_width}, got {widths:?}")]
    InvalidSplit { widths: Vec<u32>, image_width: u32 },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Composition(#[from] CompositionError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error("Failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to decode '{}': {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Result type alias for tool runs.
pub type Result<T> = std::result::Result<T, PipelineError>;
