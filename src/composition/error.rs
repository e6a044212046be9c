//! Error types for layer compositing

use std::path::PathBuf;

use thiserror::Error;

use crate::output::OutputError;

/// Error while compositing a data entry.
#[derive(Debug, Error)]
pub enum CompositionError {
    /// A layer file named in the config does not exist
    #[error("'{}' file not found", .0.display())]
    MissingAsset(PathBuf),
    /// The entry's part has no offset rectangle
    #[error("Part '{0}' has no offset")]
    UnknownPart(String),
    /// A layer could not be decoded
    #[error("Failed to decode '{}': {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    /// The composed preview PNG could not be written
    #[error("Failed to save '{}': {source}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: OutputError,
    },
}
