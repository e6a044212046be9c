//! Export formats for encoded images.
//!
//! - [`header`]: C header with PROGMEM pixel arrays, metadata and part tables
//! - [`manifest`]: JSON description of the same images for tooling
//! - [`binary`]: raw bytes to a PROGMEM byte array (no image semantics)

pub mod binary;
pub mod header;
pub mod manifest;

pub use binary::bytes_to_progmem;
pub use header::{emit_header, HeaderExporter};
pub use manifest::{ManifestEntry, ManifestExporter};

use std::path::Path;

use crate::models::EncodedImage;
use crate::output::OutputError;

/// Error type for export operations.
#[derive(Debug)]
pub enum ExportError {
    /// IO error during file operations
    Io(std::io::Error),
    /// Serialization error (e.g., JSON encoding failed)
    Serialization(String),
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::Io(e) => write!(f, "IO error: {}", e),
            ExportError::Serialization(e) => write!(f, "Serialization error: {}", e),
        }
    }
}

impl std::error::Error for ExportError {}

impl From<std::io::Error> for ExportError {
    fn from(e: std::io::Error) -> Self {
        ExportError::Io(e)
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(e: serde_json::Error) -> Self {
        ExportError::Serialization(e.to_string())
    }
}

impl From<OutputError> for ExportError {
    fn from(e: OutputError) -> Self {
        match e {
            OutputError::Io(e) => ExportError::Io(e),
            OutputError::Image(e) => ExportError::Serialization(e.to_string()),
        }
    }
}

/// Result type alias for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Trait for image-set exporters.
pub trait Exporter {
    /// Render the images to text.
    fn export_to_string(&self, images: &[EncodedImage]) -> Result<String>;

    /// Render the images and write them to `output_path`.
    fn export(&self, images: &[EncodedImage], output_path: &Path) -> Result<()>;

    /// Get the format identifier (e.g., "header", "manifest").
    fn format_name(&self) -> &'static str;

    /// Get the default file extension for this format.
    fn extension(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_error_display() {
        let io_err =
            ExportError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"));
        assert!(io_err.to_string().contains("IO error"));

        let ser_err = ExportError::Serialization("invalid json".to_string());
        assert!(ser_err.to_string().contains("Serialization error"));
    }

    #[test]
    fn test_export_error_from_output_error() {
        let err: ExportError =
            OutputError::Io(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied")).into();
        assert!(matches!(err, ExportError::Io(_)));
    }
}
