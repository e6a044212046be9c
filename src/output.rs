//! Writing PNG previews and generated header files

use image::RgbaImage;
use std::io;
use std::path::{Path, PathBuf};

/// Extension every generated header must carry.
pub const HEADER_EXTENSION: &str = "h";

/// Error type for output operations
#[derive(Debug)]
pub enum OutputError {
    /// IO error during file operations
    Io(io::Error),
    /// Image encoding error
    Image(image::ImageError),
}

impl std::fmt::Display for OutputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputError::Io(e) => write!(f, "IO error: {}", e),
            OutputError::Image(e) => write!(f, "Image error: {}", e),
        }
    }
}

impl std::error::Error for OutputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OutputError::Io(e) => Some(e),
            OutputError::Image(e) => Some(e),
        }
    }
}

impl From<io::Error> for OutputError {
    fn from(e: io::Error) -> Self {
        OutputError::Io(e)
    }
}

impl From<image::ImageError> for OutputError {
    fn from(e: image::ImageError) -> Self {
        OutputError::Image(e)
    }
}

fn ensure_parent(path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Save an RGBA image to a PNG file, creating parent directories.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), OutputError> {
    ensure_parent(path)?;
    image.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}

/// Write generated text (a header) to `path`, creating parent directories.
pub fn write_text(path: &Path, contents: &str) -> Result<(), OutputError> {
    ensure_parent(path)?;
    std::fs::write(path, contents)?;
    Ok(())
}

/// Whether `path` names a C header (`.h`).
pub fn is_header_path(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(HEADER_EXTENSION)
}

/// Default header path for an input file: same directory and stem, `.h`.
pub fn default_header_path(input: &Path) -> PathBuf {
    input.with_extension(HEADER_EXTENSION)
}
