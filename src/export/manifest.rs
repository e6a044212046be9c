//! JSON manifest export.
//!
//! Describes each emitted image in header order, for scripts that need the
//! geometry without parsing C.
//!
//! ```json
//! [
//!   {
//!     "index": 0,
//!     "parts": "mouth",
//!     "pidx": 0,
//!     "title": "closed",
//!     "width": 40,
//!     "height": 20,
//!     "pixel_count": 800,
//!     "x": 80,
//!     "y": 150,
//!     "layers": ["mouth-closed.W40_H20_X80_Y150.png"]
//!   }
//! ]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::export::{Exporter, Result};
use crate::models::EncodedImage;
use crate::output::write_text;

/// One image in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub index: usize,
    pub parts: String,
    pub pidx: usize,
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub pixel_count: usize,
    pub x: i64,
    pub y: i64,
    pub layers: Vec<String>,
}

impl ManifestEntry {
    pub fn from_image(index: usize, image: &EncodedImage) -> Self {
        Self {
            index,
            parts: image.parts.clone(),
            pidx: image.pidx,
            title: image.title.clone(),
            width: image.width,
            height: image.height,
            pixel_count: image.pixel_count(),
            x: image.pos_x,
            y: image.pos_y,
            layers: image.layers.clone(),
        }
    }
}

/// JSON manifest exporter.
#[derive(Debug, Clone)]
pub struct ManifestExporter {
    pretty: bool,
}

impl Default for ManifestExporter {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl ManifestExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Exporter for ManifestExporter {
    fn export_to_string(&self, images: &[EncodedImage]) -> Result<String> {
        let entries: Vec<ManifestEntry> =
            images.iter().enumerate().map(|(i, img)| ManifestEntry::from_image(i, img)).collect();
        let json = if self.pretty {
            serde_json::to_string_pretty(&entries)?
        } else {
            serde_json::to_string(&entries)?
        };
        Ok(json)
    }

    fn export(&self, images: &[EncodedImage], output_path: &Path) -> Result<()> {
        let json = self.export_to_string(images)?;
        write_text(output_path, &json)?;
        Ok(())
    }

    fn format_name(&self) -> &'static str {
        "manifest"
    }

    fn extension(&self) -> &'static str {
        "json"
    }
}
