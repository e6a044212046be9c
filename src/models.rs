//! Data models for encoded images handed to the header emitter

/// One composed, scaled and RGB565-encoded image.
///
/// `pos_x`/`pos_y` are placement coordinates after scaling and mirroring, so
/// they can be negative when a mirrored part hangs off the reference box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub width: u32,
    pub height: u32,
    pub pos_x: i64,
    pub pos_y: i64,
    /// Pixels in row-major order, host byte order.
    pub pixels: Vec<u16>,
    pub parts: String,
    pub pidx: usize,
    pub title: String,
    /// Source layer filenames, topmost first, for provenance comments.
    pub layers: Vec<String>,
}

impl EncodedImage {
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    /// Size of the pixel data in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len() * 2
    }
}
