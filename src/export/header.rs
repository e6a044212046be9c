//! C header export of encoded images.
//!
//! # Output Layout
//!
//! ```text
//! // 画像パーツの部位別テーブル
//! uint16_t imgTableMouth[] = { 0, 1 };
//!   // [0] = closed
//!   // [1] = open
//!
//! /*
//!  * [0] : closed
//!  *       40 x 20 , 1600 bytes
//!  *       mouth-closed.W40_H20_X80_Y150.png
//!  *
//!  ...
//! */
//! const unsigned short imgBin0[800] PROGMEM = {
//! 0x0020, 0x0020, ...
//!   0x00F8, ...};
//! ...
//!
//! const zundavatar::ImageInfo imgInfo[] PROGMEM = {
//!   {imgBin0, 40, 20, 800, 80, 150, 0x0020},		// [0] closed
//!   {imgBin1, 40, 22, 880, 80, 149, 0x0020}		// [1] open
//! };
//! ```
//!
//! Pixel values are written byte-swapped; the firmware reads them as
//! big-endian 16-bit words.

use std::path::Path;

use crate::export::{ExportError, Exporter, Result};
use crate::models::EncodedImage;
use crate::output::write_text;
use crate::rgb565::{swap_bytes, TRANSPARENT};

/// Heading of the per-part index tables.
pub const TABLES_HEADING: &str = "// 画像パーツの部位別テーブル";

/// C type of the metadata rows.
pub const IMAGE_INFO_TYPE: &str = "zundavatar::ImageInfo";

/// Values per line in pixel arrays.
const VALUES_PER_LINE: usize = 8;

/// Upper-case the first character and lower-case the rest.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Group image indices by `parts`, keeping first-seen order of parts.
fn group_by_part(images: &[EncodedImage]) -> Vec<(&str, Vec<usize>)> {
    let mut groups: Vec<(&str, Vec<usize>)> = Vec::new();
    for (idx, image) in images.iter().enumerate() {
        match groups.iter_mut().find(|(part, _)| *part == image.parts) {
            Some((_, members)) => members.push(idx),
            None => groups.push((image.parts.as_str(), vec![idx])),
        }
    }
    groups
}

/// Join lines with a newline after each one.
fn join_lines(lines: &[String]) -> String {
    let mut text = lines.join("\n");
    if !lines.is_empty() {
        text.push('\n');
    }
    text
}

/// One `uint16_t <prefix>Table<Part>[]` per distinct part.
pub fn render_part_tables(images: &[EncodedImage], prefix: &str) -> String {
    let mut lines = vec![TABLES_HEADING.to_string()];
    for (part, members) in group_by_part(images) {
        let csv = members.iter().map(|i| i.to_string()).collect::<Vec<_>>().join(", ");
        lines.push(format!("uint16_t {}Table{}[] = {{ {} }};", prefix, capitalize(part), csv));
        for (i, idx) in members.iter().enumerate() {
            lines.push(format!("  // [{}] = {}", i, images[*idx].title));
        }
    }
    join_lines(&lines)
}

/// Comment lines describing where each image came from.
pub fn render_provenance(images: &[EncodedImage]) -> String {
    let mut lines = Vec::new();
    for (idx, image) in images.iter().enumerate() {
        lines.push(format!(" * [{}] : {}", idx, image.title));
        lines.push(format!(" *       {} x {} , {} bytes", image.width, image.height, image.byte_size()));
        for layer in &image.layers {
            lines.push(format!(" *       {}", layer));
        }
        lines.push(" *".to_string());
    }
    join_lines(&lines)
}

/// One `const unsigned short <prefix>Bin<n>[]` per image.
pub fn render_pixel_arrays(images: &[EncodedImage], prefix: &str) -> String {
    let mut lines = Vec::new();
    for (idx, image) in images.iter().enumerate() {
        lines.push(format!(
            "const unsigned short {}Bin{}[{}] PROGMEM = {{  ",
            prefix,
            idx,
            image.pixel_count()
        ));
        let body = image
            .pixels
            .chunks(VALUES_PER_LINE)
            .map(|chunk| {
                chunk.iter().map(|v| format!("0x{:04X}", swap_bytes(*v))).collect::<Vec<_>>().join(", ")
            })
            .collect::<Vec<_>>()
            .join(", \n  ");
        lines.push(format!("{}}};", body));
    }
    join_lines(&lines)
}

/// The `<prefix>Info[]` metadata table, one row per image.
pub fn render_info_table(images: &[EncodedImage], prefix: &str) -> String {
    let mut lines = vec![format!("const {} {}Info[] PROGMEM = {{", IMAGE_INFO_TYPE, prefix)];
    for (idx, image) in images.iter().enumerate() {
        let comma = if idx + 1 < images.len() { "," } else { "" };
        lines.push(format!(
            "  {{{}Bin{}, {}, {}, {}, {}, {}, 0x{:04X}}}{}\t\t// [{}] {}",
            prefix,
            idx,
            image.width,
            image.height,
            image.pixel_count(),
            image.pos_x,
            image.pos_y,
            TRANSPARENT,
            comma,
            idx,
            image.title
        ));
    }
    let mut table = lines.join("\n");
    table.truncate(table.trim_end_matches([',', '\n']).len());
    table.push_str("\n};\n");
    table
}

/// Render the complete header text for `images`.
///
/// Part tables come first, then the provenance comment, the pixel arrays and
/// the metadata table. Output depends only on the images and their order.
pub fn emit_header(images: &[EncodedImage], prefix: &str) -> String {
    format!(
        "{}\n/*\n{}*/\n{}\n{}\n",
        render_part_tables(images, prefix),
        render_provenance(images),
        render_pixel_arrays(images, prefix),
        render_info_table(images, prefix)
    )
}

/// Header exporter.
#[derive(Debug, Clone)]
pub struct HeaderExporter {
    prefix: String,
}

impl HeaderExporter {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }
}

impl Exporter for HeaderExporter {
    fn export_to_string(&self, images: &[EncodedImage]) -> Result<String> {
        Ok(emit_header(images, &self.prefix))
    }

    fn export(&self, images: &[EncodedImage], output_path: &Path) -> Result<()> {
        let text = self.export_to_string(images)?;
        write_text(output_path, &text).map_err(ExportError::from)
    }

    fn format_name(&self) -> &'static str {
        "header"
    }

    fn extension(&self) -> &'static str {
        crate::output::HEADER_EXTENSION
    }
}
