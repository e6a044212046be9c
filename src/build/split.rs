//! Split run: one wide PNG -> vertical strips -> RGB565 header

use std::path::{Path, PathBuf};

use image::imageops;
use image::RgbaImage;
use log::info;

use crate::error::{PipelineError, Result};
use crate::export::{ExportError, Exporter, HeaderExporter};
use crate::models::EncodedImage;
use crate::output::{default_header_path, is_header_path, save_png};
use crate::rgb565;

/// Symbol prefix used for strips when none is given.
pub const SPLIT_PREFIX: &str = "bgimg";

/// Part name shared by every strip.
pub const SEGMENT_PART: &str = "segment";

/// Inputs of a split run.
#[derive(Debug, Clone)]
pub struct SplitOptions {
    pub input: PathBuf,
    pub widths: Vec<u32>,
    /// Header path; defaults to the input path with `.h`.
    pub output: Option<PathBuf>,
    pub prefix: String,
    /// Save each strip as `segment_<n>.png` here.
    pub segments_dir: Option<PathBuf>,
}

/// Cut `image` into full-height strips of `widths`, left to right.
pub fn split_strips(image: &RgbaImage, widths: &[u32]) -> Result<Vec<(u32, RgbaImage)>> {
    let total: u64 = widths.iter().map(|&w| w as u64).sum();
    if widths.is_empty() || widths.contains(&0) || total > image.width() as u64 {
        return Err(PipelineError::InvalidSplit { widths: widths.to_vec(), image_width: image.width() });
    }

    let mut start_x = 0;
    let mut strips = Vec::with_capacity(widths.len());
    for &width in widths {
        let strip = imageops::crop_imm(image, start_x, 0, width, image.height()).to_image();
        strips.push((start_x, strip));
        start_x += width;
    }
    Ok(strips)
}

/// Encode strips for the header emitter. Strip `n` is titled `segment <n+1>`.
pub fn encode_strips(strips: &[(u32, RgbaImage)], source_name: &str) -> Vec<EncodedImage> {
    strips
        .iter()
        .enumerate()
        .map(|(i, (start_x, strip))| EncodedImage {
            width: strip.width(),
            height: strip.height(),
            pos_x: *start_x as i64,
            pos_y: 0,
            pixels: rgb565::encode(strip),
            parts: SEGMENT_PART.to_string(),
            pidx: i,
            title: format!("{} {}", SEGMENT_PART, i + 1),
            layers: vec![source_name.to_string()],
        })
        .collect()
}

fn open_rgba(path: &Path) -> Result<RgbaImage> {
    if !path.is_file() {
        return Err(PipelineError::InputNotFound(path.to_path_buf()));
    }
    let image = image::open(path).map_err(|source| PipelineError::Decode { path: path.to_path_buf(), source })?;
    Ok(image.to_rgba8())
}

/// Run a split and return the header path written.
pub fn run_split(options: &SplitOptions) -> Result<PathBuf> {
    let output = options.output.clone().unwrap_or_else(|| default_header_path(&options.input));
    if !is_header_path(&output) {
        return Err(PipelineError::InvalidOutputPath(output));
    }

    let image = open_rgba(&options.input)?;
    let strips = split_strips(&image, &options.widths)?;

    if let Some(dir) = &options.segments_dir {
        for (i, (_, strip)) in strips.iter().enumerate() {
            let path = dir.join(format!("segment_{}.png", i + 1));
            save_png(strip, &path).map_err(ExportError::from)?;
            info!("Saved: {}", path.display());
        }
    }

    let source_name = options
        .input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let images = encode_strips(&strips, &source_name);

    HeaderExporter::new(options.prefix.as_str()).export(&images, &output)?;
    info!("Saved: {}", output.display());
    Ok(output)
}
