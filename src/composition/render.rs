//! Compositing a data entry into one scaled, encoded image

use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::io::Reader as ImageReader;
use image::{ImageError, Rgba, Rgba32FImage, RgbaImage};
use log::{debug, info, warn};

use crate::config::{DataEntry, PartOffset, PipelineConfig};
use crate::models::EncodedImage;
use crate::output::save_png;
use crate::rgb565;

use super::blend::blit_layer;
use super::error::CompositionError;

/// A composed canvas and where it is placed on the device screen.
#[derive(Debug, Clone)]
pub struct ComposedPart {
    pub canvas: RgbaImage,
    pub pos_x: i64,
    pub pos_y: i64,
}

/// Scale a coordinate, rounding halves to even.
pub fn scale_coord(value: i64, ratio: f64) -> i64 {
    (value as f64 * ratio).round_ties_even() as i64
}

/// Scaled canvas dimension, rounded up.
pub fn scale_dimension(value: u32, ratio: f64) -> u32 {
    (value as f64 * ratio).ceil() as u32
}

/// X position of a mirrored part, reflected inside the scaled `reference` box.
///
/// A part `d` pixels from the reference's left edge ends up `d` pixels from
/// its right edge.
pub fn mirror_x(pos_x: i64, scaled_width: u32, reference: &PartOffset, ratio: f64) -> i64 {
    let ref_x = scale_coord(reference.x, ratio);
    let ref_width = scale_coord(reference.width as i64, ratio);
    let from_left = pos_x - ref_x;
    ref_x + ref_width - scaled_width as i64 - from_left
}

/// Path of the preview PNG written for an entry.
pub fn preview_path(asset_dir: &Path, entry: &DataEntry) -> PathBuf {
    asset_dir.join(format!("{}-{}.png", entry.parts, entry.pidx))
}

fn load_layer(path: &Path) -> Result<RgbaImage, CompositionError> {
    if !path.is_file() {
        return Err(CompositionError::MissingAsset(path.to_path_buf()));
    }
    // Format comes from the content; layer names may carry extra suffixes.
    let image = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(ImageError::from)
        .and_then(|reader| reader.decode())
        .map_err(|source| CompositionError::Decode { path: path.to_path_buf(), source })?;
    Ok(image.to_rgba8())
}

/// Lanczos3 resize in premultiplied alpha, so transparent pixels do not
/// bleed their color into opaque edges.
fn resize_canvas(canvas: RgbaImage, width: u32, height: u32) -> RgbaImage {
    if canvas.dimensions() == (width, height) {
        return canvas;
    }
    let premultiplied = Rgba32FImage::from_fn(canvas.width(), canvas.height(), |x, y| {
        let [r, g, b, a] = canvas.get_pixel(x, y).0.map(|c| c as f32 / 255.0);
        Rgba([r * a, g * a, b * a, a])
    });
    let scaled = imageops::resize(&premultiplied, width, height, FilterType::Lanczos3);
    RgbaImage::from_fn(width, height, |x, y| unpremultiply(scaled.get_pixel(x, y)))
}

fn unpremultiply(pixel: &Rgba<f32>) -> Rgba<u8> {
    let [r, g, b, a] = pixel.0;
    if a <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }
    let to_u8 = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    Rgba([to_u8(r / a), to_u8(g / a), to_u8(b / a), to_u8(a)])
}

/// Composite an entry's layers onto its part canvas, then scale and mirror.
///
/// Layers are listed topmost first, so they are pasted in reverse order.
pub fn compose_entry(
    config: &PipelineConfig,
    entry: &DataEntry,
    asset_dir: &Path,
) -> Result<ComposedPart, CompositionError> {
    let offset = config
        .offset(&entry.parts)
        .ok_or_else(|| CompositionError::UnknownPart(entry.parts.clone()))?;

    let mut canvas = RgbaImage::new(offset.width, offset.height);
    for layer in entry.layers.iter().rev() {
        let path = asset_dir.join(&layer.filename);
        let image = load_layer(&path)?;
        if image.dimensions() != (layer.w, layer.h) {
            warn!(
                "'{}' is {}x{} but its name says {}x{}",
                layer.filename,
                image.width(),
                image.height(),
                layer.w,
                layer.h
            );
        }
        let x = layer.x as i64 - offset.x;
        let y = layer.y as i64 - offset.y;
        debug!("{}-{}: paste '{}' at ({}, {})", entry.parts, entry.pidx, layer.filename, x, y);
        blit_layer(&mut canvas, &image, x, y);
    }

    let ratio = config.resize.ratio();
    let width = scale_dimension(offset.width, ratio);
    let height = scale_dimension(offset.height, ratio);
    let mut canvas = resize_canvas(canvas, width, height);
    let mut pos_x = scale_coord(offset.x, ratio);
    let pos_y = scale_coord(offset.y, ratio);

    if let Some(reference) = config.mirror_reference() {
        imageops::flip_horizontal_in_place(&mut canvas);
        pos_x = mirror_x(pos_x, width, reference, ratio);
    }

    Ok(ComposedPart { canvas, pos_x, pos_y })
}

/// Encode a composed part for the header emitter.
pub fn encode_part(entry: &DataEntry, part: &ComposedPart) -> EncodedImage {
    EncodedImage {
        width: part.canvas.width(),
        height: part.canvas.height(),
        pos_x: part.pos_x,
        pos_y: part.pos_y,
        pixels: rgb565::encode(&part.canvas),
        parts: entry.parts.clone(),
        pidx: entry.pidx,
        title: entry.title.clone(),
        layers: entry.layers.iter().map(|l| l.filename.clone()).collect(),
    }
}

/// Compose, save the `<parts>-<pidx>.png` preview into `asset_dir`, and encode.
pub fn composite(
    config: &PipelineConfig,
    entry: &DataEntry,
    asset_dir: &Path,
) -> Result<EncodedImage, CompositionError> {
    let part = compose_entry(config, entry, asset_dir)?;

    let path = preview_path(asset_dir, entry);
    save_png(&part.canvas, &path).map_err(|source| CompositionError::Save { path: path.clone(), source })?;
    info!("Saved: {}", path.display());

    Ok(encode_part(entry, &part))
}
