//! Source-over alpha blitting

use image::{Rgba, RgbaImage};

/// Blit a layer onto the canvas with its top-left corner at `(x, y)`.
///
/// Offsets may be negative or run past the canvas; the layer is clipped to
/// the canvas bounds.
pub fn blit_layer(canvas: &mut RgbaImage, layer: &RgbaImage, x: i64, y: i64) {
    let canvas_width = canvas.width() as i64;
    let canvas_height = canvas.height() as i64;

    for (sy, row) in layer.rows().enumerate() {
        let dest_y = y + sy as i64;
        if dest_y < 0 {
            continue;
        }
        if dest_y >= canvas_height {
            break;
        }

        for (sx, src) in row.enumerate() {
            let dest_x = x + sx as i64;
            if dest_x < 0 {
                continue;
            }
            if dest_x >= canvas_width {
                break;
            }

            // Fully transparent source, skip
            if src[3] == 0 {
                continue;
            }

            let (dx, dy) = (dest_x as u32, dest_y as u32);
            let blended = blend_over(src, canvas.get_pixel(dx, dy));
            canvas.put_pixel(dx, dy, blended);
        }
    }
}

/// Porter-Duff "source over" of `src` onto `dst`.
pub fn blend_over(src: &Rgba<u8>, dst: &Rgba<u8>) -> Rgba<u8> {
    if src[3] == 255 {
        return *src;
    }

    let src_alpha = src[3] as f32 / 255.0;
    let dst_alpha = dst[3] as f32 / 255.0;

    // out_alpha = src_alpha + dst_alpha * (1 - src_alpha)
    let out_alpha = src_alpha + dst_alpha * (1.0 - src_alpha);
    if out_alpha == 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    // out_color = (src * src_alpha + dst * dst_alpha * (1 - src_alpha)) / out_alpha
    let composite = |s: u8, d: u8| -> u8 {
        let s = s as f32 / 255.0;
        let d = d as f32 / 255.0;
        let result = (s * src_alpha + d * dst_alpha * (1.0 - src_alpha)) / out_alpha;
        (result.clamp(0.0, 1.0) * 255.0).round() as u8
    };

    Rgba([
        composite(src[0], dst[0]),
        composite(src[1], dst[1]),
        composite(src[2], dst[2]),
        (out_alpha * 255.0).round() as u8,
    ])
}
