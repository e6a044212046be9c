//! RGB565 pixel encoding
//!
//! Pixels are packed as `RRRRRGGG GGGBBBBB` by plain bit truncation. One value,
//! [`TRANSPARENT`], is reserved to mean "do not draw"; opaque pixels that
//! would quantize to it are moved to [`TRANSPARENT_REPLACEMENT`] instead.

use image::{Rgba, RgbaImage};

/// Value the firmware treats as a transparent pixel.
pub const TRANSPARENT: u16 = 0b0000_0000_0010_0000;

/// Substitute for opaque pixels that quantize to [`TRANSPARENT`].
pub const TRANSPARENT_REPLACEMENT: u16 = 0b0000_0000_0000_0000;

/// Pixels with alpha below this are written as [`TRANSPARENT`].
pub const ALPHA_THRESHOLD: u8 = 64;

/// Truncate 8-bit channels to a packed 5-6-5 value.
pub fn rgb_to_rgb565(r: u8, g: u8, b: u8) -> u16 {
    let r5 = ((r >> 3) & 0x1F) as u16;
    let g6 = ((g >> 2) & 0x3F) as u16;
    let b5 = ((b >> 3) & 0x1F) as u16;
    (r5 << 11) | (g6 << 5) | b5
}

/// Encode a single RGBA pixel.
///
/// Low-alpha pixels become [`TRANSPARENT`] whatever their color channels say,
/// since near-invisible pixels from a resize often carry garbage RGB.
pub fn encode_pixel(pixel: &Rgba<u8>) -> u16 {
    let [r, g, b, a] = pixel.0;
    if a < ALPHA_THRESHOLD {
        return TRANSPARENT;
    }
    match rgb_to_rgb565(r, g, b) {
        TRANSPARENT => TRANSPARENT_REPLACEMENT,
        value => value,
    }
}

/// Encode an image in row-major order, top-left first.
pub fn encode(image: &RgbaImage) -> Vec<u16> {
    image.pixels().map(encode_pixel).collect()
}

/// Swap the two bytes of a value, matching the big-endian storage the
/// display driver reads.
pub fn swap_bytes(value: u16) -> u16 {
    value.swap_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_colors() {
        assert_eq!(rgb_to_rgb565(255, 0, 0), 0xF800);
        assert_eq!(rgb_to_rgb565(0, 255, 0), 0x07E0);
        assert_eq!(rgb_to_rgb565(0, 0, 255), 0x001F);
    }

    #[test]
    fn test_white_and_black() {
        assert_eq!(encode_pixel(&Rgba([255, 255, 255, 255])), 0xFFFF);
        assert_eq!(encode_pixel(&Rgba([0, 0, 0, 255])), 0x0000);
    }

    #[test]
    fn test_truncation_no_rounding() {
        // 7 >> 3 == 0, 3 >> 2 == 0
        assert_eq!(rgb_to_rgb565(7, 3, 7), 0x0000);
        assert_eq!(rgb_to_rgb565(8, 4, 8), 0x0821);
    }

    #[test]
    fn test_low_alpha_is_sentinel() {
        for a in [0u8, 1, 32, 63] {
            for rgb in [[0u8, 0, 0], [255, 255, 255], [12, 200, 99]] {
                assert_eq!(
                    encode_pixel(&Rgba([rgb[0], rgb[1], rgb[2], a])),
                    TRANSPARENT,
                    "alpha {} rgb {:?}",
                    a,
                    rgb
                );
            }
        }
    }

    #[test]
    fn test_threshold_alpha_is_opaque() {
        assert_eq!(encode_pixel(&Rgba([255, 255, 255, 64])), 0xFFFF);
    }

    #[test]
    fn test_sentinel_collision_remapped() {
        // Green channel 4..=7 quantizes to exactly the sentinel bit.
        for g in 4u8..=7 {
            assert_eq!(rgb_to_rgb565(0, g, 0), TRANSPARENT);
            assert_eq!(encode_pixel(&Rgba([0, g, 0, 255])), TRANSPARENT_REPLACEMENT);
            assert_eq!(encode_pixel(&Rgba([7, g, 7, 64])), TRANSPARENT_REPLACEMENT);
        }
        // Neighbouring values are untouched.
        assert_eq!(encode_pixel(&Rgba([0, 8, 0, 255])), 0x0040);
        assert_eq!(encode_pixel(&Rgba([8, 4, 0, 255])), 0x0820);
    }

    #[test]
    fn test_encode_scan_order() {
        let mut image = RgbaImage::new(2, 2);
        image.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        image.put_pixel(1, 0, Rgba([0, 255, 0, 255]));
        image.put_pixel(0, 1, Rgba([0, 0, 255, 255]));
        image.put_pixel(1, 1, Rgba([0, 0, 0, 0]));

        assert_eq!(encode(&image), vec![0xF800, 0x07E0, 0x001F, TRANSPARENT]);
    }

    #[test]
    fn test_swap_bytes() {
        assert_eq!(swap_bytes(0xF800), 0x00F8);
        assert_eq!(swap_bytes(TRANSPARENT), 0x2000);
    }
}
