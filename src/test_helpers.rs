//! Shared test utilities for the trimpng test suite.
//!
//! Synthetic images and PNG files, so no binary fixtures live in the repo.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_helpers::*;
//!
//! let tmp = tempfile::TempDir::new().unwrap();
//! let path = tmp.path().join("square.png");
//! write_png(&path, &image_with_opaque_rect(1000, 1000, 50, 50, 100, 100));
//! ```

use image::{DynamicImage, ImageBuffer, Rgb, RgbImage, Rgba, RgbaImage};
use std::path::Path;

// =========================================================================
// In-memory images
// =========================================================================

/// A fully transparent image.
pub fn transparent_image(width: u32, height: u32) -> RgbaImage {
    RgbaImage::new(width, height)
}

/// A transparent canvas with one opaque rectangle of size `w` x `h` whose
/// top-left pixel is at (`x`, `y`).
pub fn image_with_opaque_rect(width: u32, height: u32, x: u32, y: u32, w: u32, h: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |px, py| {
        if px >= x && px < x + w && py >= y && py < y + h {
            Rgba([200, 40, 90, 255])
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}

/// 16-bit RGBA variant of [`image_with_opaque_rect`]: `pixel` inside the
/// rectangle, all-zero samples outside.
pub fn image16_with_opaque_rect(
    width: u32,
    height: u32,
    x: u32,
    y: u32,
    w: u32,
    h: u32,
    pixel: [u16; 4],
) -> DynamicImage {
    let buf: ImageBuffer<Rgba<u16>, Vec<u16>> = ImageBuffer::from_fn(width, height, |px, py| {
        if px >= x && px < x + w && py >= y && py < y + h {
            Rgba(pixel)
        } else {
            Rgba([0, 0, 0, 0])
        }
    });
    DynamicImage::ImageRgba16(buf)
}

// =========================================================================
// PNG files
// =========================================================================

/// Encode `image` as a PNG at `path`, in its own color type.
pub fn write_png<I: Clone + Into<DynamicImage>>(path: &Path, image: &I) {
    let bytes = crate::imaging::codec::encode(&image.clone().into()).unwrap();
    std::fs::write(path, bytes).unwrap();
}

/// Encode a solid-color RGB8 (no alpha channel) PNG.
pub fn encode_rgb_png(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
    let image = RgbImage::from_pixel(width, height, Rgb(color));
    crate::imaging::codec::encode(&image.into()).unwrap()
}

/// Encode an 8-bit indexed PNG, with a `tRNS` chunk when `trns` is not empty.
pub fn encode_indexed_png(
    width: u32,
    height: u32,
    palette: &[[u8; 3]],
    trns: &[u8],
    indices: &[u8],
) -> Vec<u8> {
    let mut bytes = Vec::new();
    let mut encoder = png::Encoder::new(&mut bytes, width, height);
    encoder.set_color(png::ColorType::Indexed);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_palette(palette.concat());
    if !trns.is_empty() {
        encoder.set_trns(trns.to_vec());
    }
    let mut writer = encoder.write_header().unwrap();
    writer.write_image_data(indices).unwrap();
    writer.finish().unwrap();
    bytes
}
