//! High-level image operations.
//!
//! These functions combine the calculations with pixel work: planning a crop
//! from a decoded image and cutting it out.

use super::calculations::{CropRect, find_opaque_bounds};
use super::params::{EdgeMode, Padding};
use image::DynamicImage;

/// Plan the crop for an image without cutting anything.
///
/// Scan → edge conversion → padding and clamp. `None` means the image has no
/// pixel with non-zero alpha.
pub fn plan_crop(
    image: &DynamicImage,
    padding: Padding,
    edge_mode: EdgeMode,
) -> Option<CropRect> {
    let (width, height) = (image.width(), image.height());
    find_opaque_bounds(image)
        .map(|bounds| CropRect::from_bounds(bounds, edge_mode))
        .map(|rect| rect.padded(padding, width, height))
}

/// Copy the pixels inside `rect` into a new buffer sized to the crop.
///
/// The result has the source color type and sample depth.
/// `rect` must lie inside the image, which [`CropRect::padded`] guarantees.
/// A degenerate rect yields an empty buffer.
pub fn crop(image: &DynamicImage, rect: &CropRect) -> DynamicImage {
    image.crop_imm(rect.left, rect.top, rect.width(), rect.height())
}
