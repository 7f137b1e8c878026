//! Pure calculation functions for crop geometry.
//!
//! Nothing here touches the filesystem. The scanner reads an in-memory
//! [`DynamicImage`]; everything after it is integer arithmetic on rectangles.
//!
//! Two coordinate conventions meet here:
//!
//! ```text
//! OpaqueBounds   inclusive pixel indices   0 <= left <= right < width
//! CropRect       edges between pixels      0 <= left <= right <= width
//! ```
//!
//! [`CropRect::from_bounds`] is the only place that converts between them.

use super::params::{EdgeMode, Padding};
use image::DynamicImage;

/// Inclusive pixel extents of every pixel with non-zero alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpaqueBounds {
    pub top: u32,
    pub left: u32,
    pub right: u32,
    pub bottom: u32,
}

/// Crop region in edge coordinates. `right` and `bottom` are exclusive.
///
/// Values produced by [`CropRect::from_bounds`] and [`CropRect::padded`] lie
/// inside `[0, width] x [0, height]` of the source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

/// Find the smallest rectangle covering every pixel whose alpha is not zero.
///
/// Alpha is read at the image's own sample depth, so a 16-bit alpha of 1 still
/// counts. Images without an alpha channel are opaque everywhere.
///
/// The four extrema are tracked independently across the whole buffer, so
/// the result can be larger than any single opaque pixel's row or column.
/// Returns `None` when the image is fully transparent.
pub fn find_opaque_bounds(image: &DynamicImage) -> Option<OpaqueBounds> {
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return None;
    }

    match image {
        DynamicImage::ImageLumaA8(buf) => scan_alpha(buf.as_raw(), width, 2, |a| *a != 0),
        DynamicImage::ImageLumaA16(buf) => scan_alpha(buf.as_raw(), width, 2, |a| *a != 0),
        DynamicImage::ImageRgba8(buf) => scan_alpha(buf.as_raw(), width, 4, |a| *a != 0),
        DynamicImage::ImageRgba16(buf) => scan_alpha(buf.as_raw(), width, 4, |a| *a != 0),
        DynamicImage::ImageRgba32F(buf) => scan_alpha(buf.as_raw(), width, 4, |a| *a > 0.0),
        other if other.color().has_alpha() => {
            let widened = other.to_rgba16();
            scan_alpha(widened.as_raw(), width, 4, |a| *a != 0)
        }
        _ => Some(OpaqueBounds {
            top: 0,
            left: 0,
            right: width - 1,
            bottom: height - 1,
        }),
    }
}

/// Scan interleaved samples whose last channel is alpha.
fn scan_alpha<T>(
    samples: &[T],
    width: u32,
    channels: usize,
    is_opaque: impl Fn(&T) -> bool,
) -> Option<OpaqueBounds> {
    let mut min_x = u32::MAX;
    let mut min_y = u32::MAX;
    let mut max_x = 0u32;
    let mut max_y = 0u32;
    let mut found = false;

    let row_len = width as usize * channels;
    for (y, row) in samples.chunks_exact(row_len).enumerate() {
        let y = y as u32;
        for (x, pixel) in row.chunks_exact(channels).enumerate() {
            if !is_opaque(&pixel[channels - 1]) {
                continue;
            }
            let x = x as u32;
            found = true;
            min_x = min_x.min(x);
            max_x = max_x.max(x);
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }
    }

    found.then_some(OpaqueBounds {
        top: min_y,
        left: min_x,
        right: max_x,
        bottom: max_y,
    })
}

/// Clamp `value` into `min..=max`. Values inside the range, including the
/// endpoints, are returned unchanged.
pub fn clamp(value: i64, min: i64, max: i64) -> i64 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

impl CropRect {
    /// The whole canvas.
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            left: 0,
            top: 0,
            right: width,
            bottom: height,
        }
    }

    /// Convert inclusive opaque extents into crop edges.
    pub fn from_bounds(bounds: OpaqueBounds, mode: EdgeMode) -> Self {
        let (right, bottom) = match mode {
            EdgeMode::Exclusive => (bounds.right + 1, bounds.bottom + 1),
            EdgeMode::Legacy => (bounds.right, bounds.bottom),
        };
        Self {
            left: bounds.left,
            top: bounds.top,
            right,
            bottom,
        }
    }

    /// Grow the rectangle by `padding` on every side, then clamp each edge
    /// independently into the canvas.
    pub fn padded(self, padding: Padding, width: u32, height: u32) -> Self {
        let p = padding.pixels();
        let (w, h) = (i64::from(width), i64::from(height));

        // Saturating so an extreme padding clamps instead of wrapping.
        let left = clamp(i64::from(self.left).saturating_sub(p), 0, w);
        let top = clamp(i64::from(self.top).saturating_sub(p), 0, h);
        let right = clamp(i64::from(self.right).saturating_add(p), 0, w);
        let bottom = clamp(i64::from(self.bottom).saturating_add(p), 0, h);

        // Every value is now within 0..=u32::MAX.
        Self {
            left: left as u32,
            top: top as u32,
            right: right as u32,
            bottom: bottom as u32,
        }
    }

    pub fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }

    /// A rectangle with no area cannot be encoded as a PNG.
    pub fn is_degenerate(&self) -> bool {
        self.right <= self.left || self.bottom <= self.top
    }

    /// `[left, top, right, bottom]`.
    pub fn edges(&self) -> [u32; 4] {
        [self.left, self.top, self.right, self.bottom]
    }
}
