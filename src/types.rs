//! Shared types at the library boundary.
//!
//! [`CropResult`] is the externally visible record; its JSON field names
//! (`fullName`, `naturalWidth`, `geometricBounds`, ...) are part of the
//! output contract and must not change.

use crate::imaging::CropRect;
use crate::naming::file_names;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Geometry of one trimmed image, relative to its original canvas.
///
/// `left`/`top`/`right`/`bottom` are *distances* in pixels from each original
/// edge to the matching crop edge. `geometric_bounds` holds the crop edges
/// themselves as `[left, top, right, bottom]` in pixel coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropResult {
    /// File name without extension.
    pub name: String,
    /// File name with extension.
    pub full_name: String,
    /// Absolute path of the trimmed file.
    pub path: PathBuf,
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    /// Crop width.
    pub width: u32,
    /// Crop height.
    pub height: u32,
    pub natural_width: u32,
    pub natural_height: u32,
    pub geometric_bounds: [u32; 4],
}

impl CropResult {
    /// Build the record for a crop of `rect` out of a `natural_width` x
    /// `natural_height` canvas.
    pub fn new(path: &Path, rect: &CropRect, natural_width: u32, natural_height: u32) -> Self {
        let names = file_names(path);
        Self {
            name: names.name,
            full_name: names.full_name,
            path: path.to_path_buf(),
            left: rect.left,
            top: rect.top,
            right: natural_width - rect.right,
            bottom: natural_height - rect.bottom,
            width: rect.width(),
            height: rect.height(),
            natural_width,
            natural_height,
            geometric_bounds: rect.edges(),
        }
    }

    /// True when the crop covers the whole original canvas.
    pub fn is_untrimmed(&self) -> bool {
        self.left == 0 && self.top == 0 && self.right == 0 && self.bottom == 0
    }
}

/// What to trim: one file-or-directory reference, or a list of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrimInput {
    Single(PathBuf),
    Many(Vec<PathBuf>),
}

impl TrimInput {
    /// The references in caller order.
    pub fn references(&self) -> &[PathBuf] {
        match self {
            TrimInput::Single(path) => std::slice::from_ref(path),
            TrimInput::Many(paths) => paths,
        }
    }
}

impl From<PathBuf> for TrimInput {
    fn from(path: PathBuf) -> Self {
        TrimInput::Single(path)
    }
}

impl From<&Path> for TrimInput {
    fn from(path: &Path) -> Self {
        TrimInput::Single(path.to_path_buf())
    }
}

impl From<Vec<PathBuf>> for TrimInput {
    fn from(paths: Vec<PathBuf>) -> Self {
        TrimInput::Many(paths)
    }
}
