//! File name parsing for crop results.
//!
//! Every [`CropResult`](crate::types::CropResult) carries two names derived
//! from its path:
//!
//! - `fullName`: the final path component, extension included
//!   (`/art/hero.idle.png` → `hero.idle.png`)
//! - `name`: the same with only the last extension removed
//!   (`hero.idle.png` → `hero.idle`)
//!
//! Non-UTF-8 components are converted lossily.

use std::path::Path;

/// Names derived from an image path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNames {
    /// File name without its last extension.
    pub name: String,
    /// File name with extension.
    pub full_name: String,
}

/// Split a path into its display names.
///
/// - `"/a/sprite.png"` → name=`"sprite"`, full_name=`"sprite.png"`
/// - `"/a/hero.idle.png"` → name=`"hero.idle"`, full_name=`"hero.idle.png"`
/// - `"/a/.png"` → name=`".png"`, full_name=`".png"`
/// - `"/"` → both empty
pub fn file_names(path: &Path) -> FileNames {
    let full_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    FileNames { name, full_name }
}

/// Whether `path` ends in `.png`, ignoring ASCII case.
pub fn has_png_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("png"))
}
