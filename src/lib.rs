//! # trimpng
//!
//! Crops PNG images in place to the bounding box of their opaque pixels,
//! with optional padding, and reports where the crop landed.
//!
//! # Architecture: Per-Image Pipeline
//!
//! ```text
//! 1. Resolve   paths/dirs  →  PNG paths       (missing and non-PNG dropped)
//! 2. Trim      PNG path    →  CropResult      (decode, bound, pad, crop, rewrite)
//! 3. Report    results     →  progress lines / JSON
//! ```
//!
//! Every image runs through its own pipeline on the rayon pool. Nothing is
//! shared between pipelines, so one failing image never affects another.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Turns file and directory references into absolute PNG paths |
//! | [`process`] | Per-image trim pipeline and the parallel batch runner |
//! | [`imaging`] | PNG codec, opaque-bounds scan, padding math, cropping, file backend |
//! | [`config`] | `trimpng.toml` loading, merging, and validation |
//! | [`types`] | `CropResult` and `TrimInput`, the public data model |
//! | [`naming`] | File name helpers (`name`, `fullName`, `.png` suffix check) |
//! | [`output`] | CLI output formatting for progress, summary, and JSON |
//!
//! # Design Decisions
//!
//! ## Exclusive Crop Edges
//!
//! The opaque box is tracked with inclusive pixel coordinates; the crop
//! rectangle uses an exclusive right/bottom edge, so a 100×100 opaque square
//! produces a 100×100 output. [`imaging::EdgeMode::Legacy`] keeps the older
//! behavior of dropping the last opaque row and column for callers that
//! depend on it.
//!
//! ## Distances, Not Coordinates
//!
//! `right` and `bottom` in [`CropResult`] are how far the crop edge sits from
//! the original canvas edge, not coordinates. A second trim of an already
//! trimmed image therefore reports zero on every side. The raw rectangle is
//! in `geometric_bounds`.
//!
//! ## Whole-Pixel Padding
//!
//! Padding accepts any real number and rounds it to whole pixels before use.
//! Non-numeric padding is treated as zero with a warning rather than
//! producing a nonsensical crop.
//!
//! ## Atomic Rewrites
//!
//! A trimmed image is written to a temporary file next to the original and
//! renamed over it, so an interrupted run never leaves a half-written PNG.

pub mod config;
pub mod imaging;
pub mod naming;
pub mod output;
pub mod process;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use process::{TrimError, TrimOptions, TrimReport, trim, trim_all};
pub use types::{CropResult, TrimInput};
