//! Input resolution: file and directory references → PNG paths.
//!
//! Turns what the user typed into the flat list the trim pipeline consumes.
//! Nothing here is an error: anything that cannot be trimmed is dropped
//! (and logged at debug level) before any image is opened.
//!
//! ## Rules
//!
//! - **Missing paths** are dropped.
//! - **Directories** expand to the files they contain, sorted by file name.
//!   Only direct children unless `recursive` is set.
//! - **Non-PNG paths** (anything not ending in `.png`, any case) are dropped.
//! - **Paths** are canonicalized to absolute form.
//! - **Duplicates** (after canonicalization) keep their first position.
//!
//! ```text
//! trim a.png sprites/ a.png missing.png notes.txt
//!
//! /work/a.png
//! /work/sprites/idle.png
//! /work/sprites/walk.png
//! ```

use crate::naming::has_png_extension;
use crate::types::TrimInput;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Resolve `input` into an ordered, deduplicated list of absolute PNG paths.
pub fn resolve_inputs(input: &TrimInput, recursive: bool) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    let mut paths = Vec::new();

    for reference in input.references() {
        for candidate in expand_reference(reference, recursive) {
            if !has_png_extension(&candidate) {
                log::debug!("skipping non-PNG {}", candidate.display());
                continue;
            }
            let absolute = match std::fs::canonicalize(&candidate) {
                Ok(p) => p,
                Err(e) => {
                    log::debug!("skipping {}: {e}", candidate.display());
                    continue;
                }
            };
            if seen.insert(absolute.clone()) {
                paths.push(absolute);
            }
        }
    }

    paths
}

/// Expand one reference into candidate files, in a stable order.
fn expand_reference(reference: &Path, recursive: bool) -> Vec<PathBuf> {
    if reference.is_file() {
        return vec![reference.to_path_buf()];
    }
    if !reference.is_dir() {
        log::debug!("skipping missing {}", reference.display());
        return Vec::new();
    }

    let mut walker = WalkDir::new(reference)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name();
    if !recursive {
        walker = walker.max_depth(1);
    }

    walker
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("cannot read {}: {e}", reference.display());
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .collect()
}
