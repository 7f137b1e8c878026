//! The trim pipeline and batch runner.
//!
//! ## Per image
//!
//! ```text
//! load (read + decode) → find opaque bounds → edge mode → pad + clamp
//!                      → crop → encode → replace file → CropResult
//! ```
//!
//! Each stage consumes the previous stage's output, so one image is strictly
//! sequential. The decoded buffer and the cropped buffer belong to that one
//! invocation and are dropped when it returns.
//!
//! An image whose crop already covers its whole canvas is left on disk as is.
//!
//! ## Batches
//!
//! Images are independent: no pipeline reads or writes another image's file
//! or pixels. A batch runs every pipeline on the rayon pool and collects one
//! [`TrimReport`] per input path, in input order regardless of which image
//! finishes first. A failing image never stops its siblings.
//!
//! ## Fully transparent images
//!
//! There is no opaque box to crop to. Depending on [`EmptyPolicy`] the image
//! is reported as [`TrimError::EmptyImage`] or passed through with
//! full-canvas geometry. In both cases the file is not touched.

use crate::config::TrimConfig;
use crate::imaging::{
    BackendError, CropRect, EdgeMode, EmptyPolicy, ImageBackend, Padding, RustBackend, crop,
    plan_crop,
};
use crate::scan::resolve_inputs;
use crate::types::{CropResult, TrimInput};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrimError {
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error("No opaque pixels in {}", .0.display())]
    EmptyImage(PathBuf),
    #[error("Crop of {} has no area ({width}x{height})", path.display())]
    DegenerateCrop {
        path: PathBuf,
        width: u32,
        height: u32,
    },
}

/// Settings for one trim run.
#[derive(Debug, Clone, Default)]
pub struct TrimOptions {
    pub padding: Padding,
    pub edge_mode: EdgeMode,
    pub on_empty: EmptyPolicy,
    /// Expand directory inputs recursively.
    pub recursive: bool,
    /// Compute results without rewriting any file.
    pub dry_run: bool,
    /// Refuse to decode images with more pixels than this.
    pub max_pixels: Option<u64>,
}

impl TrimOptions {
    /// Build options from a loaded config. `dry_run` starts off.
    pub fn from_config(config: &TrimConfig) -> Self {
        Self {
            padding: config.padding,
            edge_mode: config.edge_mode,
            on_empty: config.on_empty,
            recursive: config.scan.recursive,
            dry_run: false,
            max_pixels: config.processing.max_pixels,
        }
    }
}

/// Outcome for one requested image.
#[derive(Debug)]
pub struct TrimReport {
    pub path: PathBuf,
    pub outcome: Result<CropResult, TrimError>,
}

/// Progress events sent while a batch runs.
///
/// Events arrive in completion order; `index` is the 1-based input position.
#[derive(Debug, Clone)]
pub enum ProcessEvent {
    BatchStarted {
        image_count: usize,
    },
    ImageTrimmed {
        index: usize,
        result: CropResult,
        written: bool,
    },
    ImageFailed {
        index: usize,
        path: PathBuf,
        error: String,
    },
}

/// Resolve `input` to PNG paths and trim them all on disk.
///
/// Missing and non-PNG inputs are dropped before anything runs; an input that
/// resolves to nothing returns an empty list.
pub fn trim(
    input: &TrimInput,
    options: &TrimOptions,
    progress: Option<Sender<ProcessEvent>>,
) -> Vec<TrimReport> {
    let paths = resolve_inputs(input, options.recursive);
    if paths.is_empty() {
        log::debug!("no PNG files to trim");
        return Vec::new();
    }
    trim_all(&paths, options, progress)
}

/// Trim already-resolved paths with the filesystem backend.
pub fn trim_all(
    paths: &[PathBuf],
    options: &TrimOptions,
    progress: Option<Sender<ProcessEvent>>,
) -> Vec<TrimReport> {
    let backend = RustBackend::with_max_pixels(options.max_pixels);
    trim_all_with_backend(&backend, paths, options, progress)
}

/// Trim paths using a specific backend (allows testing with mock).
pub fn trim_all_with_backend(
    backend: &impl ImageBackend,
    paths: &[PathBuf],
    options: &TrimOptions,
    progress: Option<Sender<ProcessEvent>>,
) -> Vec<TrimReport> {
    if let Some(tx) = &progress {
        tx.send(ProcessEvent::BatchStarted {
            image_count: paths.len(),
        })
        .ok();
    }

    paths
        .par_iter()
        .enumerate()
        .map(|(i, path)| {
            let outcome = trim_one(backend, path, options);
            if let Some(tx) = &progress {
                tx.send(progress_event(i + 1, path, &outcome, options.dry_run))
                    .ok();
            }
            TrimReport {
                path: path.clone(),
                outcome,
            }
        })
        .collect()
}

fn progress_event(
    index: usize,
    path: &Path,
    outcome: &Result<CropResult, TrimError>,
    dry_run: bool,
) -> ProcessEvent {
    match outcome {
        Ok(result) => ProcessEvent::ImageTrimmed {
            index,
            result: result.clone(),
            written: !dry_run && !result.is_untrimmed(),
        },
        Err(e) => ProcessEvent::ImageFailed {
            index,
            path: path.to_path_buf(),
            error: e.to_string(),
        },
    }
}

/// Run the full pipeline for one image.
pub fn trim_one(
    backend: &impl ImageBackend,
    path: &Path,
    options: &TrimOptions,
) -> Result<CropResult, TrimError> {
    let image = backend.load(path)?;
    let (natural_width, natural_height) = (image.width(), image.height());

    let Some(rect) = plan_crop(&image, options.padding, options.edge_mode) else {
        log::debug!("{} is fully transparent", path.display());
        return match options.on_empty {
            EmptyPolicy::Report => Err(TrimError::EmptyImage(path.to_path_buf())),
            EmptyPolicy::Passthrough => Ok(CropResult::new(
                path,
                &CropRect::full(natural_width, natural_height),
                natural_width,
                natural_height,
            )),
        };
    };

    if rect.is_degenerate() {
        return Err(TrimError::DegenerateCrop {
            path: path.to_path_buf(),
            width: rect.width(),
            height: rect.height(),
        });
    }

    let result = CropResult::new(path, &rect, natural_width, natural_height);
    if result.is_untrimmed() {
        // Same pixels, same size: rewriting would only re-encode.
        log::debug!("{} has nothing to trim", path.display());
        return Ok(result);
    }
    if !options.dry_run {
        let cropped = crop(&image, &rect);
        drop(image);
        backend.store(path, &cropped)?;
    }

    log::debug!(
        "{}: {}x{} → {}x{} at {:?}",
        path.display(),
        natural_width,
        natural_height,
        result.width,
        result.height,
        rect.edges()
    );
    Ok(result)
}
