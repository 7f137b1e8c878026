//! CLI output formatting.
//!
//! # Display
//!
//! Each image is shown as its input position and file name, with the
//! absolute path and crop geometry as indented context lines:
//!
//! ```text
//! Trimming 3 images
//! 001 square.png 100x100 (from 1000x1000)
//!     Source: /art/square.png
//!     Trimmed: left 50, top 50, right 850, bottom 850
//! 002 full.png 64x32 (unchanged)
//!     Source: /art/full.png
//! 003 empty.png
//!     Source: /art/empty.png
//!     Error: No opaque pixels in /art/empty.png
//!
//! Trimmed 1 image, 1 unchanged, 1 failed
//! ```
//!
//! Progress lines arrive in completion order; the index ties them back to
//! the input position.
//!
//! # Architecture
//!
//! Every `format_*` function returns `Vec<String>` (or `String`) and does no
//! I/O, so the layout is unit tested. `print_*` wrappers write to stdout.

use crate::process::{ProcessEvent, TrimReport};
use crate::types::CropResult;
use serde::Serialize;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Header line for a successful trim.
///
/// ```text
/// 001 square.png 100x100 (from 1000x1000)
/// 002 full.png 64x32 (unchanged)
/// ```
fn result_header(index: usize, result: &CropResult) -> String {
    let detail = if result.is_untrimmed() {
        "unchanged".to_string()
    } else {
        format!("from {}x{}", result.natural_width, result.natural_height)
    };
    format!(
        "{} {} {}x{} ({})",
        format_index(index),
        result.full_name,
        result.width,
        result.height,
        detail
    )
}

/// Format a single progress event as display lines.
pub fn format_process_event(event: &ProcessEvent) -> Vec<String> {
    match event {
        ProcessEvent::BatchStarted { image_count } => {
            let noun = if *image_count == 1 { "image" } else { "images" };
            vec![format!("Trimming {} {}", image_count, noun)]
        }
        ProcessEvent::ImageTrimmed {
            index,
            result,
            written,
        } => {
            let mut lines = vec![result_header(*index, result)];
            lines.push(format!("{}Source: {}", indent(1), result.path.display()));
            if !result.is_untrimmed() {
                let verb = if *written { "Trimmed" } else { "Would trim" };
                lines.push(format!(
                    "{}{}: left {}, top {}, right {}, bottom {}",
                    indent(1),
                    verb,
                    result.left,
                    result.top,
                    result.right,
                    result.bottom
                ));
            }
            lines
        }
        ProcessEvent::ImageFailed { index, path, error } => vec![
            format!("{} {}", format_index(*index), display_name(path)),
            format!("{}Source: {}", indent(1), path.display()),
            format!("{}Error: {}", indent(1), error),
        ],
    }
}

/// Counts for the closing summary line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub trimmed: usize,
    pub unchanged: usize,
    pub failed: usize,
}

impl Summary {
    pub fn from_reports(reports: &[TrimReport]) -> Self {
        reports
            .iter()
            .fold(Summary::default(), |mut s, report| {
                match &report.outcome {
                    Ok(r) if r.is_untrimmed() => s.unchanged += 1,
                    Ok(_) => s.trimmed += 1,
                    Err(_) => s.failed += 1,
                }
                s
            })
    }
}

/// Format the summary line printed after a batch.
///
/// ```text
/// Trimmed 2 images, 1 unchanged, 1 failed
/// No PNG files to trim
/// ```
pub fn format_summary(summary: &Summary, dry_run: bool) -> String {
    let total = summary.trimmed + summary.unchanged + summary.failed;
    if total == 0 {
        return "No PNG files to trim".to_string();
    }
    let verb = if dry_run { "Would trim" } else { "Trimmed" };
    let noun = if summary.trimmed == 1 { "image" } else { "images" };
    let mut line = format!("{} {} {}", verb, summary.trimmed, noun);
    if summary.unchanged > 0 {
        line.push_str(&format!(", {} unchanged", summary.unchanged));
    }
    if summary.failed > 0 {
        line.push_str(&format!(", {} failed", summary.failed));
    }
    line
}

/// One JSON entry: the crop result itself, or the path with its error.
#[derive(Serialize)]
#[serde(untagged)]
enum JsonEntry<'a> {
    Trimmed(&'a CropResult),
    Failed { path: &'a Path, error: String },
}

/// Render reports as a pretty JSON array, in input order.
pub fn to_json(reports: &[TrimReport]) -> Result<String, serde_json::Error> {
    let entries: Vec<JsonEntry<'_>> = reports
        .iter()
        .map(|report| match &report.outcome {
            Ok(result) => JsonEntry::Trimmed(result),
            Err(e) => JsonEntry::Failed {
                path: &report.path,
                error: e.to_string(),
            },
        })
        .collect();
    serde_json::to_string_pretty(&entries)
}

/// Print the summary line to stdout.
pub fn print_summary(reports: &[TrimReport], dry_run: bool) {
    println!();
    println!("{}", format_summary(&Summary::from_reports(reports), dry_run));
}
