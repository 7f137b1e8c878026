//! Filesystem backend — `std::fs` for bytes, [`codec`](super::codec) for pixels.
//!
//! ## Write path
//!
//! `store` never writes into the original file directly:
//!
//! 1. Encode the cropped pixels fully in memory.
//! 2. Write them to a temp file in the same directory (same filesystem, so the
//!    rename below is atomic).
//! 3. Copy the original file's permissions onto the temp file.
//! 4. Rename the temp file over the original.
//!
//! A failure at any step leaves the original bytes intact.

use super::backend::{BackendError, ImageBackend};
use super::codec;
use image::DynamicImage;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Backend that reads and rewrites PNG files on disk.
#[derive(Debug, Clone, Default)]
pub struct RustBackend {
    max_pixels: Option<u64>,
}

impl RustBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse to decode images with more than `limit` pixels.
    pub fn with_max_pixels(limit: Option<u64>) -> Self {
        Self { max_pixels: limit }
    }
}

fn write_err(path: &Path) -> impl FnOnce(std::io::Error) -> BackendError + '_ {
    move |source| BackendError::Write {
        path: path.to_path_buf(),
        source,
    }
}

/// Replace the file at `path` with `bytes` via a sibling temp file.
fn replace_file(path: &Path, bytes: &[u8]) -> Result<(), BackendError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let permissions = std::fs::metadata(path)
        .map_err(write_err(path))?
        .permissions();

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err(path))?;
    tmp.write_all(bytes).map_err(write_err(path))?;
    tmp.as_file().sync_all().map_err(write_err(path))?;
    tmp.as_file()
        .set_permissions(permissions)
        .map_err(write_err(path))?;
    tmp.persist(path).map_err(|e| write_err(path)(e.error))?;
    Ok(())
}

impl ImageBackend for RustBackend {
    fn load(&self, path: &Path) -> Result<DynamicImage, BackendError> {
        let bytes = std::fs::read(path)?;
        Ok(codec::decode(&bytes, self.max_pixels)?)
    }

    fn store(&self, path: &Path, image: &DynamicImage) -> Result<(), BackendError> {
        let bytes = codec::encode(image)?;
        replace_file(path, &bytes)?;
        log::debug!(
            "wrote {}x{} {:?} PNG ({} bytes) to {}",
            image.width(),
            image.height(),
            image.color(),
            bytes.len(),
            path.display()
        );
        Ok(())
    }
}
