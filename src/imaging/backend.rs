//! Image storage backend trait and shared types.
//!
//! The [`ImageBackend`] trait is the boundary between the trim pipeline and
//! the filesystem: `load` turns a path into pixels in their stored color
//! type, `store` writes pixels back over that path. The pipeline is written against the trait so
//! tests can drive it with an in-memory mock.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend): `std::fs` plus the
//! [`codec`](super::codec) module.

use super::codec::CodecError;
use image::DynamicImage;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Trait for image storage backends.
///
/// `Sync` so a single backend can be shared across rayon workers.
pub trait ImageBackend: Sync {
    /// Read and decode the image at `path`.
    fn load(&self, path: &Path) -> Result<DynamicImage, BackendError>;

    /// Encode `image` and replace the file at `path` with it.
    fn store(&self, path: &Path, image: &DynamicImage) -> Result<(), BackendError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use image::RgbaImage;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Mock backend that serves images from memory and records operations.
    /// Uses Mutex (not RefCell) so it is Sync and works with rayon's par_iter.
    #[derive(Default)]
    pub struct MockBackend {
        pub images: Mutex<HashMap<PathBuf, DynamicImage>>,
        pub load_delays: HashMap<PathBuf, Duration>,
        pub failing_stores: Vec<PathBuf>,
        pub operations: Mutex<Vec<RecordedOp>>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Load(String),
        Store {
            path: String,
            width: u32,
            height: u32,
        },
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_images<I: Into<DynamicImage>>(images: Vec<(&str, I)>) -> Self {
            Self {
                images: Mutex::new(
                    images
                        .into_iter()
                        .map(|(p, img)| (PathBuf::from(p), img.into()))
                        .collect(),
                ),
                ..Self::default()
            }
        }

        /// Make `load` for `path` sleep before answering.
        pub fn delay_load(mut self, path: &str, delay: Duration) -> Self {
            self.load_delays.insert(PathBuf::from(path), delay);
            self
        }

        /// Make `store` for `path` fail with a write error.
        pub fn fail_store(mut self, path: &str) -> Self {
            self.failing_stores.push(PathBuf::from(path));
            self
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.lock().unwrap().clone()
        }

        pub fn stored_image(&self, path: &str) -> Option<DynamicImage> {
            self.images.lock().unwrap().get(Path::new(path)).cloned()
        }
    }

    impl ImageBackend for MockBackend {
        fn load(&self, path: &Path) -> Result<DynamicImage, BackendError> {
            if let Some(delay) = self.load_delays.get(path) {
                std::thread::sleep(*delay);
            }
            self.operations
                .lock()
                .unwrap()
                .push(RecordedOp::Load(path.to_string_lossy().to_string()));

            self.images
                .lock()
                .unwrap()
                .get(path)
                .cloned()
                .ok_or_else(|| BackendError::Codec(CodecError::NotAPng))
        }

        fn store(&self, path: &Path, image: &DynamicImage) -> Result<(), BackendError> {
            if self.failing_stores.iter().any(|p| p == path) {
                return Err(BackendError::Write {
                    path: path.to_path_buf(),
                    source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
                });
            }
            self.operations.lock().unwrap().push(RecordedOp::Store {
                path: path.to_string_lossy().to_string(),
                width: image.width(),
                height: image.height(),
            });
            self.images
                .lock()
                .unwrap()
                .insert(path.to_path_buf(), image.clone());
            Ok(())
        }
    }

    #[test]
    fn mock_records_load() {
        let backend = MockBackend::with_images(vec![("/a.png", RgbaImage::new(4, 4))]);

        let img = backend.load(Path::new("/a.png")).unwrap();
        assert_eq!((img.width(), img.height()), (4, 4));

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(&ops[0], RecordedOp::Load(p) if p == "/a.png"));
    }

    #[test]
    fn mock_missing_image_errors() {
        let backend = MockBackend::new();
        assert!(backend.load(Path::new("/missing.png")).is_err());
    }

    #[test]
    fn mock_store_replaces_image() {
        let backend = MockBackend::with_images(vec![("/a.png", RgbaImage::new(4, 4))]);
        backend
            .store(Path::new("/a.png"), &RgbaImage::new(2, 3).into())
            .unwrap();

        let stored = backend.stored_image("/a.png").unwrap();
        assert_eq!((stored.width(), stored.height()), (2, 3));
        assert_eq!(
            backend.get_operations(),
            vec![RecordedOp::Store {
                path: "/a.png".to_string(),
                width: 2,
                height: 3,
            }]
        );
    }

    #[test]
    fn mock_failing_store_errors() {
        let backend = MockBackend::new().fail_store("/ro.png");
        let result = backend.store(Path::new("/ro.png"), &RgbaImage::new(1, 1).into());
        assert!(matches!(result, Err(BackendError::Write { .. })));
    }
}
