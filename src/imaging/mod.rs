//! Image processing — decode, find the opaque box, crop, encode.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Header** | custom `IHDR` reader |
//! | **Decode / encode** | `image` crate PNG codec, source color type kept |
//! | **Bounds** | single pass over the alpha channel, at source depth |
//! | **Crop** | `DynamicImage::crop_imm`, color type kept |
//!
//! The module is split into:
//! - **Codec**: PNG bytes ↔ [`DynamicImage`](image::DynamicImage)
//! - **Calculations**: Pure functions for bounds and rectangle math (unit testable)
//! - **Parameters**: Padding, edge mode, empty-image policy
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + pixel copies

pub mod backend;
pub mod calculations;
pub mod codec;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, ImageBackend};
pub use calculations::{CropRect, OpaqueBounds, find_opaque_bounds};
pub use codec::CodecError;
pub use operations::{crop, plan_crop};
pub use params::{EdgeMode, EmptyPolicy, Padding};
pub use rust_backend::RustBackend;
