//! PNG decode and encode over in-memory byte buffers.
//!
//! | Step | Implementation |
//! |---|---|
//! | Signature + `IHDR` check | [`read_header`], hand-parsed |
//! | Pixel limit | `width * height` against an optional cap, before decoding |
//! | Decode | `image` crate PNG decoder, source depth and channels kept |
//! | Encode | `image::codecs::png::PngEncoder`, same color type as decoded |
//!
//! The header is read by hand so a non-PNG file fails with [`CodecError::NotAPng`]
//! and an oversized one is refused before any pixel memory is allocated.
//!
//! Decode keeps the stored sample depth: 16-bit images stay 16-bit, gray stays
//! gray, so a crop rewrites exactly the pixels that were read. Palette images
//! are expanded to RGB8, or RGBA8 when a `tRNS` chunk is present, and
//! sub-byte grayscale to 8 bits. Only the first frame of an animated PNG is
//! read.

use image::codecs::png::PngEncoder;
use image::{DynamicImage, ImageFormat};
use thiserror::Error;

/// The 8-byte PNG file signature.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

const IHDR: [u8; 4] = *b"IHDR";
const IHDR_DATA_LEN: usize = 13;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("not a PNG file (bad signature)")]
    NotAPng,
    #[error("PNG data truncated")]
    Truncated,
    #[error("first chunk is not a valid IHDR")]
    MissingHeader,
    #[error("invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("image is {width}x{height}, over the limit of {limit} pixels")]
    TooLarge { width: u32, height: u32, limit: u64 },
    #[error("PNG decode failed: {0}")]
    Decode(String),
    #[error("PNG encode failed: {0}")]
    Encode(String),
}

/// Fields of the `IHDR` chunk the trimmer cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PngHeader {
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    pub color_type: u8,
}

fn be_u32(bytes: &[u8]) -> u32 {
    u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Validate the signature and read the `IHDR` chunk that must follow it.
///
/// Layout after the signature: 4-byte length, 4-byte type, then data with
/// width at offset 0 and height at offset 4 (both big-endian).
pub fn read_header(bytes: &[u8]) -> Result<PngHeader, CodecError> {
    if bytes.len() < PNG_SIGNATURE.len() || bytes[..8] != PNG_SIGNATURE {
        return Err(CodecError::NotAPng);
    }
    let chunk = &bytes[8..];
    if chunk.len() < 8 + IHDR_DATA_LEN {
        return Err(CodecError::Truncated);
    }

    let length = be_u32(&chunk[0..4]) as usize;
    if chunk[4..8] != IHDR || length < IHDR_DATA_LEN {
        return Err(CodecError::MissingHeader);
    }

    let data = &chunk[8..8 + IHDR_DATA_LEN];
    let width = be_u32(&data[0..4]);
    let height = be_u32(&data[4..8]);
    if width == 0 || height == 0 {
        return Err(CodecError::InvalidDimensions { width, height });
    }

    Ok(PngHeader {
        width,
        height,
        bit_depth: data[8],
        color_type: data[9],
    })
}

/// Decode a PNG byte buffer, keeping its color type and sample depth.
///
/// `max_pixels`, when set, rejects images whose header declares more than
/// that many pixels.
pub fn decode(bytes: &[u8], max_pixels: Option<u64>) -> Result<DynamicImage, CodecError> {
    let header = read_header(bytes)?;

    if let Some(limit) = max_pixels {
        let pixels = u64::from(header.width) * u64::from(header.height);
        if pixels > limit {
            return Err(CodecError::TooLarge {
                width: header.width,
                height: header.height,
                limit,
            });
        }
    }

    let decoded = image::load_from_memory_with_format(bytes, ImageFormat::Png)
        .map_err(|e| CodecError::Decode(e.to_string()))?;

    if (decoded.width(), decoded.height()) != (header.width, header.height) {
        return Err(CodecError::Decode(format!(
            "decoded {}x{} but header declares {}x{}",
            decoded.width(),
            decoded.height(),
            header.width,
            header.height
        )));
    }

    log::debug!(
        "decoded {}x{} PNG (depth {}, color type {}) as {:?}",
        header.width,
        header.height,
        header.bit_depth,
        header.color_type,
        decoded.color()
    );
    Ok(decoded)
}

/// Encode pixels as a PNG byte stream in the image's own color type.
///
/// Output is built fully in memory; callers only touch the disk once this
/// returns `Ok`.
pub fn encode(image: &DynamicImage) -> Result<Vec<u8>, CodecError> {
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return Err(CodecError::InvalidDimensions { width, height });
    }

    let mut bytes = Vec::new();
    image
        .write_with_encoder(PngEncoder::new(&mut bytes))
        .map_err(|e| CodecError::Encode(e.to_string()))?;
    Ok(bytes)
}
