// Copyright 2026 the Collage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Decode and encode services.
//!
//! The scene engine treats image decoding and export encoding as external
//! collaborators. The [`Decoder`] and [`Encoder`] traits are those seams;
//! [`ImageCodec`] is the stock implementation backed by the `image` crate.

use std::error::Error as StdError;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use serde::{Deserialize, Serialize};

use crate::{RasterError, RasterHandle, Surface};

type BoxError = Box<dyn StdError + Send + Sync>;

/// Failure to turn uploaded bytes into a [`RasterHandle`].
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The bytes are not a readable image.
    #[error("malformed image data: {0}")]
    Malformed(#[source] BoxError),
    /// The image decoded to zero pixels.
    #[error("decoded image has zero size: {width}x{height}")]
    Empty {
        /// Decoded width.
        width: u32,
        /// Decoded height.
        height: u32,
    },
}

impl From<RasterError> for DecodeError {
    fn from(err: RasterError) -> Self {
        match err {
            RasterError::Empty { width, height } => Self::Empty { width, height },
            other => Self::Malformed(Box::new(other)),
        }
    }
}

/// Failure to serialize a [`Surface`].
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    /// There are no pixels to encode.
    #[error("cannot encode an empty {width}x{height} surface")]
    Empty {
        /// Surface width.
        width: u32,
        /// Surface height.
        height: u32,
    },
    /// JPEG quality must lie in `1..=100`.
    #[error("jpeg quality {0} is outside 1..=100")]
    InvalidQuality(u8),
    /// The underlying encoder failed.
    #[error("encoder failed: {0}")]
    Codec(#[source] BoxError),
}

/// Target format of an export.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExportFormat {
    /// Lossless PNG with alpha.
    Png,
    /// Baseline JPEG; alpha is dropped.
    Jpeg {
        /// Encoder quality in `1..=100`.
        quality: u8,
    },
}

impl ExportFormat {
    /// Conventional file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg { .. } => "jpg",
        }
    }

    /// MIME type of the encoded stream.
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg { .. } => "image/jpeg",
        }
    }
}

impl Default for ExportFormat {
    fn default() -> Self {
        Self::Jpeg { quality: 100 }
    }
}

/// Turns uploaded file bytes into a raster.
pub trait Decoder {
    /// Decode `bytes`.
    ///
    /// Implementations must report malformed or empty input as an error rather
    /// than producing a zero-size handle.
    fn decode(&self, bytes: &[u8]) -> Result<RasterHandle, DecodeError>;
}

/// Serializes a rendered surface.
pub trait Encoder {
    /// Encode `surface` in `format`.
    fn encode(&self, surface: &Surface, format: ExportFormat) -> Result<Vec<u8>, EncodeError>;
}

/// [`Decoder`] and [`Encoder`] backed by the `image` crate.
///
/// Decodes PNG, JPEG, WebP, GIF (first frame) and BMP. Encodes PNG and JPEG.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImageCodec;

impl Decoder for ImageCodec {
    fn decode(&self, bytes: &[u8]) -> Result<RasterHandle, DecodeError> {
        let decoded = image::load_from_memory(bytes).map_err(|e| DecodeError::Malformed(e.into()))?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(RasterHandle::from_rgba8(width, height, rgba.into_raw())?)
    }
}

impl Encoder for ImageCodec {
    fn encode(&self, surface: &Surface, format: ExportFormat) -> Result<Vec<u8>, EncodeError> {
        let (width, height) = (surface.width(), surface.height());
        if width == 0 || height == 0 {
            return Err(EncodeError::Empty { width, height });
        }

        let mut out = Vec::new();
        match format {
            ExportFormat::Png => {
                PngEncoder::new(&mut out)
                    .write_image(surface.as_bytes(), width, height, ExtendedColorType::Rgba8)
                    .map_err(|e| EncodeError::Codec(e.into()))?;
            }
            ExportFormat::Jpeg { quality } => {
                if !(1..=100).contains(&quality) {
                    return Err(EncodeError::InvalidQuality(quality));
                }
                let rgb: Vec<u8> = surface
                    .as_bytes()
                    .chunks_exact(4)
                    .flat_map(|px| [px[0], px[1], px[2]])
                    .collect();
                JpegEncoder::new_with_quality(&mut out, quality)
                    .write_image(&rgb, width, height, ExtendedColorType::Rgb8)
                    .map_err(|e| EncodeError::Codec(e.into()))?;
            }
        }
        Ok(out)
    }
}
