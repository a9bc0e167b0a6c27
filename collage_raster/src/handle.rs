// Copyright 2026 the Collage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared, immutable decoded images.

use std::fmt;
use std::sync::Arc;

use peniko::{Blob, ImageAlphaType, ImageData, ImageFormat};

/// Errors raised when constructing a [`RasterHandle`] from raw pixels.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RasterError {
    /// One of the dimensions is zero.
    #[error("raster has zero size: {width}x{height}")]
    Empty {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
    /// The pixel buffer does not hold `width * height * 4` bytes.
    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    SizeMismatch {
        /// Byte count implied by the dimensions.
        expected: usize,
        /// Byte count actually supplied.
        actual: usize,
    },
}

struct RasterData {
    width: u32,
    height: u32,
    pixels: Blob<u8>,
}

/// Reference to a decoded image plus its intrinsic size.
///
/// Cloning is cheap and yields another reference to the same pixels; use
/// [`RasterHandle::ptr_eq`] to ask whether two handles share storage.
#[derive(Clone)]
pub struct RasterHandle(Arc<RasterData>);

impl RasterHandle {
    /// Wrap tightly packed straight-alpha RGBA8 pixels.
    pub fn from_rgba8(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, RasterError> {
        if width == 0 || height == 0 {
            return Err(RasterError::Empty { width, height });
        }
        let expected = byte_len(width, height);
        if pixels.len() != expected {
            return Err(RasterError::SizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self(Arc::new(RasterData {
            width,
            height,
            pixels: Blob::from(pixels),
        })))
    }

    /// A raster filled with a single color.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self, RasterError> {
        if width == 0 || height == 0 {
            return Err(RasterError::Empty { width, height });
        }
        let pixels = rgba.repeat(byte_len(width, height) / 4);
        Self::from_rgba8(width, height, pixels)
    }

    /// Intrinsic width in pixels.
    pub fn width(&self) -> u32 {
        self.0.width
    }

    /// Intrinsic height in pixels.
    pub fn height(&self) -> u32 {
        self.0.height
    }

    /// Raw RGBA8 bytes, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.pixels.data()
    }

    /// Returns `true` if both handles refer to the same pixels.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Describe the pixels as a `peniko` image for rendering backends.
    ///
    /// The returned data shares the handle's blob; no pixels are copied.
    pub fn image_data(&self) -> ImageData {
        ImageData {
            data: self.0.pixels.clone(),
            format: ImageFormat::Rgba8,
            alpha_type: ImageAlphaType::Alpha,
            width: self.0.width,
            height: self.0.height,
        }
    }
}

/// Handles compare by identity: two handles are equal when they share pixels.
impl PartialEq for RasterHandle {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for RasterHandle {}

impl fmt::Debug for RasterHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RasterHandle")
            .field("width", &self.0.width)
            .field("height", &self.0.height)
            .finish_non_exhaustive()
    }
}

pub(crate) fn byte_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * 4
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_dimensions() {
        let err = RasterHandle::from_rgba8(0, 4, Vec::new()).unwrap_err();
        assert_eq!(
            err,
            RasterError::Empty {
                width: 0,
                height: 4
            }
        );
        assert!(RasterHandle::solid(3, 0, [0; 4]).is_err());
    }

    #[test]
    fn rejects_short_buffers() {
        let err = RasterHandle::from_rgba8(2, 2, vec![0; 15]).unwrap_err();
        assert_eq!(
            err,
            RasterError::SizeMismatch {
                expected: 16,
                actual: 15
            }
        );
    }

    #[test]
    fn solid_fills_every_pixel() {
        let raster = RasterHandle::solid(3, 2, [1, 2, 3, 4]).unwrap();
        assert_eq!(raster.as_bytes().len(), 24);
        assert!(raster.as_bytes().chunks(4).all(|px| px == [1, 2, 3, 4]));
    }

    #[test]
    fn clones_share_storage() {
        let a = RasterHandle::solid(1, 1, [0; 4]).unwrap();
        let b = a.clone();
        let c = RasterHandle::solid(1, 1, [0; 4]).unwrap();
        assert!(a.ptr_eq(&b));
        assert!(!a.ptr_eq(&c));
    }

    #[test]
    fn image_data_matches_handle() {
        let raster = RasterHandle::solid(5, 7, [9; 4]).unwrap();
        let data = raster.image_data();
        assert_eq!((data.width, data.height), (5, 7));
        assert_eq!(data.data.data(), raster.as_bytes());
    }
}
