// Copyright 2026 the Collage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::handle::{RasterError, byte_len};

/// Owned RGBA8 pixel buffer produced by a renderer.
///
/// Rows are tightly packed, top row first, with straight (non-premultiplied)
/// alpha. A freshly created surface is fully transparent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl Surface {
    /// Create a transparent surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            rgba: vec![0; byte_len(width, height)],
        }
    }

    /// Adopt an existing RGBA8 buffer.
    pub fn from_rgba8(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, RasterError> {
        let expected = byte_len(width, height);
        if rgba.len() != expected {
            return Err(RasterError::SizeMismatch {
                expected,
                actual: rgba.len(),
            });
        }
        Ok(Self {
            width,
            height,
            rgba,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.rgba
    }

    /// Consume the surface, returning its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.rgba
    }

    /// The pixel at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let at = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.rgba.get(at..at + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}
