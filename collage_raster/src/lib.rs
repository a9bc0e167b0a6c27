// Copyright 2026 the Collage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collage Raster: shared raster handles, surfaces, and codec services.
//!
//! This crate is the leaf of the Collage stack. It owns the two pixel
//! containers every other crate talks about and the service traits that move
//! bytes in and out of them:
//!
//! - [`RasterHandle`]: an immutable, cheaply clonable reference to decoded
//!   pixels plus their intrinsic width and height. Many scene elements may
//!   share one handle (the same uploaded icon placed twice); nothing ever
//!   mutates the pixels behind it.
//! - [`Surface`]: an owned RGBA8 buffer produced by a renderer, the input to
//!   export.
//! - [`Decoder`] / [`Encoder`]: the external "bytes → raster" and
//!   "surface → bytes" services. [`ImageCodec`] implements both on top of the
//!   `image` crate.
//!
//! Pixels are always tightly packed, row-major, straight (non-premultiplied)
//! RGBA8.
//!
//! ## Minimal example
//!
//! ```rust
//! use collage_raster::{RasterHandle, Surface};
//!
//! let icon = RasterHandle::solid(64, 64, [255, 0, 0, 255]).unwrap();
//! assert_eq!((icon.width(), icon.height()), (64, 64));
//!
//! // Handles are shared, not copied.
//! let placed_twice = icon.clone();
//! assert!(icon.ptr_eq(&placed_twice));
//!
//! let surface = Surface::new(8, 4);
//! assert_eq!(surface.pixel(0, 0), Some([0, 0, 0, 0]));
//! ```

mod codec;
mod handle;
mod surface;

pub use codec::{DecodeError, Decoder, EncodeError, Encoder, ExportFormat, ImageCodec};
pub use handle::{RasterError, RasterHandle};
pub use surface::Surface;
