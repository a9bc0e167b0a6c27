// Copyright 2026 the Collage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collage Render: turns a [`Scene`](collage_scene::Scene) into pixels.
//!
//! Rendering is split in two:
//!
//! - [`scene_ops`] flattens a scene into a back-to-front list of [`DrawOp`]s:
//!   the background at its display size, every committed element in
//!   insertion order, and finally the in-flight element (pending image or
//!   in-progress stroke) when [`RenderOptions::include_in_flight`] is set.
//! - A [`DrawTarget`] paints those ops. [`render_scene`] always begins a fresh,
//!   cleared frame, so there is no incremental state to go stale.
//!
//! Two targets ship with the crate:
//!
//! - [`Recorder`] keeps the ops for inspection.
//! - [`CpuCanvas`] rasterizes with `vello_cpu` and reads the frame back as a
//!   [`Surface`](collage_raster::Surface).
//!
//! ## Minimal example
//!
//! ```rust
//! use collage_raster::RasterHandle;
//! use collage_render::{CpuCanvas, DrawOp, Recorder, RenderOptions, render_scene};
//! use collage_scene::Scene;
//!
//! let mut scene = Scene::default();
//! scene.set_background(RasterHandle::solid(40, 20, [0, 0, 255, 255]).unwrap());
//!
//! let mut recorder = Recorder::new();
//! render_scene(&scene, &mut recorder, RenderOptions::PREVIEW).unwrap();
//! assert_eq!(recorder.size(), (40, 20));
//! assert!(matches!(recorder.ops(), [DrawOp::Image { .. }]));
//!
//! let mut canvas = CpuCanvas::new();
//! render_scene(&scene, &mut canvas, RenderOptions::PREVIEW).unwrap();
//! let surface = canvas.snapshot().unwrap();
//! assert_eq!(surface.pixel(5, 5), Some([0, 0, 255, 255]));
//! ```

mod cpu;
mod op;
mod recorder;
mod render;

pub use cpu::CpuCanvas;
pub use op::{DrawOp, DrawTarget};
pub use recorder::Recorder;
pub use render::{RenderOptions, canvas_pixels, render_scene, scene_ops};

use collage_raster::RasterError;

/// Errors raised while rendering.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RenderError {
    /// The canvas does not fit a 16-bit surface.
    #[error("canvas of {width}x{height} exceeds the 65535 px surface limit")]
    SurfaceTooLarge {
        /// Requested width.
        width: f64,
        /// Requested height.
        height: f64,
    },
    /// A snapshot was requested before any frame began.
    #[error("no frame has been rendered")]
    NoFrame,
    /// The read-back buffer did not match the surface size.
    #[error(transparent)]
    Raster(#[from] RasterError),
}
