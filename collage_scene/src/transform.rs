// Copyright 2026 the Collage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Local-to-canvas transforms for placed rasters.
//!
//! An image element is drawn by translating to its center, rotating
//! clockwise by its rotation (canvas space is y-down, so a positive angle in
//! [`Affine::rotate`] turns clockwise on screen), scaling uniformly, and
//! finally offsetting by half the intrinsic size so the raster is centered on
//! the local origin:
//!
//! ```text
//! translate(center) * rotate(θ) * scale(s) * translate(-w/2, -h/2)
//! ```
//!
//! The same composition serves committed elements and the pending preview.

use kurbo::{Affine, Point, Rect, Size};

/// Compose the local-to-canvas transform of a raster of intrinsic `size`.
pub fn local_to_canvas(center: Point, rotation_degrees: f64, scale: f64, size: Size) -> Affine {
    Affine::translate(center.to_vec2())
        * Affine::rotate(rotation_degrees.to_radians())
        * Affine::scale(scale)
        * Affine::translate((-size.width / 2.0, -size.height / 2.0))
}

/// Axis-aligned canvas bounds of a `size`-sized raster drawn with `transform`.
pub fn canvas_bounds(transform: Affine, size: Size) -> Rect {
    transform.transform_rect_bbox(size.to_rect())
}
