// Copyright 2026 the Collage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use collage_raster::RasterHandle;
use collage_scene::StrokeStyle;
use kurbo::{Affine, Point};

/// One paint operation of a frame.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Fill the raster's `(0, 0, width, height)` rectangle, mapped through
    /// `transform`, with the raster's pixels.
    Image {
        /// Pixels to draw.
        raster: RasterHandle,
        /// Raster space to canvas space.
        transform: Affine,
    },
    /// Stroke an open polyline through `points` (canvas space) with round caps
    /// and joins.
    Polyline {
        /// Vertices in drawing order.
        points: Vec<Point>,
        /// Color and width.
        style: StrokeStyle,
    },
}

/// A surface that draw operations are painted onto.
///
/// A frame is one [`begin`](DrawTarget::begin) followed by any number of
/// [`draw`](DrawTarget::draw) calls in back-to-front order. `begin` discards
/// everything painted before it.
pub trait DrawTarget {
    /// Start a frame on a cleared, transparent `width` x `height` surface.
    fn begin(&mut self, width: u16, height: u16);

    /// Paint `op` over what is already there.
    fn draw(&mut self, op: DrawOp);
}
