// Copyright 2026 the Collage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use collage_scene::{Element, PlacementState, Scene};
use kurbo::Size;
use tracing::trace;

use crate::{DrawOp, DrawTarget, RenderError};

/// Which parts of a scene a frame shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// Paint the pending element or in-progress stroke on top.
    pub include_in_flight: bool,
}

impl RenderOptions {
    /// Everything, as the user sees it while editing.
    pub const PREVIEW: Self = Self {
        include_in_flight: true,
    };

    /// Background and committed elements only.
    pub const COMMITTED: Self = Self {
        include_in_flight: false,
    };
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::PREVIEW
    }
}

/// Pixel size of the surface a scene renders onto.
///
/// The scene's canvas size rounded to whole pixels, at least one pixel per
/// side.
pub fn canvas_pixels(scene: &Scene) -> Result<(u16, u16), RenderError> {
    let Size { width, height } = scene.canvas_size();
    let (w, h) = (width.round().max(1.0), height.round().max(1.0));
    if !(w.is_finite() && h.is_finite()) || w > f64::from(u16::MAX) || h > f64::from(u16::MAX) {
        return Err(RenderError::SurfaceTooLarge { width, height });
    }
    #[expect(
        clippy::cast_possible_truncation,
        reason = "both sides were checked to lie in 1..=u16::MAX"
    )]
    let pixels = (w as u16, h as u16);
    Ok(pixels)
}

/// The display list of a scene, back to front.
///
/// Background first, then committed elements in insertion order, then the
/// in-flight element when `options` asks for it.
pub fn scene_ops(scene: &Scene, options: RenderOptions) -> Vec<DrawOp> {
    let mut ops = Vec::with_capacity(scene.committed().len() + 2);
    if let Some(background) = scene.background() {
        ops.push(DrawOp::Image {
            raster: background.raster().clone(),
            transform: background.transform(),
        });
    }
    ops.extend(scene.committed().iter().map(element_op));
    if options.include_in_flight {
        match scene.state() {
            PlacementState::Pending(pending) => {
                let element = pending.element();
                ops.push(DrawOp::Image {
                    raster: element.raster().clone(),
                    transform: element.transform(),
                });
            }
            PlacementState::Drawing(stroke) if stroke.points().len() >= 2 => {
                ops.push(DrawOp::Polyline {
                    points: stroke.points().to_vec(),
                    style: stroke.style(),
                });
            }
            _ => {}
        }
    }
    ops
}

fn element_op(element: &Element) -> DrawOp {
    match element {
        Element::Image(image) => DrawOp::Image {
            raster: image.raster().clone(),
            transform: image.transform(),
        },
        Element::Stroke(stroke) => DrawOp::Polyline {
            points: stroke.points().to_vec(),
            style: stroke.style(),
        },
    }
}

/// Paint a full frame of `scene` onto `target`.
///
/// The target is always cleared first; nothing from an earlier frame
/// survives.
pub fn render_scene<T: DrawTarget + ?Sized>(
    scene: &Scene,
    target: &mut T,
    options: RenderOptions,
) -> Result<(), RenderError> {
    let (width, height) = canvas_pixels(scene)?;
    let ops = scene_ops(scene, options);
    trace!(
        width,
        height,
        ops = ops.len(),
        revision = scene.revision(),
        "render frame"
    );
    target.begin(width, height);
    for op in ops {
        target.draw(op);
    }
    Ok(())
}
