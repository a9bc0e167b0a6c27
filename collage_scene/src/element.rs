// Copyright 2026 the Collage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placed elements: images and freehand strokes.

use collage_raster::RasterHandle;
use kurbo::{Affine, Point, Rect, Size};
use serde::{Deserialize, Serialize};

use crate::ElementId;
use crate::transform::{canvas_bounds, local_to_canvas};

/// Map an angle in degrees into `[0, 360)`.
///
/// Returns `None` for NaN and infinities.
pub fn normalize_rotation(degrees: f64) -> Option<f64> {
    if !degrees.is_finite() {
        return None;
    }
    let r = degrees.rem_euclid(360.0);
    // Tiny negative inputs round up to exactly 360.
    if r >= 360.0 { Some(0.0) } else { Some(r + 0.0) }
}

/// Inclusive bounds for an element's uniform scale.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScaleRange {
    /// Smallest allowed scale.
    pub min: f64,
    /// Largest allowed scale.
    pub max: f64,
}

impl ScaleRange {
    /// Create a range. See [`ScaleRange::is_valid`].
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Returns `true` for finite, positive, non-inverted bounds.
    pub fn is_valid(self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min > 0.0 && self.min <= self.max
    }

    /// Clamp `value` into the range, or `None` if it is not finite.
    pub fn clamp(self, value: f64) -> Option<f64> {
        if !value.is_finite() {
            return None;
        }
        Some(value.max(self.min).min(self.max))
    }
}

impl Default for ScaleRange {
    fn default() -> Self {
        Self::new(0.005, 2.0)
    }
}

/// A raster placed on the canvas.
///
/// `center` is in canvas-pixel space. `rotation` is in degrees, clockwise,
/// and kept in `[0, 360)` by the scene. `scale` is uniform and kept inside
/// the scene's [`ScaleRange`].
#[derive(Clone, Debug, PartialEq)]
pub struct ImageElement {
    id: ElementId,
    raster: RasterHandle,
    pub(crate) center: Point,
    pub(crate) rotation: f64,
    pub(crate) scale: f64,
}

impl ImageElement {
    /// A new element at `center` with rotation 0 and scale 1.
    pub fn new(id: ElementId, raster: RasterHandle, center: Point) -> Self {
        Self {
            id,
            raster,
            center,
            rotation: 0.0,
            scale: 1.0,
        }
    }

    /// Element identity.
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// The shared raster this element draws.
    pub fn raster(&self) -> &RasterHandle {
        &self.raster
    }

    /// Center in canvas space.
    pub fn center(&self) -> Point {
        self.center
    }

    /// Rotation in degrees, clockwise.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Uniform scale factor.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Unscaled, unrotated size taken from the raster.
    pub fn intrinsic_size(&self) -> Size {
        Size::new(f64::from(self.raster.width()), f64::from(self.raster.height()))
    }

    /// The local-to-canvas transform for drawing and hit testing.
    pub fn transform(&self) -> Affine {
        local_to_canvas(self.center, self.rotation, self.scale, self.intrinsic_size())
    }
}

/// Color and width of a freehand stroke.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrokeStyle {
    /// Straight-alpha RGBA8.
    pub color: [u8; 4],
    /// Line width in canvas pixels.
    pub width: f64,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: [0, 0, 0, 255],
            width: 2.0,
        }
    }
}

/// A committed freehand stroke. Always holds at least two points.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeElement {
    id: ElementId,
    points: Vec<Point>,
    style: StrokeStyle,
}

impl StrokeElement {
    /// Element identity.
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Points in canvas space, in drawing order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Style captured when the stroke started.
    pub fn style(&self) -> StrokeStyle {
        self.style
    }

    /// Bounding box of the points, grown by half the line width.
    pub fn bounds(&self) -> Rect {
        points_bounds(&self.points).inflate(self.style.width / 2.0, self.style.width / 2.0)
    }
}

/// Accumulates the points of a stroke while the pointer is held.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeBuilder {
    id: ElementId,
    style: StrokeStyle,
    min_spacing: f64,
    points: Vec<Point>,
}

impl StrokeBuilder {
    /// Start an empty stroke.
    ///
    /// Samples closer than `min_spacing` to the previous point are dropped.
    pub fn new(id: ElementId, style: StrokeStyle, min_spacing: f64) -> Self {
        Self {
            id,
            style,
            min_spacing: min_spacing.max(0.0),
            points: Vec::new(),
        }
    }

    /// Identity the stroke will carry once committed.
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Style of the stroke.
    pub fn style(&self) -> StrokeStyle {
        self.style
    }

    /// Points collected so far.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Append a sample. Returns `true` if it was kept.
    pub fn push(&mut self, point: Point) -> bool {
        if !point.is_finite() {
            return false;
        }
        if let Some(last) = self.points.last()
            && last.distance(point) < self.min_spacing
        {
            return false;
        }
        self.points.push(point);
        true
    }

    /// Finish the stroke, or `None` when it has fewer than two points.
    pub fn finish(self) -> Option<StrokeElement> {
        (self.points.len() >= 2).then(|| StrokeElement {
            id: self.id,
            points: self.points,
            style: self.style,
        })
    }
}

/// A committed scene element.
#[derive(Clone, Debug, PartialEq)]
pub enum Element {
    /// A placed raster.
    Image(ImageElement),
    /// A freehand stroke.
    Stroke(StrokeElement),
}

impl Element {
    /// Element identity.
    pub fn id(&self) -> ElementId {
        match self {
            Self::Image(image) => image.id(),
            Self::Stroke(stroke) => stroke.id(),
        }
    }

    /// Local-to-canvas transform. Stroke points are already in canvas space.
    pub fn transform(&self) -> Affine {
        match self {
            Self::Image(image) => image.transform(),
            Self::Stroke(_) => Affine::IDENTITY,
        }
    }

    /// Axis-aligned canvas bounds.
    pub fn canvas_bounds(&self) -> Rect {
        match self {
            Self::Image(image) => canvas_bounds(image.transform(), image.intrinsic_size()),
            Self::Stroke(stroke) => stroke.bounds(),
        }
    }

    /// The image variant, if this is one.
    pub fn as_image(&self) -> Option<&ImageElement> {
        match self {
            Self::Image(image) => Some(image),
            Self::Stroke(_) => None,
        }
    }

    pub(crate) fn as_image_mut(&mut self) -> Option<&mut ImageElement> {
        match self {
            Self::Image(image) => Some(image),
            Self::Stroke(_) => None,
        }
    }

    /// The stroke variant, if this is one.
    pub fn as_stroke(&self) -> Option<&StrokeElement> {
        match self {
            Self::Stroke(stroke) => Some(stroke),
            Self::Image(_) => None,
        }
    }
}

fn points_bounds(points: &[Point]) -> Rect {
    let mut iter = points.iter();
    let Some(first) = iter.next() else {
        return Rect::ZERO;
    };
    iter.fold(Rect::from_points(*first, *first), |rect, p| rect.union_pt(*p))
}
