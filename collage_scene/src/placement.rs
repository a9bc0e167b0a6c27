// Copyright 2026 the Collage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement state: what is in flight between input events.

use collage_raster::RasterHandle;
use kurbo::Point;
use serde::{Deserialize, Serialize};

use crate::{Grab, ImageElement, SourceId, StrokeBuilder};

/// A pointer position in both coordinate spaces.
///
/// `canvas` positions elements. `world` is the raw input-device position and
/// only anchors floating UI near the pending element.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    /// Canvas-pixel position.
    pub canvas: Point,
    /// Raw input-device position.
    pub world: Point,
}

impl PointerSample {
    /// A sample with distinct canvas and world positions.
    pub fn new(canvas: Point, world: Point) -> Self {
        Self { canvas, world }
    }
}

impl From<Point> for PointerSample {
    /// Treat both spaces as coincident.
    fn from(p: Point) -> Self {
        Self::new(p, p)
    }
}

impl From<(f64, f64)> for PointerSample {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y).into()
    }
}

/// The active input tool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    /// Place and reposition images.
    #[default]
    Place,
    /// Draw freehand strokes.
    Draw,
}

/// Result of a scene transition that did not fail.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Outcome {
    /// Scene state changed.
    Changed,
    /// Scene state changed, but the requested value was clamped.
    Clamped {
        /// Value asked for.
        requested: f64,
        /// Value stored.
        applied: f64,
    },
    /// The input was ignored.
    Unchanged,
}

impl Outcome {
    /// Returns `true` unless the input was ignored.
    pub fn is_change(self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// Transitions the scene refuses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    /// The transition needs a background and none is set.
    #[error("a background image is required first")]
    NoBackground,
    /// An element is already in flight.
    #[error("another placement is still pending")]
    ConcurrentPlacementRejected,
}

/// Grabs for a drag of the pending element, one per coordinate space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct PendingDrag {
    pub(crate) canvas: Grab,
    pub(crate) world: Grab,
}

/// The single element between placement click and confirm or cancel.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingPlacement {
    pub(crate) element: ImageElement,
    source: SourceId,
    pub(crate) anchor: Point,
    pub(crate) drag: Option<PendingDrag>,
}

impl PendingPlacement {
    pub(crate) fn new(element: ImageElement, source: SourceId, anchor: Point) -> Self {
        Self {
            element,
            source,
            anchor,
            drag: None,
        }
    }

    /// The element being adjusted.
    pub fn element(&self) -> &ImageElement {
        &self.element
    }

    /// Gallery entry the element came from.
    pub fn source(&self) -> SourceId {
        self.source
    }

    /// World-space position of the element's center.
    ///
    /// Set by the placement click and moved along with drags.
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    /// Returns `true` while the pointer is dragging the element.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// World-space top-left of the adjustment panel.
    ///
    /// The panel sits one element-width to the left of the element, vertically
    /// centered on it.
    pub fn panel_origin(&self) -> Point {
        let size = self.element.intrinsic_size();
        Point::new(
            self.anchor.x - size.width / 2.0 - size.width,
            self.anchor.y - size.height / 2.0,
        )
    }
}

/// What the scene is doing between input events.
///
/// At most one element is ever in flight.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum PlacementState {
    /// Nothing in flight.
    #[default]
    Idle,
    /// A gallery entry is held for the next canvas click.
    SourceSelected {
        /// The chosen gallery entry.
        source: SourceId,
        /// Its raster.
        raster: RasterHandle,
    },
    /// A new element awaits adjustment and confirmation.
    Pending(PendingPlacement),
    /// A committed image is being dragged.
    Repositioning {
        /// Index into the committed list.
        index: usize,
        /// Grab captured at pointer-down.
        grab: Grab,
        /// Center before the drag, restored by cancel.
        origin: Point,
    },
    /// A freehand stroke is being drawn.
    Drawing(StrokeBuilder),
}

impl PlacementState {
    /// Short name for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::SourceSelected { .. } => "source_selected",
            Self::Pending(p) if p.is_dragging() => "pending_dragging",
            Self::Pending(_) => "pending",
            Self::Repositioning { .. } => "repositioning",
            Self::Drawing(_) => "drawing",
        }
    }

    /// Returns `true` when an element is pending, being dragged, or being drawn.
    pub fn in_flight(&self) -> bool {
        matches!(
            self,
            Self::Pending(_) | Self::Repositioning { .. } | Self::Drawing(_)
        )
    }
}
