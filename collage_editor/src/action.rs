// Copyright 2026 the Collage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use collage_scene::{PointerSample, SourceId, StrokeStyle, Tool};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// A non-upload editor input, in serializable form.
///
/// Pointer actions take canvas coordinates `x`/`y` and an optional `world`
/// position; without one the world position equals the canvas position.
///
/// ```json
/// [
///   { "op": "select_source", "source": 0 },
///   { "op": "click_canvas", "x": 200.0, "y": 150.0 },
///   { "op": "set_rotation", "degrees": 45.0 },
///   { "op": "confirm" }
/// ]
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditorAction {
    /// Hold a gallery entry for the next placement.
    SelectSource {
        /// Gallery entry.
        source: SourceId,
    },
    /// Place the held entry.
    ClickCanvas {
        /// Canvas x.
        x: f64,
        /// Canvas y.
        y: f64,
        /// Raw input-device position.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        world: Option<Point>,
    },
    /// Pointer pressed.
    PointerDown {
        /// Canvas x.
        x: f64,
        /// Canvas y.
        y: f64,
        /// Raw input-device position.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        world: Option<Point>,
    },
    /// Pointer moved.
    PointerMove {
        /// Canvas x.
        x: f64,
        /// Canvas y.
        y: f64,
        /// Raw input-device position.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        world: Option<Point>,
    },
    /// Pointer released.
    PointerUp {
        /// Canvas x.
        x: f64,
        /// Canvas y.
        y: f64,
        /// Raw input-device position.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        world: Option<Point>,
    },
    /// Rotation slider moved.
    SetRotation {
        /// Degrees, clockwise.
        degrees: f64,
    },
    /// Scale slider moved.
    SetScale {
        /// Uniform factor.
        factor: f64,
    },
    /// Commit the pending element.
    Confirm,
    /// Drop whatever is in flight.
    Cancel,
    /// Switch tools.
    SetTool {
        /// New tool.
        tool: Tool,
    },
    /// Style for later strokes.
    SetStrokeStyle {
        /// New style.
        style: StrokeStyle,
    },
}

pub(crate) fn sample(x: f64, y: f64, world: Option<Point>) -> PointerSample {
    let canvas = Point::new(x, y);
    PointerSample::new(canvas, world.unwrap_or(canvas))
}
