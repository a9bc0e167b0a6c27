// Copyright 2026 the Collage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collage Scene: the placement and transform engine of the Collage editor.
//!
//! A [`Scene`] holds an optional background, an ordered list of committed
//! [`Element`]s (insertion order is paint order, back to front) and exactly
//! one [`PlacementState`] value describing what is in flight between input
//! events. Illegal combinations such as "dragging with nothing pending" cannot
//! be expressed.
//!
//! The lifecycle of a placement:
//!
//! - [`Scene::select_source`] holds a gallery raster (`Idle → SourceSelected`).
//! - [`Scene::click_canvas`] creates the pending element at the pointer with
//!   rotation 0 and scale 1 (`SourceSelected → Pending`). Further clicks are
//!   refused until the element is confirmed or cancelled.
//! - [`Scene::set_rotation`] / [`Scene::set_scale`] adjust it in place.
//!   Rotation is normalized into `[0, 360)`; scale is clamped.
//! - [`Scene::pointer_down`] / [`Scene::pointer_move`] / [`Scene::pointer_up`]
//!   drag it with the grab point preserved.
//! - [`Scene::confirm`] appends it to the committed list; [`Scene::cancel`]
//!   drops it.
//!
//! In [`Tool::Place`], a pointer-down on a committed image while idle drags
//! that image instead. In [`Tool::Draw`], pointer gestures record freehand
//! strokes.
//!
//! Every transition returns an [`Outcome`] so callers know whether to redraw.
//!
//! ## Minimal example
//!
//! ```rust
//! use collage_raster::RasterHandle;
//! use collage_scene::{Outcome, Scene, SourceId};
//!
//! let mut scene = Scene::default();
//! scene.set_background(RasterHandle::solid(1000, 500, [255; 4]).unwrap());
//! assert_eq!(scene.canvas_size().width, 800.0);
//!
//! let icon = RasterHandle::solid(64, 64, [255, 0, 0, 255]).unwrap();
//! scene.select_source(SourceId(0), icon).unwrap();
//! scene.click_canvas((200.0, 150.0).into()).unwrap();
//! scene.set_rotation(45.0);
//! assert_eq!(
//!     scene.set_scale(10.0),
//!     Outcome::Clamped { requested: 10.0, applied: 2.0 }
//! );
//! scene.confirm();
//!
//! let placed = scene.committed()[0].as_image().unwrap();
//! assert_eq!((placed.rotation(), placed.scale()), (45.0, 2.0));
//! ```

mod background;
mod drag;
mod element;
mod hit;
mod id;
mod placement;
mod scene;

pub mod transform;

pub use background::{BackgroundPolicy, BackgroundSlot, fit_within};
pub use drag::Grab;
pub use element::{
    Element, ImageElement, ScaleRange, StrokeBuilder, StrokeElement, StrokeStyle,
    normalize_rotation,
};
pub use hit::{HitTestMode, hit_image, topmost_image_hit};
pub use id::{ElementId, SourceId};
pub use placement::{
    Outcome, PendingPlacement, PlacementError, PlacementState, PointerSample, Tool,
};
pub use scene::{Scene, SceneSettings};
