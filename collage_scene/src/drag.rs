// Copyright 2026 the Collage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grab-preserving drag helper.
//!
//! ## Usage
//!
//! 1) On pointer-down, capture a [`Grab`] from the pointer position and the
//!    dragged thing's current origin.
//! 2) On each pointer-move, [`Grab::follow`] yields the new origin so the
//!    point under the cursor stays under the cursor.
//! 3) On pointer-up, drop the grab.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use collage_scene::Grab;
//!
//! // Element centered at (100, 100), grabbed at (110, 95).
//! let grab = Grab::start(Point::new(110.0, 95.0), Point::new(100.0, 100.0));
//! assert_eq!(grab.offset().x, 10.0);
//! assert_eq!(grab.offset().y, -5.0);
//!
//! // Moving the pointer to (150, 130) puts the center at (140, 135).
//! assert_eq!(grab.follow(Point::new(150.0, 130.0)), Point::new(140.0, 135.0));
//! ```

use kurbo::{Point, Vec2};

/// Offset between the pointer and a dragged origin, captured at pointer-down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grab {
    /// `pointer_at_down - origin_at_down`
    offset: Vec2,
}

impl Grab {
    /// Capture the grab when the pointer goes down at `pointer` over
    /// something whose origin is `origin`.
    pub fn start(pointer: Point, origin: Point) -> Self {
        Self {
            offset: pointer - origin,
        }
    }

    /// The captured offset.
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Origin that keeps the grab point under `pointer`.
    pub fn follow(&self, pointer: Point) -> Point {
        pointer - self.offset
    }
}
