// Copyright 2026 the Collage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point-in-element tests used to start drags.

use kurbo::Point;
use serde::{Deserialize, Serialize};

use crate::{Element, ImageElement};

/// How an image's hit region is computed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitTestMode {
    /// The unrotated, unscaled intrinsic rectangle centered on the element.
    #[default]
    Footprint,
    /// The raster rectangle under the element's full transform.
    Transformed,
}

/// Returns `true` if `point` (canvas space) lies on `image`. Edges count.
pub fn hit_image(image: &ImageElement, point: Point, mode: HitTestMode) -> bool {
    let size = image.intrinsic_size();
    match mode {
        HitTestMode::Footprint => {
            let center = image.center();
            (point.x - center.x).abs() <= size.width / 2.0
                && (point.y - center.y).abs() <= size.height / 2.0
        }
        HitTestMode::Transformed => {
            let xf = image.transform();
            if xf.determinant() == 0.0 {
                return false;
            }
            let local = xf.inverse() * point;
            (0.0..=size.width).contains(&local.x) && (0.0..=size.height).contains(&local.y)
        }
    }
}

/// Index of the topmost image under `point`.
///
/// Elements are ordered back to front, so the search runs from the end.
/// Strokes never match.
pub fn topmost_image_hit(elements: &[Element], point: Point, mode: HitTestMode) -> Option<usize> {
    elements
        .iter()
        .rposition(|el| el.as_image().is_some_and(|image| hit_image(image, point, mode)))
}
