// Copyright 2026 the Collage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use collage_raster::RasterHandle;
use kurbo::{Affine, Size};
use serde::{Deserialize, Serialize};

/// Fit `intrinsic` inside `max`, preserving aspect ratio.
///
/// Width is limited first, then height. Images already inside the bounds keep
/// their size.
pub fn fit_within(intrinsic: Size, max: Size) -> Size {
    let Size {
        mut width,
        mut height,
    } = intrinsic;
    if width > max.width {
        height = height * max.width / width;
        width = max.width;
    }
    if height > max.height {
        width = width * max.height / height;
        height = max.height;
    }
    Size::new(width, height)
}

/// What happens to committed elements when the background is replaced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackgroundPolicy {
    /// Start a fresh composition: clear committed elements and any placement.
    #[default]
    ClearElements,
    /// Swap only the backdrop.
    KeepElements,
}

/// The scene's backdrop, drawn at `(0, 0)` at its display size.
#[derive(Clone, Debug, PartialEq)]
pub struct BackgroundSlot {
    raster: RasterHandle,
    size: Size,
}

impl BackgroundSlot {
    /// Place `raster` with its display size fitted inside `max`.
    pub fn fitted(raster: RasterHandle, max: Size) -> Self {
        let intrinsic = Size::new(f64::from(raster.width()), f64::from(raster.height()));
        Self {
            size: fit_within(intrinsic, max),
            raster,
        }
    }

    /// The backdrop raster.
    pub fn raster(&self) -> &RasterHandle {
        &self.raster
    }

    /// Display size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Maps raster pixels onto the display rectangle.
    pub fn transform(&self) -> Affine {
        Affine::scale_non_uniform(
            self.size.width / f64::from(self.raster.width()),
            self.size.height / f64::from(self.raster.height()),
        )
    }
}
