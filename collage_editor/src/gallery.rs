// Copyright 2026 the Collage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use collage_raster::RasterHandle;
use collage_scene::SourceId;

/// Append-only list of uploaded rasters available for placement.
#[derive(Clone, Debug, Default)]
pub struct UploadGallery {
    entries: Vec<RasterHandle>,
}

impl UploadGallery {
    /// An empty gallery.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `raster` and return its id.
    pub(crate) fn push(&mut self, raster: RasterHandle) -> SourceId {
        let id = SourceId(self.entries.len() as u64);
        self.entries.push(raster);
        id
    }

    /// The raster behind `id`.
    pub fn get(&self, id: SourceId) -> Option<&RasterHandle> {
        usize::try_from(id.0)
            .ok()
            .and_then(|index| self.entries.get(index))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when nothing has been uploaded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in upload order.
    pub fn iter(&self) -> impl Iterator<Item = (SourceId, &RasterHandle)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, raster)| (SourceId(i as u64), raster))
    }
}
