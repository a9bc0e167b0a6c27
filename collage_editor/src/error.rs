// Copyright 2026 the Collage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use collage_raster::{DecodeError, EncodeError};
use collage_render::RenderError;
use collage_scene::{PlacementError, SourceId};

use crate::ConfigError;

/// Everything an [`Editor`](crate::Editor) operation can report.
///
/// All variants are recoverable: the editor state is unchanged by a failed
/// operation and the next input is accepted as usual.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    /// The scene refused the transition (no background, or a placement is
    /// already pending).
    #[error(transparent)]
    Placement(#[from] PlacementError),
    /// The gallery has no entry with this id.
    #[error("{0} is not in the gallery")]
    InvalidSelection(SourceId),
    /// Export was requested before a background exists.
    #[error("nothing to export yet: upload a background first")]
    NotReady,
    /// Uploaded bytes could not be decoded.
    #[error("upload could not be decoded: {0}")]
    Decode(#[from] DecodeError),
    /// The encoder rejected the export.
    #[error("export could not be encoded: {0}")]
    Encode(#[from] EncodeError),
    /// A frame could not be rendered.
    #[error(transparent)]
    Render(#[from] RenderError),
    /// The configuration is unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
