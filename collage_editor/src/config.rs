// Copyright 2026 the Collage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Editor configuration.
//!
//! Every field has a default, so a partial JSON document (or none at all) is
//! a valid configuration:
//!
//! ```json
//! {
//!   "max_background": { "width": 1024.0, "height": 768.0 },
//!   "hit_test": "transformed",
//!   "export_pending": "include",
//!   "export_format": { "kind": "png" }
//! }
//! ```

use std::io;
use std::path::{Path, PathBuf};

use collage_raster::ExportFormat;
use collage_scene::{BackgroundPolicy, HitTestMode, ScaleRange, SceneSettings, StrokeStyle};
use kurbo::Size;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Largest surface side the rasterizer accepts.
const MAX_SIDE: f64 = u16::MAX as f64;

/// Whether an uncommitted element appears in exports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportPending {
    /// Export only the background and committed elements.
    #[default]
    Exclude,
    /// Export what the user currently sees, pending element included.
    Include,
}

/// Failure to load or validate an [`EditorConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("failed to read config {path}: {source}")]
    Read {
        /// File that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The document is not valid config JSON.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A field holds a value the editor cannot work with.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Tunables of an [`Editor`](crate::Editor).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Drawing-surface size before any background exists.
    pub canvas_size: Size,
    /// Bounds the background display size is fitted into.
    pub max_background: Size,
    /// Allowed scale of a pending element.
    pub scale_range: ScaleRange,
    /// Hit region used to start drags.
    pub hit_test: HitTestMode,
    /// Effect of a background replacement on committed elements.
    pub background_policy: BackgroundPolicy,
    /// Whether exports show the pending element.
    pub export_pending: ExportPending,
    /// Initial freehand stroke style.
    pub stroke: StrokeStyle,
    /// Freehand samples closer than this to the previous point are dropped.
    pub stroke_min_spacing: f64,
    /// Format used by [`Editor::export`](crate::Editor::export).
    pub export_format: ExportFormat,
}

impl Default for EditorConfig {
    fn default() -> Self {
        let scene = SceneSettings::default();
        Self {
            canvas_size: scene.canvas_size,
            max_background: scene.max_background,
            scale_range: scene.scale_range,
            hit_test: scene.hit_test,
            background_policy: scene.background_policy,
            export_pending: ExportPending::default(),
            stroke: StrokeStyle::default(),
            stroke_min_spacing: scene.stroke_min_spacing,
            export_format: ExportFormat::default(),
        }
    }
}

impl EditorConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                let config = Self::from_json_str(&json)?;
                info!(path = %path.display(), "loaded config");
                Ok(config)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Check that every field is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_size("canvas_size", self.canvas_size)?;
        check_size("max_background", self.max_background)?;
        if !self.scale_range.is_valid() {
            return Err(ConfigError::Invalid(format!(
                "scale_range [{}, {}] must be positive and ordered",
                self.scale_range.min, self.scale_range.max
            )));
        }
        if !(self.stroke.width.is_finite() && self.stroke.width > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "stroke width {} must be positive",
                self.stroke.width
            )));
        }
        if !(self.stroke_min_spacing.is_finite() && self.stroke_min_spacing >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "stroke_min_spacing {} must not be negative",
                self.stroke_min_spacing
            )));
        }
        if let ExportFormat::Jpeg { quality } = self.export_format
            && !(1..=100).contains(&quality)
        {
            return Err(ConfigError::Invalid(format!(
                "jpeg quality {quality} is outside 1..=100"
            )));
        }
        Ok(())
    }

    /// The subset of settings the scene itself uses.
    pub fn scene_settings(&self) -> SceneSettings {
        SceneSettings {
            canvas_size: self.canvas_size,
            max_background: self.max_background,
            scale_range: self.scale_range,
            hit_test: self.hit_test,
            background_policy: self.background_policy,
            stroke_min_spacing: self.stroke_min_spacing,
        }
    }
}

fn check_size(field: &str, size: Size) -> Result<(), ConfigError> {
    let ok = |side: f64| side.is_finite() && side >= 1.0 && side <= MAX_SIDE;
    if ok(size.width) && ok(size.height) {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!(
            "{field} {}x{} must lie within 1..={MAX_SIDE} px per side",
            size.width, size.height
        )))
    }
}
