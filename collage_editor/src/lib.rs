// Copyright 2026 the Collage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collage Editor: the boundary a UI (or a script) drives.
//!
//! [`Editor`] ties the pieces together:
//!
//! - uploads go through a [`Decoder`](collage_raster::Decoder) into either the
//!   scene background or the [`UploadGallery`];
//! - pointer, slider and button input is forwarded to the
//!   [`Scene`](collage_scene::Scene) state machine;
//! - after every accepted change the preview frame is re-rendered in full;
//! - [`Editor::request_export`] renders a fresh frame and hands it to an
//!   [`Encoder`](collage_raster::Encoder).
//!
//! Operations return the updated scene or an [`EditorError`]. Every error is
//! recoverable and leaves the editor as it was.
//!
//! ## Minimal example
//!
//! ```rust
//! use collage_editor::{Editor, EditorConfig, EditorError};
//! use collage_raster::ExportFormat;
//!
//! # fn png(w: u32, h: u32) -> Vec<u8> {
//! #     let img = image::RgbaImage::from_pixel(w, h, image::Rgba([90, 140, 200, 255]));
//! #     let mut out = std::io::Cursor::new(Vec::new());
//! #     img.write_to(&mut out, image::ImageFormat::Png).unwrap();
//! #     out.into_inner()
//! # }
//! let mut editor = Editor::new(EditorConfig::default()).unwrap();
//! assert!(matches!(editor.request_export(ExportFormat::Png), Err(EditorError::NotReady)));
//!
//! editor.upload_background(&png(1000, 500)).unwrap();
//! let icon = editor.upload_to_gallery(&png(64, 64)).unwrap();
//! editor.select_source(icon).unwrap();
//! editor.click_canvas((200.0, 150.0)).unwrap();
//! editor.set_rotation(45.0).unwrap();
//! editor.set_scale(1.5).unwrap();
//! let scene = editor.confirm().unwrap();
//! assert_eq!(scene.committed().len(), 1);
//!
//! let bytes = editor.request_export(ExportFormat::Png).unwrap();
//! assert!(!bytes.is_empty());
//! ```

mod action;
mod config;
mod editor;
mod error;
mod gallery;
mod upload;

pub use action::EditorAction;
pub use config::{ConfigError, EditorConfig, ExportPending};
pub use editor::Editor;
pub use error::EditorError;
pub use gallery::UploadGallery;
pub use upload::{UploadReport, UploadResolution, UploadTarget, UploadTicket};
