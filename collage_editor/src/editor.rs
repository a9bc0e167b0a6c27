// Copyright 2026 the Collage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use collage_raster::{Decoder, Encoder, ExportFormat, ImageCodec, RasterHandle, Surface};
use collage_render::{CpuCanvas, RenderOptions, render_scene};
use collage_scene::{Outcome, PointerSample, Scene, SourceId, StrokeStyle, Tool};
use tracing::{debug, info, warn};

use crate::action::sample;
use crate::upload::{QueuedUpload, UploadQueue};
use crate::{
    EditorAction, EditorConfig, EditorError, ExportPending, UploadGallery, UploadReport,
    UploadResolution, UploadTarget, UploadTicket,
};

/// The editor boundary: owns the scene and everything around it.
///
/// Every operation that changes the scene redraws the preview frame before it
/// returns, so [`Editor::frame`] always reflects the latest accepted input.
#[derive(Debug)]
pub struct Editor<C = ImageCodec> {
    config: EditorConfig,
    scene: Scene,
    gallery: UploadGallery,
    uploads: UploadQueue,
    codec: C,
    canvas: CpuCanvas,
    frame: Option<Surface>,
}

impl Editor {
    /// An editor using the stock `image`-backed codec.
    pub fn new(config: EditorConfig) -> Result<Self, EditorError> {
        Self::with_codec(config, ImageCodec)
    }
}

impl<C: Decoder + Encoder> Editor<C> {
    /// An editor using `codec` for uploads and exports.
    pub fn with_codec(config: EditorConfig, codec: C) -> Result<Self, EditorError> {
        config.validate()?;
        let mut scene = Scene::new(config.scene_settings());
        scene.set_stroke_style(config.stroke);
        Ok(Self {
            config,
            scene,
            gallery: UploadGallery::new(),
            uploads: UploadQueue::default(),
            codec,
            canvas: CpuCanvas::new(),
            frame: None,
        })
    }

    /// The active configuration.
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// The current scene.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Rasters available for placement.
    pub fn gallery(&self) -> &UploadGallery {
        &self.gallery
    }

    /// The latest preview frame, if anything has been drawn yet.
    pub fn frame(&self) -> Option<&Surface> {
        self.frame.as_ref()
    }

    /// Number of uploads queued but not yet decoded.
    pub fn queued_uploads(&self) -> usize {
        self.uploads.len()
    }

    /// Hold gallery entry `source` for the next placement.
    pub fn select_source(&mut self, source: SourceId) -> Result<&Scene, EditorError> {
        let raster = self
            .gallery
            .get(source)
            .ok_or(EditorError::InvalidSelection(source))?
            .clone();
        let outcome = self.scene.select_source(source, raster)?;
        self.settle(outcome)
    }

    /// Place the held gallery entry at the pointer.
    pub fn click_canvas(
        &mut self,
        pointer: impl Into<PointerSample>,
    ) -> Result<&Scene, EditorError> {
        let outcome = self.scene.click_canvas(pointer.into())?;
        self.settle(outcome)
    }

    /// Pointer pressed.
    pub fn pointer_down(
        &mut self,
        pointer: impl Into<PointerSample>,
    ) -> Result<&Scene, EditorError> {
        let outcome = self.scene.pointer_down(pointer.into())?;
        self.settle(outcome)
    }

    /// Pointer moved.
    pub fn pointer_move(
        &mut self,
        pointer: impl Into<PointerSample>,
    ) -> Result<&Scene, EditorError> {
        let outcome = self.scene.pointer_move(pointer.into());
        self.settle(outcome)
    }

    /// Pointer released.
    pub fn pointer_up(&mut self, pointer: impl Into<PointerSample>) -> Result<&Scene, EditorError> {
        let outcome = self.scene.pointer_up(pointer.into());
        self.settle(outcome)
    }

    /// Rotation slider moved.
    pub fn set_rotation(&mut self, degrees: f64) -> Result<&Scene, EditorError> {
        let outcome = self.scene.set_rotation(degrees);
        self.settle(outcome)
    }

    /// Scale slider moved. Out-of-range factors are clamped.
    pub fn set_scale(&mut self, factor: f64) -> Result<&Scene, EditorError> {
        let outcome = self.scene.set_scale(factor);
        self.settle(outcome)
    }

    /// Commit the pending element.
    pub fn confirm(&mut self) -> Result<&Scene, EditorError> {
        let outcome = self.scene.confirm();
        self.settle(outcome)
    }

    /// Drop whatever is in flight.
    pub fn cancel(&mut self) -> Result<&Scene, EditorError> {
        let outcome = self.scene.cancel();
        self.settle(outcome)
    }

    /// Switch between placing images and drawing strokes.
    pub fn set_tool(&mut self, tool: Tool) -> Result<&Scene, EditorError> {
        let outcome = self.scene.set_tool(tool)?;
        self.settle(outcome)
    }

    /// Style for strokes started from now on.
    pub fn set_stroke_style(&mut self, style: StrokeStyle) -> Result<&Scene, EditorError> {
        let outcome = self.scene.set_stroke_style(style);
        self.settle(outcome)
    }

    /// Dispatch a scripted action.
    pub fn apply(&mut self, action: EditorAction) -> Result<&Scene, EditorError> {
        debug!(?action, "apply");
        match action {
            EditorAction::SelectSource { source } => self.select_source(source),
            EditorAction::ClickCanvas { x, y, world } => self.click_canvas(sample(x, y, world)),
            EditorAction::PointerDown { x, y, world } => self.pointer_down(sample(x, y, world)),
            EditorAction::PointerMove { x, y, world } => self.pointer_move(sample(x, y, world)),
            EditorAction::PointerUp { x, y, world } => self.pointer_up(sample(x, y, world)),
            EditorAction::SetRotation { degrees } => self.set_rotation(degrees),
            EditorAction::SetScale { factor } => self.set_scale(factor),
            EditorAction::Confirm => self.confirm(),
            EditorAction::Cancel => self.cancel(),
            EditorAction::SetTool { tool } => self.set_tool(tool),
            EditorAction::SetStrokeStyle { style } => self.set_stroke_style(style),
        }
    }

    /// Decode `bytes` and make them the background.
    pub fn upload_background(&mut self, bytes: &[u8]) -> Result<&Scene, EditorError> {
        let ticket = self.uploads.ticket();
        self.resolve(ticket, UploadTarget::Background, bytes)?;
        Ok(&self.scene)
    }

    /// Decode `bytes` and append them to the gallery.
    pub fn upload_to_gallery(&mut self, bytes: &[u8]) -> Result<SourceId, EditorError> {
        let ticket = self.uploads.ticket();
        let raster = self.decode(ticket, UploadTarget::Gallery, bytes)?;
        let source = self.gallery.push(raster);
        info!(%ticket, %source, "gallery upload decoded");
        Ok(source)
    }

    /// Queue a decode request without resolving it.
    pub fn queue_upload(&mut self, target: UploadTarget, bytes: Vec<u8>) -> UploadTicket {
        let ticket = self.uploads.push(target, bytes);
        debug!(%ticket, ?target, "upload queued");
        ticket
    }

    /// Resolve every queued upload, oldest first.
    ///
    /// Each request succeeds or fails on its own; one report per ticket.
    pub fn process_uploads(&mut self) -> Vec<UploadReport> {
        let mut reports = Vec::with_capacity(self.uploads.len());
        while let Some(QueuedUpload {
            ticket,
            target,
            bytes,
        }) = self.uploads.pop()
        {
            let result = self.resolve(ticket, target, &bytes);
            reports.push(UploadReport {
                ticket,
                target,
                result,
            });
        }
        reports
    }

    fn resolve(
        &mut self,
        ticket: UploadTicket,
        target: UploadTarget,
        bytes: &[u8],
    ) -> Result<UploadResolution, EditorError> {
        let raster = self.decode(ticket, target, bytes)?;
        match target {
            UploadTarget::Background => {
                let outcome = self.scene.set_background(raster);
                self.settle(outcome)?;
                let size = self.scene.canvas_size();
                info!(%ticket, width = size.width, height = size.height, "background decoded");
                Ok(UploadResolution::Background { size })
            }
            UploadTarget::Gallery => {
                let source = self.gallery.push(raster);
                info!(%ticket, %source, "gallery upload decoded");
                Ok(UploadResolution::Gallery { source })
            }
        }
    }

    fn decode(
        &self,
        ticket: UploadTicket,
        target: UploadTarget,
        bytes: &[u8],
    ) -> Result<RasterHandle, EditorError> {
        match self.codec.decode(bytes) {
            Ok(raster) => {
                debug!(%ticket, width = raster.width(), height = raster.height(), "decoded");
                Ok(raster)
            }
            Err(err) => {
                warn!(%ticket, ?target, %err, "upload rejected");
                Err(err.into())
            }
        }
    }

    /// Render and encode the composition in the configured format.
    pub fn export(&mut self) -> Result<Vec<u8>, EditorError> {
        self.request_export(self.config.export_format)
    }

    /// Render and encode the composition.
    ///
    /// Fails with [`EditorError::NotReady`] until a background exists. The
    /// pending element is included only when the configuration says so.
    pub fn request_export(&mut self, format: ExportFormat) -> Result<Vec<u8>, EditorError> {
        if self.scene.background().is_none() {
            return Err(EditorError::NotReady);
        }
        let options = match self.config.export_pending {
            ExportPending::Include => RenderOptions::PREVIEW,
            ExportPending::Exclude => RenderOptions::COMMITTED,
        };
        let mut canvas = CpuCanvas::new();
        render_scene(&self.scene, &mut canvas, options)?;
        let surface = canvas.snapshot()?;
        let bytes = self.codec.encode(&surface, format)?;
        info!(
            format = format.extension(),
            width = surface.width(),
            height = surface.height(),
            bytes = bytes.len(),
            elements = self.scene.committed().len(),
            "exported"
        );
        Ok(bytes)
    }

    fn settle(&mut self, outcome: Outcome) -> Result<&Scene, EditorError> {
        if outcome.is_change() {
            render_scene(&self.scene, &mut self.canvas, RenderOptions::PREVIEW)?;
            self.frame = Some(self.canvas.snapshot()?);
        }
        Ok(&self.scene)
    }
}
