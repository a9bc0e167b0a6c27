// Copyright 2026 the Collage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::mem;

use collage_raster::RasterHandle;
use kurbo::Size;
use tracing::{debug, info, warn};

use crate::hit::{hit_image, topmost_image_hit};
use crate::placement::PendingDrag;
use crate::{
    BackgroundPolicy, BackgroundSlot, Element, ElementId, Grab, HitTestMode, ImageElement,
    Outcome, PendingPlacement, PlacementError, PlacementState, PointerSample, ScaleRange,
    SourceId, StrokeBuilder, StrokeStyle, Tool, normalize_rotation,
};

/// Tunables of a [`Scene`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneSettings {
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
    /// Freehand samples closer than this to the previous point are dropped.
    pub stroke_min_spacing: f64,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            canvas_size: Size::new(800.0, 600.0),
            max_background: Size::new(800.0, 600.0),
            scale_range: ScaleRange::default(),
            hit_test: HitTestMode::default(),
            background_policy: BackgroundPolicy::default(),
            stroke_min_spacing: 2.0,
        }
    }
}

/// The editable composition plus its placement state.
///
/// Every mutation is a method returning an [`Outcome`] (or a
/// [`PlacementError`] for refused transitions). Methods never leave the scene
/// half-updated: a refused or ignored input changes nothing.
///
/// The [`revision`](Scene::revision) counter bumps on every change, so a
/// caller can redraw only when it moved.
#[derive(Clone, Debug)]
pub struct Scene {
    settings: SceneSettings,
    background: Option<BackgroundSlot>,
    committed: Vec<Element>,
    state: PlacementState,
    tool: Tool,
    stroke_style: StrokeStyle,
    next_id: u64,
    revision: u64,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(SceneSettings::default())
    }
}

impl Scene {
    /// An empty scene.
    pub fn new(settings: SceneSettings) -> Self {
        Self {
            settings,
            background: None,
            committed: Vec::new(),
            state: PlacementState::Idle,
            tool: Tool::default(),
            stroke_style: StrokeStyle::default(),
            next_id: 0,
            revision: 0,
        }
    }

    /// Settings the scene was built with.
    pub fn settings(&self) -> &SceneSettings {
        &self.settings
    }

    /// The backdrop, if one was set.
    pub fn background(&self) -> Option<&BackgroundSlot> {
        self.background.as_ref()
    }

    /// Committed elements, back to front.
    pub fn committed(&self) -> &[Element] {
        &self.committed
    }

    /// Current placement state.
    pub fn state(&self) -> &PlacementState {
        &self.state
    }

    /// The pending placement, if any.
    pub fn pending(&self) -> Option<&PendingPlacement> {
        match &self.state {
            PlacementState::Pending(p) => Some(p),
            _ => None,
        }
    }

    /// The stroke being drawn, if any.
    pub fn drawing(&self) -> Option<&StrokeBuilder> {
        match &self.state {
            PlacementState::Drawing(b) => Some(b),
            _ => None,
        }
    }

    /// Gallery entry held for the next canvas click.
    pub fn selection(&self) -> Option<SourceId> {
        match &self.state {
            PlacementState::SourceSelected { source, .. } => Some(*source),
            _ => None,
        }
    }

    /// Active tool.
    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Style applied to strokes started from now on.
    pub fn stroke_style(&self) -> StrokeStyle {
        self.stroke_style
    }

    /// Change counter.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Size of the drawing surface.
    ///
    /// The background display size, or the configured canvas size before a
    /// background exists.
    pub fn canvas_size(&self) -> Size {
        self.background
            .as_ref()
            .map_or(self.settings.canvas_size, BackgroundSlot::size)
    }

    /// Replace the background.
    pub fn set_background(&mut self, raster: RasterHandle) -> Outcome {
        let slot = BackgroundSlot::fitted(raster, self.settings.max_background);
        let size = slot.size();
        self.background = Some(slot);
        if self.settings.background_policy == BackgroundPolicy::ClearElements {
            let dropped = self.committed.len();
            self.committed.clear();
            self.state = PlacementState::Idle;
            info!(
                width = size.width,
                height = size.height,
                dropped,
                "background replaced, scene cleared"
            );
        } else {
            info!(
                width = size.width,
                height = size.height,
                "background replaced"
            );
        }
        self.track(Outcome::Changed)
    }

    /// Hold a gallery entry for the next placement.
    ///
    /// Ignored before a background exists and while drawing.
    pub fn select_source(
        &mut self,
        source: SourceId,
        raster: RasterHandle,
    ) -> Result<Outcome, PlacementError> {
        if self.background.is_none() {
            debug!(%source, "selection ignored: no background");
            return Ok(Outcome::Unchanged);
        }
        if self.tool == Tool::Draw {
            debug!(%source, "selection ignored: draw tool active");
            return Ok(Outcome::Unchanged);
        }
        let outcome = match self.state {
            PlacementState::Pending(_) => {
                return Err(PlacementError::ConcurrentPlacementRejected);
            }
            PlacementState::Idle | PlacementState::SourceSelected { .. } => {
                debug!(%source, "source selected");
                self.state = PlacementState::SourceSelected { source, raster };
                Outcome::Changed
            }
            PlacementState::Repositioning { .. } | PlacementState::Drawing(_) => {
                Outcome::Unchanged
            }
        };
        Ok(self.track(outcome))
    }

    /// Place the held gallery entry at the pointer.
    ///
    /// While an element is pending further clicks are refused, not queued.
    /// Without a held entry the click is ignored.
    pub fn click_canvas(&mut self, pointer: PointerSample) -> Result<Outcome, PlacementError> {
        if self.background.is_none() {
            return Err(PlacementError::NoBackground);
        }
        let (source, raster) = match &self.state {
            PlacementState::Pending(_) => {
                debug!("click refused: placement pending");
                return Err(PlacementError::ConcurrentPlacementRejected);
            }
            PlacementState::SourceSelected { source, raster } => (*source, raster.clone()),
            _ => return Ok(Outcome::Unchanged),
        };
        let id = self.alloc_id();
        let element = ImageElement::new(id, raster, pointer.canvas);
        debug!(%id, %source, x = pointer.canvas.x, y = pointer.canvas.y, "placement pending");
        self.state = PlacementState::Pending(PendingPlacement::new(element, source, pointer.world));
        Ok(self.track(Outcome::Changed))
    }

    /// Start a drag, a reposition, or a stroke depending on state and tool.
    pub fn pointer_down(&mut self, pointer: PointerSample) -> Result<Outcome, PlacementError> {
        let mode = self.settings.hit_test;
        let outcome = if let PlacementState::Pending(p) = &mut self.state {
            if p.drag.is_none() && hit_image(&p.element, pointer.canvas, mode) {
                p.drag = Some(PendingDrag {
                    canvas: Grab::start(pointer.canvas, p.element.center),
                    world: Grab::start(pointer.world, p.anchor),
                });
                debug!(id = %p.element.id(), "pending drag started");
                Outcome::Changed
            } else {
                Outcome::Unchanged
            }
        } else if matches!(self.state, PlacementState::Idle) {
            match self.tool {
                Tool::Place => self.start_reposition(pointer, mode),
                Tool::Draw => self.start_stroke(pointer)?,
            }
        } else {
            Outcome::Unchanged
        };
        Ok(self.track(outcome))
    }

    fn start_reposition(&mut self, pointer: PointerSample, mode: HitTestMode) -> Outcome {
        let Some(index) = topmost_image_hit(&self.committed, pointer.canvas, mode) else {
            return Outcome::Unchanged;
        };
        let Some(image) = self.committed[index].as_image() else {
            return Outcome::Unchanged;
        };
        let origin = image.center();
        debug!(id = %image.id(), index, "reposition started");
        self.state = PlacementState::Repositioning {
            index,
            grab: Grab::start(pointer.canvas, origin),
            origin,
        };
        Outcome::Changed
    }

    fn start_stroke(&mut self, pointer: PointerSample) -> Result<Outcome, PlacementError> {
        if self.background.is_none() {
            return Err(PlacementError::NoBackground);
        }
        let id = self.alloc_id();
        let mut builder =
            StrokeBuilder::new(id, self.stroke_style, self.settings.stroke_min_spacing);
        builder.push(pointer.canvas);
        debug!(%id, "stroke started");
        self.state = PlacementState::Drawing(builder);
        Ok(Outcome::Changed)
    }

    /// Follow the pointer with whatever is being dragged or drawn.
    pub fn pointer_move(&mut self, pointer: PointerSample) -> Outcome {
        let outcome = match &mut self.state {
            PlacementState::Pending(PendingPlacement {
                element,
                anchor,
                drag: Some(drag),
                ..
            }) => {
                element.center = drag.canvas.follow(pointer.canvas);
                *anchor = drag.world.follow(pointer.world);
                Outcome::Changed
            }
            PlacementState::Repositioning { index, grab, .. } => {
                match self.committed.get_mut(*index).and_then(Element::as_image_mut) {
                    Some(image) => {
                        image.center = grab.follow(pointer.canvas);
                        Outcome::Changed
                    }
                    None => Outcome::Unchanged,
                }
            }
            PlacementState::Drawing(builder) => {
                if builder.push(pointer.canvas) {
                    Outcome::Changed
                } else {
                    Outcome::Unchanged
                }
            }
            _ => Outcome::Unchanged,
        };
        self.track(outcome)
    }

    /// End a drag, a reposition, or a stroke.
    pub fn pointer_up(&mut self, pointer: PointerSample) -> Outcome {
        let outcome = match &mut self.state {
            PlacementState::Pending(p) if p.drag.is_some() => {
                p.drag = None;
                debug!(id = %p.element.id(), "pending drag ended");
                Outcome::Changed
            }
            PlacementState::Repositioning { index, .. } => {
                debug!(index = *index, "reposition ended");
                Outcome::Changed
            }
            PlacementState::Drawing(builder) => {
                builder.push(pointer.canvas);
                Outcome::Changed
            }
            _ => Outcome::Unchanged,
        };
        match self.state {
            PlacementState::Repositioning { .. } => self.state = PlacementState::Idle,
            PlacementState::Drawing(_) => self.finish_stroke(),
            _ => {}
        }
        self.track(outcome)
    }

    fn finish_stroke(&mut self) {
        let PlacementState::Drawing(builder) = mem::take(&mut self.state) else {
            return;
        };
        let id = builder.id();
        match builder.finish() {
            Some(stroke) => {
                info!(%id, points = stroke.points().len(), "stroke committed");
                self.committed.push(Element::Stroke(stroke));
            }
            None => debug!(%id, "stroke discarded: too few points"),
        }
    }

    /// Set the pending element's rotation in degrees.
    ///
    /// The angle is normalized into `[0, 360)`. Ignored without a pending
    /// element, while it is dragged, and for non-finite input.
    pub fn set_rotation(&mut self, degrees: f64) -> Outcome {
        let Some(p) = self.adjustable() else {
            return Outcome::Unchanged;
        };
        let Some(rotation) = normalize_rotation(degrees) else {
            warn!(degrees, "rotation ignored: not finite");
            return Outcome::Unchanged;
        };
        p.element.rotation = rotation;
        self.track(Outcome::Changed)
    }

    /// Set the pending element's scale, clamped into the configured range.
    pub fn set_scale(&mut self, factor: f64) -> Outcome {
        let range = self.settings.scale_range;
        let Some(p) = self.adjustable() else {
            return Outcome::Unchanged;
        };
        let Some(applied) = range.clamp(factor) else {
            warn!(factor, "scale ignored: not finite");
            return Outcome::Unchanged;
        };
        p.element.scale = applied;
        let outcome = if applied == factor {
            Outcome::Changed
        } else {
            debug!(requested = factor, applied, "scale clamped");
            Outcome::Clamped {
                requested: factor,
                applied,
            }
        };
        self.track(outcome)
    }

    fn adjustable(&mut self) -> Option<&mut PendingPlacement> {
        match &mut self.state {
            PlacementState::Pending(p) if !p.is_dragging() => Some(p),
            PlacementState::Pending(_) => {
                debug!("adjustment ignored while dragging");
                None
            }
            _ => None,
        }
    }

    /// Commit the pending element on top of the scene.
    pub fn confirm(&mut self) -> Outcome {
        if !matches!(&self.state, PlacementState::Pending(p) if !p.is_dragging()) {
            return Outcome::Unchanged;
        }
        let PlacementState::Pending(p) = mem::take(&mut self.state) else {
            return Outcome::Unchanged;
        };
        let element = p.element;
        info!(
            id = %element.id(),
            rotation = element.rotation(),
            scale = element.scale(),
            "placement committed"
        );
        self.committed.push(Element::Image(element));
        self.track(Outcome::Changed)
    }

    /// Abandon whatever is in flight without touching committed elements.
    ///
    /// A repositioned image returns to where the drag started.
    pub fn cancel(&mut self) -> Outcome {
        let previous = mem::take(&mut self.state);
        let outcome = match previous {
            PlacementState::Idle => Outcome::Unchanged,
            PlacementState::SourceSelected { .. } | PlacementState::Drawing(_) => {
                Outcome::Changed
            }
            PlacementState::Pending(p) => {
                debug!(id = %p.element.id(), "placement cancelled");
                Outcome::Changed
            }
            PlacementState::Repositioning { index, origin, .. } => {
                if let Some(image) = self.committed.get_mut(index).and_then(Element::as_image_mut)
                {
                    image.center = origin;
                }
                Outcome::Changed
            }
        };
        self.track(outcome)
    }

    /// Switch tools. Refused while an element is in flight.
    pub fn set_tool(&mut self, tool: Tool) -> Result<Outcome, PlacementError> {
        if tool == self.tool {
            return Ok(Outcome::Unchanged);
        }
        if self.state.in_flight() {
            return Err(PlacementError::ConcurrentPlacementRejected);
        }
        debug!(?tool, "tool changed");
        self.tool = tool;
        self.state = PlacementState::Idle;
        Ok(self.track(Outcome::Changed))
    }

    /// Style for strokes started from now on.
    pub fn set_stroke_style(&mut self, style: StrokeStyle) -> Outcome {
        if style == self.stroke_style {
            return Outcome::Unchanged;
        }
        self.stroke_style = style;
        self.track(Outcome::Changed)
    }

    fn alloc_id(&mut self) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        id
    }

    fn track(&mut self, outcome: Outcome) -> Outcome {
        if outcome.is_change() {
            self.revision += 1;
        }
        outcome
    }
}
