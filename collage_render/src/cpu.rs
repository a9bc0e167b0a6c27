// Copyright 2026 the Collage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use collage_raster::Surface;
use kurbo::Affine;
use peniko::{Color, ImageSampler};
use vello_cpu::kurbo::{Affine as CpuAffine, BezPath, Cap, Join, Rect, Stroke};
use vello_cpu::{Image as CpuImage, ImageSource, Pixmap, RenderContext, RenderMode, RenderSettings};

use crate::{DrawOp, DrawTarget, RenderError};

/// A [`DrawTarget`] rasterizing with `vello_cpu`.
///
/// Rendering is single-threaded on the u8 pipeline, so identical frames
/// produce identical bytes. Each [`begin`](DrawTarget::begin) starts from a
/// fresh context; call [`CpuCanvas::snapshot`] after the last draw to read
/// the pixels back.
#[derive(Default)]
pub struct CpuCanvas {
    ctx: Option<RenderContext>,
    width: u16,
    height: u16,
}

impl fmt::Debug for CpuCanvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CpuCanvas")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("begun", &self.ctx.is_some())
            .finish_non_exhaustive()
    }
}

impl CpuCanvas {
    /// A canvas with no frame begun yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rasterize the current frame into a straight-alpha [`Surface`].
    pub fn snapshot(&mut self) -> Result<Surface, RenderError> {
        let ctx = self.ctx.as_mut().ok_or(RenderError::NoFrame)?;
        let (width, height) = (self.width, self.height);
        let mut pixmap = Pixmap::new(width, height);
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);

        let unpremul = pixmap.take_unpremultiplied();
        let mut bytes = Vec::with_capacity(unpremul.len() * 4);
        for p in unpremul {
            bytes.extend_from_slice(&[p.r, p.g, p.b, p.a]);
        }
        Ok(Surface::from_rgba8(
            u32::from(width),
            u32::from(height),
            bytes,
        )?)
    }

    fn affine_to_cpu(xf: Affine) -> CpuAffine {
        CpuAffine::new(xf.as_coeffs())
    }
}

impl DrawTarget for CpuCanvas {
    fn begin(&mut self, width: u16, height: u16) {
        let settings = RenderSettings {
            render_mode: RenderMode::OptimizeSpeed,
            ..RenderSettings::default()
        };
        self.ctx = Some(RenderContext::new_with(width, height, settings));
        self.width = width;
        self.height = height;
    }

    fn draw(&mut self, op: DrawOp) {
        let Some(ctx) = self.ctx.as_mut() else {
            return;
        };
        match op {
            DrawOp::Image { raster, transform } => {
                let image_data = raster.image_data();
                ctx.set_paint(CpuImage {
                    image: ImageSource::from_peniko_image_data(&image_data),
                    sampler: ImageSampler::default(),
                });
                ctx.set_transform(Self::affine_to_cpu(transform));
                ctx.fill_rect(&Rect::new(
                    0.0,
                    0.0,
                    f64::from(raster.width()),
                    f64::from(raster.height()),
                ));
            }
            DrawOp::Polyline { points, style } => {
                let mut path = BezPath::new();
                let mut points = points.iter();
                let Some(first) = points.next() else {
                    return;
                };
                path.move_to((first.x, first.y));
                for p in points {
                    path.line_to((p.x, p.y));
                }
                let mut stroke = Stroke::new(style.width);
                stroke.join = Join::Round;
                stroke.start_cap = Cap::Round;
                stroke.end_cap = Cap::Round;

                let [r, g, b, a] = style.color;
                ctx.set_transform(CpuAffine::IDENTITY);
                ctx.set_paint(Color::from_rgba8(r, g, b, a));
                ctx.set_stroke(stroke);
                ctx.stroke_path(&path);
            }
        }
    }
}
