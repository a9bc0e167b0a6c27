// Copyright 2026 the Collage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame composition and rasterization.

use collage_raster::{RasterHandle, Surface};
use collage_render::{
    CpuCanvas, DrawOp, Recorder, RenderError, RenderOptions, canvas_pixels, render_scene,
    scene_ops,
};
use collage_scene::{Scene, SceneSettings, SourceId, StrokeStyle, Tool};
use kurbo::{Affine, Point, Size};

const RED: [u8; 4] = [255, 0, 0, 255];
const GREEN: [u8; 4] = [0, 255, 0, 255];
const BLUE: [u8; 4] = [0, 0, 255, 255];

fn solid(w: u32, h: u32, rgba: [u8; 4]) -> RasterHandle {
    RasterHandle::solid(w, h, rgba).unwrap()
}

fn close(actual: Option<[u8; 4]>, expected: [u8; 4]) -> bool {
    actual.is_some_and(|px| {
        px.iter()
            .zip(expected)
            .all(|(a, e)| a.abs_diff(e) <= 2)
    })
}

fn snapshot(scene: &Scene, options: RenderOptions) -> Surface {
    let mut canvas = CpuCanvas::new();
    render_scene(scene, &mut canvas, options).unwrap();
    canvas.snapshot().unwrap()
}

/// Red 100x50 backdrop.
fn backdrop() -> Scene {
    let mut scene = Scene::default();
    scene.set_background(solid(100, 50, RED));
    scene
}

fn place(scene: &mut Scene, raster: RasterHandle, at: (f64, f64)) {
    scene.select_source(SourceId(0), raster).unwrap();
    scene.click_canvas(at.into()).unwrap();
}

#[test]
fn empty_scene_is_a_blank_default_canvas() {
    let scene = Scene::default();
    let mut recorder = Recorder::new();
    render_scene(&scene, &mut recorder, RenderOptions::PREVIEW).unwrap();
    assert_eq!(recorder.size(), (800, 600));
    assert!(recorder.ops().is_empty());

    let surface = snapshot(&scene, RenderOptions::PREVIEW);
    assert_eq!(surface.pixel(400, 300), Some([0, 0, 0, 0]));
}

#[test]
fn ops_follow_paint_order() {
    let mut scene = backdrop();
    let first = solid(10, 10, GREEN);
    let second = solid(10, 10, BLUE);
    let pending = solid(4, 4, GREEN);
    place(&mut scene, first.clone(), (20.0, 20.0));
    scene.confirm();
    place(&mut scene, second.clone(), (30.0, 20.0));
    scene.confirm();
    place(&mut scene, pending.clone(), (50.0, 25.0));

    let ops = scene_ops(&scene, RenderOptions::PREVIEW);
    let rasters: Vec<&RasterHandle> = ops
        .iter()
        .map(|op| match op {
            DrawOp::Image { raster, .. } => raster,
            DrawOp::Polyline { .. } => panic!("no strokes in this scene"),
        })
        .collect();
    assert_eq!(rasters.len(), 4);
    assert!(rasters[0].ptr_eq(scene.background().unwrap().raster()));
    assert!(rasters[1].ptr_eq(&first));
    assert!(rasters[2].ptr_eq(&second));
    assert!(rasters[3].ptr_eq(&pending));
}

#[test]
fn committed_only_frames_skip_the_pending_element() {
    let mut scene = backdrop();
    place(&mut scene, solid(10, 10, GREEN), (50.0, 25.0));

    assert_eq!(scene_ops(&scene, RenderOptions::COMMITTED).len(), 1);
    assert_eq!(scene_ops(&scene, RenderOptions::PREVIEW).len(), 2);

    let hidden = snapshot(&scene, RenderOptions::COMMITTED);
    let shown = snapshot(&scene, RenderOptions::PREVIEW);
    assert!(close(hidden.pixel(50, 25), RED));
    assert!(close(shown.pixel(50, 25), GREEN));
}

#[test]
fn element_transform_is_used_verbatim() {
    let mut scene = backdrop();
    place(&mut scene, solid(10, 10, GREEN), (50.0, 25.0));
    scene.set_rotation(90.0);
    scene.set_scale(2.0);
    let expected = scene.pending().unwrap().element().transform();
    let ops = scene_ops(&scene, RenderOptions::PREVIEW);
    assert!(matches!(
        &ops[1],
        DrawOp::Image { transform, .. } if *transform == expected
    ));
}

#[test]
fn background_is_drawn_at_display_size() {
    let mut scene = Scene::default();
    scene.set_background(solid(1000, 500, BLUE));
    let ops = scene_ops(&scene, RenderOptions::PREVIEW);
    assert!(matches!(
        &ops[0],
        DrawOp::Image { transform, .. } if *transform == Affine::scale(0.8)
    ));

    let surface = snapshot(&scene, RenderOptions::PREVIEW);
    assert_eq!((surface.width(), surface.height()), (800, 400));
    assert!(close(surface.pixel(799, 399), BLUE));
}

#[test]
fn placed_image_covers_its_footprint() {
    let mut scene = backdrop();
    place(&mut scene, solid(10, 10, GREEN), (50.0, 25.0));
    scene.confirm();
    let surface = snapshot(&scene, RenderOptions::PREVIEW);
    assert!(close(surface.pixel(46, 21), GREEN));
    assert!(close(surface.pixel(53, 28), GREEN));
    assert!(close(surface.pixel(40, 25), RED));
    assert!(close(surface.pixel(60, 25), RED));
}

#[test]
fn scaled_image_grows_about_its_center() {
    let mut scene = backdrop();
    place(&mut scene, solid(10, 10, GREEN), (50.0, 25.0));
    scene.set_scale(2.0);
    scene.confirm();
    let surface = snapshot(&scene, RenderOptions::PREVIEW);
    assert!(close(surface.pixel(41, 17), GREEN));
    assert!(close(surface.pixel(38, 25), RED));
}

#[test]
fn rendering_is_deterministic() {
    let mut scene = backdrop();
    place(&mut scene, solid(12, 7, GREEN), (33.3, 21.7));
    scene.set_rotation(17.0);
    scene.set_scale(1.3);
    scene.confirm();

    let a = snapshot(&scene, RenderOptions::PREVIEW);
    let b = snapshot(&scene, RenderOptions::PREVIEW);
    assert_eq!(a, b);

    // Reusing one canvas gives the same bytes as a fresh one.
    let mut canvas = CpuCanvas::new();
    render_scene(&scene, &mut canvas, RenderOptions::PREVIEW).unwrap();
    render_scene(&scene, &mut canvas, RenderOptions::PREVIEW).unwrap();
    assert_eq!(canvas.snapshot().unwrap(), a);
}

#[test]
fn full_turns_render_identically() {
    let frame_at = |degrees: f64| {
        let mut scene = backdrop();
        place(&mut scene, solid(12, 7, GREEN), (50.0, 25.0));
        scene.set_rotation(degrees);
        snapshot(&scene, RenderOptions::PREVIEW)
    };
    assert_eq!(frame_at(30.0), frame_at(390.0));
    assert_eq!(frame_at(-45.0), frame_at(315.0));
}

#[test]
fn moved_elements_leave_no_ghost() {
    let mut scene = backdrop();
    place(&mut scene, solid(10, 10, GREEN), (20.0, 25.0));
    let mut canvas = CpuCanvas::new();
    render_scene(&scene, &mut canvas, RenderOptions::PREVIEW).unwrap();
    assert!(close(canvas.snapshot().unwrap().pixel(20, 25), GREEN));

    scene.pointer_down((20.0, 25.0).into()).unwrap();
    scene.pointer_move((80.0, 25.0).into());
    scene.pointer_up((80.0, 25.0).into());
    render_scene(&scene, &mut canvas, RenderOptions::PREVIEW).unwrap();
    let surface = canvas.snapshot().unwrap();
    assert!(close(surface.pixel(20, 25), RED));
    assert!(close(surface.pixel(80, 25), GREEN));
}

#[test]
fn strokes_render_as_polylines() {
    let mut scene = backdrop();
    scene.set_tool(Tool::Draw).unwrap();
    scene.set_stroke_style(StrokeStyle {
        color: BLUE,
        width: 6.0,
    });
    scene.pointer_down((10.0, 25.0).into()).unwrap();
    scene.pointer_move((90.0, 25.0).into());

    // In progress: only in preview frames.
    let preview = scene_ops(&scene, RenderOptions::PREVIEW);
    assert!(matches!(preview.last(), Some(DrawOp::Polyline { .. })));
    assert_eq!(scene_ops(&scene, RenderOptions::COMMITTED).len(), 1);

    scene.pointer_up((90.0, 25.0).into());
    let ops = scene_ops(&scene, RenderOptions::COMMITTED);
    assert_eq!(
        ops[1],
        DrawOp::Polyline {
            points: vec![Point::new(10.0, 25.0), Point::new(90.0, 25.0)],
            style: StrokeStyle {
                color: BLUE,
                width: 6.0
            },
        }
    );

    let surface = snapshot(&scene, RenderOptions::COMMITTED);
    assert!(close(surface.pixel(50, 25), BLUE));
    assert!(close(surface.pixel(50, 10), RED));
}

#[test]
fn oversized_canvas_is_an_error() {
    let settings = SceneSettings {
        max_background: Size::new(100_000.0, 100_000.0),
        ..SceneSettings::default()
    };
    let mut scene = Scene::new(settings);
    scene.set_background(solid(70_000, 1, RED));
    assert!(matches!(
        canvas_pixels(&scene),
        Err(RenderError::SurfaceTooLarge { .. })
    ));
    let mut recorder = Recorder::new();
    let rendered = render_scene(&scene, &mut recorder, RenderOptions::PREVIEW);
    assert!(rendered.is_err());
    assert_eq!(recorder.frames(), 0);
}

#[test]
fn snapshot_needs_a_frame() {
    assert_eq!(CpuCanvas::new().snapshot(), Err(RenderError::NoFrame));
}
