// Copyright 2026 the Collage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement state machine behavior.

use collage_raster::RasterHandle;
use collage_scene::{
    BackgroundPolicy, Element, HitTestMode, Outcome, PlacementError, PlacementState,
    PointerSample, Scene, SceneSettings, SourceId, StrokeStyle, Tool,
};
use kurbo::{Point, Size};

fn raster(w: u32, h: u32) -> RasterHandle {
    RasterHandle::solid(w, h, [200, 10, 10, 255]).unwrap()
}

fn ready_scene() -> Scene {
    let mut scene = Scene::default();
    scene.set_background(raster(1000, 500));
    scene
}

fn pending_at(scene: &mut Scene, x: f64, y: f64) {
    scene.select_source(SourceId(0), raster(64, 64)).unwrap();
    scene.click_canvas((x, y).into()).unwrap();
}

#[test]
fn end_to_end_placement() {
    let mut scene = ready_scene();
    assert_eq!(scene.canvas_size(), Size::new(800.0, 400.0));

    pending_at(&mut scene, 200.0, 150.0);
    let pending = scene.pending().unwrap().element();
    assert_eq!(pending.center(), Point::new(200.0, 150.0));
    assert_eq!((pending.rotation(), pending.scale()), (0.0, 1.0));

    assert_eq!(scene.set_rotation(45.0), Outcome::Changed);
    assert_eq!(scene.set_scale(1.5), Outcome::Changed);
    assert_eq!(scene.confirm(), Outcome::Changed);

    assert_eq!(scene.committed().len(), 1);
    let placed = scene.committed()[0].as_image().unwrap();
    assert_eq!(placed.rotation(), 45.0);
    assert_eq!(placed.scale(), 1.5);
    assert_eq!(placed.center(), Point::new(200.0, 150.0));
    assert_eq!(*scene.state(), PlacementState::Idle);
}

#[test]
fn scale_is_clamped_not_rejected() {
    let mut scene = ready_scene();
    pending_at(&mut scene, 10.0, 10.0);

    assert_eq!(
        scene.set_scale(10.0),
        Outcome::Clamped {
            requested: 10.0,
            applied: 2.0
        }
    );
    assert_eq!(scene.pending().unwrap().element().scale(), 2.0);

    assert_eq!(
        scene.set_scale(-1.0),
        Outcome::Clamped {
            requested: -1.0,
            applied: 0.005
        }
    );
    assert_eq!(scene.pending().unwrap().element().scale(), 0.005);

    assert_eq!(scene.set_scale(f64::NAN), Outcome::Unchanged);
    assert_eq!(scene.pending().unwrap().element().scale(), 0.005);
}

#[test]
fn rotation_is_stored_normalized() {
    let mut scene = ready_scene();
    pending_at(&mut scene, 10.0, 10.0);
    scene.set_rotation(-90.0);
    assert_eq!(scene.pending().unwrap().element().rotation(), 270.0);
    scene.set_rotation(765.0);
    assert_eq!(scene.pending().unwrap().element().rotation(), 45.0);
    assert_eq!(scene.set_rotation(f64::INFINITY), Outcome::Unchanged);
    assert_eq!(scene.pending().unwrap().element().rotation(), 45.0);
}

#[test]
fn second_click_while_pending_is_latched() {
    let mut scene = ready_scene();
    pending_at(&mut scene, 100.0, 100.0);
    let before = scene.pending().unwrap().clone();
    let revision = scene.revision();

    assert_eq!(
        scene.click_canvas((300.0, 300.0).into()),
        Err(PlacementError::ConcurrentPlacementRejected)
    );
    assert_eq!(scene.pending(), Some(&before));
    assert_eq!(scene.revision(), revision);

    assert_eq!(scene.confirm(), Outcome::Changed);
    assert_eq!(scene.confirm(), Outcome::Unchanged);
    assert_eq!(scene.committed().len(), 1);
}

#[test]
fn selecting_while_pending_is_rejected() {
    let mut scene = ready_scene();
    pending_at(&mut scene, 100.0, 100.0);
    assert_eq!(
        scene.select_source(SourceId(1), raster(8, 8)),
        Err(PlacementError::ConcurrentPlacementRejected)
    );
    assert_eq!(scene.pending().unwrap().source(), SourceId(0));
}

#[test]
fn cancel_leaves_committed_untouched() {
    let mut scene = ready_scene();
    pending_at(&mut scene, 50.0, 50.0);
    scene.confirm();
    let committed_before = scene.committed().to_vec();

    pending_at(&mut scene, 120.0, 80.0);
    scene.set_rotation(33.0);
    scene.set_scale(0.25);
    scene.pointer_down((120.0, 80.0).into()).unwrap();
    scene.pointer_move((140.0, 90.0).into());
    scene.pointer_up((140.0, 90.0).into());
    assert_eq!(scene.cancel(), Outcome::Changed);

    assert_eq!(scene.committed(), committed_before.as_slice());
    assert_eq!(*scene.state(), PlacementState::Idle);
}

#[test]
fn confirm_keeps_final_adjusted_fields() {
    let mut scene = ready_scene();
    pending_at(&mut scene, 120.0, 80.0);
    scene.set_rotation(300.0);
    scene.set_scale(0.5);
    scene.pointer_down((130.0, 70.0).into()).unwrap();
    scene.pointer_move((160.0, 100.0).into());
    scene.pointer_up((160.0, 100.0).into());
    let expected = scene.pending().unwrap().element().clone();

    scene.confirm();
    assert_eq!(scene.committed(), &[Element::Image(expected)]);
}

#[test]
fn pending_drag_preserves_grab_offset() {
    let mut scene = ready_scene();
    pending_at(&mut scene, 100.0, 100.0);

    assert_eq!(
        scene.pointer_down((110.0, 95.0).into()).unwrap(),
        Outcome::Changed
    );
    assert!(scene.pending().unwrap().is_dragging());
    scene.pointer_move((150.0, 130.0).into());
    assert_eq!(
        scene.pending().unwrap().element().center(),
        Point::new(140.0, 135.0)
    );
    scene.pointer_up((150.0, 130.0).into());
    assert!(!scene.pending().unwrap().is_dragging());
}

#[test]
fn pending_drag_tracks_world_anchor() {
    let mut scene = ready_scene();
    scene.select_source(SourceId(0), raster(64, 64)).unwrap();
    let click = PointerSample::new(Point::new(100.0, 100.0), Point::new(600.0, 400.0));
    scene.click_canvas(click).unwrap();
    assert_eq!(scene.pending().unwrap().anchor(), Point::new(600.0, 400.0));

    scene
        .pointer_down(PointerSample::new(
            Point::new(110.0, 95.0),
            Point::new(610.0, 395.0),
        ))
        .unwrap();
    scene.pointer_move(PointerSample::new(
        Point::new(150.0, 130.0),
        Point::new(650.0, 430.0),
    ));
    let pending = scene.pending().unwrap();
    assert_eq!(pending.anchor(), Point::new(640.0, 435.0));
    assert_eq!(pending.panel_origin(), Point::new(544.0, 403.0));
}

#[test]
fn pointer_down_away_from_pending_does_not_drag() {
    let mut scene = ready_scene();
    pending_at(&mut scene, 100.0, 100.0);
    assert_eq!(
        scene.pointer_down((300.0, 300.0).into()).unwrap(),
        Outcome::Unchanged
    );
    assert_eq!(
        scene.pointer_move((310.0, 310.0).into()),
        Outcome::Unchanged
    );
    assert_eq!(
        scene.pending().unwrap().element().center(),
        Point::new(100.0, 100.0)
    );
}

#[test]
fn sliders_and_confirm_wait_for_drag_end() {
    let mut scene = ready_scene();
    pending_at(&mut scene, 100.0, 100.0);
    scene.pointer_down((100.0, 100.0).into()).unwrap();

    assert_eq!(scene.set_rotation(90.0), Outcome::Unchanged);
    assert_eq!(scene.set_scale(0.5), Outcome::Unchanged);
    assert_eq!(scene.confirm(), Outcome::Unchanged);

    scene.pointer_up((100.0, 100.0).into());
    assert_eq!(scene.set_rotation(90.0), Outcome::Changed);
    assert_eq!(scene.confirm(), Outcome::Changed);
}

#[test]
fn committed_images_can_be_repositioned() {
    let mut scene = ready_scene();
    pending_at(&mut scene, 100.0, 100.0);
    scene.set_rotation(30.0);
    scene.confirm();

    assert_eq!(
        scene.pointer_down((110.0, 95.0).into()).unwrap(),
        Outcome::Changed
    );
    assert!(matches!(
        scene.state(),
        PlacementState::Repositioning { index: 0, .. }
    ));
    scene.pointer_move((150.0, 130.0).into());
    scene.pointer_up((150.0, 130.0).into());

    let image = scene.committed()[0].as_image().unwrap();
    assert_eq!(image.center(), Point::new(140.0, 135.0));
    assert_eq!(image.rotation(), 30.0);
    assert_eq!(*scene.state(), PlacementState::Idle);
}

#[test]
fn topmost_committed_image_is_grabbed() {
    let mut scene = ready_scene();
    pending_at(&mut scene, 100.0, 100.0);
    scene.confirm();
    pending_at(&mut scene, 120.0, 120.0);
    scene.confirm();

    scene.pointer_down((110.0, 110.0).into()).unwrap();
    assert!(matches!(
        scene.state(),
        PlacementState::Repositioning { index: 1, .. }
    ));
}

#[test]
fn cancelled_reposition_restores_center() {
    let mut scene = ready_scene();
    pending_at(&mut scene, 100.0, 100.0);
    scene.confirm();
    scene.pointer_down((100.0, 100.0).into()).unwrap();
    scene.pointer_move((300.0, 200.0).into());
    scene.cancel();
    assert_eq!(
        scene.committed()[0].as_image().unwrap().center(),
        Point::new(100.0, 100.0)
    );
}

#[test]
fn transformed_hit_test_sees_rotation() {
    let settings = SceneSettings {
        hit_test: HitTestMode::Transformed,
        ..SceneSettings::default()
    };
    let mut scene = Scene::new(settings);
    scene.set_background(raster(800, 600));
    scene.select_source(SourceId(0), raster(100, 10)).unwrap();
    scene.click_canvas((200.0, 200.0).into()).unwrap();
    scene.set_rotation(90.0);
    scene.confirm();

    // Outside the unrotated footprint, inside the rotated raster.
    scene.pointer_down((200.0, 240.0).into()).unwrap();
    assert!(matches!(
        scene.state(),
        PlacementState::Repositioning { .. }
    ));
}

#[test]
fn placement_needs_a_background() {
    let mut scene = Scene::default();
    assert_eq!(
        scene.select_source(SourceId(0), raster(4, 4)),
        Ok(Outcome::Unchanged)
    );
    assert_eq!(
        scene.click_canvas((1.0, 1.0).into()),
        Err(PlacementError::NoBackground)
    );
    assert_eq!(scene.canvas_size(), Size::new(800.0, 600.0));
}

#[test]
fn click_without_selection_is_ignored() {
    let mut scene = ready_scene();
    assert_eq!(
        scene.click_canvas((10.0, 10.0).into()),
        Ok(Outcome::Unchanged)
    );
    assert!(scene.pending().is_none());
}

#[test]
fn element_ids_are_never_reused() {
    let mut scene = ready_scene();
    pending_at(&mut scene, 10.0, 10.0);
    let cancelled = scene.pending().unwrap().element().id();
    scene.cancel();
    pending_at(&mut scene, 10.0, 10.0);
    scene.confirm();
    assert!(scene.committed()[0].id() > cancelled);
}

#[test]
fn background_replacement_clears_by_default() {
    let mut scene = ready_scene();
    pending_at(&mut scene, 10.0, 10.0);
    scene.confirm();
    pending_at(&mut scene, 20.0, 20.0);

    scene.set_background(raster(300, 1200));
    assert!(scene.committed().is_empty());
    assert_eq!(*scene.state(), PlacementState::Idle);
    assert_eq!(scene.canvas_size(), Size::new(150.0, 600.0));
}

#[test]
fn background_replacement_can_keep_elements() {
    let settings = SceneSettings {
        background_policy: BackgroundPolicy::KeepElements,
        ..SceneSettings::default()
    };
    let mut scene = Scene::new(settings);
    scene.set_background(raster(800, 600));
    pending_at(&mut scene, 10.0, 10.0);
    scene.confirm();
    pending_at(&mut scene, 20.0, 20.0);

    scene.set_background(raster(400, 400));
    assert_eq!(scene.committed().len(), 1);
    assert!(scene.pending().is_some());
}

#[test]
fn strokes_commit_with_two_points() {
    let mut scene = ready_scene();
    scene.set_tool(Tool::Draw).unwrap();
    scene.pointer_down((10.0, 10.0).into()).unwrap();
    assert!(scene.drawing().is_some());
    scene.pointer_move((11.0, 10.0).into());
    scene.pointer_move((20.0, 10.0).into());
    scene.pointer_move((30.0, 15.0).into());
    scene.pointer_up((30.0, 15.0).into());

    let stroke = scene.committed()[0].as_stroke().unwrap();
    assert_eq!(
        stroke.points(),
        &[
            Point::new(10.0, 10.0),
            Point::new(20.0, 10.0),
            Point::new(30.0, 15.0)
        ]
    );
    assert_eq!(stroke.style(), StrokeStyle::default());
}

#[test]
fn single_click_stroke_is_discarded() {
    let mut scene = ready_scene();
    scene.set_tool(Tool::Draw).unwrap();
    scene.pointer_down((10.0, 10.0).into()).unwrap();
    scene.pointer_up((10.5, 10.0).into());
    assert!(scene.committed().is_empty());
    assert_eq!(*scene.state(), PlacementState::Idle);
}

#[test]
fn strokes_use_style_at_start() {
    let mut scene = ready_scene();
    scene.set_tool(Tool::Draw).unwrap();
    let red = StrokeStyle {
        color: [255, 0, 0, 255],
        width: 5.0,
    };
    scene.set_stroke_style(red);
    scene.pointer_down((0.0, 0.0).into()).unwrap();
    scene.set_stroke_style(StrokeStyle::default());
    scene.pointer_up((50.0, 50.0).into());
    assert_eq!(scene.committed()[0].as_stroke().unwrap().style(), red);
}

#[test]
fn drawing_needs_a_background() {
    let mut scene = Scene::default();
    scene.set_tool(Tool::Draw).unwrap();
    assert_eq!(
        scene.pointer_down((0.0, 0.0).into()),
        Err(PlacementError::NoBackground)
    );
}

#[test]
fn tool_switch_waits_for_pending() {
    let mut scene = ready_scene();
    pending_at(&mut scene, 10.0, 10.0);
    assert_eq!(
        scene.set_tool(Tool::Draw),
        Err(PlacementError::ConcurrentPlacementRejected)
    );
    scene.cancel();

    scene.select_source(SourceId(0), raster(4, 4)).unwrap();
    assert_eq!(scene.set_tool(Tool::Draw), Ok(Outcome::Changed));
    assert_eq!(scene.selection(), None);
    assert_eq!(
        scene.select_source(SourceId(0), raster(4, 4)),
        Ok(Outcome::Unchanged)
    );
}

#[test]
fn revision_moves_only_on_change() {
    let mut scene = ready_scene();
    let start = scene.revision();
    scene.confirm();
    scene.pointer_move((1.0, 1.0).into());
    assert_eq!(scene.revision(), start);
    pending_at(&mut scene, 10.0, 10.0);
    assert_eq!(scene.revision(), start + 2);
}
