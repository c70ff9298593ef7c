// Host-side tests for the gradient blob field.

mod common;

use backdrop_fx::core::constants::*;
use backdrop_fx::core::gradient::{step_blob, wrap_with_margin};
use backdrop_fx::core::{Engine, FrameInput, GradientFieldEngine, GradientParams, Viewport};
use common::{RecordingPainter, FRAME_MS};
use glam::Vec2;

fn frame(n: u64, target: Vec2, viewport: Viewport) -> FrameInput {
    FrameInput {
        now_ms: n as f64 * FRAME_MS,
        frame: n,
        elapsed_sec: (n as f64 * FRAME_MS / 1000.0) as f32,
        pointer: Default::default(),
        target,
        pointer_seen: true,
        travel: 0.0,
        local_pointer: Vec2::ZERO,
        viewport,
    }
}

fn still_params() -> GradientParams {
    GradientParams {
        drift_speed: 0.0,
        ..GradientParams::default()
    }
}

fn still_engine(vp: Viewport) -> GradientFieldEngine {
    let mut engine = GradientFieldEngine::new(still_params(), vp, 1);
    for blob in engine.blobs_mut() {
        blob.drift_velocity = Vec2::ZERO;
        blob.drift_angular_velocity = 0.0;
    }
    engine
}

#[test]
fn blobs_start_at_viewport_anchors() {
    let vp = Viewport::new(1000.0, 500.0);
    let engine = GradientFieldEngine::new(GradientParams::default(), vp, 7);
    assert_eq!(engine.blobs().len(), BLOB_COUNT);
    let first = &engine.blobs()[0];
    assert_eq!(first.base_position, Vec2::new(200.0, 150.0));
    assert_eq!(first.current_radius, first.base_radius);
    for blob in engine.blobs() {
        assert!(blob.drift_angular_velocity.abs() <= BLOB_MAX_ANGULAR_VELOCITY);
        assert!(blob.drift_velocity.x.abs() <= BLOB_MAX_VELOCITY);
        assert!(blob.drift_velocity.y.abs() <= BLOB_MAX_VELOCITY);
    }
}

#[test]
fn same_seed_same_drift() {
    let vp = Viewport::default();
    let a = GradientFieldEngine::new(GradientParams::default(), vp, 99);
    let b = GradientFieldEngine::new(GradientParams::default(), vp, 99);
    for (x, y) in a.blobs().iter().zip(b.blobs()) {
        assert_eq!(x.drift_angle, y.drift_angle);
        assert_eq!(x.drift_velocity, y.drift_velocity);
    }
}

#[test]
fn pointer_attracts_and_inflates() {
    let vp = Viewport::new(2000.0, 2000.0);
    let params = still_params();
    let mut engine = still_engine(vp);
    let blob = &mut engine.blobs_mut()[0];
    let base = blob.base_position;
    let pointer = base + Vec2::new(100.0, 0.0);
    step_blob(blob, pointer, vp, &params);

    let force = (BLOB_INFLUENCE_RADIUS - 100.0) / BLOB_INFLUENCE_RADIUS;
    assert_eq!(blob.base_position, base);
    assert!((blob.current_position.x - (base.x + 100.0 * force * BLOB_ATTRACTION)).abs() < 1e-3);
    assert!((blob.current_radius - blob.base_radius * (1.0 + force * BLOB_INFLATE)).abs() < 1e-3);
    assert!(blob.current_radius <= blob.base_radius * 1.5);
}

#[test]
fn far_pointer_collapses_to_base() {
    let vp = Viewport::new(2000.0, 2000.0);
    let params = still_params();
    let mut engine = still_engine(vp);
    let blob = &mut engine.blobs_mut()[1];
    step_blob(blob, blob.base_position + Vec2::new(10.0, 0.0), vp, &params);
    assert_ne!(blob.current_position, blob.base_position);
    step_blob(blob, Vec2::new(-9000.0, -9000.0), vp, &params);
    assert_eq!(blob.current_position, blob.base_position);
    assert_eq!(blob.current_radius, blob.base_radius);
}

#[test]
fn pointer_on_blob_center_stays_finite() {
    let vp = Viewport::default();
    let params = still_params();
    let mut engine = still_engine(vp);
    let blob = &mut engine.blobs_mut()[2];
    step_blob(blob, blob.base_position, vp, &params);
    assert!(blob.current_position.is_finite());
    assert_eq!(blob.current_radius, blob.base_radius * (1.0 + BLOB_INFLATE));
}

#[test]
fn wrap_seam_sits_one_radius_outside() {
    let vp = Viewport::new(800.0, 600.0);
    let r = 100.0;

    // inside the margin: untouched
    let mut p = Vec2::new(850.0, 300.0);
    wrap_with_margin(&mut p, r, vp);
    assert_eq!(p, Vec2::new(850.0, 300.0));

    // past the seam by 5: reappears 5 past the opposite seam
    let mut p = Vec2::new(905.0, 300.0);
    wrap_with_margin(&mut p, r, vp);
    assert!((p.x - (-95.0)).abs() < 1e-3);
    assert_eq!(p.y, 300.0);

    let mut p = Vec2::new(400.0, -103.0);
    wrap_with_margin(&mut p, r, vp);
    assert!((p.y - 697.0).abs() < 1e-3);
}

#[test]
fn drift_continues_through_wrap() {
    let vp = Viewport::new(800.0, 600.0);
    let mut engine = still_engine(vp);
    let params = still_params();
    let blob = &mut engine.blobs_mut()[0];
    let r = blob.base_radius;
    blob.base_position = Vec2::new(800.0 + r - 0.2, 300.0);
    blob.drift_velocity = Vec2::new(0.4, 0.0);
    step_blob(blob, Vec2::new(-9000.0, 0.0), vp, &params);
    assert!((blob.base_position.x - (-r + 0.2)).abs() < 1e-2);
    step_blob(blob, Vec2::new(-9000.0, 0.0), vp, &params);
    assert!((blob.base_position.x - (-r + 0.6)).abs() < 1e-2);
    assert_eq!(blob.drift_velocity, Vec2::new(0.4, 0.0));
}

#[test]
fn resize_keeps_blob_state() {
    let vp = Viewport::new(800.0, 600.0);
    let mut engine = GradientFieldEngine::new(GradientParams::default(), vp, 4);
    for n in 0..10 {
        engine.update(&frame(n, vp.center(), vp));
    }
    let before: Vec<Vec2> = engine.blobs().iter().map(|b| b.base_position).collect();
    engine.resize(Viewport::new(1920.0, 1080.0));
    let after: Vec<Vec2> = engine.blobs().iter().map(|b| b.base_position).collect();
    assert_eq!(before, after);
    assert_eq!(engine.viewport(), Viewport::new(1920.0, 1080.0));
}

#[test]
fn glow_hue_cycles_with_time() {
    let vp = Viewport::default();
    let mut engine = GradientFieldEngine::new(GradientParams::default(), vp, 2);
    engine.update(&frame(0, vp.center(), vp));
    assert_eq!(engine.glow_hue(), 0.0);
    for n in 1..=100 {
        engine.update(&frame(n, vp.center(), vp));
    }
    // 100 steps of field time at 30 degrees per unit
    assert!((engine.glow_hue() - 30.0).abs() < 0.05);
    for n in 101..=1300 {
        engine.update(&frame(n, vp.center(), vp));
        assert!((0.0..360.0).contains(&engine.glow_hue()));
    }
}

#[test]
fn draw_overlays_instead_of_clearing() {
    let vp = Viewport::default();
    let mut engine = GradientFieldEngine::new(GradientParams::default(), vp, 8);
    let mut painter = RecordingPainter::default();
    engine.update(&frame(0, vp.center(), vp));
    engine.draw(&mut painter);
    assert_eq!(painter.clears, 0);
    // overlay + one fill per blob + pointer glow
    assert_eq!(painter.fills, 1 + BLOB_COUNT + 1);
}
