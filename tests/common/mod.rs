// Test doubles for the drawing and scheduling seams.

#![allow(dead_code)]

use backdrop_fx::core::camera::Camera;
use backdrop_fx::core::color::{Color, ColorStop};
use backdrop_fx::core::geometry::ShapeKind;
use backdrop_fx::core::shapes::{Material, MeshId, Transform};
use backdrop_fx::core::{DrawSurface, FrameHandle, FrameScheduler, Painter, SceneBackend, Viewport};
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;

/// Counts draw calls and checks every argument is finite.
#[derive(Debug, Default)]
pub struct RecordingPainter {
    pub viewport: Option<Viewport>,
    pub clears: usize,
    pub fills: usize,
    pub strokes: usize,
    pub resizes: usize,
}

impl RecordingPainter {
    pub fn draws(&self) -> usize {
        self.clears + self.fills + self.strokes
    }
}

fn check_point(p: Vec2) {
    assert!(p.is_finite(), "non-finite point {:?}", p);
}

fn check_color(c: Color) {
    assert!(c.is_finite(), "non-finite color {:?}", c);
    assert!((0.0..=1.0).contains(&c.alpha()), "alpha out of range {:?}", c);
}

fn check_stops(stops: &[ColorStop]) {
    for s in stops {
        assert!((0.0..=1.0).contains(&s.offset));
        check_color(s.color);
    }
}

impl DrawSurface for RecordingPainter {
    fn resize(&mut self, viewport: Viewport) {
        self.viewport = Some(viewport);
        self.resizes += 1;
    }
}

impl Painter for RecordingPainter {
    fn clear(&mut self) {
        self.clears += 1;
    }

    fn fill_screen(&mut self, color: Color) {
        check_color(color);
        self.fills += 1;
    }

    fn set_blur(&mut self, px: f32) {
        assert!(px.is_finite() && px >= 0.0);
    }

    fn fill_radial(&mut self, center: Vec2, radius: f32, stops: &[ColorStop]) {
        check_point(center);
        assert!(radius.is_finite() && radius > 0.0);
        check_stops(stops);
        self.fills += 1;
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        check_point(center);
        assert!(radius.is_finite());
        check_color(color);
        self.fills += 1;
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color) {
        check_point(center);
        assert!(radius.is_finite() && width.is_finite());
        check_color(color);
        self.strokes += 1;
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        check_point(from);
        check_point(to);
        assert!(width.is_finite());
        check_color(color);
        self.strokes += 1;
    }

    fn stroke_gradient_line(&mut self, from: Vec2, to: Vec2, width: f32, stops: &[ColorStop]) {
        check_point(from);
        check_point(to);
        assert!(width.is_finite());
        check_stops(stops);
        self.strokes += 1;
    }
}

/// Painter that shares its counters with the test after being boxed.
#[derive(Clone, Default)]
pub struct SharedPainter(pub Rc<RefCell<RecordingPainter>>);

impl DrawSurface for SharedPainter {
    fn resize(&mut self, viewport: Viewport) {
        self.0.borrow_mut().resize(viewport);
    }
}

impl Painter for SharedPainter {
    fn clear(&mut self) {
        self.0.borrow_mut().clear();
    }
    fn fill_screen(&mut self, color: Color) {
        self.0.borrow_mut().fill_screen(color);
    }
    fn set_blur(&mut self, px: f32) {
        self.0.borrow_mut().set_blur(px);
    }
    fn fill_radial(&mut self, center: Vec2, radius: f32, stops: &[ColorStop]) {
        self.0.borrow_mut().fill_radial(center, radius, stops);
    }
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.0.borrow_mut().fill_circle(center, radius, color);
    }
    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color) {
        self.0.borrow_mut().stroke_circle(center, radius, width, color);
    }
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.0.borrow_mut().stroke_line(from, to, width, color);
    }
    fn stroke_gradient_line(&mut self, from: Vec2, to: Vec2, width: f32, stops: &[ColorStop]) {
        self.0.borrow_mut().stroke_gradient_line(from, to, width, stops);
    }
}

/// Scene backend that only remembers what it was told.
#[derive(Debug, Default)]
pub struct NullScene {
    pub meshes: Vec<(ShapeKind, Material)>,
    pub transforms: Vec<Option<Transform>>,
    pub renders: usize,
}

impl DrawSurface for NullScene {
    fn resize(&mut self, _viewport: Viewport) {}
}

impl SceneBackend for NullScene {
    fn create_mesh(&mut self, kind: ShapeKind, material: &Material) -> MeshId {
        self.meshes.push((kind, *material));
        self.transforms.push(None);
        self.meshes.len() - 1
    }

    fn set_transform(&mut self, mesh: MeshId, transform: &Transform) {
        assert!(transform.is_finite(), "non-finite transform {:?}", transform);
        self.transforms[mesh] = Some(*transform);
    }

    fn render(&mut self, camera: &Camera) {
        assert!(camera.view_projection().is_finite());
        self.renders += 1;
    }
}

#[derive(Clone, Default)]
pub struct SharedScene(pub Rc<RefCell<NullScene>>);

impl DrawSurface for SharedScene {
    fn resize(&mut self, viewport: Viewport) {
        self.0.borrow_mut().resize(viewport);
    }
}

impl SceneBackend for SharedScene {
    fn create_mesh(&mut self, kind: ShapeKind, material: &Material) -> MeshId {
        self.0.borrow_mut().create_mesh(kind, material)
    }
    fn set_transform(&mut self, mesh: MeshId, transform: &Transform) {
        self.0.borrow_mut().set_transform(mesh, transform);
    }
    fn render(&mut self, camera: &Camera) {
        self.0.borrow_mut().render(camera);
    }
}

/// Records every request and cancel made through the scheduling seam.
#[derive(Debug, Default)]
pub struct SpyScheduler {
    pub next: FrameHandle,
    pub requested: Vec<FrameHandle>,
    pub cancelled: Vec<FrameHandle>,
}

impl SpyScheduler {
    /// Requests not yet cancelled.
    pub fn outstanding(&self) -> Option<FrameHandle> {
        self.requested
            .last()
            .copied()
            .filter(|h| !self.cancelled.contains(h))
    }
}

impl FrameScheduler for SpyScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        self.next += 1;
        self.requested.push(self.next);
        Some(self.next)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.cancelled.push(handle);
    }
}

pub const FRAME_MS: f64 = 1000.0 / 60.0;
