//! Rotating wireframe primitives driven by time and the pointer.
//!
//! The engine only computes transforms. Meshes live in a retained scene owned
//! by a [`SceneBackend`], so the animation can run against a no-op backend.

use crate::core::camera::Camera;
use crate::core::color::{Color, ColorPair};
use crate::core::constants::*;
use crate::core::engine::{Engine, FrameInput};
use crate::core::geometry::ShapeKind;
use crate::core::paint::{DrawSurface, Viewport};
use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};

pub type MeshId = usize;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub colors: ColorPair,
    pub emissive_intensity: f32,
    pub opacity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Euler angles in radians, applied X then Y then Z.
    pub rotation: Vec3,
    pub scale: f32,
}

impl Transform {
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z),
            self.position,
        )
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.rotation.is_finite() && self.scale.is_finite()
    }
}

/// Retained 3D scene capability used by the shape engine.
pub trait SceneBackend: DrawSurface {
    fn create_mesh(&mut self, kind: ShapeKind, material: &Material) -> MeshId;
    fn set_transform(&mut self, mesh: MeshId, transform: &Transform);
    fn render(&mut self, camera: &Camera);
}

pub fn palette(kind: ShapeKind) -> ColorPair {
    match kind {
        ShapeKind::Box => ColorPair {
            main: Color::rgba(0x00, 0xcc, 0xff, 1.0),
            emissive: Color::rgba(0xcc, 0x00, 0xff, 1.0),
        },
        ShapeKind::Sphere => ColorPair {
            main: Color::rgba(0xff, 0xcc, 0x00, 1.0),
            emissive: Color::rgba(0xff, 0x66, 0x00, 1.0),
        },
        ShapeKind::Torus => ColorPair {
            main: Color::rgba(0x00, 0xff, 0x88, 1.0),
            emissive: Color::rgba(0xff, 0x00, 0x66, 1.0),
        },
    }
}

#[derive(Clone, Debug)]
pub struct Shape {
    pub kind: ShapeKind,
    pub rotation: Vec3,
    pub position: Vec3,
    pub scale: f32,
    pub colors: ColorPair,
    pub phase_offset: f32,
    pub mesh: Option<MeshId>,
}

impl Shape {
    pub fn new(kind: ShapeKind, phase_offset: f32) -> Self {
        Self {
            kind,
            rotation: Vec3::ZERO,
            position: Vec3::ZERO,
            scale: 1.0,
            colors: palette(kind),
            phase_offset,
            mesh: None,
        }
    }

    pub fn transform(&self) -> Transform {
        Transform {
            position: self.position,
            rotation: self.rotation,
            scale: self.scale,
        }
    }

    pub fn material(&self) -> Material {
        Material {
            colors: self.colors,
            emissive_intensity: SHAPE_EMISSIVE,
            opacity: SHAPE_OPACITY,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ShapeParams {
    pub shapes: Vec<(ShapeKind, f32)>,
}

impl Default for ShapeParams {
    fn default() -> Self {
        Self {
            shapes: vec![(ShapeKind::Box, 0.0), (ShapeKind::Sphere, 1.0)],
        }
    }
}

/// Container-local input wins whenever it holds a nonzero sample.
#[inline]
pub fn active_pointer(local: Vec2, global: Vec2) -> Vec2 {
    if local.x != 0.0 || local.y != 0.0 {
        local
    } else {
        global
    }
}

/// Advance one shape to elapsed time `t` (seconds) under normalized pointer `p`.
pub fn step_shape(shape: &mut Shape, p: Vec2, t: f32) {
    shape.rotation.x += (p.y * SHAPE_ROTATION_GAIN - shape.rotation.x) * SHAPE_ROTATION_LERP;
    shape.rotation.y += (p.x * SHAPE_ROTATION_GAIN - shape.rotation.y) * SHAPE_ROTATION_LERP;
    shape.rotation.z = t * SHAPE_SPIN_RATE + shape.phase_offset;

    let tau = t + shape.phase_offset;
    shape.position.y = (tau * 0.8).sin() * 0.4;
    shape.position.x = (tau * 0.6).cos() * 0.3;
    shape.scale = 1.0 + p.length() * SHAPE_SCALE_POINTER + (tau * 2.0).sin() * SHAPE_SCALE_PULSE;
}

pub struct VolumetricShapeEngine {
    shapes: Vec<Shape>,
    camera: Camera,
    global: Vec2,
    local: Vec2,
}

impl VolumetricShapeEngine {
    pub fn new(params: ShapeParams, viewport: Viewport) -> Self {
        let shapes = params
            .shapes
            .iter()
            .map(|&(kind, phase)| Shape::new(kind, phase))
            .collect();
        Self {
            shapes,
            camera: Camera {
                aspect: viewport.aspect(),
                ..Camera::default()
            },
            global: Vec2::ZERO,
            local: Vec2::ZERO,
        }
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The normalized pointer the shapes currently follow.
    pub fn active_pointer(&self) -> Vec2 {
        active_pointer(self.local, self.global)
    }
}

impl Engine for VolumetricShapeEngine {
    type Surface = dyn SceneBackend;
    const NAME: &'static str = "shapes";

    fn resize(&mut self, viewport: Viewport) {
        self.camera.aspect = viewport.aspect();
    }

    fn update(&mut self, frame: &FrameInput) {
        if frame.pointer_seen {
            self.global = frame.viewport.normalize(frame.target);
        }
        self.local = frame.local_pointer;
        let p = self.active_pointer();
        for shape in &mut self.shapes {
            step_shape(shape, p, frame.elapsed_sec);
        }
    }

    fn attach(&mut self, scene: &mut Self::Surface) {
        for shape in &mut self.shapes {
            shape.mesh = Some(scene.create_mesh(shape.kind, &shape.material()));
        }
    }

    fn draw(&mut self, scene: &mut Self::Surface) {
        for shape in &self.shapes {
            if let Some(mesh) = shape.mesh {
                scene.set_transform(mesh, &shape.transform());
            }
        }
        scene.render(&self.camera);
    }
}
