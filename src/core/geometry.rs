//! Wireframe line lists for the shape primitives.

use glam::Vec3;
use std::f32::consts::TAU;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Box,
    Sphere,
    Torus,
}

/// Line-list geometry: every two consecutive vertices form one segment.
#[derive(Clone, Debug, Default)]
pub struct WireMesh {
    pub vertices: Vec<Vec3>,
}

impl WireMesh {
    pub fn segment_count(&self) -> usize {
        self.vertices.len() / 2
    }

    /// Largest distance of any vertex from the origin.
    pub fn bounding_radius(&self) -> f32 {
        self.vertices.iter().map(|v| v.length()).fold(0.0, f32::max)
    }

    fn line(&mut self, a: Vec3, b: Vec3) {
        self.vertices.push(a);
        self.vertices.push(b);
    }
}

pub fn build(kind: ShapeKind) -> WireMesh {
    match kind {
        ShapeKind::Box => cube(2.2),
        ShapeKind::Sphere => uv_sphere(1.3, 32, 32),
        ShapeKind::Torus => torus(1.2, 0.4, 16, 100),
    }
}

/// Cube edges plus one diagonal per face, as a triangulated wireframe shows.
pub fn cube(size: f32) -> WireMesh {
    let h = size * 0.5;
    let c = |x: f32, y: f32, z: f32| Vec3::new(x * h, y * h, z * h);
    let corners = [
        c(-1.0, -1.0, -1.0),
        c(1.0, -1.0, -1.0),
        c(1.0, 1.0, -1.0),
        c(-1.0, 1.0, -1.0),
        c(-1.0, -1.0, 1.0),
        c(1.0, -1.0, 1.0),
        c(1.0, 1.0, 1.0),
        c(-1.0, 1.0, 1.0),
    ];
    const EDGES: [(usize, usize); 18] = [
        (0, 1),
        (1, 2),
        (2, 3),
        (3, 0),
        (4, 5),
        (5, 6),
        (6, 7),
        (7, 4),
        (0, 4),
        (1, 5),
        (2, 6),
        (3, 7),
        // face diagonals
        (0, 2),
        (4, 6),
        (0, 5),
        (3, 6),
        (0, 7),
        (1, 6),
    ];
    let mut mesh = WireMesh::default();
    for (a, b) in EDGES {
        mesh.line(corners[a], corners[b]);
    }
    mesh
}

pub fn uv_sphere(radius: f32, width_segments: u32, height_segments: u32) -> WireMesh {
    let w = width_segments.max(3);
    let h = height_segments.max(2);
    let point = |iu: u32, iv: u32| {
        let phi = iu as f32 / w as f32 * TAU;
        let theta = iv as f32 / h as f32 * std::f32::consts::PI;
        Vec3::new(
            -radius * phi.cos() * theta.sin(),
            radius * theta.cos(),
            radius * phi.sin() * theta.sin(),
        )
    };
    let mut mesh = WireMesh::default();
    // parallels, skipping the degenerate poles
    for iv in 1..h {
        for iu in 0..w {
            mesh.line(point(iu, iv), point(iu + 1, iv));
        }
    }
    // meridians
    for iu in 0..w {
        for iv in 0..h {
            mesh.line(point(iu, iv), point(iu, iv + 1));
        }
    }
    mesh
}

pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> WireMesh {
    let radial = radial_segments.max(3);
    let tubular = tubular_segments.max(3);
    let point = |j: u32, i: u32| {
        let u = j as f32 / tubular as f32 * TAU;
        let v = i as f32 / radial as f32 * TAU;
        let ring = radius + tube * v.cos();
        Vec3::new(ring * u.cos(), ring * u.sin(), tube * v.sin())
    };
    let mut mesh = WireMesh::default();
    for j in 0..tubular {
        for i in 0..radial {
            mesh.line(point(j, i), point(j, i + 1));
            mesh.line(point(j, i), point(j + 1, i));
        }
    }
    mesh
}
