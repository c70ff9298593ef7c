//! Slow soft-light blobs that lean toward the pointer.

use crate::core::color::{wrap_hue, Color, ColorStop};
use crate::core::constants::*;
use crate::core::engine::{Engine, FrameInput};
use crate::core::paint::{Painter, Viewport};
use glam::Vec2;
use rand::prelude::*;

#[derive(Clone, Debug)]
pub struct Blob {
    pub base_position: Vec2,
    pub current_position: Vec2,
    pub base_radius: f32,
    pub current_radius: f32,
    pub color: Color,
    pub drift_angle: f32,
    pub drift_angular_velocity: f32,
    pub drift_velocity: Vec2,
}

/// Where a blob starts, as a fraction of the viewport, plus its look.
#[derive(Clone, Copy, Debug)]
pub struct BlobSeed {
    pub anchor: Vec2,
    pub radius: f32,
    pub color: Color,
}

#[derive(Clone, Debug)]
pub struct GradientParams {
    pub blobs: [BlobSeed; BLOB_COUNT],
    pub influence_radius: f32,
    pub attraction: f32,
    pub inflate: f32,
    pub drift_speed: f32,
    pub persistence_alpha: f32,
}

impl Default for GradientParams {
    fn default() -> Self {
        Self {
            blobs: [
                BlobSeed {
                    anchor: Vec2::new(0.2, 0.3),
                    radius: 400.0,
                    color: Color::hsla(260.0, 70.0, 50.0, 0.08),
                },
                BlobSeed {
                    anchor: Vec2::new(0.8, 0.7),
                    radius: 350.0,
                    color: Color::hsla(290.0, 70.0, 45.0, 0.08),
                },
                BlobSeed {
                    anchor: Vec2::new(0.5, 0.5),
                    radius: 380.0,
                    color: Color::hsla(330.0, 70.0, 50.0, 0.07),
                },
                BlobSeed {
                    anchor: Vec2::new(0.7, 0.2),
                    radius: 360.0,
                    color: Color::hsla(180.0, 70.0, 45.0, 0.07),
                },
            ],
            influence_radius: BLOB_INFLUENCE_RADIUS,
            attraction: BLOB_ATTRACTION,
            inflate: BLOB_INFLATE,
            drift_speed: BLOB_DRIFT_SPEED,
            persistence_alpha: FIELD_PERSISTENCE_ALPHA,
        }
    }
}

pub struct GradientFieldEngine {
    params: GradientParams,
    blobs: Vec<Blob>,
    viewport: Viewport,
    pointer: Vec2,
    time: f32,
    glow_hue: f32,
}

impl GradientFieldEngine {
    pub fn new(params: GradientParams, viewport: Viewport, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let blobs = params
            .blobs
            .iter()
            .map(|s| {
                let pos = Vec2::new(s.anchor.x * viewport.width, s.anchor.y * viewport.height);
                Blob {
                    base_position: pos,
                    current_position: pos,
                    base_radius: s.radius,
                    current_radius: s.radius,
                    color: s.color,
                    drift_angle: rng.gen::<f32>() * std::f32::consts::TAU,
                    drift_angular_velocity: rng.gen_range(-1.0f32..=1.0) * BLOB_MAX_ANGULAR_VELOCITY,
                    drift_velocity: Vec2::new(
                        rng.gen_range(-1.0f32..=1.0) * BLOB_MAX_VELOCITY,
                        rng.gen_range(-1.0f32..=1.0) * BLOB_MAX_VELOCITY,
                    ),
                }
            })
            .collect();
        Self {
            params,
            blobs,
            viewport,
            pointer: Vec2::ZERO,
            time: 0.0,
            glow_hue: 0.0,
        }
    }

    pub fn blobs(&self) -> &[Blob] {
        &self.blobs
    }

    pub fn blobs_mut(&mut self) -> &mut [Blob] {
        &mut self.blobs
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Hue of the pointer glow in degrees.
    pub fn glow_hue(&self) -> f32 {
        self.glow_hue
    }
}

/// Advance one blob by a frame against `pointer`.
pub fn step_blob(blob: &mut Blob, pointer: Vec2, viewport: Viewport, params: &GradientParams) {
    blob.drift_angle += blob.drift_angular_velocity;
    let heading = Vec2::new(blob.drift_angle.cos(), blob.drift_angle.sin());
    blob.base_position += heading * params.drift_speed + blob.drift_velocity;
    wrap_with_margin(&mut blob.base_position, blob.base_radius, viewport);

    let offset = pointer - blob.base_position;
    let distance = offset.length();
    if distance < params.influence_radius {
        let force = (params.influence_radius - distance) / params.influence_radius;
        blob.current_position = blob.base_position + offset * force * params.attraction;
        blob.current_radius = blob.base_radius * (1.0 + force * params.inflate);
    } else {
        blob.current_position = blob.base_position;
        blob.current_radius = blob.base_radius;
    }
}

/// Toroidal wrap where the wrap seam sits `margin` outside each edge, so a
/// blob fully leaves the view before it re-enters on the other side. The
/// overshoot past the seam is preserved.
pub fn wrap_with_margin(p: &mut Vec2, margin: f32, viewport: Viewport) {
    p.x = wrap_axis(p.x, margin, viewport.width);
    p.y = wrap_axis(p.y, margin, viewport.height);
}

#[inline]
fn wrap_axis(v: f32, margin: f32, extent: f32) -> f32 {
    let span = extent + 2.0 * margin;
    if v < -margin || v > extent + margin {
        (v + margin).rem_euclid(span) - margin
    } else {
        v
    }
}

impl Engine for GradientFieldEngine {
    type Surface = dyn Painter;
    const NAME: &'static str = "gradient";

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn update(&mut self, frame: &FrameInput) {
        self.viewport = frame.viewport;
        self.pointer = frame.target;
        for blob in &mut self.blobs {
            step_blob(blob, self.pointer, self.viewport, &self.params);
        }
        self.glow_hue = wrap_hue(self.time * FIELD_GLOW_HUE_RATE);
        self.time += FIELD_TIME_STEP;
    }

    fn draw(&mut self, p: &mut Self::Surface) {
        p.set_blur(0.0);
        p.fill_screen(Color::rgba(0, 0, 0, self.params.persistence_alpha));

        p.set_blur(BLOB_BLUR_PX);
        for blob in &self.blobs {
            p.fill_radial(
                blob.current_position,
                blob.current_radius,
                &[ColorStop::new(0.0, blob.color), ColorStop::new(1.0, Color::TRANSPARENT)],
            );
        }

        let hue = self.glow_hue;
        p.set_blur(FIELD_GLOW_BLUR_PX);
        p.fill_radial(
            self.pointer,
            FIELD_GLOW_RADIUS,
            &[
                ColorStop::new(0.0, Color::hsla(hue, 75.0, 55.0, 0.08)),
                ColorStop::new(0.5, Color::hsla(hue + 60.0, 70.0, 50.0, 0.04)),
                ColorStop::new(1.0, Color::hsla(hue + 120.0, 70.0, 45.0, 0.0)),
            ],
        );
        p.set_blur(0.0);
    }
}
