//! Pointer-anchored glow layers and a short trail, hue-cycling with speed.

use crate::core::color::{wrap_hue, Color, ColorStop};
use crate::core::constants::*;
use crate::core::engine::{Engine, FrameInput};
use crate::core::paint::{Painter, Viewport};
use glam::Vec2;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailSegment {
    pub position: Vec2,
    pub created_at_ms: f64,
    pub hue: f32,
    pub speed: f32,
}

impl TrailSegment {
    /// Age in `[0, 1]` relative to the trail lifetime.
    pub fn normalized_age(&self, now_ms: f64) -> f32 {
        ((now_ms - self.created_at_ms) / TRAIL_MAX_AGE_MS).clamp(0.0, 1.0) as f32
    }
}

/// One concentric glow disc. Hues are offsets from the global hue.
#[derive(Clone, Copy, Debug)]
pub struct GlowLayer {
    pub radius: f32,
    pub blur: f32,
    /// (hue offset, saturation, lightness, alpha)
    pub inner: (f32, f32, f32, f32),
    pub middle: (f32, f32, f32, f32),
    pub middle_offset: f32,
    pub fade_offset: f32,
}

pub const GLOW_LAYERS: [GlowLayer; 4] = [
    // light
    GlowLayer {
        radius: 300.0,
        blur: 0.0,
        inner: (0.0, 75.0, 55.0, 0.06),
        middle: (60.0, 70.0, 50.0, 0.03),
        middle_offset: 0.4,
        fade_offset: 0.7,
    },
    // glow
    GlowLayer {
        radius: 200.0,
        blur: 50.0,
        inner: (30.0, 80.0, 55.0, 0.15),
        middle: (90.0, 75.0, 50.0, 0.1),
        middle_offset: 0.4,
        fade_offset: 0.7,
    },
    // core
    GlowLayer {
        radius: 80.0,
        blur: 0.0,
        inner: (180.0, 85.0, 65.0, 0.2),
        middle: (240.0, 80.0, 55.0, 0.12),
        middle_offset: 0.4,
        fade_offset: 0.7,
    },
    // outer
    GlowLayer {
        radius: 450.0,
        blur: 0.0,
        inner: (-60.0, 75.0, 50.0, 0.05),
        middle: (-20.0, 70.0, 45.0, 0.03),
        middle_offset: 0.5,
        fade_offset: 0.8,
    },
];

pub type Trail = SmallVec<[TrailSegment; TRAIL_MAX_LEN]>;

#[derive(Default)]
pub struct CursorAuraEngine {
    trail: Trail,
    hue: f32,
    position: Vec2,
    now_ms: f64,
}

impl CursorAuraEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trail(&self) -> &[TrailSegment] {
        &self.trail
    }

    pub fn hue(&self) -> f32 {
        self.hue
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Colors for each glow layer at the current hue, inner to outer stop.
    pub fn layer_stops(&self) -> [[ColorStop; 3]; 4] {
        GLOW_LAYERS.map(|layer| layer_stops(&layer, self.hue))
    }
}

fn layer_stops(layer: &GlowLayer, hue: f32) -> [ColorStop; 3] {
    let (h0, s0, l0, a0) = layer.inner;
    let (h1, s1, l1, a1) = layer.middle;
    [
        ColorStop::new(0.0, Color::hsla(hue + h0, s0, l0, a0)),
        ColorStop::new(layer.middle_offset, Color::hsla(hue + h1, s1, l1, a1)),
        ColorStop::new(layer.fade_offset, Color::TRANSPARENT),
    ]
}

/// Drop segments that reached the trail lifetime.
pub fn prune_trail(trail: &mut Trail, now_ms: f64) {
    trail.retain(|t| now_ms - t.created_at_ms < TRAIL_MAX_AGE_MS);
}

/// Append a segment, then keep only the newest `TRAIL_MAX_LEN`.
pub fn push_trail(trail: &mut Trail, position: Vec2, now_ms: f64, speed: f32) {
    let hue = wrap_hue(trail.last().map_or(0.0, |t| t.hue) + TRAIL_HUE_STEP);
    prune_trail(trail, now_ms);
    trail.push(TrailSegment {
        position,
        created_at_ms: now_ms,
        hue,
        speed,
    });
    if trail.len() > TRAIL_MAX_LEN {
        let excess = trail.len() - TRAIL_MAX_LEN;
        trail.drain(..excess);
    }
}

impl Engine for CursorAuraEngine {
    type Surface = dyn Painter;
    const NAME: &'static str = "aura";

    fn resize(&mut self, _viewport: Viewport) {}

    fn update(&mut self, frame: &FrameInput) {
        self.now_ms = frame.now_ms;
        self.position = frame.pointer.position();
        let speed = frame.pointer.speed();
        self.hue = wrap_hue(self.hue + speed * AURA_HUE_PER_SPEED);
        if speed > TRAIL_SPEED_THRESHOLD {
            push_trail(&mut self.trail, self.position, frame.now_ms, speed);
        }
        prune_trail(&mut self.trail, frame.now_ms);
    }

    fn draw(&mut self, p: &mut Self::Surface) {
        p.set_blur(0.0);
        p.clear();
        for seg in &self.trail {
            let fresh = 1.0 - seg.normalized_age(self.now_ms);
            let opacity = fresh * 0.3;
            let scale = 0.6 + fresh * 0.4;
            p.set_blur(30.0 + seg.speed * 15.0);
            p.fill_radial(
                seg.position,
                TRAIL_RADIUS * scale,
                &[
                    ColorStop::new(0.0, Color::hsla(seg.hue, 80.0, 60.0, opacity)),
                    ColorStop::new(0.5, Color::hsla(seg.hue + 60.0, 75.0, 50.0, opacity * 0.4)),
                    ColorStop::new(0.8, Color::TRANSPARENT),
                ],
            );
        }
        for (layer, stops) in GLOW_LAYERS.iter().zip(self.layer_stops()) {
            p.set_blur(layer.blur);
            p.fill_radial(self.position, layer.radius, &stops);
        }
        p.set_blur(0.0);
    }
}
