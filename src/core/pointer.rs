//! Pointer smoothing shared by every engine.
//!
//! Raw pointer-move events only overwrite the tracker's target. Once per frame
//! the smoothed position closes a fixed fraction of the gap and the
//! pre-smoothing gap, scaled to a nominal 60 Hz frame, becomes the velocity.

use crate::core::constants::{MAX_FRAME_DT_MS, NOMINAL_FRAME_MS, POINTER_SMOOTHING};
use glam::Vec2;

/// Raw pointer position in viewport pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerSample {
    pub x: f32,
    pub y: f32,
    pub timestamp_ms: f64,
}

impl PointerSample {
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SmoothedPointerState {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
}

impl SmoothedPointerState {
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn velocity(&self) -> Vec2 {
        Vec2::new(self.vx, self.vy)
    }

    /// Speed in pixels per nominal frame.
    pub fn speed(&self) -> f32 {
        self.velocity().length()
    }
}

#[derive(Clone, Debug, Default)]
pub struct PointerTracker {
    target: Vec2,
    state: SmoothedPointerState,
    last_tick_ms: Option<f64>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_target(&mut self, sample: PointerSample) {
        self.target = sample.position();
    }

    /// Latest raw position.
    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn state(&self) -> SmoothedPointerState {
        self.state
    }

    pub fn tick(&mut self, now_ms: f64) -> SmoothedPointerState {
        let dt_ms = match self.last_tick_ms {
            Some(last) => frame_delta_ms(last, now_ms),
            None => 0.0,
        };
        self.last_tick_ms = Some(now_ms);

        let pos = self.state.position();
        let d = self.target - pos;
        let next = pos + d * POINTER_SMOOTHING;
        let vel = d * (dt_ms / NOMINAL_FRAME_MS) as f32;
        self.state = SmoothedPointerState {
            x: next.x,
            y: next.y,
            vx: vel.x,
            vy: vel.y,
        };
        self.state
    }
}

/// Milliseconds between two frame timestamps, clamped to `[0, MAX_FRAME_DT_MS]`.
#[inline]
pub fn frame_delta_ms(last_ms: f64, now_ms: f64) -> f64 {
    let dt = now_ms - last_ms;
    if dt.is_finite() {
        dt.clamp(0.0, MAX_FRAME_DT_MS)
    } else {
        0.0
    }
}
