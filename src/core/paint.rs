use crate::core::color::{Color, ColorStop};
use glam::Vec2;

/// Viewport size in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    /// Map a viewport pixel into `[-1, 1]` with +y up.
    pub fn normalize(&self, p: Vec2) -> Vec2 {
        let half = self.center();
        (p - half) / half * Vec2::new(1.0, -1.0)
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= 0.0 && p.x <= self.width && p.y >= 0.0 && p.y <= self.height
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// Anything an engine draws into.
pub trait DrawSurface {
    /// Match the backing store to a new viewport. Must not touch engine state.
    fn resize(&mut self, viewport: Viewport);
}

/// Immediate-mode 2D drawing, the subset of a canvas context the engines use.
pub trait Painter: DrawSurface {
    fn clear(&mut self);
    fn fill_screen(&mut self, color: Color);
    /// Gaussian blur applied to subsequent fills; `0` disables it.
    fn set_blur(&mut self, px: f32);
    fn fill_radial(&mut self, center: Vec2, radius: f32, stops: &[ColorStop]);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color);
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color);
    /// Line whose stroke is a linear gradient running from `from` to `to`.
    fn stroke_gradient_line(&mut self, from: Vec2, to: Vec2, width: f32, stops: &[ColorStop]);
}
