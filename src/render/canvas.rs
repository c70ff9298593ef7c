use super::SurfaceError;
use crate::core::{Color, ColorStop, DrawSurface, Painter, Viewport};
use crate::dom;
use glam::Vec2;
use std::f64::consts::TAU;
use wasm_bindgen::JsCast;
use web_sys as web;

/// [`Painter`] over a `CanvasRenderingContext2d`, in CSS pixels.
pub struct CanvasPainter {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    viewport: Viewport,
    blur: f32,
}

impl CanvasPainter {
    pub fn from_canvas(canvas: &web::HtmlCanvasElement) -> Result<Self, SurfaceError> {
        let no_context = |reason: String| SurfaceError::NoContext {
            id: canvas.id(),
            reason,
        };
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| no_context(format!("{:?}", e)))?
            .ok_or_else(|| no_context("null context".into()))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| no_context(format!("{:?}", e)))?;
        Ok(Self {
            canvas: canvas.clone(),
            ctx,
            viewport: Viewport::new(canvas.width() as f32, canvas.height() as f32),
            blur: 0.0,
        })
    }

    #[inline]
    fn circle_path(&self, center: Vec2, radius: f32) -> bool {
        if !center.is_finite() || !radius.is_finite() || radius <= 0.0 {
            return false;
        }
        self.ctx.begin_path();
        self.ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU)
            .is_ok()
    }

    #[inline]
    fn line_path(&self, from: Vec2, to: Vec2, width: f32) -> bool {
        if !from.is_finite() || !to.is_finite() || !(width > 0.0) {
            return false;
        }
        self.ctx.set_line_width(width as f64);
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        true
    }

    fn add_stops(gradient: &web::CanvasGradient, stops: &[ColorStop]) {
        for stop in stops {
            _ = gradient.add_color_stop(stop.offset, &stop.color.to_string());
        }
    }
}

impl DrawSurface for CanvasPainter {
    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        dom::size_canvas(&self.canvas, viewport, 1.0);
    }
}

impl Painter for CanvasPainter {
    fn clear(&mut self) {
        self.ctx.clear_rect(
            0.0,
            0.0,
            self.viewport.width as f64,
            self.viewport.height as f64,
        );
    }

    fn fill_screen(&mut self, color: Color) {
        self.ctx.set_fill_style_str(&color.to_string());
        self.ctx.fill_rect(
            0.0,
            0.0,
            self.viewport.width as f64,
            self.viewport.height as f64,
        );
    }

    fn set_blur(&mut self, px: f32) {
        let px = if px.is_finite() { px.max(0.0) } else { 0.0 };
        if px == self.blur {
            return;
        }
        self.blur = px;
        if px > 0.0 {
            self.ctx.set_filter(&format!("blur({}px)", px));
        } else {
            self.ctx.set_filter("none");
        }
    }

    fn fill_radial(&mut self, center: Vec2, radius: f32, stops: &[ColorStop]) {
        if !self.circle_path(center, radius) {
            return;
        }
        let (x, y) = (center.x as f64, center.y as f64);
        let gradient = match self.ctx.create_radial_gradient(x, y, 0.0, x, y, radius as f64) {
            Ok(g) => g,
            Err(e) => {
                log::debug!("[canvas] radial gradient: {:?}", e);
                return;
            }
        };
        Self::add_stops(&gradient, stops);
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx.fill();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        if !self.circle_path(center, radius) {
            return;
        }
        self.ctx.set_fill_style_str(&color.to_string());
        self.ctx.fill();
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color) {
        if !(width > 0.0) || !self.circle_path(center, radius) {
            return;
        }
        self.ctx.set_line_width(width as f64);
        self.ctx.set_stroke_style_str(&color.to_string());
        self.ctx.stroke();
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        if !self.line_path(from, to, width) {
            return;
        }
        self.ctx.set_stroke_style_str(&color.to_string());
        self.ctx.stroke();
    }

    fn stroke_gradient_line(&mut self, from: Vec2, to: Vec2, width: f32, stops: &[ColorStop]) {
        if !self.line_path(from, to, width) {
            return;
        }
        let gradient =
            self.ctx
                .create_linear_gradient(from.x as f64, from.y as f64, to.x as f64, to.y as f64);
        Self::add_stops(&gradient, stops);
        self.ctx.set_stroke_style_canvas_gradient(&gradient);
        self.ctx.stroke();
    }
}
