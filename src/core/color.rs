use std::fmt;

/// Wrap a hue in degrees into `[0, 360)`.
#[inline]
pub fn wrap_hue(h: f32) -> f32 {
    let w = h.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if w >= 360.0 {
        0.0
    } else {
        w
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Color {
    Hsla { h: f32, s: f32, l: f32, a: f32 },
    Rgba { r: u8, g: u8, b: u8, a: f32 },
}

impl Color {
    /// Saturation and lightness are percentages; hue is wrapped.
    pub fn hsla(h: f32, s: f32, l: f32, a: f32) -> Self {
        Color::Hsla {
            h: wrap_hue(h),
            s,
            l,
            a: a.clamp(0.0, 1.0),
        }
    }

    pub fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Color::Rgba {
            r,
            g,
            b,
            a: a.clamp(0.0, 1.0),
        }
    }

    pub const TRANSPARENT: Color = Color::Rgba {
        r: 0,
        g: 0,
        b: 0,
        a: 0.0,
    };

    pub fn alpha(&self) -> f32 {
        match *self {
            Color::Hsla { a, .. } | Color::Rgba { a, .. } => a,
        }
    }

    pub fn is_finite(&self) -> bool {
        match *self {
            Color::Hsla { h, s, l, a } => h.is_finite() && s.is_finite() && l.is_finite() && a.is_finite(),
            Color::Rgba { a, .. } => a.is_finite(),
        }
    }

    /// Linear RGB in `[0, 1]`, for the GPU side.
    pub fn to_rgb(&self) -> [f32; 3] {
        match *self {
            Color::Rgba { r, g, b, .. } => [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0],
            Color::Hsla { h, s, l, .. } => hsl_to_rgb(h, s / 100.0, l / 100.0),
        }
    }
}

/// CSS color syntax, ready for a canvas fill or stroke style.
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Color::Hsla { h, s, l, a } => write!(f, "hsla({:.1}, {:.0}%, {:.0}%, {:.3})", h, s, l, a),
            Color::Rgba { r, g, b, a } => write!(f, "rgba({}, {}, {}, {:.3})", r, g, b, a),
        }
    }
}

fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [f32; 3] {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let hp = wrap_hue(h) / 60.0;
    let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
    let (r, g, b) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    [r + m, g + m, b + m]
}

/// A `(main, emissive)` pair for wireframe materials.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorPair {
    pub main: Color,
    pub emissive: Color,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Color,
}

impl ColorStop {
    pub fn new(offset: f32, color: Color) -> Self {
        Self {
            offset: offset.clamp(0.0, 1.0),
            color,
        }
    }
}
