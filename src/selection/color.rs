//! RGBA colors and the fuzzy-selection distance metric.
//!
//! Alpha is read as blending toward a white background: a pixel with alpha
//! `a` looks like `255 + a * (c - 255) / 255` per channel. Two colors are
//! compared by the Manhattan distance of their washed-out channels.

/// 8-bit RGBA color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully opaque color.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Channels as seen over a white background.
    pub fn washed_out(&self) -> [f64; 3] {
        [
            wash_out(self.r, self.a),
            wash_out(self.g, self.a),
            wash_out(self.b, self.a),
        ]
    }
}

impl From<[u8; 4]> for Color {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a }
    }
}

impl From<(u8, u8, u8, u8)> for Color {
    fn from((r, g, b, a): (u8, u8, u8, u8)) -> Self {
        Self { r, g, b, a }
    }
}

/// Blend a single channel toward white according to `alpha`.
#[inline]
pub fn wash_out(component: u8, alpha: u8) -> f64 {
    255.0 + alpha as f64 * (component as f64 - 255.0) / 255.0
}

#[inline]
fn unscaled_delta(c1: u8, a1: u8, c2: u8, a2: u8) -> i32 {
    a1 as i32 * (c1 as i32 - 255) - a2 as i32 * (c2 as i32 - 255)
}

/// Distance between two colors after washing both out toward white.
///
/// Deltas are accumulated unscaled in integers and divided by 255 once.
/// Symmetric, and zero for colors that look identical over white (for
/// example transparent black and opaque white).
#[inline]
pub fn color_distance(c1: &Color, c2: &Color) -> f64 {
    let dr = unscaled_delta(c1.r, c1.a, c2.r, c2.a);
    let dg = unscaled_delta(c1.g, c1.a, c2.g, c2.a);
    let db = unscaled_delta(c1.b, c1.a, c2.b, c2.a);

    (dr.abs() + dg.abs() + db.abs()) as f64 / 255.0
}
