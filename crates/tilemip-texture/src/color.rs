//! Color utilities for atlas processing.
//!
//! Texels are stored as straight-alpha [`Rgba8`]; [`Color`] is the normalized
//! floating-point working form used while filtering.

/// One 8-bit straight-alpha RGBA texel.
pub type Rgba8 = [u8; 4];

/// Alpha below which a filtered texel is treated as fully transparent.
pub const ALPHA_EPSILON: f64 = 1e-8;

/// RGBA color with f64 components (0.0 to 1.0 range).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    /// Create a new color with alpha.
    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Fully transparent black.
    pub const fn transparent() -> Self {
        Self::rgba(0.0, 0.0, 0.0, 0.0)
    }

    /// Clamp all components to [0.0, 1.0].
    pub fn clamp(&self) -> Color {
        Color {
            r: self.r.clamp(0.0, 1.0),
            g: self.g.clamp(0.0, 1.0),
            b: self.b.clamp(0.0, 1.0),
            a: self.a.clamp(0.0, 1.0),
        }
    }

    /// Scale RGB by alpha.
    pub fn premultiply(&self) -> Color {
        Color {
            r: self.r * self.a,
            g: self.g * self.a,
            b: self.b * self.a,
            a: self.a,
        }
    }

    /// Inverse of [`Color::premultiply`].
    ///
    /// RGB collapses to zero where alpha is at or below [`ALPHA_EPSILON`].
    pub fn unpremultiply(&self) -> Color {
        if self.a > ALPHA_EPSILON {
            let inv = 1.0 / (self.a + ALPHA_EPSILON);
            Color {
                r: self.r * inv,
                g: self.g * inv,
                b: self.b * inv,
                a: self.a,
            }
        } else {
            Color::rgba(0.0, 0.0, 0.0, self.a)
        }
    }

    /// Convert to 8-bit RGBA, clamping and rounding half up.
    pub fn to_rgba8(&self) -> Rgba8 {
        let c = self.clamp();
        [
            (c.r * 255.0).round() as u8,
            (c.g * 255.0).round() as u8,
            (c.b * 255.0).round() as u8,
            (c.a * 255.0).round() as u8,
        ]
    }

    /// Create from 8-bit RGBA.
    pub fn from_rgba8(rgba: Rgba8) -> Self {
        Self {
            r: rgba[0] as f64 / 255.0,
            g: rgba[1] as f64 / 255.0,
            b: rgba[2] as f64 / 255.0,
            a: rgba[3] as f64 / 255.0,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::transparent()
    }
}
