//! Linear RGB color accumulator.

use std::ops::{Add, AddAssign, Mul};

use serde::{Deserialize, Serialize};

use crate::DVec3;

/// An RGB color with unbounded, non-clamped components.
///
/// Colors are summed while shading and only clamped on output.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Color {
    rgb: DVec3,
}

impl Color {
    /// Black, the additive identity.
    pub const BLACK: Color = Color { rgb: DVec3::ZERO };

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self {
            rgb: DVec3::new(r, g, b),
        }
    }

    /// Gray with the same value in every channel.
    pub const fn splat(v: f64) -> Self {
        Self {
            rgb: DVec3::splat(v),
        }
    }

    #[inline]
    pub fn rgb(&self) -> DVec3 {
        self.rgb
    }

    /// Uniform scale.
    #[inline]
    pub fn scale(&self, factor: f64) -> Color {
        Color {
            rgb: self.rgb * factor,
        }
    }

    /// Per-channel scale by an attenuation factor.
    #[inline]
    pub fn attenuate(&self, k: DVec3) -> Color {
        Color { rgb: self.rgb * k }
    }

    /// Divide by `n`, turning a sum of `n` samples into their mean.
    ///
    /// # Panics
    ///
    /// Panics if `n` is zero.
    #[inline]
    pub fn reduce(&self, n: usize) -> Color {
        assert!(n > 0, "cannot reduce a color by zero samples");
        self.scale(1.0 / n as f64)
    }

    /// Clamp to [0, 1] and quantize to 8 bits per channel.
    pub fn to_rgb8(&self) -> [u8; 3] {
        let c = self.rgb.clamp(DVec3::ZERO, DVec3::ONE) * 255.0;
        [c.x.round() as u8, c.y.round() as u8, c.z.round() as u8]
    }
}

impl From<DVec3> for Color {
    fn from(rgb: DVec3) -> Self {
        Self { rgb }
    }
}

impl Add for Color {
    type Output = Color;

    fn add(self, rhs: Color) -> Color {
        Color {
            rgb: self.rgb + rhs.rgb,
        }
    }
}

impl AddAssign for Color {
    fn add_assign(&mut self, rhs: Color) {
        self.rgb += rhs.rgb;
    }
}

impl Mul<f64> for Color {
    type Output = Color;

    fn mul(self, rhs: f64) -> Color {
        self.scale(rhs)
    }
}

impl Mul<DVec3> for Color {
    type Output = Color;

    fn mul(self, rhs: DVec3) -> Color {
        self.attenuate(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_black_is_identity() {
        let c = Color::new(0.2, 0.4, 0.6);
        assert_eq!(c + Color::BLACK, c);
        assert_eq!(Color::default(), Color::BLACK);
    }

    #[test]
    fn test_reduce_averages() {
        let mut sum = Color::BLACK;
        for _ in 0..4 {
            sum += Color::new(0.5, 1.0, 2.0);
        }
        assert_eq!(sum.reduce(4), Color::new(0.5, 1.0, 2.0));
    }

    #[test]
    #[should_panic]
    fn test_reduce_by_zero_panics() {
        let _ = Color::splat(1.0).reduce(0);
    }

    #[test]
    fn test_attenuate_per_channel() {
        let c = Color::splat(2.0) * DVec3::new(0.5, 0.25, 0.0);
        assert_eq!(c, Color::new(1.0, 0.5, 0.0));
    }

    #[test]
    fn test_to_rgb8_clamps() {
        assert_eq!(Color::new(-1.0, 0.5, 3.0).to_rgb8(), [0, 128, 255]);
    }
}
