//! Surface material for Phong shading with blurred global effects.

use serde::{Deserialize, Serialize};
use umbra_math::DVec3;

/// Blackboard tuning for one blurred global effect.
///
/// A zero diameter or fewer than two ray casts means a sharp effect: the
/// ideal reflected/refracted ray is traced alone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlackboardSettings {
    /// Distance from the ray head to the blackboard
    pub distance: f64,
    /// Side length of the blackboard
    pub diameter: f64,
    /// Minimum number of rays cast through the blackboard
    pub min_ray_casts: usize,
}

impl BlackboardSettings {
    /// A sharp effect, traced with a single ray.
    pub const SHARP: BlackboardSettings = BlackboardSettings {
        distance: 1.0,
        diameter: 0.0,
        min_ray_casts: 1,
    };

    pub fn new(distance: f64, diameter: f64, min_ray_casts: usize) -> Self {
        Self {
            distance,
            diameter,
            min_ray_casts,
        }
    }

    /// Whether this effect is traced with more than one ray.
    pub fn is_blurred(&self) -> bool {
        self.diameter > 0.0 && self.distance > 0.0 && self.min_ray_casts > 1
    }
}

impl Default for BlackboardSettings {
    fn default() -> Self {
        Self::SHARP
    }
}

/// Surface coefficients consumed by the tracer.
///
/// All coefficients are per-channel attenuation factors, nominally in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    /// Diffuse
    pub kd: DVec3,
    /// Specular
    pub ks: DVec3,
    /// Reflection
    pub kr: DVec3,
    /// Transparency
    pub kt: DVec3,
    /// Phong shininess exponent
    pub shininess: i32,
    /// Glossy reflection sampling
    pub reflection: BlackboardSettings,
    /// Blurred transparency sampling
    pub transparency: BlackboardSettings,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            kd: DVec3::ZERO,
            ks: DVec3::ZERO,
            kr: DVec3::ZERO,
            kt: DVec3::ZERO,
            shininess: 0,
            reflection: BlackboardSettings::SHARP,
            transparency: BlackboardSettings::SHARP,
        }
    }
}

impl Material {
    /// Create a black, opaque, non-reflective material.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_kd(mut self, kd: DVec3) -> Self {
        self.kd = kd;
        self
    }

    pub fn with_ks(mut self, ks: DVec3) -> Self {
        self.ks = ks;
        self
    }

    pub fn with_kr(mut self, kr: DVec3) -> Self {
        self.kr = kr;
        self
    }

    pub fn with_kt(mut self, kt: DVec3) -> Self {
        self.kt = kt;
        self
    }

    pub fn with_shininess(mut self, shininess: i32) -> Self {
        self.shininess = shininess;
        self
    }

    /// Set glossy reflection sampling.
    pub fn with_reflection_blur(mut self, settings: BlackboardSettings) -> Self {
        self.reflection = settings;
        self
    }

    /// Set blurred transparency sampling.
    pub fn with_transparency_blur(mut self, settings: BlackboardSettings) -> Self {
        self.transparency = settings;
        self
    }
}
