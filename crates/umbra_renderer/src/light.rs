//! Light sources.
//!
//! The tracer talks to lights only through [`LightSource`]: where the light
//! comes from, how strong it is at a point, and how far away it is (the
//! search bound for shadow rays).

use umbra_math::{Color, DVec3, Point, Vector};

/// A light that illuminates surface points.
pub trait LightSource: Send + Sync {
    /// Intensity arriving at `point`.
    fn intensity_at(&self, point: &Point) -> Color;

    /// Unit direction from the light towards `point`.
    fn direction_at(&self, point: &Point) -> Vector;

    /// Distance from `point` to the light.
    fn distance_to(&self, point: &Point) -> f64;
}

/// Uniform ambient light, added once per primary ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    intensity: Color,
}

impl AmbientLight {
    /// No ambient light at all.
    pub const NONE: AmbientLight = AmbientLight {
        intensity: Color::BLACK,
    };

    /// Ambient light of color `ia` attenuated by `ka`.
    pub fn new(ia: Color, ka: DVec3) -> Self {
        Self {
            intensity: ia.attenuate(ka),
        }
    }

    pub fn intensity(&self) -> Color {
        self.intensity
    }
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self::NONE
    }
}

/// Light from infinitely far away along a fixed direction.
#[derive(Debug, Clone, Copy)]
pub struct DirectionalLight {
    intensity: Color,
    direction: Vector,
}

impl DirectionalLight {
    pub fn new(intensity: Color, direction: Vector) -> Self {
        Self {
            intensity,
            direction: direction.normalize(),
        }
    }
}

impl LightSource for DirectionalLight {
    fn intensity_at(&self, _point: &Point) -> Color {
        self.intensity
    }

    fn direction_at(&self, _point: &Point) -> Vector {
        self.direction
    }

    fn distance_to(&self, _point: &Point) -> f64 {
        f64::INFINITY
    }
}

/// Omnidirectional light with distance falloff
/// `I0 / (kc + kl·d + kq·d²)`.
#[derive(Debug, Clone, Copy)]
pub struct PointLight {
    intensity: Color,
    position: Point,
    kc: f64,
    kl: f64,
    kq: f64,
}

impl PointLight {
    /// Create a point light without falloff.
    pub fn new(intensity: Color, position: Point) -> Self {
        Self {
            intensity,
            position,
            kc: 1.0,
            kl: 0.0,
            kq: 0.0,
        }
    }

    pub fn with_kc(mut self, kc: f64) -> Self {
        self.kc = kc;
        self
    }

    pub fn with_kl(mut self, kl: f64) -> Self {
        self.kl = kl;
        self
    }

    pub fn with_kq(mut self, kq: f64) -> Self {
        self.kq = kq;
        self
    }

    pub fn position(&self) -> Point {
        self.position
    }
}

impl LightSource for PointLight {
    fn intensity_at(&self, point: &Point) -> Color {
        let d_squared = self.position.distance_squared(point);
        let falloff = self.kc + self.kl * d_squared.sqrt() + self.kq * d_squared;
        self.intensity.scale(1.0 / falloff)
    }

    /// # Panics
    ///
    /// Panics if `point` is exactly at the light position.
    fn direction_at(&self, point: &Point) -> Vector {
        point.subtract(&self.position).normalize()
    }

    fn distance_to(&self, point: &Point) -> f64 {
        self.position.distance(point)
    }
}

/// A point light focused along a direction.
///
/// Intensity is the point light's, scaled by `max(0, dir·l)^narrow_beam`.
#[derive(Debug, Clone, Copy)]
pub struct SpotLight {
    light: PointLight,
    direction: Vector,
    narrow_beam: i32,
}

impl SpotLight {
    pub fn new(intensity: Color, position: Point, direction: Vector) -> Self {
        Self {
            light: PointLight::new(intensity, position),
            direction: direction.normalize(),
            narrow_beam: 1,
        }
    }

    pub fn with_kc(mut self, kc: f64) -> Self {
        self.light = self.light.with_kc(kc);
        self
    }

    pub fn with_kl(mut self, kl: f64) -> Self {
        self.light = self.light.with_kl(kl);
        self
    }

    pub fn with_kq(mut self, kq: f64) -> Self {
        self.light = self.light.with_kq(kq);
        self
    }

    /// Sharpen the beam; 1 is a plain cosine lobe.
    pub fn with_narrow_beam(mut self, narrow_beam: i32) -> Self {
        self.narrow_beam = narrow_beam;
        self
    }
}

impl LightSource for SpotLight {
    fn intensity_at(&self, point: &Point) -> Color {
        let cos = self.direction.dot(&self.light.direction_at(point)).max(0.0);
        self.light.intensity_at(point).scale(cos.powi(self.narrow_beam))
    }

    fn direction_at(&self, point: &Point) -> Vector {
        self.light.direction_at(point)
    }

    fn distance_to(&self, point: &Point) -> f64 {
        self.light.distance_to(point)
    }
}
