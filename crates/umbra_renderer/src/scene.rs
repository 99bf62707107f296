//! Read-only scene aggregate consulted by the tracer.

use umbra_math::Color;

use crate::{AmbientLight, Geometries, Intersectable, LightSource};

/// Everything a render reads: geometry, lights, ambient light and background.
///
/// A scene is assembled once and then only borrowed immutably while rendering,
/// so independent rays can be traced from several threads without locking.
pub struct Scene {
    /// Scene name (for logging)
    pub name: String,
    /// Color of rays that hit nothing
    pub background: Color,
    pub ambient_light: AmbientLight,
    pub geometries: Geometries,
    /// Lights, in evaluation order
    pub lights: Vec<Box<dyn LightSource>>,
}

impl Scene {
    /// Create an empty scene with a black background and no ambient light.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            background: Color::BLACK,
            ambient_light: AmbientLight::NONE,
            geometries: Geometries::new(),
            lights: Vec::new(),
        }
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn with_ambient_light(mut self, ambient_light: AmbientLight) -> Self {
        self.ambient_light = ambient_light;
        self
    }

    /// Add a geometry (or a nested collection).
    pub fn with_geometry(mut self, geometry: impl Intersectable + 'static) -> Self {
        self.geometries.add(Box::new(geometry));
        self
    }

    /// Add a light source.
    pub fn with_light(mut self, light: impl LightSource + 'static) -> Self {
        self.lights.push(Box::new(light));
        self
    }
}
