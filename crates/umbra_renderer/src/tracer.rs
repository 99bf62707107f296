//! Recursive Whitted-style tracer.
//!
//! Implements:
//! - Local Phong lighting (emission, diffuse, specular) with attenuated shadows
//! - Reflection and transparency through depth-bounded recursion
//! - Glossy/blurred global effects by tracing jittered beams
//! - Early termination once a branch can no longer contribute visibly

use rand::RngCore;
use serde::{Deserialize, Serialize};
use umbra_math::{align_zero, Color, DVec3, Vector};

use crate::{BlackboardSettings, GeoPoint, Intersectable, LightSource, Material, Ray, Scene};

/// Contributions whose attenuation does not exceed this in every channel are
/// dropped.
pub const MIN_CALC_COLOR_K: f64 = 1e-4;

/// Attenuation of a primary ray.
const INITIAL_K: DVec3 = DVec3::ONE;

/// Tracer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TracerConfig {
    /// Maximum recursion depth; 1 means local lighting only
    pub max_recursion_level: u32,
    /// Blackboard grid size for global effect beams
    pub grid_size: usize,
}

impl Default for TracerConfig {
    fn default() -> Self {
        Self {
            max_recursion_level: 10,
            grid_size: 9,
        }
    }
}

impl TracerConfig {
    pub fn with_max_recursion_level(mut self, level: u32) -> Self {
        self.max_recursion_level = level;
        self
    }

    pub fn with_grid_size(mut self, grid_size: usize) -> Self {
        self.grid_size = grid_size;
        self
    }
}

/// Computes the color seen along rays.
pub trait RayTracer {
    /// Color seen along a single ray.
    fn trace_ray(&self, ray: &Ray, rng: &mut dyn RngCore) -> Color;

    /// Mean color over a bundle of rays (antialiasing).
    ///
    /// An empty bundle sees nothing and yields black.
    fn trace_beam(&self, beam: &[Ray], rng: &mut dyn RngCore) -> Color {
        if beam.is_empty() {
            return Color::BLACK;
        }

        let mut color = Color::BLACK;
        for ray in beam {
            color += self.trace_ray(ray, rng);
        }
        color.reduce(beam.len())
    }
}

/// True if every channel of `k` is strictly above the threshold.
#[inline]
fn higher_than_min(k: DVec3) -> bool {
    k.cmpgt(DVec3::splat(MIN_CALC_COLOR_K)).all()
}

/// True if every channel of `k` is strictly below the threshold.
#[inline]
fn lower_than_min(k: DVec3) -> bool {
    k.cmplt(DVec3::splat(MIN_CALC_COLOR_K)).all()
}

/// Recursive tracer over a borrowed scene.
pub struct SimpleRayTracer<'s> {
    scene: &'s Scene,
    config: TracerConfig,
}

impl<'s> SimpleRayTracer<'s> {
    /// Create a tracer with the default configuration.
    pub fn new(scene: &'s Scene) -> Self {
        Self::with_config(scene, TracerConfig::default())
    }

    pub fn with_config(scene: &'s Scene, config: TracerConfig) -> Self {
        log::debug!(
            "Tracer for scene '{}': {} geometries, {} lights, max recursion {}, grid {}",
            scene.name,
            scene.geometries.len(),
            scene.lights.len(),
            config.max_recursion_level,
            config.grid_size
        );
        Self { scene, config }
    }

    pub fn config(&self) -> &TracerConfig {
        &self.config
    }

    /// The scene intersection nearest to the ray head.
    pub fn find_closest_intersection(&self, ray: &Ray) -> Option<GeoPoint<'s>> {
        let scene: &'s Scene = self.scene;
        ray.find_closest_geo_point(scene.geometries.find_geo_intersections(ray))
    }

    /// Color at a hit point: local lighting, then global effects while depth
    /// remains.
    fn calc_color(
        &self,
        gp: &GeoPoint<'_>,
        ray_dir: &Vector,
        level: u32,
        k: DVec3,
        rng: &mut dyn RngCore,
    ) -> Color {
        let color = self.calc_local_effects(gp, ray_dir, k);
        if level <= 1 {
            return color;
        }
        color + self.calc_global_effects(gp, ray_dir, level, k, rng)
    }

    fn calc_global_effects(
        &self,
        gp: &GeoPoint<'_>,
        ray_dir: &Vector,
        level: u32,
        k: DVec3,
        rng: &mut dyn RngCore,
    ) -> Color {
        let material = gp.material();
        let n = gp.normal();

        let reflected = construct_reflected_ray(gp, ray_dir, &n);
        let refracted = construct_refracted_ray(gp, ray_dir, &n);

        self.calc_global_effect(material.kr, &reflected, &material.reflection, k, level, rng)
            + self.calc_global_effect(material.kt, &refracted, &material.transparency, k, level, rng)
    }

    /// One global effect (reflection or transparency), averaged over a beam
    /// around `ray` and scaled by the material coefficient `kx`.
    fn calc_global_effect(
        &self,
        kx: DVec3,
        ray: &Ray,
        settings: &BlackboardSettings,
        k: DVec3,
        level: u32,
        rng: &mut dyn RngCore,
    ) -> Color {
        let kkx = kx * k;
        if !higher_than_min(kkx) {
            log::trace!("Pruned global branch at level {level}: k = {kkx}");
            return Color::BLACK;
        }

        let beam = ray.generate_beam(
            self.config.grid_size,
            settings.diameter,
            settings.distance,
            settings.min_ray_casts,
            rng,
        );
        self.calc_average_beam_color(&beam, level - 1, kkx, rng)
            .attenuate(kx)
    }

    /// Mean color over a beam. Rays that miss contribute the background.
    fn calc_average_beam_color(
        &self,
        beam: &[Ray],
        level: u32,
        k: DVec3,
        rng: &mut dyn RngCore,
    ) -> Color {
        if beam.is_empty() {
            return Color::BLACK;
        }

        let mut color = Color::BLACK;
        for ray in beam {
            color += match self.find_closest_intersection(ray) {
                Some(gp) => self.calc_color(&gp, &ray.direction(), level, k, rng),
                None => self.scene.background,
            };
        }
        color.reduce(beam.len())
    }

    /// Emission plus diffuse and specular light from every light visible from
    /// the same side of the surface as the viewer.
    fn calc_local_effects(&self, gp: &GeoPoint<'_>, ray_dir: &Vector, k: DVec3) -> Color {
        let mut color = gp.geometry.emission();
        let n = gp.normal();
        let nv = align_zero(n.dot(ray_dir));

        // Seen exactly edge-on
        if nv == 0.0 {
            return color;
        }

        let material = gp.material();
        for light in &self.scene.lights {
            let l = light.direction_at(&gp.point);
            let nl = align_zero(n.dot(&l));

            // Light and viewer on opposite sides, or light grazing the surface
            if nl * nv <= 0.0 {
                continue;
            }

            let ktr = self.transparency(gp, &**light, &l, &n);
            if lower_than_min(ktr * k) {
                continue;
            }

            let il = light.intensity_at(&gp.point).attenuate(ktr);
            let factor = calc_diffuse(material, nl) + calc_specular(material, &n, &l, nl, ray_dir);
            color += il.attenuate(factor);
        }

        color
    }

    /// Fraction of a light's intensity that reaches `gp` through occluders.
    ///
    /// Occluders multiply in their transparency; once the product is
    /// negligible the point counts as fully shadowed.
    fn transparency(
        &self,
        gp: &GeoPoint<'_>,
        light: &dyn LightSource,
        l: &Vector,
        n: &Vector,
    ) -> DVec3 {
        let shadow_ray = Ray::with_offset(gp.point, -*l, n);
        let max_distance = light.distance_to(&gp.point);

        let mut ktr = DVec3::ONE;
        for occluder in self
            .scene
            .geometries
            .find_geo_intersections_within(&shadow_ray, max_distance)
        {
            ktr *= occluder.material().kt;
            if lower_than_min(ktr) {
                return DVec3::ZERO;
            }
        }
        ktr
    }
}

impl RayTracer for SimpleRayTracer<'_> {
    fn trace_ray(&self, ray: &Ray, rng: &mut dyn RngCore) -> Color {
        match self.find_closest_intersection(ray) {
            Some(gp) => {
                self.calc_color(
                    &gp,
                    &ray.direction(),
                    self.config.max_recursion_level,
                    INITIAL_K,
                    rng,
                ) + self.scene.ambient_light.intensity()
            }
            None => self.scene.background,
        }
    }
}

/// Mirror `ray_dir` about the surface normal: `r = v - 2(v·n)n`.
fn construct_reflected_ray(gp: &GeoPoint<'_>, ray_dir: &Vector, n: &Vector) -> Ray {
    let v = ray_dir.xyz();
    let r = v - 2.0 * v.dot(n.xyz()) * n.xyz();
    Ray::with_offset(gp.point, Vector::from_xyz(r), n)
}

/// Straight-through transparency: the direction is kept, only the head moves
/// past the surface.
fn construct_refracted_ray(gp: &GeoPoint<'_>, ray_dir: &Vector, n: &Vector) -> Ray {
    Ray::with_offset(gp.point, *ray_dir, n)
}

#[inline]
fn calc_diffuse(material: &Material, nl: f64) -> DVec3 {
    material.kd * nl.abs()
}

#[inline]
fn calc_specular(material: &Material, n: &Vector, l: &Vector, nl: f64, v: &Vector) -> DVec3 {
    let r = l.xyz() - 2.0 * nl * n.xyz();
    let minus_vr = -align_zero(v.xyz().dot(r));
    if minus_vr <= 0.0 {
        DVec3::ZERO
    } else {
        material.ks * minus_vr.powi(material.shininess)
    }
}
