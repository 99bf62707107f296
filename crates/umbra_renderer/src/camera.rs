//! Pinhole camera for primary ray generation.
//!
//! The camera shoots rays from its position through the pixel grid of a
//! view plane. With antialiasing enabled, each pixel is covered by a
//! blackboard and traced as a jittered beam.

use std::time::Instant;

use rand::RngCore;
use thiserror::Error;
use umbra_math::{is_zero, Color, DVec3, Point, Vector};

use crate::{Blackboard, Ray, RayTracer};

/// Errors raised when building a camera.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CameraError {
    #[error("view direction and up vector must be orthogonal")]
    NonOrthogonal,

    #[error("invalid view plane size: {width}x{height}")]
    InvalidViewPlaneSize { width: f64, height: f64 },

    #[error("invalid view plane distance: {0}")]
    InvalidViewPlaneDistance(f64),

    #[error("invalid resolution: {width}x{height}")]
    InvalidResolution { width: u32, height: u32 },
}

pub type CameraResult<T> = Result<T, CameraError>;

/// Builder for [`Camera`].
#[derive(Debug, Clone)]
pub struct CameraBuilder {
    location: Point,
    to: Vector,
    up: Vector,
    vp_width: f64,
    vp_height: f64,
    vp_distance: f64,
    image_width: u32,
    image_height: u32,
    grid_size: usize,
    samples_per_pixel: usize,
}

impl Default for CameraBuilder {
    fn default() -> Self {
        Self {
            location: Point::ZERO,
            to: Vector::BACKWARD,
            up: Vector::UP,
            vp_width: 0.0,
            vp_height: 0.0,
            vp_distance: 0.0,
            image_width: 0,
            image_height: 0,
            grid_size: 9,
            samples_per_pixel: 1,
        }
    }
}

impl CameraBuilder {
    /// Set camera position.
    pub fn with_location(mut self, location: Point) -> Self {
        self.location = location;
        self
    }

    /// Set viewing direction and up vector (must be orthogonal).
    pub fn with_direction(mut self, to: Vector, up: Vector) -> Self {
        self.to = to;
        self.up = up;
        self
    }

    /// Set view plane size.
    pub fn with_vp_size(mut self, width: f64, height: f64) -> Self {
        self.vp_width = width;
        self.vp_height = height;
        self
    }

    /// Set distance from the camera to the view plane.
    pub fn with_vp_distance(mut self, distance: f64) -> Self {
        self.vp_distance = distance;
        self
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self
    }

    /// Trace at least `samples_per_pixel` rays through each pixel, jittered
    /// over a `grid_size`² blackboard. One sample disables antialiasing.
    pub fn with_antialiasing(mut self, grid_size: usize, samples_per_pixel: usize) -> Self {
        self.grid_size = grid_size;
        self.samples_per_pixel = samples_per_pixel;
        self
    }

    /// Validate the settings and compute the camera basis.
    pub fn build(self) -> CameraResult<Camera> {
        if !is_zero(self.to.dot(&self.up)) {
            return Err(CameraError::NonOrthogonal);
        }
        if !(self.vp_width > 0.0 && self.vp_height > 0.0) {
            return Err(CameraError::InvalidViewPlaneSize {
                width: self.vp_width,
                height: self.vp_height,
            });
        }
        if !(self.vp_distance > 0.0) {
            return Err(CameraError::InvalidViewPlaneDistance(self.vp_distance));
        }
        if self.image_width == 0 || self.image_height == 0 {
            return Err(CameraError::InvalidResolution {
                width: self.image_width,
                height: self.image_height,
            });
        }

        let to = self.to.normalize();
        let up = self.up.normalize();
        let right = to.cross(&up).normalize();

        let camera = Camera {
            location: self.location,
            to,
            up,
            right,
            vp_width: self.vp_width,
            vp_height: self.vp_height,
            vp_distance: self.vp_distance,
            image_width: self.image_width,
            image_height: self.image_height,
            grid_size: self.grid_size,
            samples_per_pixel: self.samples_per_pixel.max(1),
        };

        log::debug!(
            "Camera at {} looking {}: {}x{} px, {} samples per pixel",
            camera.location,
            camera.to,
            camera.image_width,
            camera.image_height,
            camera.samples_per_pixel
        );

        Ok(camera)
    }
}

/// Camera for generating primary rays into the scene.
#[derive(Debug, Clone)]
pub struct Camera {
    location: Point,
    to: Vector,
    up: Vector,
    right: Vector,
    vp_width: f64,
    vp_height: f64,
    vp_distance: f64,
    pub image_width: u32,
    pub image_height: u32,
    grid_size: usize,
    samples_per_pixel: usize,
}

impl Camera {
    /// Start building a camera.
    pub fn builder() -> CameraBuilder {
        CameraBuilder::default()
    }

    pub fn location(&self) -> Point {
        self.location
    }

    /// Unit `(to, up, right)` basis.
    pub fn basis(&self) -> (Vector, Vector, Vector) {
        (self.to, self.up, self.right)
    }

    /// Center of pixel (`j`, `i`), column `j` and row `i`, on the view plane.
    fn pixel_center(&self, j: u32, i: u32) -> Point {
        let nx = self.image_width as f64;
        let ny = self.image_height as f64;
        let rx = self.vp_width / nx;
        let ry = self.vp_height / ny;

        let xj = (j as f64 - (nx - 1.0) / 2.0) * rx;
        let yi = -(i as f64 - (ny - 1.0) / 2.0) * ry;

        let center = self.location.xyz() + self.to.xyz() * self.vp_distance;
        Point::from(center + self.right.xyz() * xj + self.up.xyz() * yi)
    }

    /// Ray from the camera through the center of pixel (`j`, `i`).
    pub fn construct_ray(&self, j: u32, i: u32) -> Ray {
        Ray::new(self.location, self.pixel_center(j, i).subtract(&self.location))
    }

    /// Rays from the camera through jittered points of pixel (`j`, `i`).
    pub fn construct_beam(&self, j: u32, i: u32, rng: &mut dyn RngCore) -> Vec<Ray> {
        if self.samples_per_pixel <= 1 {
            return vec![self.construct_ray(j, i)];
        }

        let pixel_size = (self.vp_width / self.image_width as f64)
            .min(self.vp_height / self.image_height as f64);
        let board = Blackboard::new(self.grid_size, pixel_size, self.pixel_center(j, i), self.to);
        board
            .randomize_points(self.samples_per_pixel, rng)
            .into_iter()
            .map(|p| Ray::new(self.location, p.subtract(&self.location)))
            .collect()
    }

    /// Render every pixel through `tracer`.
    ///
    /// This is a simple single-threaded loop; callers wanting parallelism can
    /// trace pixels themselves, one generator per thread.
    pub fn render(&self, tracer: &dyn RayTracer, rng: &mut dyn RngCore) -> ImageBuffer {
        log::info!(
            "Rendering {}x{} @ {} samples per pixel",
            self.image_width,
            self.image_height,
            self.samples_per_pixel
        );
        let start = Instant::now();

        let mut image = ImageBuffer::new(self.image_width, self.image_height);
        for i in 0..self.image_height {
            for j in 0..self.image_width {
                let beam = self.construct_beam(j, i, rng);
                image.set(j, i, tracer.trace_beam(&beam, rng));
            }
        }

        log::info!("Rendered in {:?}", start.elapsed());
        image
    }
}

/// Simple image buffer for storing render output.
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::BLACK; width as usize * height as usize],
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Convert to packed RGB bytes, row-major.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| c.to_rgb8()).collect()
    }

    /// Mean of all pixels.
    pub fn average(&self) -> Color {
        let sum = self
            .pixels
            .iter()
            .fold(DVec3::ZERO, |acc, c| acc + c.rgb());
        Color::from(sum / self.pixels.len().max(1) as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Scene, SimpleRayTracer, Sphere};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn camera() -> CameraBuilder {
        Camera::builder()
            .with_location(Point::ZERO)
            .with_direction(Vector::BACKWARD, Vector::UP)
            .with_vp_size(3.0, 3.0)
            .with_vp_distance(1.0)
            .with_resolution(3, 3)
    }

    #[test]
    fn test_build_validates() {
        assert!(camera().build().is_ok());
        assert_eq!(
            camera().with_direction(Vector::BACKWARD, Vector::new(0.0, 1.0, 1.0)).build().err(),
            Some(CameraError::NonOrthogonal)
        );
        assert!(matches!(
            camera().with_vp_size(0.0, 1.0).build(),
            Err(CameraError::InvalidViewPlaneSize { .. })
        ));
        assert!(matches!(
            camera().with_vp_distance(-1.0).build(),
            Err(CameraError::InvalidViewPlaneDistance(_))
        ));
        assert!(matches!(
            camera().with_resolution(0, 10).build(),
            Err(CameraError::InvalidResolution { .. })
        ));
    }

    #[test]
    fn test_right_handed_basis() {
        let cam = camera().build().unwrap();
        let (to, up, right) = cam.basis();
        assert_eq!(right, Vector::RIGHT);
        assert_eq!(to.cross(&up), right);
    }

    #[test]
    fn test_construct_ray_through_pixels() {
        let cam = camera().build().unwrap();

        // Center pixel looks straight ahead
        assert_eq!(cam.construct_ray(1, 1).direction(), Vector::BACKWARD);

        // Top-left corner pixel center is at (-1, 1, -1)
        let corner = cam.construct_ray(0, 0);
        assert_eq!(corner.direction(), Vector::new(-1.0, 1.0, -1.0).normalize());
    }

    #[test]
    fn test_construct_beam_stays_in_pixel() {
        let cam = camera().with_antialiasing(3, 9).build().unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let beam = cam.construct_beam(1, 1, &mut rng);

        assert_eq!(beam.len(), 9);
        for ray in beam {
            // Scale the direction onto the view plane at z = -1
            let d = ray.direction().xyz();
            let p = d / -d.z;
            assert!(p.x.abs() <= 0.5 + 1e-9 && p.y.abs() <= 0.5 + 1e-9, "{p}");
        }
    }

    #[test]
    fn test_render_sees_sphere_and_background() {
        let background = Color::new(0.0, 0.0, 1.0);
        let emission = Color::new(1.0, 0.0, 0.0);
        let scene = Scene::new("dot")
            .with_background(background)
            .with_geometry(Sphere::new(Point::new(0.0, 0.0, -10.0), 1.0).with_emission(emission));
        let tracer = SimpleRayTracer::new(&scene);
        let cam = camera().build().unwrap();

        let image = cam.render(&tracer, &mut StdRng::seed_from_u64(1));
        assert_eq!(image.get(1, 1), emission);
        assert_eq!(image.get(0, 0), background);
        assert_eq!(image.to_rgb8().len(), 27);
    }

    #[test]
    fn test_image_buffer_indexing_is_row_major() {
        let mut image = ImageBuffer::new(4, 2);
        image.set(3, 1, Color::splat(1.0));
        image.set(1, 0, Color::splat(0.5));

        assert_eq!(image.pixels.len(), 8);
        assert_eq!(image.pixels[7], Color::splat(1.0));
        assert_eq!(image.pixels[1], Color::splat(0.5));
        assert_eq!(image.get(3, 1), Color::splat(1.0));
        assert_eq!(image.get(0, 1), Color::BLACK);
    }

    #[test]
    fn test_image_buffer_index_does_not_wrap_in_u32() {
        // 70000 * 70000 overflows u32; only the index math is exercised here
        let image = ImageBuffer {
            width: 70_000,
            height: 70_000,
            pixels: Vec::new(),
        };
        assert_eq!(image.index(1, 69_999), 69_999usize * 70_000 + 1);
    }
}
