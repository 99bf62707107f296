//! Umbra Renderer - recursive Whitted-style shading
//!
//! A CPU ray tracer core: Phong local lighting with transparent shadows,
//! plus reflection and refraction traced recursively. Glossy reflection and
//! blurred transparency are sampled as beams of rays jittered over a
//! blackboard grid.
//!
//! Randomness is always injected as `&mut dyn RngCore`, so renders are
//! reproducible with a seeded generator.

mod blackboard;
mod camera;
mod geometry;
mod light;
mod material;
mod plane;
mod ray;
mod scene;
mod sphere;
mod tracer;
mod triangle;

pub use blackboard::Blackboard;
pub use camera::{Camera, CameraBuilder, CameraError, CameraResult, ImageBuffer};
pub use geometry::{GeoPoint, Geometries, Geometry, Intersectable};
pub use light::{AmbientLight, DirectionalLight, LightSource, PointLight, SpotLight};
pub use material::{BlackboardSettings, Material};
pub use plane::Plane;
pub use ray::{Ray, DELTA};
pub use scene::Scene;
pub use sphere::Sphere;
pub use tracer::{RayTracer, SimpleRayTracer, TracerConfig, MIN_CALC_COLOR_K};
pub use triangle::Triangle;

/// Re-export the value types from umbra_math
pub use umbra_math::{Color, DVec3, Point, Vector};
