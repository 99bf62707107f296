//! Ray type for the recursive tracer.
//!
//! A ray is a head point and a unit direction. Secondary rays are nudged off
//! the surface they start on so they do not hit it again immediately.

use rand::RngCore;
use umbra_math::{align_zero, is_zero, Point, Vector};

use crate::{Blackboard, GeoPoint};

/// Distance secondary ray heads are moved along the surface normal.
pub const DELTA: f64 = 0.1;

/// A ray with a head point and a normalized direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    head: Point,
    direction: Vector,
}

impl Ray {
    /// Create a new ray. The direction is normalized.
    #[inline]
    pub fn new(head: Point, direction: Vector) -> Self {
        Self {
            head,
            direction: direction.normalize(),
        }
    }

    /// Create a ray whose head is moved by [`DELTA`] along `normal`, towards
    /// the side of the surface `direction` points to.
    ///
    /// A direction tangent to the surface leaves the head in place.
    pub fn with_offset(point: Point, direction: Vector, normal: &Vector) -> Self {
        let nv = align_zero(normal.dot(&direction));
        let head = if nv == 0.0 {
            point
        } else {
            point + normal.scale(if nv > 0.0 { DELTA } else { -DELTA })
        };
        Self::new(head, direction)
    }

    /// Get the ray's head point.
    #[inline]
    pub fn head(&self) -> Point {
        self.head
    }

    /// Get the ray's unit direction.
    #[inline]
    pub fn direction(&self) -> Vector {
        self.direction
    }

    /// Compute the point at distance `t` along the ray.
    #[inline]
    pub fn point_at(&self, t: f64) -> Point {
        if is_zero(t) {
            self.head
        } else {
            self.head + self.direction.scale(t)
        }
    }

    /// The point nearest to the head, if any.
    pub fn find_closest_point(&self, points: &[Point]) -> Option<Point> {
        points
            .iter()
            .copied()
            .min_by(|a, b| {
                let da = self.head.distance_squared(a);
                let db = self.head.distance_squared(b);
                da.total_cmp(&db)
            })
    }

    /// The intersection nearest to the head, if any.
    pub fn find_closest_geo_point<'a>(&self, hits: Vec<GeoPoint<'a>>) -> Option<GeoPoint<'a>> {
        hits.into_iter().min_by(|a, b| {
            let da = self.head.distance_squared(&a.point);
            let db = self.head.distance_squared(&b.point);
            da.total_cmp(&db)
        })
    }

    /// Generate a jittered beam of rays around this one.
    ///
    /// A square blackboard of side `diameter` is placed `distance` along the
    /// ray, facing it, and at least `min_rays` points are sampled on its
    /// `grid_size`² grid. Each beam ray leaves this ray's head towards one of
    /// those points. Without a usable board (zero diameter, non-positive
    /// distance, fewer than two rays requested) the beam is this ray alone.
    pub fn generate_beam(
        &self,
        grid_size: usize,
        diameter: f64,
        distance: f64,
        min_rays: usize,
        rng: &mut dyn RngCore,
    ) -> Vec<Ray> {
        if min_rays <= 1 || is_zero(diameter) || align_zero(distance) <= 0.0 {
            return vec![*self];
        }

        let center = self.point_at(distance);
        let board = Blackboard::new(grid_size, diameter, center, self.direction);
        board
            .randomize_points(min_rays, rng)
            .into_iter()
            .map(|p| Ray::new(self.head, p.subtract(&self.head)))
            .collect()
    }
}

impl Default for Ray {
    fn default() -> Self {
        Self {
            head: Point::ZERO,
            direction: Vector::FORWARD,
        }
    }
}
