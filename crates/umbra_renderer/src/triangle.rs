//! Triangle primitive for ray tracing.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use umbra_math::{align_zero, Color, DVec3, Point, Vector};

use crate::{GeoPoint, Geometry, Intersectable, Material, Ray};

/// A triangle primitive.
#[derive(Debug, Clone)]
pub struct Triangle {
    /// Vertices
    v0: Point,
    v1: Point,
    v2: Point,
    /// Pre-computed face normal (unit length)
    normal: Vector,
    material: Material,
    emission: Color,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    ///
    /// The normal follows the right-hand rule over `v0 → v1 → v2`.
    ///
    /// # Panics
    ///
    /// Panics if the vertices are collinear.
    pub fn new(v0: Point, v1: Point, v2: Point) -> Self {
        let normal = v1.subtract(&v0).cross(&v2.subtract(&v0)).normalize();

        Self {
            v0,
            v1,
            v2,
            normal,
            material: Material::default(),
            emission: Color::BLACK,
        }
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn with_emission(mut self, emission: Color) -> Self {
        self.emission = emission;
        self
    }
}

impl Intersectable for Triangle {
    /// Möller-Trumbore ray-triangle intersection algorithm.
    fn find_geo_intersections_within(&self, ray: &Ray, max_distance: f64) -> Vec<GeoPoint<'_>> {
        let dir = ray.direction().xyz();
        let edge1: DVec3 = self.v1.xyz() - self.v0.xyz();
        let edge2: DVec3 = self.v2.xyz() - self.v0.xyz();

        let h = dir.cross(edge2);
        let a = align_zero(edge1.dot(h));

        // Ray is parallel to triangle
        if a == 0.0 {
            return Vec::new();
        }

        let f = 1.0 / a;
        let s = ray.head().xyz() - self.v0.xyz();
        let u = f * s.dot(h);

        // Edges and vertices do not count as hits
        if align_zero(u) <= 0.0 || align_zero(u - 1.0) >= 0.0 {
            return Vec::new();
        }

        let q = s.cross(edge1);
        let v = f * dir.dot(q);

        if align_zero(v) <= 0.0 || align_zero(u + v - 1.0) >= 0.0 {
            return Vec::new();
        }

        let t = align_zero(f * edge2.dot(q));
        if t <= 0.0 || align_zero(t - max_distance) > 0.0 {
            return Vec::new();
        }

        vec![GeoPoint::new(self, ray.point_at(t))]
    }
}

impl Geometry for Triangle {
    fn normal(&self, _point: &Point) -> Vector {
        self.normal
    }

    fn material(&self) -> &Material {
        &self.material
    }

    fn emission(&self) -> Color {
        self.emission
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Triangle {
        Triangle::new(
            Point::new(-1.0, -1.0, -2.0),
            Point::new(1.0, -1.0, -2.0),
            Point::new(0.0, 1.0, -2.0),
        )
    }

    #[test]
    fn test_triangle_hit() {
        let tri = triangle();
        let ray = Ray::new(Point::ZERO, Vector::BACKWARD);
        let hits = tri.find_geo_intersections(&ray);

        assert_eq!(hits.len(), 1);
        assert!((hits[0].point.xyz().z + 2.0).abs() < 1e-12);
        assert_eq!(tri.normal(&hits[0].point), Vector::FORWARD);
    }

    #[test]
    fn test_triangle_miss() {
        let tri = triangle();

        // Outside the edges
        let outside = Ray::new(Point::new(5.0, 0.0, 0.0), Vector::BACKWARD);
        assert!(tri.find_geo_intersections(&outside).is_empty());

        // Parallel
        let parallel = Ray::new(Point::ZERO, Vector::UP);
        assert!(tri.find_geo_intersections(&parallel).is_empty());

        // Exactly through a vertex
        let vertex = Ray::new(Point::new(0.0, 1.0, 0.0), Vector::BACKWARD);
        assert!(tri.find_geo_intersections(&vertex).is_empty());
    }

    #[test]
    fn test_triangle_max_distance() {
        let tri = triangle();
        let ray = Ray::new(Point::ZERO, Vector::BACKWARD);
        assert!(tri.find_geo_intersections_within(&ray, 1.0).is_empty());
        assert_eq!(tri.find_geo_intersections_within(&ray, 2.0).len(), 1);
    }
}
