//! Infinite plane primitive.

use umbra_math::{align_zero, Color, Point, Vector};

use crate::{GeoPoint, Geometry, Intersectable, Material, Ray};

/// An infinite plane through a point.
#[derive(Debug, Clone)]
pub struct Plane {
    q: Point,
    /// Unit normal
    normal: Vector,
    material: Material,
    emission: Color,
}

impl Plane {
    /// Create a plane through `q` perpendicular to `normal`.
    pub fn new(q: Point, normal: Vector) -> Self {
        Self {
            q,
            normal: normal.normalize(),
            material: Material::default(),
            emission: Color::BLACK,
        }
    }

    /// Create the plane through three points.
    ///
    /// # Panics
    ///
    /// Panics if the points are collinear or coincide.
    pub fn from_points(a: Point, b: Point, c: Point) -> Self {
        let normal = b.subtract(&a).cross(&c.subtract(&a));
        Self::new(a, normal)
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

impl Intersectable for Plane {
    fn find_geo_intersections_within(&self, ray: &Ray, max_distance: f64) -> Vec<GeoPoint<'_>> {
        let n = self.normal.xyz();
        let nv = align_zero(n.dot(ray.direction().xyz()));

        // Parallel to the plane
        if nv == 0.0 {
            return Vec::new();
        }

        let t = align_zero(n.dot(self.q.xyz() - ray.head().xyz()) / nv);
        if t <= 0.0 || align_zero(t - max_distance) > 0.0 {
            return Vec::new();
        }

        vec![GeoPoint::new(self, ray.point_at(t))]
    }
}

impl Geometry for Plane {
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

    #[test]
    fn test_plane_hit() {
        let plane = Plane::new(Point::new(0.0, 0.0, 3.0), Vector::BACKWARD);
        let ray = Ray::new(Point::ZERO, Vector::new(0.0, 1.0, 1.0));
        let hits = plane.find_geo_intersections(&ray);

        assert_eq!(hits.len(), 1);
        let p = hits[0].point;
        assert!((p.xyz().z - 3.0).abs() < 1e-12);
        assert!((p.xyz().y - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_plane_miss() {
        let plane = Plane::new(Point::new(0.0, 0.0, 3.0), Vector::FORWARD);

        // Parallel
        let parallel = Ray::new(Point::ZERO, Vector::UP);
        assert!(plane.find_geo_intersections(&parallel).is_empty());

        // Behind the head
        let away = Ray::new(Point::ZERO, Vector::BACKWARD);
        assert!(plane.find_geo_intersections(&away).is_empty());

        // Head on the plane
        let on = Ray::new(Point::new(1.0, 1.0, 3.0), Vector::FORWARD);
        assert!(plane.find_geo_intersections(&on).is_empty());
    }

    #[test]
    fn test_plane_max_distance() {
        let plane = Plane::new(Point::new(0.0, 0.0, 3.0), Vector::FORWARD);
        let ray = Ray::new(Point::ZERO, Vector::FORWARD);

        assert!(plane.find_geo_intersections_within(&ray, 2.0).is_empty());
        assert_eq!(plane.find_geo_intersections_within(&ray, 3.0).len(), 1);
    }

    #[test]
    fn test_plane_from_points() {
        let plane = Plane::from_points(
            Point::ZERO,
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
        );
        assert_eq!(plane.normal(&Point::ZERO), Vector::FORWARD);
    }
}
