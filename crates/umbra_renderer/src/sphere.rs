//! Sphere primitive.

use umbra_math::{align_zero, Color, Point, Vector};

use crate::{GeoPoint, Geometry, Intersectable, Material, Ray};

/// A sphere primitive.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Point,
    radius: f64,
    material: Material,
    emission: Color,
}

impl Sphere {
    /// Create a new sphere with a default material and no emission.
    pub fn new(center: Point, radius: f64) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
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

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Intersectable for Sphere {
    fn find_geo_intersections_within(&self, ray: &Ray, max_distance: f64) -> Vec<GeoPoint<'_>> {
        let dir = ray.direction().xyz();
        // Head to center
        let u = self.center.xyz() - ray.head().xyz();
        let tm = dir.dot(u);
        let d_squared = u.length_squared() - tm * tm;
        let th_squared = align_zero(self.radius * self.radius - d_squared);

        // Miss or tangent
        if th_squared <= 0.0 {
            return Vec::new();
        }

        let th = th_squared.sqrt();
        [tm - th, tm + th]
            .into_iter()
            .filter(|&t| align_zero(t) > 0.0 && align_zero(t - max_distance) <= 0.0)
            .map(|t| GeoPoint::new(self, ray.point_at(t)))
            .collect()
    }
}

impl Geometry for Sphere {
    fn normal(&self, point: &Point) -> Vector {
        point.subtract(&self.center).normalize()
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

    fn unit_sphere_ahead() -> Sphere {
        Sphere::new(Point::new(0.0, 0.0, -2.0), 1.0)
    }

    #[test]
    fn test_sphere_hit_from_outside() {
        let sphere = unit_sphere_ahead();
        let ray = Ray::new(Point::ZERO, Vector::BACKWARD);
        let hits = sphere.find_geo_intersections(&ray);

        assert_eq!(hits.len(), 2);
        let closest = ray.find_closest_geo_point(hits).map(|gp| gp.point);
        assert_eq!(closest, Some(Point::new(0.0, 0.0, -1.0)));
    }

    #[test]
    fn test_sphere_hit_from_inside() {
        let sphere = unit_sphere_ahead();
        let ray = Ray::new(Point::new(0.0, 0.0, -2.0), Vector::UP);
        let hits = sphere.find_geo_intersections(&ray);

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].point, Point::new(0.0, 1.0, -2.0));
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = unit_sphere_ahead();

        // Pointing away
        let away = Ray::new(Point::ZERO, Vector::FORWARD);
        assert!(sphere.find_geo_intersections(&away).is_empty());

        // Passing beside
        let beside = Ray::new(Point::new(0.0, 2.0, 0.0), Vector::BACKWARD);
        assert!(sphere.find_geo_intersections(&beside).is_empty());

        // Tangent
        let tangent = Ray::new(Point::new(0.0, 1.0, 0.0), Vector::BACKWARD);
        assert!(sphere.find_geo_intersections(&tangent).is_empty());
    }

    #[test]
    fn test_sphere_max_distance() {
        let sphere = unit_sphere_ahead();
        let ray = Ray::new(Point::ZERO, Vector::BACKWARD);

        assert!(sphere.find_geo_intersections_within(&ray, 0.5).is_empty());
        assert_eq!(sphere.find_geo_intersections_within(&ray, 1.0).len(), 1);
        assert_eq!(sphere.find_geo_intersections_within(&ray, 2.0).len(), 1);
        assert_eq!(sphere.find_geo_intersections_within(&ray, 3.0).len(), 2);
    }

    #[test]
    fn test_sphere_normal() {
        let sphere = unit_sphere_ahead();
        assert_eq!(sphere.normal(&Point::new(0.0, 0.0, -1.0)), Vector::FORWARD);
        assert_eq!(sphere.normal(&Point::new(1.0, 0.0, -2.0)), Vector::RIGHT);
    }
}
