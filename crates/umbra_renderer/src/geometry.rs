//! Geometry capability traits and the intersection record.

use std::fmt;

use umbra_math::{Color, Point, Vector};

use crate::{Material, Ray};

/// An intersection point paired with the geometry it lies on.
///
/// The geometry is borrowed from the scene, never owned.
#[derive(Clone, Copy)]
pub struct GeoPoint<'a> {
    /// The surface that was hit
    pub geometry: &'a dyn Geometry,
    /// Point of intersection
    pub point: Point,
}

impl<'a> GeoPoint<'a> {
    pub fn new(geometry: &'a dyn Geometry, point: Point) -> Self {
        Self { geometry, point }
    }

    /// Surface normal at the hit point.
    #[inline]
    pub fn normal(&self) -> Vector {
        self.geometry.normal(&self.point)
    }

    #[inline]
    pub fn material(&self) -> &'a Material {
        self.geometry.material()
    }
}

impl fmt::Debug for GeoPoint<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeoPoint")
            .field("point", &self.point)
            .field("geometry", &(self.geometry as *const dyn Geometry as *const ()))
            .finish()
    }
}

/// Anything a ray can be intersected with.
pub trait Intersectable: Send + Sync {
    /// All intersections of `ray` no farther than `max_distance` from its head.
    ///
    /// Points at or behind the head are never reported. An empty list means
    /// the ray misses.
    fn find_geo_intersections_within(&self, ray: &Ray, max_distance: f64) -> Vec<GeoPoint<'_>>;

    /// All intersections of `ray` in front of its head.
    fn find_geo_intersections(&self, ray: &Ray) -> Vec<GeoPoint<'_>> {
        self.find_geo_intersections_within(ray, f64::INFINITY)
    }
}

/// A shaded surface: the capabilities the tracer needs at a hit point.
pub trait Geometry: Intersectable {
    /// Unit normal at a point on the surface.
    fn normal(&self, point: &Point) -> Vector;

    /// Surface material.
    fn material(&self) -> &Material;

    /// Light emitted by the surface itself.
    fn emission(&self) -> Color;
}

/// A flat collection of intersectables, itself intersectable.
#[derive(Default)]
pub struct Geometries {
    items: Vec<Box<dyn Intersectable>>,
}

impl Geometries {
    /// Create a new empty collection.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add an item to the collection.
    pub fn add(&mut self, item: Box<dyn Intersectable>) {
        self.items.push(item);
    }

    /// Get the number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Intersectable for Geometries {
    fn find_geo_intersections_within(&self, ray: &Ray, max_distance: f64) -> Vec<GeoPoint<'_>> {
        self.items
            .iter()
            .flat_map(|item| item.find_geo_intersections_within(ray, max_distance))
            .collect()
    }
}
