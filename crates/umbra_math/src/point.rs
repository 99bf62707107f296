//! Positions in 3D space.

use std::fmt;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::{DVec3, Vector};

/// A position in 3D space.
///
/// Equality is exact component comparison. Points translate by vectors and
/// the difference of two distinct points is a [`Vector`].
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    xyz: DVec3,
}

impl Point {
    /// The origin (0, 0, 0).
    pub const ZERO: Point = Point { xyz: DVec3::ZERO };

    /// Create a new point.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            xyz: DVec3::new(x, y, z),
        }
    }

    /// Get the underlying triple.
    #[inline]
    pub fn xyz(&self) -> DVec3 {
        self.xyz
    }

    /// The vector pointing from `other` to `self`.
    ///
    /// # Panics
    ///
    /// Panics if both points coincide, since no direction exists between them.
    #[inline]
    pub fn subtract(&self, other: &Point) -> Vector {
        Vector::from_xyz(self.xyz - other.xyz)
    }

    /// Squared euclidean distance to another point.
    #[inline]
    pub fn distance_squared(&self, other: &Point) -> f64 {
        self.xyz.distance_squared(other.xyz)
    }

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance(&self, other: &Point) -> f64 {
        self.xyz.distance(other.xyz)
    }
}

impl From<DVec3> for Point {
    fn from(xyz: DVec3) -> Self {
        Self { xyz }
    }
}

/// Translate a point by a vector.
impl Add<Vector> for Point {
    type Output = Point;

    fn add(self, rhs: Vector) -> Point {
        Point {
            xyz: self.xyz + rhs.xyz(),
        }
    }
}

impl Sub<Point> for Point {
    type Output = Vector;

    fn sub(self, rhs: Point) -> Vector {
        self.subtract(&rhs)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p({}, {}, {})", self.xyz.x, self.xyz.y, self.xyz.z)
    }
}
