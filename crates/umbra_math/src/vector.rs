//! Non-zero direction vectors.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

use crate::{DVec3, MathError, MathResult};

/// A directed quantity in 3D space with strictly positive length.
///
/// The non-zero invariant is checked at every construction site, so any
/// `Vector` can be normalized without dividing by zero. Operations whose
/// result would be the zero triple (adding opposite vectors, scaling by zero)
/// panic: that is a degenerate-geometry bug in the caller, not a runtime
/// condition to recover from. Use [`Vector::try_new`] where the input is not
/// trusted.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DVec3", into = "DVec3")]
pub struct Vector {
    xyz: DVec3,
}

impl Vector {
    /// World up (0, 1, 0).
    pub const UP: Vector = Vector { xyz: DVec3::Y };
    /// World down (0, -1, 0).
    pub const DOWN: Vector = Vector { xyz: DVec3::NEG_Y };
    /// World right (1, 0, 0).
    pub const RIGHT: Vector = Vector { xyz: DVec3::X };
    /// World left (-1, 0, 0).
    pub const LEFT: Vector = Vector { xyz: DVec3::NEG_X };
    /// World forward (0, 0, 1).
    pub const FORWARD: Vector = Vector { xyz: DVec3::Z };
    /// World backward (0, 0, -1).
    pub const BACKWARD: Vector = Vector { xyz: DVec3::NEG_Z };

    /// Create a new vector.
    ///
    /// # Panics
    ///
    /// Panics with [`MathError::ZeroVector`] if all components are zero.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self::from_xyz(DVec3::new(x, y, z))
    }

    /// Create a new vector, reporting the zero triple as an error.
    pub fn try_new(x: f64, y: f64, z: f64) -> MathResult<Self> {
        Self::try_from(DVec3::new(x, y, z))
    }

    /// Create a vector from a raw triple.
    ///
    /// # Panics
    ///
    /// Panics with [`MathError::ZeroVector`] if the triple is zero.
    pub fn from_xyz(xyz: DVec3) -> Self {
        match Self::try_from(xyz) {
            Ok(v) => v,
            Err(e) => panic!("{e}"),
        }
    }

    /// Get the underlying triple.
    #[inline]
    pub fn xyz(&self) -> DVec3 {
        self.xyz
    }

    /// Vector subtraction.
    ///
    /// # Panics
    ///
    /// Panics if both vectors are equal.
    #[inline]
    pub fn subtract(&self, other: &Vector) -> Vector {
        Self::from_xyz(self.xyz - other.xyz)
    }

    /// Scale every component by `factor`.
    ///
    /// # Panics
    ///
    /// Panics if `factor` is zero.
    #[inline]
    pub fn scale(&self, factor: f64) -> Vector {
        Self::from_xyz(self.xyz * factor)
    }

    /// Dot product.
    #[inline]
    pub fn dot(&self, other: &Vector) -> f64 {
        self.xyz.dot(other.xyz)
    }

    /// Right-handed cross product `self × other`.
    ///
    /// # Panics
    ///
    /// Panics if the vectors are parallel.
    #[inline]
    pub fn cross(&self, other: &Vector) -> Vector {
        Self::from_xyz(self.xyz.cross(other.xyz))
    }

    #[inline]
    pub fn length_squared(&self) -> f64 {
        self.dot(self)
    }

    /// Euclidean length, computed on the triple rescaled by its largest
    /// component so tiny and huge vectors neither underflow nor overflow.
    #[inline]
    pub fn length(&self) -> f64 {
        let max = self.xyz.abs().max_element();
        max * (self.xyz / max).length()
    }

    /// Unit vector with the same direction.
    ///
    /// Works for every non-zero vector, whatever its magnitude.
    #[inline]
    pub fn normalize(&self) -> Vector {
        let scaled = self.xyz / self.xyz.abs().max_element();
        Self::from_xyz(scaled / scaled.length())
    }
}

impl TryFrom<DVec3> for Vector {
    type Error = MathError;

    fn try_from(xyz: DVec3) -> MathResult<Self> {
        if xyz == DVec3::ZERO {
            return Err(MathError::ZeroVector);
        }
        Ok(Self { xyz })
    }
}

impl From<Vector> for DVec3 {
    fn from(v: Vector) -> Self {
        v.xyz
    }
}

/// Vector addition. Panics if the operands are exact opposites.
impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        Vector::from_xyz(self.xyz + rhs.xyz)
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        Vector::from_xyz(self.xyz - rhs.xyz)
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, rhs: f64) -> Vector {
        Vector::from_xyz(self.xyz * rhs)
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Vector { xyz: -self.xyz }
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v({}, {}, {})", self.xyz.x, self.xyz.y, self.xyz.z)
    }
}
