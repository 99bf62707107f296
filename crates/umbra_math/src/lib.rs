//! Umbra math - the value types the shading core operates on.
//!
//! Every type here wraps a [`DVec3`] triple. Points are plain positions,
//! vectors carry a non-zero invariant, colors are unbounded RGB accumulators.
//! Attenuation factors (material coefficients, shadow transparency) are bare
//! `DVec3` values.

// Re-export glam's double precision triple for convenience
pub use glam::DVec3;

mod color;
mod error;
mod point;
mod util;
mod vector;

pub use color::Color;
pub use error::{MathError, MathResult};
pub use point::Point;
pub use util::{align_zero, is_zero, ACCURACY};
pub use vector::Vector;
