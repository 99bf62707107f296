//! Numeric helpers shared by the shading code.

/// Magnitude below which a scalar is treated as zero (2^-40).
pub const ACCURACY: f64 = 1.0 / 1_099_511_627_776.0;

/// Returns true if `x` is indistinguishable from zero.
#[inline]
pub fn is_zero(x: f64) -> bool {
    x.abs() < ACCURACY
}

/// Snap values within [`ACCURACY`] of zero to exactly zero.
///
/// Sign tests on dot products go through this so that grazing geometry
/// compares equal to zero instead of flickering between signs.
#[inline]
pub fn align_zero(x: f64) -> f64 {
    if is_zero(x) {
        0.0
    } else {
        x
    }
}
