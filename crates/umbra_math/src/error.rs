//! Construction errors for the math value types.

use thiserror::Error;

/// Errors raised when building math values from raw triples.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
    /// A vector was built from the exact zero triple.
    #[error("zero vector: a direction must have a strictly positive length")]
    ZeroVector,
}

pub type MathResult<T> = Result<T, MathError>;
