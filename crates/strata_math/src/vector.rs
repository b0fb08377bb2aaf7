//! Guarded normalization.

use glam::Vec3;
use thiserror::Error;

/// Squared length below which a vector is treated as having no direction.
const DEGENERATE_LENGTH_SQUARED: f32 = 1e-12;

/// Errors produced by vector operations.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum MathError {
    #[error("cannot normalize degenerate vector ({0}, {1}, {2})")]
    DegenerateVector(f32, f32, f32),
}

pub type MathResult<T> = Result<T, MathError>;

/// Normalize `v`, failing if it is too short (or not finite) to have a
/// direction.
pub fn try_unit_vector(v: Vec3) -> MathResult<Vec3> {
    let len_sq = v.length_squared();
    if !len_sq.is_finite() || len_sq < DEGENERATE_LENGTH_SQUARED {
        return Err(MathError::DegenerateVector(v.x, v.y, v.z));
    }
    Ok(v / len_sq.sqrt())
}

/// Normalize `v`, returning `Vec3::ZERO` for degenerate input instead of
/// NaNs.
///
/// Used on hot paths where a zero direction is a valid (if useless) answer.
#[inline]
pub fn unit_vector(v: Vec3) -> Vec3 {
    try_unit_vector(v).unwrap_or(Vec3::ZERO)
}
