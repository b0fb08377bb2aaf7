//! Strata math - vectors, rays and parametric intervals.
//!
//! `Vec3` comes straight from glam; this crate adds the ray tracing
//! vocabulary on top of it and guards the one operation glam leaves to the
//! caller: normalizing a vector that has no length.

// Re-export glam for convenience
pub use glam::*;

mod interval;
mod ray;
mod vector;

pub use interval::Interval;
pub use ray::Ray;
pub use vector::{try_unit_vector, unit_vector, MathError, MathResult};
