//! Error types for the renderer.

use strata_math::MathError;
use thiserror::Error;

/// Errors that abort a render.
///
/// None of these are recoverable: a render either completes in full or
/// produces no image.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid render settings: {0}")]
    InvalidSettings(String),

    #[error("Degenerate camera: {0}")]
    DegenerateCamera(#[from] MathError),

    #[error("Failed to build render thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Image expects {expected} pixels but {actual} were supplied")]
    PixelCount { expected: usize, actual: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type RenderResult<T> = Result<T, RenderError>;
