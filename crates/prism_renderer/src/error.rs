//! Render errors.

use thiserror::Error;

/// Errors that can occur before or while scheduling a render.
///
/// Tile failures are not errors: they are retried and, if they keep
/// failing, reported through `FrameStatus::Degraded`.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Samples per pixel must be at least 1")]
    ZeroSamples,

    #[error("Worker count must be at least 1")]
    ZeroWorkers,

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type RenderResult<T> = Result<T, RenderError>;
