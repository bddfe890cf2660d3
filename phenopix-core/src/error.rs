//! Error types for phenopix-core.

use thiserror::Error;

/// Result type alias for phenopix operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for phenopix operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Image or mask constructed with inconsistent dimensions.
    #[error("invalid dimensions: {width}x{height} does not match buffer of {len} elements")]
    InvalidDimensions {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
        /// Length of the provided buffer.
        len: usize,
    },

    /// Mask dimensions do not match the image they apply to.
    #[error("mask dimensions {mask_width}x{mask_height} do not match image {width}x{height}")]
    MaskDimensionMismatch {
        /// Image width.
        width: usize,
        /// Image height.
        height: usize,
        /// Mask width.
        mask_width: usize,
        /// Mask height.
        mask_height: usize,
    },

    /// Clip range with `min > max`.
    #[error("invalid value range: min {min} exceeds max {max}")]
    InvalidRange {
        /// Lower bound.
        min: f32,
        /// Upper bound.
        max: f32,
    },

    /// A background fill other than the image itself requires a mask.
    #[error("background '{0}' requires a mask")]
    MaskRequired(String),

    /// Region of interest with no points, or a crop with no pixels.
    #[error("empty region: {0}")]
    EmptyRegion(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    ConfigError(String),
}
