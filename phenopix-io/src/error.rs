//! I/O error types.

use thiserror::Error;

/// Result type for I/O operations.
pub type Result<T> = std::result::Result<T, Error>;

/// I/O error types.
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image decode/encode error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Results serialization error.
    #[error("results serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Core library error.
    #[error("core error: {0}")]
    CoreError(#[from] phenopix_core::Error),
}
