//! I/O error types.

use std::io;
use thiserror::Error;

/// Result type for image I/O.
pub type IoResult<T> = Result<T, IoError>;

/// Errors raised while reading or writing images.
#[derive(Debug, Error)]
pub enum IoError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Extension not mapped to a writable format.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Decoder or encoder failure from the `image` crate.
    #[error("codec error: {0}")]
    Codec(#[from] image::ImageError),

    /// Decoded pixels did not form a valid buffer.
    #[error(transparent)]
    Core(#[from] swatch_core::Error),
}
