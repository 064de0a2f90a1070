//! # swatch-core
//!
//! Core types for selective image recoloring.
//!
//! - [`PixelBuffer`] - packed 8-bit RGB image buffer
//! - [`pixel`] - luma, 8-bit HSV and hex color helpers
//! - [`Error`] - buffer construction and access errors
//!
//! ## Crate Structure
//!
//! ```text
//! swatch-core (this crate)
//!    ^
//!    |
//!    +-- swatch-ops (rules, masks, recolor)
//!    +-- swatch-io (decode, resize, encode)
//!    +-- swatch-cli
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod buffer;
pub mod error;
pub mod pixel;

pub use buffer::{PixelBuffer, CHANNELS};
pub use error::*;
pub use pixel::{luminance_milli, parse_hex, rgb_to_hsv, to_hex};

/// Prelude module for convenient imports.
///
/// ```
/// use swatch_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::buffer::PixelBuffer;
    pub use crate::error::{Error, Result};
    pub use crate::pixel::{luminance_milli, parse_hex, rgb_to_hsv, to_hex};
}
