//! # swatch-ops
//!
//! Selective recoloring of 8-bit RGB images.
//!
//! A run takes a [`PixelBuffer`](swatch_core::PixelBuffer) and [`Settings`]
//! and returns a new buffer in which every pixel matched by an enabled
//! color rule is replaced by that rule's RGB color.
//!
//! # Modules
//!
//! - [`rules`] - color names, bands, luminance thresholds, defaults
//! - [`settings`] - ordered rule list, darken factor, YAML loading
//! - [`darken`] - global darkening pre-pass
//! - [`mask`] - derived channels and per-rule masks
//! - [`recolor`](mod@recolor) - the full transform
//!
//! # Example
//!
//! ```rust
//! use swatch_core::PixelBuffer;
//! use swatch_ops::{recolor, ColorModel, ColorName, Settings};
//!
//! let img = PixelBuffer::from_pixels(1, 1, &[[220, 40, 30]]).unwrap();
//!
//! let mut settings = Settings::new(ColorModel::Rgb);
//! settings.set_enabled(ColorName::Red, true);
//! settings.set_replacement(ColorName::Red, [0, 0, 255]);
//!
//! let out = recolor(&img, &settings).unwrap();
//! assert_eq!(out.pixel(0, 0), [0, 0, 255]);
//! ```
//!
//! # Features
//!
//! - `parallel` (default) - per-pixel work runs on the Rayon pool. Rules are
//!   always applied one after another in declared order.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod parallel;
pub mod darken;
pub mod mask;
pub mod recolor;
pub mod rules;
pub mod settings;

pub use error::{RecolorError, RecolorResult};
pub use mask::{DerivedChannels, Mask};
pub use recolor::{recolor, recolor_with_report, RecolorReport, RuleMatch};
pub use rules::{
    ChannelRange, ColorModel, ColorName, ColorRule, Direction, HsvBand, HueRange, RgbBand,
    RuleKind,
};
pub use settings::Settings;
