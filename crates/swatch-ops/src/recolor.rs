//! The region recolorer.
//!
//! ```text
//! image + settings -> validate -> darken -> derive channels
//!                  -> for each enabled rule, in order: mask, overwrite
//! ```
//!
//! Masks are written as soon as they are computed, so a pixel matched by
//! several rules keeps the replacement of the last one in declared order.
//! Luminance and HSV tests read the darkened image; RGB band tests read the
//! working buffer, and so see replacements written by earlier rules.
//!
//! # Example
//!
//! ```rust
//! use swatch_core::PixelBuffer;
//! use swatch_ops::{recolor, ColorModel, Settings};
//!
//! let img = PixelBuffer::from_pixels(2, 1, &[[250, 250, 250], [5, 5, 5]]).unwrap();
//! let out = recolor(&img, &Settings::new(ColorModel::Hsv)).unwrap();
//!
//! // default white -> #2A2A2A, black -> #FFFFFF
//! assert_eq!(out.pixel(0, 0), [0x2A, 0x2A, 0x2A]);
//! assert_eq!(out.pixel(1, 0), [0xFF, 0xFF, 0xFF]);
//! ```

use swatch_core::PixelBuffer;
use tracing::{debug, info, trace};

use crate::darken::darken;
use crate::mask::{apply_mask, compute_mask, DerivedChannels};
use crate::rules::ColorName;
use crate::settings::Settings;
use crate::{RecolorError, RecolorResult};

/// Pixels matched by one applied rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleMatch {
    /// Rule color.
    pub name: ColorName,
    /// Pixels whose membership test held, including ones a later rule
    /// overwrote again.
    pub pixels: usize,
}

/// Summary of a recolor run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecolorReport {
    /// Whether the darkening pre-pass ran.
    pub darkened: bool,
    /// One entry per enabled rule, in application order.
    pub matches: Vec<RuleMatch>,
}

impl RecolorReport {
    /// Matched pixel count for `name`, if that rule was applied.
    pub fn matched(&self, name: ColorName) -> Option<usize> {
        self.matches.iter().find(|m| m.name == name).map(|m| m.pixels)
    }
}

/// Recolors `image` according to `settings`.
///
/// The input is never modified; the result has the same dimensions.
///
/// # Errors
///
/// - [`RecolorError::InvalidImage`] if the image has zero width or height
/// - [`RecolorError::InvalidConfig`] if [`Settings::validate`] fails
pub fn recolor(image: &PixelBuffer, settings: &Settings) -> RecolorResult<PixelBuffer> {
    recolor_with_report(image, settings).map(|(out, _)| out)
}

/// Like [`recolor`], also reporting how many pixels each rule matched.
pub fn recolor_with_report(
    image: &PixelBuffer,
    settings: &Settings,
) -> RecolorResult<(PixelBuffer, RecolorReport)> {
    trace!(
        width = image.width(),
        height = image.height(),
        model = %settings.color_model,
        darken = settings.darken_factor,
        "recolor"
    );

    if image.is_empty() {
        return Err(RecolorError::invalid_image(
            image.width(),
            image.height(),
            "zero-area image",
        ));
    }
    settings.validate()?;

    let mut out = image.clone();
    let mut report = RecolorReport::default();

    if settings.darken_factor < 1.0 {
        darken(&mut out, settings.darken_factor)?;
        report.darkened = true;
    }

    let derived = DerivedChannels::compute(&out, settings.color_model);

    for rule in settings.enabled_rules() {
        let mask = compute_mask(rule, &derived, &out)?;
        apply_mask(&mut out, &mask, rule.replacement)?;

        let pixels = mask.count();
        debug!(color = %rule.name, pixels, "applied rule");
        report.matches.push(RuleMatch {
            name: rule.name,
            pixels,
        });
    }

    info!(
        width = out.width(),
        height = out.height(),
        rules = report.matches.len(),
        darkened = report.darkened,
        "recolor complete"
    );
    Ok((out, report))
}
