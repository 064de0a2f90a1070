//! Per-color membership masks.
//!
//! Classification mixes two sources:
//!
//! - [`DerivedChannels`], computed once per run from the (possibly
//!   darkened) image: exact luminance of every pixel, plus `[H, S, V]` when
//!   the HSV model is active
//! - the working buffer itself, for RGB band rules, read at the moment the
//!   rule runs
//!
//! Luminance and HSV rules therefore never see what earlier rules wrote,
//! while an RGB band rule tests pixels as earlier rules left them.

use swatch_core::{luminance_milli, rgb_to_hsv, PixelBuffer, CHANNELS};
use tracing::trace;

use crate::parallel::{for_each_pixel_mut, map_indices, map_pixels};
use crate::rules::{ColorModel, ColorRule};
use crate::{RecolorError, RecolorResult};

/// Per-pixel quantities computed once per run.
#[derive(Debug, Clone)]
pub struct DerivedChannels {
    model: ColorModel,
    luminance: Vec<u32>,
    hsv: Vec<[u8; 3]>,
}

impl DerivedChannels {
    /// Computes luminance, and HSV under [`ColorModel::Hsv`], for every
    /// pixel of `image`.
    pub fn compute(image: &PixelBuffer, model: ColorModel) -> Self {
        trace!(%model, pixels = image.pixel_count(), "derive channels");
        let data = image.data();
        let luminance = map_pixels(data, luminance_milli);
        let hsv = match model {
            ColorModel::Rgb => Vec::new(),
            ColorModel::Hsv => map_pixels(data, rgb_to_hsv),
        };
        Self {
            model,
            luminance,
            hsv,
        }
    }

    /// Model the band channels are expressed in.
    pub fn model(&self) -> ColorModel {
        self.model
    }

    /// Number of pixels.
    pub fn len(&self) -> usize {
        self.luminance.len()
    }

    /// `true` if there are no pixels.
    pub fn is_empty(&self) -> bool {
        self.luminance.is_empty()
    }

    /// Luminance of pixel `i` in thousandths.
    pub fn luminance(&self, i: usize) -> u32 {
        self.luminance[i]
    }

    /// Band channels of pixel `i`: the stored `[H, S, V]` under the HSV
    /// model, or the pixel as it currently stands in `current` under RGB.
    pub fn channels(&self, i: usize, current: &[u8]) -> [u8; 3] {
        match self.model {
            ColorModel::Rgb => {
                let p = &current[i * CHANNELS..(i + 1) * CHANNELS];
                [p[0], p[1], p[2]]
            }
            ColorModel::Hsv => self.hsv[i],
        }
    }
}

/// Boolean membership per pixel, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    bits: Vec<bool>,
}

impl Mask {
    /// Wraps explicit membership flags.
    pub fn from_bits(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// Membership of pixel `i`.
    #[inline]
    pub fn get(&self, i: usize) -> bool {
        self.bits[i]
    }

    /// Number of pixels covered.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// `true` if the mask covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Number of matched pixels.
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Flags as a slice.
    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }
}

fn check_len(image: &PixelBuffer, len: usize, what: &str) -> RecolorResult<()> {
    if len != image.pixel_count() {
        return Err(RecolorError::invalid_image(
            image.width(),
            image.height(),
            format!("{what} covers {len} pixels, image has {}", image.pixel_count()),
        ));
    }
    Ok(())
}

/// Computes the mask of `rule` over `current`, the working buffer.
///
/// The rule's `enabled` flag is not consulted here.
///
/// # Errors
///
/// [`RecolorError::InvalidImage`] if `derived` was computed for a different
/// pixel count.
pub fn compute_mask(
    rule: &ColorRule,
    derived: &DerivedChannels,
    current: &PixelBuffer,
) -> RecolorResult<Mask> {
    check_len(current, derived.len(), "derived channels")?;
    let data = current.data();
    let model = derived.model();
    let bits = map_indices(derived.len(), |i| {
        rule.matches(derived.luminance(i), derived.channels(i, data), model)
    });
    Ok(Mask { bits })
}

/// Writes `rgb` into every pixel of `image` selected by `mask`.
///
/// # Errors
///
/// [`RecolorError::InvalidImage`] if the mask length differs from the
/// image's pixel count.
pub fn apply_mask(image: &mut PixelBuffer, mask: &Mask, rgb: [u8; 3]) -> RecolorResult<()> {
    check_len(image, mask.len(), "mask")?;
    for_each_pixel_mut(image.data_mut(), |i, p| {
        if mask.get(i) {
            p[..CHANNELS].copy_from_slice(&rgb);
        }
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::ColorName;

    fn strip(pixels: &[[u8; 3]]) -> PixelBuffer {
        PixelBuffer::from_pixels(pixels.len() as u32, 1, pixels).unwrap()
    }

    #[test]
    fn test_luminance_mask() {
        let img = strip(&[[240, 240, 240], [241, 241, 241], [14, 14, 14], [15, 15, 15]]);
        let derived = DerivedChannels::compute(&img, ColorModel::Rgb);

        let white = compute_mask(&ColorRule::default_for(ColorName::White), &derived, &img).unwrap();
        assert_eq!(white.as_slice(), &[false, true, false, false]);

        let black = compute_mask(&ColorRule::default_for(ColorName::Black), &derived, &img).unwrap();
        assert_eq!(black.as_slice(), &[false, false, true, false]);
    }

    #[test]
    fn test_rgb_band_mask() {
        let img = strip(&[[200, 50, 50], [100, 50, 50], [200, 200, 50]]);
        let derived = DerivedChannels::compute(&img, ColorModel::Rgb);
        let red = compute_mask(&ColorRule::default_for(ColorName::Red), &derived, &img).unwrap();
        assert_eq!(red.as_slice(), &[true, false, false]);
        assert_eq!(red.count(), 1);
    }

    #[test]
    fn test_rgb_band_reads_current_buffer() {
        let img = strip(&[[230, 230, 20]]);
        let derived = DerivedChannels::compute(&img, ColorModel::Rgb);
        let red = ColorRule::default_for(ColorName::Red);
        assert_eq!(compute_mask(&red, &derived, &img).unwrap().count(), 0);

        let mut out = img.clone();
        out.set_pixel(0, 0, [200, 50, 50]);
        assert_eq!(compute_mask(&red, &derived, &out).unwrap().count(), 1);
    }

    #[test]
    fn test_hsv_ignores_current_buffer() {
        let img = strip(&[[255, 15, 0]]);
        let derived = DerivedChannels::compute(&img, ColorModel::Hsv);
        let mut out = img.clone();
        out.set_pixel(0, 0, [0, 0, 255]);
        assert_eq!(derived.channels(0, out.data()), [2, 255, 255]);

        let red = ColorRule::default_for(ColorName::Red);
        assert_eq!(compute_mask(&red, &derived, &out).unwrap().count(), 1);
    }

    #[test]
    fn test_hsv_red_wraps() {
        // hue 2, hue 250, hue 42 (yellow), gray
        let img = strip(&[[255, 15, 0], [255, 0, 27], [255, 255, 0], [128, 128, 128]]);
        let derived = DerivedChannels::compute(&img, ColorModel::Hsv);
        assert_eq!(derived.channels(0, img.data())[0], 2);
        assert_eq!(derived.channels(1, img.data())[0], 250);

        let red = compute_mask(&ColorRule::default_for(ColorName::Red), &derived, &img).unwrap();
        assert_eq!(red.as_slice(), &[true, true, false, false]);

        let yellow =
            compute_mask(&ColorRule::default_for(ColorName::Yellow), &derived, &img).unwrap();
        assert_eq!(yellow.as_slice(), &[false, false, true, false]);
    }

    #[test]
    fn test_apply_mask() {
        let mut img = strip(&[[1, 1, 1], [2, 2, 2], [3, 3, 3]]);
        let mask = Mask::from_bits(vec![false, true, true]);
        apply_mask(&mut img, &mask, [9, 8, 7]).unwrap();
        assert_eq!(img.pixel(0, 0), [1, 1, 1]);
        assert_eq!(img.pixel(1, 0), [9, 8, 7]);
        assert_eq!(img.pixel(2, 0), [9, 8, 7]);
    }

    #[test]
    fn test_length_mismatch_is_an_error() {
        let mut img = strip(&[[1, 1, 1]]);
        let err = apply_mask(&mut img, &Mask::from_bits(vec![true, true]), [0, 0, 0]).unwrap_err();
        assert!(err.is_invalid_image());
        assert_eq!(img.pixel(0, 0), [1, 1, 1]);

        let other = strip(&[[1, 1, 1], [2, 2, 2]]);
        let derived = DerivedChannels::compute(&other, ColorModel::Hsv);
        let white = ColorRule::default_for(ColorName::White);
        assert!(compute_mask(&white, &derived, &img).unwrap_err().is_invalid_image());
    }
}
