//! Global darkening pre-pass.
//!
//! Every channel of every pixel is scaled by the same factor in `(0, 1]`:
//! `round(c * f)`, clamped to `[0, 255]`. Computed in `f32`, so no
//! intermediate overflows the byte range.

use swatch_core::PixelBuffer;
use tracing::trace;

use crate::parallel::for_each_pixel_mut;
use crate::{RecolorError, RecolorResult};

/// Scales one channel.
///
/// ```
/// use swatch_ops::darken::darken_channel;
///
/// assert_eq!(darken_channel(200, 0.5), 100);
/// assert_eq!(darken_channel(255, 0.5), 128); // 127.5 rounds away from zero
/// assert_eq!(darken_channel(7, 1.0), 7);
/// ```
#[inline]
pub fn darken_channel(c: u8, factor: f32) -> u8 {
    (c as f32 * factor).round().clamp(0.0, 255.0) as u8
}

/// Darkens `image` in place.
///
/// A factor of exactly `1.0` leaves the buffer untouched.
///
/// # Errors
///
/// [`RecolorError::InvalidConfig`] if `factor` is not in `(0, 1]`.
pub fn darken(image: &mut PixelBuffer, factor: f32) -> RecolorResult<()> {
    if !(factor > 0.0 && factor <= 1.0) {
        return Err(RecolorError::invalid_config(format!(
            "darken factor {factor} outside (0, 1]"
        )));
    }
    if factor == 1.0 {
        return Ok(());
    }

    trace!(factor, width = image.width(), height = image.height(), "darken");
    for_each_pixel_mut(image.data_mut(), |_, p| {
        for c in p.iter_mut() {
            *c = darken_channel(*c, factor);
        }
    });
    Ok(())
}
