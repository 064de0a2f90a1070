//! Per-pixel color math on 8-bit RGB triples.
//!
//! - [`luminance_milli`] - exact BT.601 luma in thousandths
//! - [`rgb_to_hsv`] - 8-bit HSV in the Pillow convention
//! - [`parse_hex`] / [`to_hex`] - `#RRGGBB` color strings

/// BT.601 luma weight for red, in thousandths (0.299).
pub const LUMA_R_MILLI: u32 = 299;

/// BT.601 luma weight for green, in thousandths (0.587).
pub const LUMA_G_MILLI: u32 = 587;

/// BT.601 luma weight for blue, in thousandths (0.114).
pub const LUMA_B_MILLI: u32 = 114;

/// Luma `0.299 R + 0.587 G + 0.114 B` scaled by 1000.
///
/// Integer arithmetic keeps the value exact, so comparing against
/// `threshold * 1000` behaves like comparing the real-valued luma against
/// `threshold` with no rounding error at the boundary.
///
/// # Example
///
/// ```
/// use swatch_core::pixel::luminance_milli;
///
/// assert_eq!(luminance_milli([240, 240, 240]), 240_000);
/// assert_eq!(luminance_milli([255, 0, 0]), 76_245);
/// ```
#[inline]
pub fn luminance_milli(rgb: [u8; 3]) -> u32 {
    rgb[0] as u32 * LUMA_R_MILLI + rgb[1] as u32 * LUMA_G_MILLI + rgb[2] as u32 * LUMA_B_MILLI
}

/// Converts an RGB triple to 8-bit `[H, S, V]`, each channel in `[0, 255]`.
///
/// Matches Pillow's `Image.convert("HSV")` bit for bit:
///
/// - `V = max(R, G, B)`
/// - achromatic pixels (`max == min`) get `H = S = 0`
/// - `S = trunc(255 * (max - min) / max)`
/// - hue is the sextant position scaled so a full turn is 255, truncated
///
/// The per-channel ratios are `f32`; the sextant offset, the wrap into
/// `[0, 1)` and both final scalings are `f64`, stored back to `f32` in
/// between. An all-`f32` chain is one step low on some whole hues.
///
/// Pure red sits at `H = 0`; hues just below red wrap to the top of the
/// range (around 245-255).
///
/// # Example
///
/// ```
/// use swatch_core::pixel::rgb_to_hsv;
///
/// assert_eq!(rgb_to_hsv([255, 0, 0]), [0, 255, 255]);
/// assert_eq!(rgb_to_hsv([128, 128, 128]), [0, 0, 128]);
/// assert_eq!(rgb_to_hsv([255, 0, 27]), [250, 255, 255]);
/// assert_eq!(rgb_to_hsv([0, 4, 5]), [136, 255, 5]);
/// ```
pub fn rgb_to_hsv(rgb: [u8; 3]) -> [u8; 3] {
    let [r, g, b] = rgb;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    if max == min {
        return [0, 0, max];
    }

    let cr = (max - min) as f32;
    let s = cr / max as f32;
    let rc = (max - r) as f32 / cr;
    let gc = (max - g) as f32 / cr;
    let bc = (max - b) as f32 / cr;

    let h = if r == max {
        bc - gc
    } else if g == max {
        (2.0 + rc as f64 - bc as f64) as f32
    } else {
        (4.0 + gc as f64 - rc as f64) as f32
    };
    // h/6 lies in (-1/6, 5/6], so the shifted value is always positive
    let h = ((h as f64 / 6.0 + 1.0) % 1.0) as f32;

    [trunc_u8(h as f64 * 255.0), trunc_u8(s as f64 * 255.0), max]
}

#[inline]
fn trunc_u8(v: f64) -> u8 {
    (v as i32).clamp(0, 255) as u8
}

/// Parses `#RRGGBB` (the `#` is optional, hex digits in either case).
///
/// # Example
///
/// ```
/// use swatch_core::pixel::parse_hex;
///
/// assert_eq!(parse_hex("#2A2A2A"), Some([42, 42, 42]));
/// assert_eq!(parse_hex("ff6666"), Some([255, 102, 102]));
/// assert_eq!(parse_hex("#12345"), None);
/// ```
pub fn parse_hex(s: &str) -> Option<[u8; 3]> {
    let hex = s.trim().strip_prefix('#').unwrap_or(s.trim());
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}

/// Formats a triple as uppercase `#RRGGBB`.
pub fn to_hex(rgb: [u8; 3]) -> String {
    format!("#{:02X}{:02X}{:02X}", rgb[0], rgb[1], rgb[2])
}
