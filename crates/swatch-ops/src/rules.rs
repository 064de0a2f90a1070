//! Color rules: what a pixel must look like to be recolored, and what it
//! becomes.
//!
//! Every rule belongs to one of six named colors. White and black are
//! matched by a strict luminance threshold; yellow, red, green and blue are
//! matched by inclusive per-channel bands, in RGB or HSV depending on the
//! active [`ColorModel`].
//!
//! # Example
//!
//! ```rust
//! use swatch_ops::rules::{ColorName, ColorModel, ColorRule};
//!
//! let red = ColorRule::default_for(ColorName::Red);
//! assert!(!red.enabled);
//! // [H, S, V] with hue 250 sits in red's upper hue range
//! assert!(red.matches(0, [250, 255, 255], ColorModel::Hsv));
//! ```

use std::fmt;
use std::str::FromStr;

use crate::{RecolorError, RecolorResult};

// ============================================================================
// Names and models
// ============================================================================

/// The recognized colors, in default declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorName {
    /// Bright pixels, luminance above a threshold.
    White,
    /// Dark pixels, luminance below a threshold.
    Black,
    /// Yellow band.
    Yellow,
    /// Red band; in HSV its hue wraps around 0.
    Red,
    /// Green band.
    Green,
    /// Blue band.
    Blue,
}

impl ColorName {
    /// All colors in default declaration order.
    pub const ALL: [ColorName; 6] = [
        ColorName::White,
        ColorName::Black,
        ColorName::Yellow,
        ColorName::Red,
        ColorName::Green,
        ColorName::Blue,
    ];

    /// Lowercase name as used in settings files.
    pub fn as_str(self) -> &'static str {
        match self {
            ColorName::White => "white",
            ColorName::Black => "black",
            ColorName::Yellow => "yellow",
            ColorName::Red => "red",
            ColorName::Green => "green",
            ColorName::Blue => "blue",
        }
    }

    /// `true` for white and black, which use luminance rules.
    pub fn is_luminance(self) -> bool {
        matches!(self, ColorName::White | ColorName::Black)
    }
}

impl fmt::Display for ColorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ColorName {
    type Err = RecolorError;

    fn from_str(s: &str) -> RecolorResult<Self> {
        ColorName::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| RecolorError::invalid_config(format!("unknown color: {s}")))
    }
}

/// Color model used for band membership tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorModel {
    /// Test R, G, B channels directly.
    Rgb,
    /// Test 8-bit hue, saturation and value.
    #[default]
    Hsv,
}

impl ColorModel {
    /// Lowercase name as used in settings files.
    pub fn as_str(self) -> &'static str {
        match self {
            ColorModel::Rgb => "rgb",
            ColorModel::Hsv => "hsv",
        }
    }
}

impl fmt::Display for ColorModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ColorModel {
    type Err = RecolorError;

    fn from_str(s: &str) -> RecolorResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rgb" => Ok(ColorModel::Rgb),
            "hsv" => Ok(ColorModel::Hsv),
            other => Err(RecolorError::invalid_config(format!(
                "unknown color model: {other} (expected rgb or hsv)"
            ))),
        }
    }
}

// ============================================================================
// Bands
// ============================================================================

/// Inclusive `[min, max]` range over one 8-bit channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelRange {
    /// Lower bound (inclusive).
    pub min: u8,
    /// Upper bound (inclusive).
    pub max: u8,
}

impl ChannelRange {
    /// The full `[0, 255]` range.
    pub const FULL: ChannelRange = ChannelRange { min: 0, max: 255 };

    /// Creates a range. Bounds are not checked here; see
    /// [`validate`](Self::validate).
    pub const fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }

    /// Inclusive membership test.
    #[inline]
    pub fn contains(&self, v: u8) -> bool {
        self.min <= v && v <= self.max
    }

    /// Rejects `min > max`. `what` names the range in the error.
    pub fn validate(&self, what: &str) -> RecolorResult<()> {
        if self.min > self.max {
            return Err(RecolorError::invalid_config(format!(
                "{what}: min {} > max {}",
                self.min, self.max
            )));
        }
        Ok(())
    }

    /// `[min, max]` as an array.
    pub fn to_array(self) -> [u8; 2] {
        [self.min, self.max]
    }
}

impl From<[u8; 2]> for ChannelRange {
    fn from(v: [u8; 2]) -> Self {
        Self::new(v[0], v[1])
    }
}

/// Band over R, G and B; all three must hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RgbBand {
    /// Red range.
    pub r: ChannelRange,
    /// Green range.
    pub g: ChannelRange,
    /// Blue range.
    pub b: ChannelRange,
}

impl RgbBand {
    /// Membership of an RGB triple.
    #[inline]
    pub fn contains(&self, rgb: [u8; 3]) -> bool {
        self.r.contains(rgb[0]) && self.g.contains(rgb[1]) && self.b.contains(rgb[2])
    }

    fn validate(&self, name: ColorName) -> RecolorResult<()> {
        self.r.validate(&format!("{name} rgb.r"))?;
        self.g.validate(&format!("{name} rgb.g"))?;
        self.b.validate(&format!("{name} rgb.b"))
    }
}

/// Hue selection for an HSV band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HueRange {
    /// One contiguous hue range.
    Single(ChannelRange),
    /// Two ranges joined by OR, used to straddle the hue wrap point.
    Wrapped(ChannelRange, ChannelRange),
}

impl HueRange {
    /// Membership of a hue value.
    #[inline]
    pub fn contains(&self, h: u8) -> bool {
        match self {
            HueRange::Single(r) => r.contains(h),
            HueRange::Wrapped(a, b) => a.contains(h) || b.contains(h),
        }
    }
}

/// Band over hue, saturation and value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HsvBand {
    /// Hue selection.
    pub hue: HueRange,
    /// Saturation range.
    pub s: ChannelRange,
    /// Value range.
    pub v: ChannelRange,
}

impl HsvBand {
    /// Membership of an `[H, S, V]` triple.
    #[inline]
    pub fn contains(&self, hsv: [u8; 3]) -> bool {
        self.hue.contains(hsv[0]) && self.s.contains(hsv[1]) && self.v.contains(hsv[2])
    }

    fn validate(&self, name: ColorName) -> RecolorResult<()> {
        match self.hue {
            HueRange::Single(h) => h.validate(&format!("{name} hsv.h"))?,
            HueRange::Wrapped(h1, h2) => {
                if name != ColorName::Red {
                    return Err(RecolorError::invalid_config(format!(
                        "{name}: only red may use two hue ranges"
                    )));
                }
                h1.validate(&format!("{name} hsv.h"))?;
                h2.validate(&format!("{name} hsv.h2"))?;
            }
        }
        self.s.validate(&format!("{name} hsv.s"))?;
        self.v.validate(&format!("{name} hsv.v"))
    }
}

// ============================================================================
// Rules
// ============================================================================

/// Which side of a luminance threshold matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// `luminance > threshold`
    Above,
    /// `luminance < threshold`
    Below,
}

/// How a rule decides membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// Strict luminance threshold.
    Luminance {
        /// Threshold on the `[0, 255]` luma scale.
        threshold: u8,
        /// Matching side.
        direction: Direction,
    },
    /// Channel bands for both color models; the active model picks one.
    Band {
        /// Used under [`ColorModel::Rgb`].
        rgb: RgbBand,
        /// Used under [`ColorModel::Hsv`].
        hsv: HsvBand,
    },
}

impl RuleKind {
    /// Strict threshold test on luminance in thousandths (see
    /// [`swatch_core::luminance_milli`]). Always `false` for band rules.
    #[inline]
    pub fn matches_luminance(&self, luma_milli: u32) -> bool {
        match *self {
            RuleKind::Luminance {
                threshold,
                direction,
            } => {
                let t = threshold as u32 * 1000;
                match direction {
                    Direction::Above => luma_milli > t,
                    Direction::Below => luma_milli < t,
                }
            }
            RuleKind::Band { .. } => false,
        }
    }
}

/// One color's matching rule and replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorRule {
    /// Which color this rule describes.
    pub name: ColorName,
    /// Disabled rules are skipped.
    pub enabled: bool,
    /// Membership test.
    pub kind: RuleKind,
    /// RGB color written to matching pixels, whatever the model.
    pub replacement: [u8; 3],
}

impl ColorRule {
    /// The default rule for `name`.
    pub fn default_for(name: ColorName) -> Self {
        let sv = ChannelRange::new(100, 255);
        let low = ChannelRange::new(0, 100);
        let band = |rgb: [ChannelRange; 3], hue: HueRange| RuleKind::Band {
            rgb: RgbBand {
                r: rgb[0],
                g: rgb[1],
                b: rgb[2],
            },
            hsv: HsvBand { hue, s: sv, v: sv },
        };

        let (enabled, kind, replacement) = match name {
            ColorName::White => (
                true,
                RuleKind::Luminance {
                    threshold: 240,
                    direction: Direction::Above,
                },
                [0x2A, 0x2A, 0x2A],
            ),
            ColorName::Black => (
                true,
                RuleKind::Luminance {
                    threshold: 15,
                    direction: Direction::Below,
                },
                [0xFF, 0xFF, 0xFF],
            ),
            ColorName::Yellow => (
                false,
                band(
                    [ChannelRange::new(200, 255), ChannelRange::new(200, 255), low],
                    HueRange::Single(ChannelRange::new(25, 45)),
                ),
                [0xFF, 0xFF, 0x99],
            ),
            ColorName::Red => (
                false,
                band(
                    [ChannelRange::new(150, 255), low, low],
                    HueRange::Wrapped(ChannelRange::new(0, 10), ChannelRange::new(245, 255)),
                ),
                [0xFF, 0x66, 0x66],
            ),
            ColorName::Green => (
                false,
                band(
                    [low, ChannelRange::new(150, 255), low],
                    HueRange::Single(ChannelRange::new(60, 100)),
                ),
                [0x66, 0xFF, 0x66],
            ),
            ColorName::Blue => (
                false,
                band(
                    [low, low, ChannelRange::new(150, 255)],
                    HueRange::Single(ChannelRange::new(140, 180)),
                ),
                [0x66, 0x66, 0xFF],
            ),
        };

        Self {
            name,
            enabled,
            kind,
            replacement,
        }
    }

    /// Membership of one pixel.
    ///
    /// `luma_milli` is the pixel's luminance in thousandths; `channels` is
    /// the pixel in the active `model` (`[R, G, B]` or `[H, S, V]`). Each
    /// rule kind reads only the input it needs.
    #[inline]
    pub fn matches(&self, luma_milli: u32, channels: [u8; 3], model: ColorModel) -> bool {
        match &self.kind {
            RuleKind::Luminance { .. } => self.kind.matches_luminance(luma_milli),
            RuleKind::Band { rgb, hsv } => match model {
                ColorModel::Rgb => rgb.contains(channels),
                ColorModel::Hsv => hsv.contains(channels),
            },
        }
    }

    /// Checks ranges and that the rule kind fits the color.
    pub fn validate(&self) -> RecolorResult<()> {
        match &self.kind {
            RuleKind::Luminance { direction, .. } => {
                let expected = match self.name {
                    ColorName::White => Direction::Above,
                    ColorName::Black => Direction::Below,
                    other => {
                        return Err(RecolorError::invalid_config(format!(
                            "{other}: luminance rules are only for white and black"
                        )));
                    }
                };
                if *direction != expected {
                    return Err(RecolorError::invalid_config(format!(
                        "{}: luminance direction must be {:?}",
                        self.name, expected
                    )));
                }
                Ok(())
            }
            RuleKind::Band { rgb, hsv } => {
                if self.name.is_luminance() {
                    return Err(RecolorError::invalid_config(format!(
                        "{}: must use a luminance threshold, not a band",
                        self.name
                    )));
                }
                rgb.validate(self.name)?;
                hsv.validate(self.name)
            }
        }
    }
}

/// Default rules for all colors, in declaration order.
pub fn default_rules() -> Vec<ColorRule> {
    ColorName::ALL.into_iter().map(ColorRule::default_for).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_inclusive() {
        let r = ChannelRange::new(10, 20);
        assert!(r.contains(10));
        assert!(r.contains(20));
        assert!(!r.contains(9));
        assert!(!r.contains(21));
    }

    #[test]
    fn test_range_validate() {
        assert!(ChannelRange::new(5, 5).validate("x").is_ok());
        let err = ChannelRange::new(6, 5).validate("red rgb.r").unwrap_err();
        assert!(err.is_invalid_config());
        assert!(err.to_string().contains("red rgb.r"));
    }

    #[test]
    fn test_luminance_is_strict() {
        let white = ColorRule::default_for(ColorName::White);
        assert!(!white.kind.matches_luminance(240_000));
        assert!(white.kind.matches_luminance(240_001));

        let black = ColorRule::default_for(ColorName::Black);
        assert!(!black.kind.matches_luminance(15_000));
        assert!(black.kind.matches_luminance(14_999));
    }

    #[test]
    fn test_wrapped_hue() {
        let hue = HueRange::Wrapped(ChannelRange::new(0, 10), ChannelRange::new(245, 255));
        assert!(hue.contains(2));
        assert!(hue.contains(250));
        assert!(!hue.contains(128));
    }

    #[test]
    fn test_band_is_conjunctive() {
        let red = ColorRule::default_for(ColorName::Red);
        assert!(red.matches(0, [200, 50, 50], ColorModel::Rgb));
        assert!(!red.matches(0, [200, 150, 50], ColorModel::Rgb));
        assert!(red.matches(0, [2, 200, 200], ColorModel::Hsv));
        assert!(!red.matches(0, [2, 50, 200], ColorModel::Hsv));
    }

    #[test]
    fn test_luminance_rule_ignores_channels() {
        let white = ColorRule::default_for(ColorName::White);
        // channels say black, luminance says bright
        assert!(white.matches(241_000, [0, 0, 0], ColorModel::Rgb));
        assert!(!white.matches(240_000, [255, 255, 255], ColorModel::Hsv));
    }

    #[test]
    fn test_defaults_are_valid() {
        let rules = default_rules();
        assert_eq!(rules.len(), 6);
        assert_eq!(rules[0].name, ColorName::White);
        assert_eq!(rules[5].name, ColorName::Blue);
        for rule in &rules {
            rule.validate().unwrap();
        }
        assert_eq!(rules.iter().filter(|r| r.enabled).count(), 2);
    }

    #[test]
    fn test_wrapped_hue_only_for_red() {
        let mut green = ColorRule::default_for(ColorName::Green);
        if let RuleKind::Band { hsv, .. } = &mut green.kind {
            hsv.hue = HueRange::Wrapped(ChannelRange::new(0, 5), ChannelRange::new(250, 255));
        }
        assert!(green.validate().unwrap_err().is_invalid_config());
    }

    #[test]
    fn test_kind_must_fit_name() {
        let mut white = ColorRule::default_for(ColorName::White);
        white.kind = ColorRule::default_for(ColorName::Blue).kind;
        assert!(white.validate().is_err());

        let mut blue = ColorRule::default_for(ColorName::Blue);
        blue.kind = ColorRule::default_for(ColorName::White).kind;
        assert!(blue.validate().is_err());
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("Yellow".parse::<ColorName>().unwrap(), ColorName::Yellow);
        assert!("purple".parse::<ColorName>().is_err());
        assert_eq!("RGB".parse::<ColorModel>().unwrap(), ColorModel::Rgb);
        assert_eq!(ColorModel::default(), ColorModel::Hsv);
    }
}
