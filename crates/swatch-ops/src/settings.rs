//! Recolor settings: darken factor, color model and the ordered rule list.
//!
//! Settings can be built in code or loaded from YAML:
//!
//! ```yaml
//! darken: 0.9
//! model: hsv
//! colors:
//!   - name: white
//!     threshold: 235
//!   - name: red
//!     enabled: true
//!     replacement: "#FF6666"
//!     hsv:
//!       h: [0, 10]
//!       h2: [245, 255]
//!       s: [100, 255]
//!       v: [100, 255]
//! ```
//!
//! When `colors` is present it is the complete rule list, in that order.
//! Any field left out of an entry keeps that color's default.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use swatch_core::{parse_hex, to_hex};
use tracing::debug;

use crate::rules::{
    default_rules, ChannelRange, ColorModel, ColorName, ColorRule, HueRange, RuleKind,
};
use crate::{RecolorError, RecolorResult};

/// Full configuration for one recolor run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Global channel scale in `(0, 1]`, applied before classification.
    pub darken_factor: f32,
    /// Model used for band rules.
    pub color_model: ColorModel,
    /// Rules in application order; later matches win.
    pub rules: Vec<ColorRule>,
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(ColorModel::default())
    }
}

impl Settings {
    /// Default rules, no darkening.
    pub fn new(color_model: ColorModel) -> Self {
        Self {
            darken_factor: 1.0,
            color_model,
            rules: default_rules(),
        }
    }

    /// Settings with no rules at all.
    pub fn empty(color_model: ColorModel) -> Self {
        Self {
            darken_factor: 1.0,
            color_model,
            rules: Vec::new(),
        }
    }

    /// Builder-style darken factor.
    pub fn with_darken(mut self, factor: f32) -> Self {
        self.darken_factor = factor;
        self
    }

    /// Builder-style rule append.
    pub fn with_rule(mut self, rule: ColorRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Looks up the rule for `name`.
    pub fn rule(&self, name: ColorName) -> Option<&ColorRule> {
        self.rules.iter().find(|r| r.name == name)
    }

    /// Mutable lookup of the rule for `name`.
    pub fn rule_mut(&mut self, name: ColorName) -> Option<&mut ColorRule> {
        self.rules.iter_mut().find(|r| r.name == name)
    }

    /// Enables or disables `name`, appending its default rule if absent.
    pub fn set_enabled(&mut self, name: ColorName, enabled: bool) {
        self.rule_or_default(name).enabled = enabled;
    }

    /// Sets the replacement of `name`, appending its default rule if absent.
    pub fn set_replacement(&mut self, name: ColorName, rgb: [u8; 3]) {
        self.rule_or_default(name).replacement = rgb;
    }

    fn rule_or_default(&mut self, name: ColorName) -> &mut ColorRule {
        let idx = match self.rules.iter().position(|r| r.name == name) {
            Some(idx) => idx,
            None => {
                self.rules.push(ColorRule::default_for(name));
                self.rules.len() - 1
            }
        };
        &mut self.rules[idx]
    }

    /// Enabled rules in application order.
    pub fn enabled_rules(&self) -> impl Iterator<Item = &ColorRule> {
        self.rules.iter().filter(|r| r.enabled)
    }

    /// Checks every precondition `recolor` relies on.
    ///
    /// # Errors
    ///
    /// [`RecolorError::InvalidConfig`] when the darken factor is outside
    /// `(0, 1]`, a color appears twice, or a rule fails
    /// [`ColorRule::validate`].
    pub fn validate(&self) -> RecolorResult<()> {
        let f = self.darken_factor;
        if !(f > 0.0 && f <= 1.0) {
            return Err(RecolorError::invalid_config(format!(
                "darken factor {f} outside (0, 1]"
            )));
        }

        let mut seen = HashSet::new();
        for rule in &self.rules {
            if !seen.insert(rule.name) {
                return Err(RecolorError::invalid_config(format!(
                    "{} declared more than once",
                    rule.name
                )));
            }
            rule.validate()?;
        }
        Ok(())
    }

    /// Loads and validates settings from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> RecolorResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading settings");
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parses and validates settings from YAML.
    pub fn from_yaml_str(yaml: &str) -> RecolorResult<Self> {
        let raw: RawSettings = serde_yaml::from_str(yaml)?;
        let settings = Self::from_raw(raw)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serializes to YAML in the same layout [`from_yaml_str`](Self::from_yaml_str) reads.
    pub fn to_yaml_string(&self) -> RecolorResult<String> {
        Ok(serde_yaml::to_string(&self.to_raw())?)
    }

    fn from_raw(raw: RawSettings) -> RecolorResult<Self> {
        let color_model = match raw.model.as_deref() {
            Some(m) => m.parse()?,
            None => ColorModel::default(),
        };
        let rules = match raw.colors {
            Some(colors) => colors
                .into_iter()
                .map(RawRule::into_rule)
                .collect::<RecolorResult<Vec<_>>>()?,
            None => default_rules(),
        };
        Ok(Self {
            darken_factor: raw.darken.unwrap_or(1.0),
            color_model,
            rules,
        })
    }

    fn to_raw(&self) -> RawSettings {
        RawSettings {
            darken: Some(self.darken_factor),
            model: Some(self.color_model.to_string()),
            colors: Some(self.rules.iter().map(RawRule::from_rule).collect()),
        }
    }
}

// ============================================================================
// Raw YAML structures
// ============================================================================

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    darken: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    colors: Option<Vec<RawRule>>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRule {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    replacement: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    threshold: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rgb: Option<RawRgbBand>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    hsv: Option<RawHsvBand>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRgbBand {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    r: Option<[u8; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    g: Option<[u8; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    b: Option<[u8; 2]>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawHsvBand {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    h: Option<[u8; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    h2: Option<[u8; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    s: Option<[u8; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    v: Option<[u8; 2]>,
}

impl RawRule {
    fn into_rule(self) -> RecolorResult<ColorRule> {
        let name: ColorName = self.name.parse()?;
        let mut rule = ColorRule::default_for(name);

        if let Some(enabled) = self.enabled {
            rule.enabled = enabled;
        }
        if let Some(hex) = &self.replacement {
            rule.replacement = parse_hex(hex).ok_or_else(|| {
                RecolorError::invalid_config(format!("{name}: invalid replacement color '{hex}'"))
            })?;
        }

        match &mut rule.kind {
            RuleKind::Luminance { threshold, .. } => {
                if self.rgb.is_some() || self.hsv.is_some() {
                    return Err(RecolorError::invalid_config(format!(
                        "{name}: takes a threshold, not rgb/hsv bands"
                    )));
                }
                if let Some(t) = self.threshold {
                    *threshold = t;
                }
            }
            RuleKind::Band { rgb, hsv } => {
                if self.threshold.is_some() {
                    return Err(RecolorError::invalid_config(format!(
                        "{name}: takes rgb/hsv bands, not a threshold"
                    )));
                }
                if let Some(raw) = self.rgb {
                    override_range(&mut rgb.r, raw.r);
                    override_range(&mut rgb.g, raw.g);
                    override_range(&mut rgb.b, raw.b);
                }
                if let Some(raw) = self.hsv {
                    hsv.hue = merge_hue(hsv.hue, raw.h, raw.h2);
                    override_range(&mut hsv.s, raw.s);
                    override_range(&mut hsv.v, raw.v);
                }
            }
        }
        Ok(rule)
    }

    fn from_rule(rule: &ColorRule) -> Self {
        let mut raw = RawRule {
            name: rule.name.to_string(),
            enabled: Some(rule.enabled),
            replacement: Some(to_hex(rule.replacement)),
            threshold: None,
            rgb: None,
            hsv: None,
        };
        match &rule.kind {
            RuleKind::Luminance { threshold, .. } => raw.threshold = Some(*threshold),
            RuleKind::Band { rgb, hsv } => {
                raw.rgb = Some(RawRgbBand {
                    r: Some(rgb.r.to_array()),
                    g: Some(rgb.g.to_array()),
                    b: Some(rgb.b.to_array()),
                });
                let (h, h2) = match hsv.hue {
                    HueRange::Single(h) => (h, None),
                    HueRange::Wrapped(h, h2) => (h, Some(h2.to_array())),
                };
                raw.hsv = Some(RawHsvBand {
                    h: Some(h.to_array()),
                    h2,
                    s: Some(hsv.s.to_array()),
                    v: Some(hsv.v.to_array()),
                });
            }
        }
        raw
    }
}

fn override_range(range: &mut ChannelRange, raw: Option<[u8; 2]>) {
    if let Some(v) = raw {
        *range = v.into();
    }
}

fn merge_hue(current: HueRange, h: Option<[u8; 2]>, h2: Option<[u8; 2]>) -> HueRange {
    match (current, h2) {
        (HueRange::Single(h1), None) => HueRange::Single(h.map_or(h1, Into::into)),
        (HueRange::Single(h1), Some(h2)) => {
            HueRange::Wrapped(h.map_or(h1, Into::into), h2.into())
        }
        (HueRange::Wrapped(h1, old2), h2) => HueRange::Wrapped(
            h.map_or(h1, Into::into),
            h2.map_or(old2, Into::into),
        ),
    }
}
