//! Golden checks for the recolor transform.
//!
//! Two independent routes to the same answer:
//!
//! 1. a pixel-at-a-time reference model, hashed with SHA-256 and compared
//!    against the whole-image transform on an RGB cube
//! 2. hand-written per-pixel cases in JSON, checked exactly

use sha2::{Digest, Sha256};
use swatch_core::{luminance_milli, parse_hex, rgb_to_hsv, PixelBuffer};
use swatch_ops::darken::darken_channel;
use swatch_ops::{recolor, ColorModel, ColorName, Settings};

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// RGB cube with `levels` steps per channel, laid out as a
/// `levels * levels` by `levels` image.
fn rgb_cube(levels: u32) -> PixelBuffer {
    let step = |i: u32| (i * 255 / (levels - 1)) as u8;
    let mut pixels = Vec::with_capacity((levels * levels * levels) as usize);
    for r in 0..levels {
        for g in 0..levels {
            for b in 0..levels {
                pixels.push([step(r), step(g), step(b)]);
            }
        }
    }
    PixelBuffer::from_pixels(levels * levels, levels, &pixels).unwrap()
}

fn all_enabled(model: ColorModel, darken: f32) -> Settings {
    let mut settings = Settings::new(model).with_darken(darken);
    for name in ColorName::ALL {
        settings.set_enabled(name, true);
    }
    settings
}

// ---------------------------------------------------------------------------
// Reference model
// ---------------------------------------------------------------------------

/// Recolors one pixel: darken, derive, then walk the rules in order and
/// keep the last match. RGB bands test the pixel as earlier rules left it;
/// luminance and HSV test the darkened pixel.
fn reference_pixel(rgb: [u8; 3], settings: &Settings) -> [u8; 3] {
    let rgb = if settings.darken_factor < 1.0 {
        rgb.map(|c| darken_channel(c, settings.darken_factor))
    } else {
        rgb
    };
    let luma = luminance_milli(rgb);
    let hsv = rgb_to_hsv(rgb);
    let model = settings.color_model;

    let mut out = rgb;
    for rule in settings.enabled_rules() {
        let channels = match model {
            ColorModel::Rgb => out,
            ColorModel::Hsv => hsv,
        };
        if rule.matches(luma, channels, model) {
            out = rule.replacement;
        }
    }
    out
}

fn hash_pixels(pixels: impl Iterator<Item = [u8; 3]>) -> String {
    let mut hasher = Sha256::new();
    for p in pixels {
        hasher.update(p);
    }
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

#[test]
fn golden_cube_matches_reference() {
    let cube = rgb_cube(16);
    for model in [ColorModel::Rgb, ColorModel::Hsv] {
        for darken in [1.0, 0.8] {
            let settings = all_enabled(model, darken);
            let out = recolor(&cube, &settings).unwrap();

            let expected = hash_pixels(cube.pixels().map(|p| reference_pixel(p, &settings)));
            let actual = hash_pixels(out.pixels());
            assert_eq!(actual, expected, "model {model}, darken {darken}");
        }
    }
}

#[test]
fn golden_cube_is_deterministic() {
    let cube = rgb_cube(16);
    let settings = all_enabled(ColorModel::Hsv, 0.9);
    let first = hash_pixels(recolor(&cube, &settings).unwrap().pixels());
    for _ in 0..3 {
        assert_eq!(hash_pixels(recolor(&cube, &settings).unwrap().pixels()), first);
    }
}

#[test]
fn golden_cube_changes_something() {
    // guards against a reference model that agrees by doing nothing
    let cube = rgb_cube(16);
    let out = recolor(&cube, &all_enabled(ColorModel::Rgb, 1.0)).unwrap();
    assert_ne!(hash_pixels(out.pixels()), hash_pixels(cube.pixels()));
}

// ---------------------------------------------------------------------------
// Hand-written cases
// ---------------------------------------------------------------------------

#[derive(Debug, serde::Deserialize)]
struct Case {
    name: String,
    model: String,
    #[serde(default = "no_darken")]
    darken: f32,
    #[serde(default)]
    enable: Vec<String>,
    #[serde(default)]
    replace: Vec<(String, String)>,
    input: String,
    expected: String,
}

fn no_darken() -> f32 {
    1.0
}

const CASES: &str = r##"[
  { "name": "white above 240", "model": "hsv", "input": "#F1F1F1", "expected": "#2A2A2A" },
  { "name": "white at 240", "model": "hsv", "input": "#F0F0F0", "expected": "#F0F0F0" },
  { "name": "black below 15", "model": "rgb", "input": "#0E0E0E", "expected": "#FFFFFF" },
  { "name": "black at 15", "model": "rgb", "input": "#0F0F0F", "expected": "#0F0F0F" },
  { "name": "disabled yellow", "model": "rgb", "input": "#F0F032", "expected": "#F0F032" },
  { "name": "rgb yellow", "model": "rgb", "enable": ["yellow"], "input": "#F0F032", "expected": "#FFFF99" },
  { "name": "hsv red low hue", "model": "hsv", "enable": ["red"], "input": "#FF0F00", "expected": "#FF6666" },
  { "name": "hsv red high hue", "model": "hsv", "enable": ["red"], "input": "#FF001B", "expected": "#FF6666" },
  { "name": "hsv orange", "model": "hsv", "enable": ["red", "yellow"], "input": "#FF8000", "expected": "#FF8000" },
  { "name": "hsv green", "model": "hsv", "enable": ["green"], "input": "#1EC828", "expected": "#66FF66" },
  { "name": "hsv blue", "model": "hsv", "enable": ["blue"], "input": "#1E28DC", "expected": "#6666FF" },
  { "name": "rgb dull blue", "model": "rgb", "enable": ["blue"], "input": "#1E2890", "expected": "#1E2890" },
  { "name": "darkened out of white", "model": "hsv", "darken": 0.9, "input": "#FAFAFA", "expected": "#E1E1E1" },
  { "name": "rgb red after yellow write", "model": "rgb", "enable": ["yellow", "red"], "replace": [["yellow", "#C83232"]], "input": "#E6E614", "expected": "#FF6666" },
  { "name": "hsv red ignores yellow write", "model": "hsv", "enable": ["yellow", "red"], "replace": [["yellow", "#C83232"]], "input": "#E6E614", "expected": "#C83232" },
  { "name": "hsv blue at hue 140", "model": "hsv", "enable": ["blue"], "input": "#004866", "expected": "#6666FF" },
  { "name": "hsv blue at hue 180", "model": "hsv", "enable": ["blue"], "input": "#180066", "expected": "#6666FF" },
  { "name": "hsv green at hue 60", "model": "hsv", "enable": ["green"], "input": "#3C6600", "expected": "#66FF66" },
  { "name": "hsv red at hue 10", "model": "hsv", "enable": ["red"], "input": "#FF4200", "expected": "#FF6666" },
  { "name": "darkened into black", "model": "hsv", "darken": 0.5, "input": "#1C1C1C", "expected": "#FFFFFF" }
]"##;

#[test]
fn golden_cases() {
    let cases: Vec<Case> = serde_json::from_str(CASES).unwrap();
    assert!(!cases.is_empty());

    for case in &cases {
        let model: ColorModel = case.model.parse().unwrap();
        let mut settings = Settings::new(model).with_darken(case.darken);
        for name in &case.enable {
            settings.set_enabled(name.parse().unwrap(), true);
        }
        for (name, hex) in &case.replace {
            settings.set_replacement(name.parse().unwrap(), parse_hex(hex).unwrap());
        }

        let input = parse_hex(&case.input).unwrap();
        let img = PixelBuffer::filled(2, 2, input);
        let out = recolor(&img, &settings).unwrap();

        let expected = parse_hex(&case.expected).unwrap();
        assert!(out.pixels().all(|p| p == expected), "{}: got {:?}", case.name, out.pixel(0, 0));
    }
}
