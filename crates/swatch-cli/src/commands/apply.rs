//! Apply command
//!
//! Loads an image (or the placeholder), builds settings from defaults, an
//! optional settings file and flags, recolors, and saves the result.

use crate::ApplyArgs;
use anyhow::{bail, Context, Result};
use swatch_core::parse_hex;
use swatch_ops::{recolor_with_report, ColorName, Settings};
use tracing::{debug, info, trace};

pub fn run(args: ApplyArgs, verbose: u8) -> Result<()> {
    trace!(input = ?args.input, output = %args.output.display(), "apply::run");

    let settings = build_settings(&args)?;

    let image = match &args.input {
        Some(path) => super::load_image(path)?,
        None => {
            info!("No input given, using placeholder");
            swatch_io::placeholder()
        }
    };
    let image = swatch_io::fit_width(&image, args.max_width).context("Failed to resize input")?;

    info!(
        w = image.width(),
        h = image.height(),
        model = %settings.color_model,
        darken = settings.darken_factor,
        "Recoloring"
    );
    let (output, report) = recolor_with_report(&image, &settings).context("Recolor failed")?;

    super::save_image(&args.output, &output)?;

    if verbose > 0 {
        println!(
            "Recolored {}x{} ({} model{})",
            output.width(),
            output.height(),
            settings.color_model,
            if report.darkened { ", darkened" } else { "" }
        );
        for m in &report.matches {
            println!("  {:<7} {} px", m.name, m.pixels);
        }
        println!("Saved: {}", args.output.display());
    }

    Ok(())
}

/// Defaults, then the settings file, then command line overrides.
fn build_settings(args: &ApplyArgs) -> Result<Settings> {
    let mut settings = match &args.config {
        Some(path) => super::load_settings(path)?,
        None => Settings::new(args.model.unwrap_or_default()),
    };

    if let Some(model) = args.model {
        settings.color_model = model;
    }
    if let Some(factor) = args.darken {
        settings.darken_factor = factor;
    }
    for &name in &args.enable {
        settings.set_enabled(name, true);
    }
    for &name in &args.disable {
        settings.set_enabled(name, false);
    }
    for spec in &args.replace {
        let (name, rgb) = parse_replacement(spec)?;
        settings.set_replacement(name, rgb);
    }

    settings.validate().context("Invalid settings")?;
    debug!(rules = settings.enabled_rules().count(), "Settings ready");
    Ok(settings)
}

/// Parses `COLOR=#RRGGBB`.
fn parse_replacement(spec: &str) -> Result<(ColorName, [u8; 3])> {
    let Some((name, hex)) = spec.split_once('=') else {
        bail!("Replacement must look like COLOR=#RRGGBB, got '{}'", spec);
    };
    let name: ColorName = name.parse()?;
    let Some(rgb) = parse_hex(hex) else {
        bail!("Invalid hex color '{}' for {}", hex, name);
    };
    Ok((name, rgb))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use swatch_ops::ColorModel;

    fn args() -> ApplyArgs {
        ApplyArgs {
            input: None,
            output: PathBuf::from("out.png"),
            config: None,
            model: None,
            darken: None,
            enable: Vec::new(),
            disable: Vec::new(),
            replace: Vec::new(),
            max_width: swatch_io::MAX_WIDTH,
        }
    }

    #[test]
    fn test_parse_replacement() {
        let (name, rgb) = parse_replacement("red=#00ff00").unwrap();
        assert_eq!(name, ColorName::Red);
        assert_eq!(rgb, [0, 255, 0]);
        assert!(parse_replacement("red").is_err());
        assert!(parse_replacement("teal=#000000").is_err());
        assert!(parse_replacement("red=#00ff0").is_err());
    }

    #[test]
    fn test_flags_override_defaults() {
        let mut a = args();
        a.model = Some(ColorModel::Rgb);
        a.darken = Some(0.6);
        a.enable = vec![ColorName::Green];
        a.disable = vec![ColorName::White];
        a.replace = vec!["green=#123456".into()];

        let s = build_settings(&a).unwrap();
        assert_eq!(s.color_model, ColorModel::Rgb);
        assert_eq!(s.darken_factor, 0.6);
        assert!(s.rule(ColorName::Green).unwrap().enabled);
        assert!(!s.rule(ColorName::White).unwrap().enabled);
        assert_eq!(s.rule(ColorName::Green).unwrap().replacement, [0x12, 0x34, 0x56]);
    }

    #[test]
    fn test_flags_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.yaml");
        std::fs::write(&path, "model: rgb\ndarken: 0.5\n").unwrap();

        let mut a = args();
        a.config = Some(path);
        a.model = Some(ColorModel::Hsv);
        let s = build_settings(&a).unwrap();
        assert_eq!(s.color_model, ColorModel::Hsv);
        assert_eq!(s.darken_factor, 0.5);
    }

    #[test]
    fn test_bad_darken_rejected() {
        let mut a = args();
        a.darken = Some(1.5);
        assert!(build_settings(&a).is_err());
    }
}
