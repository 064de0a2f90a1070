//! CLI command implementations

pub mod apply;
pub mod check;
pub mod defaults;

use anyhow::{Context, Result};
use std::path::Path;
use swatch_core::PixelBuffer;
use swatch_ops::Settings;

/// Load image from path
pub fn load_image(path: &Path) -> Result<PixelBuffer> {
    swatch_io::read(path).with_context(|| format!("Failed to load: {}", path.display()))
}

/// Save image to path
pub fn save_image(path: &Path, image: &PixelBuffer) -> Result<()> {
    swatch_io::write(path, image).with_context(|| format!("Failed to save: {}", path.display()))
}

/// Load and validate a settings file
pub fn load_settings(path: &Path) -> Result<Settings> {
    Settings::from_file(path)
        .with_context(|| format!("Failed to load settings: {}", path.display()))
}
