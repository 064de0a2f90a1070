//! Defaults command
//!
//! Prints the built-in settings as YAML, ready to edit and pass back with
//! `apply --config`.

use crate::DefaultsArgs;
use anyhow::{Context, Result};
use swatch_ops::Settings;
use tracing::trace;

pub fn run(args: DefaultsArgs, verbose: u8) -> Result<()> {
    trace!(model = %args.model, "defaults::run");

    let yaml = Settings::new(args.model)
        .to_yaml_string()
        .context("Failed to serialize settings")?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, &yaml)
                .with_context(|| format!("Failed to write: {}", path.display()))?;
            if verbose > 0 {
                println!("Wrote defaults: {}", path.display());
            }
        }
        None => print!("{yaml}"),
    }
    Ok(())
}
