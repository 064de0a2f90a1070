//! Check command
//!
//! Validates a settings file and summarizes the rules it declares.

use crate::CheckArgs;
use anyhow::Result;
use swatch_core::to_hex;
use tracing::trace;

pub fn run(args: CheckArgs, verbose: u8) -> Result<()> {
    trace!(config = %args.config.display(), "check::run");

    let settings = super::load_settings(&args.config)?;

    println!(
        "{}: ok (model {}, darken {})",
        args.config.display(),
        settings.color_model,
        settings.darken_factor
    );
    for rule in &settings.rules {
        if rule.enabled || verbose > 0 {
            println!(
                "  {:<7} {:<8} -> {}",
                rule.name,
                if rule.enabled { "enabled" } else { "disabled" },
                to_hex(rule.replacement)
            );
        }
    }
    Ok(())
}
