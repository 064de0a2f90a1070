//! swatch - selective image recoloring CLI
//!
//! Replaces white, black, yellow, red, green and blue regions of an image
//! with chosen colors, matched by luminance or by RGB/HSV bands.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use swatch_ops::{ColorModel, ColorName};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "swatch")]
#[command(author, version, about = "Selective image recoloring")]
#[command(long_about = "
Recolors regions of an image picked out by luminance (white/black) or by
RGB/HSV bands (yellow, red, green, blue). Rules apply in order; a pixel
matched by several rules takes the color of the last one.

Examples:
  swatch apply photo.png -o out.png                  # default white/black swap
  swatch apply photo.png -o out.png --enable red --replace red=#00FF00
  swatch apply photo.png -o out.png --model rgb --darken 0.8
  swatch defaults --model hsv > rules.yaml           # starting config
  swatch apply photo.png -o out.png --config rules.yaml
  swatch check rules.yaml
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Recolor an image
    #[command(visible_alias = "a")]
    Apply(ApplyArgs),

    /// Print the default settings as YAML
    Defaults(DefaultsArgs),

    /// Validate a settings file
    Check(CheckArgs),
}

#[derive(Args)]
struct ApplyArgs {
    /// Input image (a 600x400 white placeholder when omitted)
    input: Option<PathBuf>,

    /// Output image (png, jpg, bmp, tif)
    #[arg(short, long)]
    output: PathBuf,

    /// Settings file (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Color model for band rules: hsv, rgb
    #[arg(short, long)]
    model: Option<ColorModel>,

    /// Darkening factor in (0, 1]
    #[arg(short, long)]
    darken: Option<f32>,

    /// Enable a color rule (repeatable)
    #[arg(long)]
    enable: Vec<ColorName>,

    /// Disable a color rule (repeatable)
    #[arg(long)]
    disable: Vec<ColorName>,

    /// Replacement color as COLOR=#RRGGBB (repeatable)
    #[arg(short, long)]
    replace: Vec<String>,

    /// Scale down inputs wider than this
    #[arg(long, default_value_t = swatch_io::MAX_WIDTH)]
    max_width: u32,
}

#[derive(Args)]
struct DefaultsArgs {
    /// Color model recorded in the output
    #[arg(short, long, default_value = "hsv")]
    model: ColorModel,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct CheckArgs {
    /// Settings file (YAML)
    config: PathBuf,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Apply(args) => commands::apply::run(args, cli.verbose),
        Commands::Defaults(args) => commands::defaults::run(args, cli.verbose),
        Commands::Check(args) => commands::check::run(args, cli.verbose),
    }
}
