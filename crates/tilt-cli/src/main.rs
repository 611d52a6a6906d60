//! tiltshift - tilt-shift photo effect CLI
//!
//! Blurs the top and bottom of a photo through a simulated lens aperture
//! so the scene reads as a miniature.

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "tiltshift")]
#[command(author, version, about = "Tilt-shift photo effect")]
#[command(long_about = "
Fakes a shallow depth of field: the middle band stays sharp, the top and
bottom bands are blurred through a disc or polygon aperture with bloom.

Examples:
  tiltshift apply photo.jpg --in-place-dir      # photo (1).jpg next to the source
  tiltshift apply photo.jpg -o out/ -r 20       # out/photo.jpg
  tiltshift apply photo.jpg -o mini.png -c preset.yaml
  tiltshift color photo.jpg -o vivid.jpg --saturation 0.5
  tiltshift blur photo.jpg -o soft.jpg -r 8 --sides 6
  tiltshift preset > preset.yaml                # dump the defaults
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline: color adjust, then band blur
    #[command(visible_alias = "a")]
    Apply(ApplyArgs),

    /// HSB adjustment only
    Color(ColorArgs),

    /// Lens blur over the whole image
    Blur(BlurArgs),

    /// Print the default preset as YAML
    Preset,
}

/// Where and how results are written.
#[derive(Args)]
#[group(required = true, multiple = false)]
struct OutputTarget {
    /// Output file, or an existing directory to write into
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write next to the source under a fresh name
    #[arg(long)]
    in_place_dir: bool,
}

#[derive(Args)]
struct OutputArgs {
    #[command(flatten)]
    target: OutputTarget,

    /// JPEG quality (1-100)
    #[arg(short, long, default_value = "80", value_parser = clap::value_parser!(u8).range(1..=100))]
    quality: u8,
}

/// Aperture flags shared by `apply` and `blur`.
#[derive(Args)]
struct ApertureArgs {
    /// Blur radius in pixels
    #[arg(short, long)]
    radius: Option<f32>,

    /// Highlight gain (>= 1)
    #[arg(long)]
    bloom: Option<f32>,

    /// Level above which bloom applies (0-255)
    #[arg(long)]
    threshold: Option<f32>,

    /// Aperture sides, 0 for a disc
    #[arg(long)]
    sides: Option<u32>,

    /// Aperture rotation in degrees
    #[arg(long, allow_hyphen_values = true)]
    angle: Option<f32>,
}

/// HSB gain flags shared by `apply` and `color`.
#[derive(Args)]
struct GainArgs {
    /// Saturation gain
    #[arg(long, allow_hyphen_values = true)]
    saturation: Option<f32>,

    /// Hue gain
    #[arg(long, allow_hyphen_values = true)]
    hue: Option<f32>,

    /// Brightness gain
    #[arg(long, allow_hyphen_values = true)]
    luminance: Option<f32>,
}

#[derive(Args)]
struct ApplyArgs {
    /// Input image
    input: PathBuf,

    #[command(flatten)]
    output: OutputArgs,

    /// YAML preset; flags override its fields
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    gains: GainArgs,

    #[command(flatten)]
    aperture: ApertureArgs,

    /// Fraction of the height blurred at the top
    #[arg(long)]
    top: Option<f32>,

    /// Fraction of the height blurred at the bottom
    #[arg(long)]
    bottom: Option<f32>,

    /// Skip the color stage
    #[arg(long)]
    no_color: bool,

    /// Skip the blur stage
    #[arg(long)]
    no_blur: bool,
}

#[derive(Args)]
struct ColorArgs {
    /// Input image
    input: PathBuf,

    #[command(flatten)]
    output: OutputArgs,

    #[command(flatten)]
    gains: GainArgs,
}

#[derive(Args)]
struct BlurArgs {
    /// Input image
    input: PathBuf,

    #[command(flatten)]
    output: OutputArgs,

    #[command(flatten)]
    aperture: ApertureArgs,
}

fn init_logging(verbose: u8) {
    let fallback = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback.into()))
        .with(tracing_subscriber::fmt::layer().without_time())
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
        Commands::Color(args) => commands::color::run(args, cli.verbose),
        Commands::Blur(args) => commands::blur::run(args, cli.verbose),
        Commands::Preset => commands::preset::run(),
    }
}
