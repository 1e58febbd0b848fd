//! Command-line surface.

pub mod render;

use std::path::PathBuf;

use clap::Parser;

/// codeweave - reformat source code into an ASCII-art silhouette
///
/// The output is the same token stream as the input code, re-flowed so
/// that visible characters land where the art has foreground and spaces
/// land where it has background.
#[derive(Parser, Debug)]
#[command(name = "codeweave")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Source code file to reformat
    #[arg(long, value_name = "PATH")]
    pub code: PathBuf,

    /// ASCII art file, UTF-8, one character per cell
    #[arg(long, value_name = "PATH", required_unless_present = "art_image")]
    pub art: Option<PathBuf>,

    /// Output path; parent directories are created if absent
    #[arg(long, value_name = "PATH")]
    pub out: PathBuf,

    /// Override the inferred art width in columns
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..=1_000_000_000))]
    pub width: Option<u64>,

    /// Override the inferred art height in rows
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(0..=1_000_000_000))]
    pub height: Option<u64>,

    /// Print a `W=<W> H=<H>, tokens=<n>` summary to stderr
    #[arg(long)]
    pub dump_meta: bool,

    /// Convert a raster image to the art grid instead of reading --art
    #[arg(long, value_name = "PATH", conflicts_with = "art")]
    pub art_image: Option<PathBuf>,

    /// Luminance cutoff for image conversion; darker pixels are foreground
    #[arg(long, value_name = "N", default_value_t = 128)]
    pub threshold: u8,

    /// Swap foreground and background during image conversion
    #[arg(long, requires = "art_image")]
    pub invert: bool,

    /// Vertical squeeze for image conversion; monospace cells are tall
    #[arg(long, value_name = "F", default_value_t = 0.5)]
    pub y_aspect: f32,

    /// YAML file of per-character density overrides
    #[arg(long, value_name = "PATH")]
    pub density: Option<PathBuf>,

    /// Fix the PRNG seed for reproducible output
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Suppress status output
    #[arg(long, short)]
    pub quiet: bool,
}
