//! Command-line interface definitions

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

/// paperdeck - figure and table caption detection and slide building
/// for academic PDF papers
#[derive(Debug, Parser)]
#[command(name = "paperdeck", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Detect figure and table captions in a PDF
    Detect(DetectArgs),

    /// Render a single PDF page to a PNG image
    Extract(ExtractArgs),

    /// Compose a titled, captioned slide from a figure image
    Slide(SlideArgs),

    /// Show version, platform and external tool information
    Info,
}

#[derive(Debug, Args)]
pub struct DetectArgs {
    /// Path to the source PDF file
    #[arg(long)]
    pub pdf: PathBuf,

    /// Output JSON file path (prints to stdout if omitted)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Config file path (default: ./paperdeck.toml, then user config dir)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Suppress per-caption progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// Path to the source PDF file
    #[arg(long)]
    pub pdf: PathBuf,

    /// Page number to extract (1-indexed)
    #[arg(long)]
    pub page: u32,

    /// Output PNG file path
    #[arg(long)]
    pub output: PathBuf,

    /// Render scale factor (default 2.0 for high quality)
    #[arg(long)]
    pub scale: Option<f64>,

    /// Config file path
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Args)]
pub struct SlideArgs {
    /// Path to the extracted figure image
    #[arg(long)]
    pub figure: PathBuf,

    /// Slide title/headline
    #[arg(long)]
    pub title: String,

    /// Figure caption, e.g. "Figure 1: Description"
    #[arg(long)]
    pub caption: String,

    /// Output slide PNG file path
    #[arg(long)]
    pub output: PathBuf,

    /// Output width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Output height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// TTF font file to render text with
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Config file path
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
