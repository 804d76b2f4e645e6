//! paperdeck - figure/table caption detection for academic PDF papers
//!
//! CLI entry point

use clap::Parser;
use paperdeck::{
    exit_codes, CaptionRecord, Cli, CliOverrides, Commands, Config, DetectArgs, DetectOptions,
    DetectionObserver, ExtractArgs, FigureDetector, LineOptions, PageRenderer, RenderOptions,
    SlideArgs, SlideComposer, SlideOptions,
};
use std::path::Path;

fn main() {
    let cli = Cli::parse();

    init_tracing(match &cli.command {
        Commands::Detect(args) => args.verbose,
        Commands::Extract(args) => args.verbose,
        Commands::Slide(args) => args.verbose,
        Commands::Info => 0,
    });

    let result = match cli.command {
        Commands::Detect(args) => run_detect(&args),
        Commands::Extract(args) => run_extract(&args),
        Commands::Slide(args) => run_slide(&args),
        Commands::Info => run_info(),
    };

    std::process::exit(match result {
        Ok(()) => exit_codes::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            exit_codes::GENERAL_ERROR
        }
    });
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Config {
    match path {
        Some(path) => match Config::load_from_path(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Warning: Failed to load config file: {e}");
                Config::default()
            }
        },
        None => Config::load().unwrap_or_default(),
    }
}

// ============ Progress Observer ============

/// Observer printing each accepted caption, the way a scan log reads
struct ProgressPrinter {
    quiet: bool,
}

impl DetectionObserver for ProgressPrinter {
    fn on_record(&self, record: &CaptionRecord) {
        if !self.quiet {
            eprintln!("  Found: {} on page {}", record.label, record.page);
        }
    }
}

// ============ Detect Command ============

fn run_detect(args: &DetectArgs) -> anyhow::Result<()> {
    if !args.pdf.exists() {
        eprintln!("Error: PDF file not found: {}", args.pdf.display());
        std::process::exit(exit_codes::INPUT_NOT_FOUND);
    }

    let config = load_config(args.config.as_deref());
    let detector = FigureDetector::with_options(DetectOptions {
        lines: LineOptions {
            same_row_tolerance: config.detect.same_row_tolerance,
            line_break_threshold: config.detect.line_break_threshold,
        },
        max_caption_len: config.detect.max_caption_len,
    });

    if !args.quiet {
        eprintln!("Scanning for figures and tables: {}", args.pdf.display());
    }

    let observer = ProgressPrinter { quiet: args.quiet };
    let result = detector.detect_with_observer(&args.pdf, &observer)?;

    if !args.quiet {
        eprintln!(
            "Total: {} figures/tables detected across {} pages",
            result.figures.len(),
            result.total_pages
        );
    }

    let json = serde_json::to_string_pretty(&result)?;
    match &args.output {
        Some(output) => {
            std::fs::write(output, json)?;
            eprintln!("Saved to: {}", output.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}

// ============ Extract Command ============

fn run_extract(args: &ExtractArgs) -> anyhow::Result<()> {
    if !args.pdf.exists() {
        eprintln!("Error: PDF file not found: {}", args.pdf.display());
        std::process::exit(exit_codes::INPUT_NOT_FOUND);
    }

    let config = load_config(args.config.as_deref()).merge_with_cli(&CliOverrides {
        scale: args.scale,
        ..CliOverrides::new()
    });

    let renderer = PageRenderer::with_options(RenderOptions {
        scale: config.render.scale,
    });
    let output = renderer.render(&args.pdf, args.page, &args.output)?;
    eprintln!("Saved: {}", output.display());

    Ok(())
}

// ============ Slide Command ============

fn run_slide(args: &SlideArgs) -> anyhow::Result<()> {
    if !args.figure.exists() {
        eprintln!("Error: Figure image not found: {}", args.figure.display());
        std::process::exit(exit_codes::INPUT_NOT_FOUND);
    }

    let config = load_config(args.config.as_deref()).merge_with_cli(&CliOverrides {
        width: args.width,
        height: args.height,
        font: args.font.clone(),
        ..CliOverrides::new()
    });

    let composer = SlideComposer::with_options(SlideOptions {
        width: config.slide.width,
        height: config.slide.height,
        font: config.slide.font,
    });
    let output = composer.compose(&args.figure, &args.title, &args.caption, &args.output)?;
    eprintln!("Saved: {}", output.display());

    Ok(())
}

// ============ Info Command ============

fn run_info() -> anyhow::Result<()> {
    println!("paperdeck v{}", env!("CARGO_PKG_VERSION"));
    println!();

    println!("System Information:");
    println!("  Platform: {}", std::env::consts::OS);
    println!("  Arch: {}", std::env::consts::ARCH);
    if let Ok(cpus) = std::thread::available_parallelism() {
        println!("  CPUs: {cpus}");
    }

    println!();
    println!("Page Rendering Tools:");
    check_tool("pdftoppm", "Poppler");

    println!();
    println!("Config File Locations:");
    println!("  Local: ./paperdeck.toml");
    if let Some(config_dir) = dirs::config_dir() {
        println!(
            "  User:  {}",
            config_dir.join("paperdeck/config.toml").display()
        );
    }

    Ok(())
}

fn check_tool(cmd: &str, name: &str) {
    match which::which(cmd) {
        Ok(path) => println!("  {}: {} (found)", name, path.display()),
        Err(_) => println!("  {name}: Not found"),
    }
}
