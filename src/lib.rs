//! paperdeck - figure and table caption detection and slide building
//! for academic PDF papers
//!
//! The core locates figure/table captions in a document's text stream:
//! positioned fragments are rebuilt into reading-order lines, caption
//! patterns are matched against the line text, and the results are
//! deduplicated across pages and canonically ordered. Around the core
//! sit three thin collaborators: a lopdf-backed text source, a
//! pdftoppm-backed page renderer, and an image-based slide composer.

pub mod cli;
pub mod config;
pub mod detect;
pub mod pdf_text;
pub mod render;
pub mod slide;

/// Process exit codes
pub mod exit_codes {
    /// Successful completion
    pub const SUCCESS: i32 = 0;
    /// Unspecified failure
    pub const GENERAL_ERROR: i32 = 1;
    /// Input file not found
    pub const INPUT_NOT_FOUND: i32 = 2;
}

// Re-export public API
pub use cli::{Cli, Commands, DetectArgs, ExtractArgs, SlideArgs};
pub use config::{CliOverrides, Config, ConfigError, DetectConfig, RenderConfig, SlideConfig};
pub use detect::{
    numeric_rank, roman_to_int, sort_captions, CaptionAggregator, CaptionExtractor, CaptionKind,
    CaptionRecord, DetectError, DetectOptions, DetectionObserver, DetectionResult, FigureDetector,
    LineOptions, LineReconstructor, NullObserver, PageSource, TextFragment,
};
pub use pdf_text::PdfTextSource;
pub use render::{PageRenderer, RenderError, RenderOptions};
pub use slide::{SlideComposer, SlideError, SlideOptions};
