//! Page rasterization
//!
//! Renders a single PDF page to a PNG image by shelling out to
//! Poppler's `pdftoppm`, the same external-tool approach used for every
//! raster step in this toolchain. Rendering fidelity is Poppler's
//! problem; this module only wraps invocation, output discovery and
//! placement of the final file.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;
use tracing::debug;

/// Default render scale; 2.0 doubles the nominal 72 DPI for slide-ready
/// quality.
pub const DEFAULT_SCALE: f64 = 2.0;

/// Base PDF resolution in dots per inch
const BASE_DPI: f64 = 72.0;

/// Page rasterization error types
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF not found: {0}")]
    PdfNotFound(PathBuf),

    #[error("pdftoppm not found in PATH (install poppler-utils)")]
    ToolMissing,

    #[error("pdftoppm failed: {0}")]
    CommandFailed(String),

    #[error("pdftoppm produced no output for page {0}")]
    OutputMissing(u32),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RenderError>;

/// Options for page rendering
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Render scale factor relative to 72 DPI
    pub scale: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
        }
    }
}

/// Renderer for single PDF pages
pub struct PageRenderer {
    options: RenderOptions,
}

impl PageRenderer {
    /// Create a renderer with default options
    pub fn new() -> Self {
        Self::with_options(RenderOptions::default())
    }

    /// Create a renderer with specific options
    pub fn with_options(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render one page (1-based) of `pdf` to a PNG at `output`.
    ///
    /// Returns the output path on success. Parent directories are
    /// created as needed.
    pub fn render(&self, pdf: &Path, page: u32, output: &Path) -> Result<PathBuf> {
        if !pdf.exists() {
            return Err(RenderError::PdfNotFound(pdf.to_path_buf()));
        }
        let tool = which::which("pdftoppm").map_err(|_| RenderError::ToolMissing)?;
        let dpi = (BASE_DPI * self.options.scale).round() as u32;

        // pdftoppm zero-pads the page suffix based on the document's
        // page count, so render into a scratch dir and pick up whatever
        // single file appears.
        let scratch = tempfile::tempdir()?;
        let prefix = scratch.path().join("page");

        debug!(page, dpi, "invoking pdftoppm");
        let result = Command::new(&tool)
            .arg("-png")
            .arg("-r")
            .arg(dpi.to_string())
            .arg("-f")
            .arg(page.to_string())
            .arg("-l")
            .arg(page.to_string())
            .arg(pdf)
            .arg(&prefix)
            .output()?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr).trim().to_string();
            return Err(RenderError::CommandFailed(if stderr.is_empty() {
                format!("exit status {}", result.status)
            } else {
                stderr
            }));
        }

        let produced = first_png(scratch.path())?.ok_or(RenderError::OutputMissing(page))?;

        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        // Copy instead of rename: the scratch dir may sit on another
        // filesystem
        fs::copy(&produced, output)?;

        Ok(output.to_path_buf())
    }
}

impl Default for PageRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn first_png(dir: &Path) -> Result<Option<PathBuf>> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "png") {
            return Ok(Some(path));
        }
    }
    Ok(None)
}
