//! Slide composition
//!
//! Builds a titled, captioned slide image around an extracted figure,
//! following the academic-paper container template: white background,
//! navy headline, the figure centered in a light border box, gray
//! caption underneath.

use ab_glyph::{FontVec, PxScale};
use image::imageops::FilterType;
use image::{imageops, Rgba, RgbaImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

// ============================================================
// Template constants
// ============================================================

const BACKGROUND: Rgba<u8> = Rgba([0xFF, 0xFF, 0xFF, 0xFF]);
const TITLE_COLOR: Rgba<u8> = Rgba([0x1E, 0x3A, 0x5F, 0xFF]);
const CAPTION_COLOR: Rgba<u8> = Rgba([0x6B, 0x72, 0x80, 0xFF]);
const BORDER_COLOR: Rgba<u8> = Rgba([0xE5, 0xE7, 0xEB, 0xFF]);

const TITLE_Y: i32 = 80;
const TITLE_SIZE: f32 = 48.0;
const CAPTION_SIZE: f32 = 24.0;
const FIGURE_MAX_WIDTH_RATIO: f64 = 0.85;
const FIGURE_MAX_HEIGHT_RATIO: f64 = 0.65;
const PADDING: i32 = 20;
const MARGIN_BOTTOM: i32 = 80;

/// Default slide dimensions (16:9)
pub const DEFAULT_WIDTH: u32 = 1920;
pub const DEFAULT_HEIGHT: u32 = 1080;

/// Candidate font files probed when no font is configured
const FONT_SEARCH_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
];

// ============================================================
// Error Types
// ============================================================

/// Slide composition error types
#[derive(Debug, Error)]
pub enum SlideError {
    #[error("Figure image not found: {0}")]
    FigureNotFound(PathBuf),

    #[error("No usable TTF font found; pass one with --font")]
    FontNotFound,

    #[error("Invalid font file: {0}")]
    InvalidFont(PathBuf),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SlideError>;

// ============================================================
// Options
// ============================================================

/// Options for slide composition
#[derive(Debug, Clone)]
pub struct SlideOptions {
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// Explicit TTF font path; system fonts are probed when unset
    pub font: Option<PathBuf>,
}

impl Default for SlideOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            font: None,
        }
    }
}

// ============================================================
// Composer
// ============================================================

/// Composer for figure slides
pub struct SlideComposer {
    options: SlideOptions,
}

impl SlideComposer {
    /// Create a composer with default options
    pub fn new() -> Self {
        Self::with_options(SlideOptions::default())
    }

    /// Create a composer with specific options
    pub fn with_options(options: SlideOptions) -> Self {
        Self { options }
    }

    /// Compose a slide from a figure image, writing a PNG to `output`
    pub fn compose(
        &self,
        figure: &Path,
        title: &str,
        caption: &str,
        output: &Path,
    ) -> Result<PathBuf> {
        if !figure.exists() {
            return Err(SlideError::FigureNotFound(figure.to_path_buf()));
        }
        let font = load_font(self.options.font.as_deref())?;
        let figure_image = image::open(figure)?.to_rgba8();

        let width = self.options.width;
        let height = self.options.height;
        let mut canvas = RgbaImage::from_pixel(width, height, BACKGROUND);

        // Figure scaled into its reserved area
        let max_w = (f64::from(width) * FIGURE_MAX_WIDTH_RATIO) as u32;
        let max_h = (f64::from(height) * FIGURE_MAX_HEIGHT_RATIO) as u32;
        let (fig_w, fig_h) = fit_within(figure_image.width(), figure_image.height(), max_w, max_h);
        let resized = imageops::resize(&figure_image, fig_w, fig_h, FilterType::Lanczos3);

        let area_top = TITLE_Y + TITLE_SIZE as i32 + PADDING;
        let area_bottom = height as i32 - MARGIN_BOTTOM - CAPTION_SIZE as i32 - PADDING;
        let fig_x = (width as i32 - fig_w as i32) / 2;
        let fig_y = area_top + ((area_bottom - area_top - fig_h as i32).max(0)) / 2;

        debug!(fig_w, fig_h, fig_x, fig_y, "placing figure");
        draw_hollow_rect_mut(
            &mut canvas,
            Rect::at((fig_x - PADDING).max(0), (fig_y - PADDING).max(0))
                .of_size(fig_w + 2 * PADDING as u32, fig_h + 2 * PADDING as u32),
            BORDER_COLOR,
        );
        imageops::overlay(&mut canvas, &resized, i64::from(fig_x), i64::from(fig_y));

        // Headline
        let title_scale = PxScale::from(TITLE_SIZE);
        let (title_w, _) = text_size(title_scale, &font, title);
        draw_text_mut(
            &mut canvas,
            TITLE_COLOR,
            (width as i32 - title_w as i32) / 2,
            TITLE_Y,
            title_scale,
            &font,
            title,
        );

        // Caption, wrapped under the figure box
        let caption_scale = PxScale::from(CAPTION_SIZE);
        let max_chars = caption_line_chars(width);
        let mut line_y = fig_y + fig_h as i32 + 2 * PADDING;
        for line in wrap_words(caption, max_chars) {
            let (line_w, _) = text_size(caption_scale, &font, &line);
            draw_text_mut(
                &mut canvas,
                CAPTION_COLOR,
                (width as i32 - line_w as i32) / 2,
                line_y,
                caption_scale,
                &font,
                &line,
            );
            line_y += (CAPTION_SIZE * 1.4) as i32;
        }

        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        canvas.save(output)?;

        Ok(output.to_path_buf())
    }
}

impl Default for SlideComposer {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================
// Helpers
// ============================================================

/// Locate and load a TTF font, preferring the explicit path
fn load_font(explicit: Option<&Path>) -> Result<FontVec> {
    let path = match explicit {
        Some(path) if path.exists() => path.to_path_buf(),
        Some(path) => return Err(SlideError::InvalidFont(path.to_path_buf())),
        None => FONT_SEARCH_PATHS
            .iter()
            .map(PathBuf::from)
            .find(|p| p.exists())
            .ok_or(SlideError::FontNotFound)?,
    };
    let bytes = fs::read(&path)?;
    FontVec::try_from_vec(bytes).map_err(|_| SlideError::InvalidFont(path))
}

/// Scale (w, h) to fit inside (max_w, max_h) preserving aspect ratio
fn fit_within(w: u32, h: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    if w == 0 || h == 0 {
        return (1, 1);
    }
    let scale = (f64::from(max_w) / f64::from(w)).min(f64::from(max_h) / f64::from(h));
    (
        ((f64::from(w) * scale).round() as u32).max(1),
        ((f64::from(h) * scale).round() as u32).max(1),
    )
}

/// Approximate characters per caption line for the slide width
fn caption_line_chars(width: u32) -> usize {
    ((f64::from(width) * 0.9) / (f64::from(CAPTION_SIZE) * 0.55)) as usize
}

/// Greedy word wrap into lines of at most `max_chars` characters
fn wrap_words(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > max_chars {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
