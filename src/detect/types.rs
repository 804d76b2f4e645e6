//! Caption detection core types
//!
//! Contains the data structures shared by line reconstruction, caption
//! extraction and aggregation.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

// ============================================================
// Constants
// ============================================================

/// Fragments whose vertical positions differ by at most this many units
/// are ordered as one visual row during the reading-order sort.
pub const SAME_ROW_TOLERANCE: f64 = 5.0;

/// A vertical drop beyond this many units from the current line's anchor
/// row starts a new line. Slightly looser than the sort tolerance to
/// absorb baseline jitter.
pub const LINE_BREAK_THRESHOLD: f64 = 8.0;

/// Maximum caption length in characters. Longer captions are truncated,
/// never rejected.
pub const MAX_CAPTION_LEN: usize = 300;

// ============================================================
// Error Types
// ============================================================

/// Caption detection error types
#[derive(Debug, Error)]
pub enum DetectError {
    #[error("PDF not found: {0}")]
    PdfNotFound(PathBuf),

    #[error("Page {0} not found in document")]
    PageNotFound(u32),

    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DetectError>;

// ============================================================
// Core Data Structures
// ============================================================

/// One positioned run of text as extracted from a page, prior to any
/// line reconstruction. Vertical position grows upward (PDF user space).
#[derive(Debug, Clone, PartialEq)]
pub struct TextFragment {
    /// Baseline string content
    pub text: String,
    /// Horizontal position
    pub x: f64,
    /// Vertical position
    pub y: f64,
}

impl TextFragment {
    /// Create a new fragment
    pub fn new(text: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            text: text.into(),
            x,
            y,
        }
    }

    /// Check if the fragment carries no visible content
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Kind of detected caption. Figures order before tables in the final
/// result, which the derived ordering encodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptionKind {
    /// Figure caption ("Fig. 1", "FIGURE 2")
    Figure,
    /// Table caption ("Table I", "TABLE 3")
    Table,
}

impl CaptionKind {
    /// Prefix used to build the canonical label
    pub fn label_prefix(&self) -> &'static str {
        match self {
            CaptionKind::Figure => "Figure",
            CaptionKind::Table => "Table",
        }
    }
}

/// A detected figure or table caption. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionRecord {
    /// Caption kind
    #[serde(rename = "type")]
    pub kind: CaptionKind,

    /// Raw number token as it appeared in the text ("1", "IV")
    pub number: String,

    /// Page the caption was first seen on (1-based)
    pub page: u32,

    /// Caption text, whitespace-normalized and capped
    pub caption: String,

    /// Canonical identity ("Figure 1", "Table IV"); the dedup key
    pub label: String,
}

impl CaptionRecord {
    /// Create a record, deriving the label from kind and raw number
    pub fn new(kind: CaptionKind, number: impl Into<String>, page: u32, caption: impl Into<String>) -> Self {
        let number = number.into();
        let label = format!("{} {}", kind.label_prefix(), number);
        Self {
            kind,
            number,
            page,
            caption: caption.into(),
            label,
        }
    }
}

/// Final detection output for a whole document. The order of `figures`
/// is part of the contract: consumers may index into it positionally.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResult {
    /// Detected captions in canonical order
    pub figures: Vec<CaptionRecord>,

    /// Total page count of the source document
    pub total_pages: u32,

    /// Path of the source document
    pub pdf_path: String,
}

// ============================================================
// Tests
// ============================================================
