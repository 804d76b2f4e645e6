//! Detection driver
//!
//! Walks a document page by page, reconstructs each page's text,
//! extracts caption candidates and folds them through the first-seen
//! aggregator into the final, canonically ordered result.
//!
//! Pages are independent given their fragments, so candidate extraction
//! runs in parallel; aggregation then replays the per-page results in
//! strict ascending page order, which is what keeps first-seen-wins
//! deterministic.

use super::aggregate::CaptionAggregator;
use super::captions::CaptionExtractor;
use super::lines::{LineOptions, LineReconstructor};
use super::types::{CaptionRecord, DetectError, DetectionResult, Result, TextFragment};
use crate::pdf_text::PdfTextSource;
use rayon::prelude::*;
use std::path::Path;
use tracing::{debug, info};

// ============================================================
// Seams
// ============================================================

/// Source of positioned text fragments, one page at a time.
///
/// Implemented by the PDF-backed source and by in-memory fixtures in
/// tests; the detector itself never touches the document format.
pub trait PageSource {
    /// Total number of pages in the document
    fn page_count(&self) -> u32;

    /// Fragments for one page (1-based), in arbitrary order
    fn page_fragments(&self, page: u32) -> Result<Vec<TextFragment>>;
}

/// Callback invoked as detection progresses. All methods default to
/// no-ops so implementors pick what they care about.
pub trait DetectionObserver {
    /// A page's candidates are about to be aggregated
    fn on_page(&self, _page: u32, _total_pages: u32) {}

    /// A record was newly accepted into the result
    fn on_record(&self, _record: &CaptionRecord) {}
}

/// Observer that ignores every event
pub struct NullObserver;

impl DetectionObserver for NullObserver {}

// ============================================================
// Options
// ============================================================

/// Options for caption detection
#[derive(Debug, Clone)]
pub struct DetectOptions {
    /// Line reconstruction tolerances
    pub lines: LineOptions,

    /// Caption length cap in characters
    pub max_caption_len: usize,
}

impl Default for DetectOptions {
    fn default() -> Self {
        Self {
            lines: LineOptions::default(),
            max_caption_len: super::types::MAX_CAPTION_LEN,
        }
    }
}

impl DetectOptions {
    /// Options with the standard tolerances and caption cap
    pub fn standard() -> Self {
        Self::default()
    }
}

// ============================================================
// Detector
// ============================================================

/// Detector for figure and table captions across a whole document
pub struct FigureDetector {
    options: DetectOptions,
    extractor: CaptionExtractor,
}

impl FigureDetector {
    /// Create a detector with standard options
    pub fn new() -> Self {
        Self::with_options(DetectOptions::standard())
    }

    /// Create a detector with specific options
    pub fn with_options(options: DetectOptions) -> Self {
        let extractor = CaptionExtractor::with_max_len(options.max_caption_len);
        Self { options, extractor }
    }

    /// Detect captions in a PDF file
    pub fn detect(&self, pdf_path: &Path) -> Result<DetectionResult> {
        self.detect_with_observer(pdf_path, &NullObserver)
    }

    /// Detect captions in a PDF file, reporting progress to `observer`
    pub fn detect_with_observer(
        &self,
        pdf_path: &Path,
        observer: &dyn DetectionObserver,
    ) -> Result<DetectionResult> {
        if !pdf_path.exists() {
            return Err(DetectError::PdfNotFound(pdf_path.to_path_buf()));
        }
        let source = PdfTextSource::open(pdf_path)?;
        self.detect_from(&source, &pdf_path.display().to_string(), observer)
    }

    /// Detect captions from any page source.
    ///
    /// This is the pure core: given per-page fragments it produces the
    /// same `DetectionResult` regardless of where the fragments came
    /// from. A failed page fetch aborts the run; no partial result is
    /// produced.
    pub fn detect_from<S>(
        &self,
        source: &S,
        source_path: &str,
        observer: &dyn DetectionObserver,
    ) -> Result<DetectionResult>
    where
        S: PageSource + Sync,
    {
        let total_pages = source.page_count();
        info!(total_pages, source = source_path, "scanning for captions");

        // Per-page extraction is order-independent; the collect keeps
        // page order for the aggregation pass below.
        let pages: Vec<u32> = (1..=total_pages).collect();
        let per_page: Vec<(u32, Vec<CaptionRecord>)> = pages
            .par_iter()
            .map(|&page| {
                let fragments = source.page_fragments(page)?;
                let text = LineReconstructor::page_text(&fragments, &self.options.lines);
                let candidates = self.extractor.extract(&text, page);
                debug!(page, candidates = candidates.len(), "page scanned");
                Ok((page, candidates))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut aggregator = CaptionAggregator::new();
        for (page, candidates) in per_page {
            observer.on_page(page, total_pages);
            for candidate in candidates {
                if let Some(record) = aggregator.insert(candidate) {
                    observer.on_record(record);
                }
            }
        }

        info!(found = aggregator.len(), "scan complete");

        Ok(DetectionResult {
            figures: aggregator.into_sorted(),
            total_pages,
            pdf_path: source_path.to_string(),
        })
    }
}

impl Default for FigureDetector {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================
// Tests
// ============================================================
