//! Caption Detection module
//!
//! Locates and labels figure/table captions referenced in a document's
//! text stream, given only per-page collections of positioned text
//! fragments.
//!
//! The pipeline, per page: fragments are rebuilt into reading-order
//! lines, caption patterns are matched against the line text, and the
//! resulting candidates flow through a first-seen-wins aggregator that
//! is replayed in ascending page order. A final pass imposes the
//! canonical ordering (figures before tables, ascending by number, with
//! Roman numerals resolved for comparison).

mod aggregate;
mod captions;
mod detector;
mod lines;
mod roman;
mod types;

// Re-export public API
pub use aggregate::{numeric_rank, sort_captions, CaptionAggregator};
pub use captions::CaptionExtractor;
pub use detector::{
    DetectOptions, DetectionObserver, FigureDetector, NullObserver, PageSource,
};
pub use lines::{LineOptions, LineReconstructor};
pub use roman::roman_to_int;
pub use types::{
    CaptionKind, CaptionRecord, DetectError, DetectionResult, Result, TextFragment,
    LINE_BREAK_THRESHOLD, MAX_CAPTION_LEN, SAME_ROW_TOLERANCE,
};
