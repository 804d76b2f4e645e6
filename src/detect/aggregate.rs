//! Cross-page aggregation and canonical ordering
//!
//! Captions are re-detected when they wrap across internal line
//! boundaries or when pattern variants overlap, so per-page candidates
//! funnel through a label-keyed, first-seen-wins accumulator. Pages must
//! be fed in ascending order: "first seen" is defined relative to that
//! traversal, which resolves a caption spilling from page N onto page
//! N+1 in favor of the page-N record.

use super::roman::roman_to_int;
use super::types::CaptionRecord;
use std::collections::HashSet;
use tracing::debug;

/// First-seen-wins accumulator for caption records.
///
/// The aggregator only grows; records are never removed or replaced.
/// Its lifetime is exactly one detection run.
#[derive(Debug, Default)]
pub struct CaptionAggregator {
    seen: HashSet<String>,
    records: Vec<CaptionRecord>,
}

impl CaptionAggregator {
    /// Create an empty aggregator
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a candidate record. Returns the accepted record if its
    /// label was new, `None` if an earlier record already owns the label.
    pub fn insert(&mut self, record: CaptionRecord) -> Option<&CaptionRecord> {
        if !self.seen.insert(record.label.clone()) {
            debug!(label = %record.label, page = record.page, "duplicate caption discarded");
            return None;
        }
        self.records.push(record);
        self.records.last()
    }

    /// Number of accepted records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check whether nothing has been accepted yet
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Consume the aggregator, returning records in encounter order
    pub fn into_records(self) -> Vec<CaptionRecord> {
        self.records
    }

    /// Consume the aggregator, returning records in canonical order
    pub fn into_sorted(self) -> Vec<CaptionRecord> {
        let mut records = self.records;
        sort_captions(&mut records);
        records
    }
}

/// Impose the canonical result ordering: all figures before all tables,
/// then ascending resolved numeric value, with ties keeping encounter
/// order (the sort is stable). This is a total ordering; records whose
/// number resolves neither as Roman nor as decimal rank as 0.
pub fn sort_captions(records: &mut [CaptionRecord]) {
    records.sort_by(|a, b| {
        a.kind
            .cmp(&b.kind)
            .then_with(|| numeric_rank(&a.number).cmp(&numeric_rank(&b.number)))
    });
}

/// Resolve a raw number token to its sort rank: Roman conversion first,
/// then decimal parse, else 0 (lowest rank, detection still succeeds).
pub fn numeric_rank(number: &str) -> u32 {
    roman_to_int(number)
        .or_else(|| number.trim().parse().ok())
        .unwrap_or(0)
}
