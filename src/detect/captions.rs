//! Caption extraction
//!
//! Scans reconstructed page text for figure and table caption headings
//! and collects the caption body across continuation lines.
//!
//! # Pattern model
//!
//! Each caption kind carries an ordered list of independent pattern
//! variants (a case-insensitive "Fig"/"Fig."/"Figure" form plus a strict
//! all-caps "FIGURE" form; "Table"/"TABLE" with a Roman-or-decimal
//! token). All variants funnel through the same per-page dedup by label,
//! first match wins. A caption ends at one of four delimiters: a blank
//! line, a line opening with two or more consecutive uppercase letters
//! (section headings), a line opening with a decimal number and a
//! period (numbered sections), or the next Fig/Table heading.

use super::types::{CaptionKind, CaptionRecord, MAX_CAPTION_LEN};
use regex::Regex;

/// Extractor for figure/table captions in page text
pub struct CaptionExtractor {
    figure_patterns: Vec<Regex>,
    table_patterns: Vec<Regex>,
    delimiter: Regex,
    max_caption_len: usize,
}

impl CaptionExtractor {
    /// Create an extractor with the default caption cap
    pub fn new() -> Self {
        Self::with_max_len(MAX_CAPTION_LEN)
    }

    /// Create an extractor with a custom caption cap
    pub fn with_max_len(max_caption_len: usize) -> Self {
        // The trailing group is optional: a heading may sit alone on its
        // line ("TABLE I") with the caption body on the following lines.
        let figure_patterns = vec![
            Regex::new(r"(?i)^\s*Fig(?:ure|\.)?\s*(\d+)(?:[.:\s]+(.*))?\s*$")
                .expect("figure pattern"),
            Regex::new(r"^\s*FIGURE\s+(\d+)(?:[.:\s]+(.*))?\s*$").expect("all-caps figure pattern"),
        ];
        let table_patterns =
            vec![Regex::new(r"(?i)^\s*Table\s+([IVX\d]+)(?:[.:\s]+(.*))?\s*$")
                .expect("table pattern")];
        let delimiter =
            Regex::new(r"^(?:[A-Z]{2,}|\d+\.|Fig|Table)").expect("delimiter pattern");

        Self {
            figure_patterns,
            table_patterns,
            delimiter,
            max_caption_len,
        }
    }

    /// Extract all caption records from one page's reconstructed text.
    ///
    /// Output order follows pattern and match order, not the final
    /// canonical order. Candidates resolving to an already-seen label on
    /// this page are folded into the first match.
    pub fn extract(&self, page_text: &str, page: u32) -> Vec<CaptionRecord> {
        let lines: Vec<&str> = page_text.lines().collect();
        let mut records: Vec<CaptionRecord> = Vec::new();

        for pattern in &self.figure_patterns {
            self.collect_matches(pattern, CaptionKind::Figure, &lines, page, &mut records);
        }
        for pattern in &self.table_patterns {
            self.collect_matches(pattern, CaptionKind::Table, &lines, page, &mut records);
        }

        records
    }

    fn collect_matches(
        &self,
        pattern: &Regex,
        kind: CaptionKind,
        lines: &[&str],
        page: u32,
        records: &mut Vec<CaptionRecord>,
    ) {
        for (index, line) in lines.iter().enumerate() {
            let Some(captures) = pattern.captures(line) else {
                continue;
            };
            let number = &captures[1];
            let label = format!("{} {}", kind.label_prefix(), number);
            if records.iter().any(|r| r.label == label) {
                continue;
            }

            let lead = captures.get(2).map(|m| m.as_str());
            let caption = self.caption_text(lead, &lines[index + 1..]);
            records.push(CaptionRecord::new(kind, number, page, caption));
        }
    }

    /// Assemble the caption body: the heading's trailing text plus
    /// continuation lines up to (not including) the first delimiter,
    /// whitespace-collapsed and capped.
    fn caption_text(&self, lead: Option<&str>, following: &[&str]) -> String {
        let mut parts: Vec<&str> = Vec::new();
        if let Some(lead) = lead {
            if !lead.trim().is_empty() {
                parts.push(lead);
            }
        }
        for line in following {
            if self.is_delimiter(line) {
                break;
            }
            parts.push(line);
        }

        let collapsed = parts
            .join(" ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        collapsed.chars().take(self.max_caption_len).collect()
    }

    /// Check whether a line terminates a running caption
    pub fn is_delimiter(&self, line: &str) -> bool {
        line.trim().is_empty() || self.delimiter.is_match(line)
    }
}

impl Default for CaptionExtractor {
    fn default() -> Self {
        Self::new()
    }
}
