//! Reading order reconstruction
//!
//! Turns the unordered bag of positioned fragments extracted from one
//! page into text lines in natural reading order (top-to-bottom,
//! left-to-right). Fragment coordinates follow the PDF convention where
//! the vertical position grows upward, so "first line" means the
//! fragment row with the largest vertical position.

use super::types::{TextFragment, LINE_BREAK_THRESHOLD, SAME_ROW_TOLERANCE};
use std::cmp::Ordering;

/// Options for line reconstruction
#[derive(Debug, Clone)]
pub struct LineOptions {
    /// Vertical tolerance for sorting fragments as one row
    pub same_row_tolerance: f64,

    /// Vertical drop from a line's anchor row that starts a new line
    pub line_break_threshold: f64,
}

impl Default for LineOptions {
    fn default() -> Self {
        Self {
            same_row_tolerance: SAME_ROW_TOLERANCE,
            line_break_threshold: LINE_BREAK_THRESHOLD,
        }
    }
}

/// Reconstructor for per-page text lines
pub struct LineReconstructor;

impl LineReconstructor {
    /// Reconstruct the full page text: lines joined with newlines,
    /// fragments within a line joined with single spaces.
    pub fn page_text(fragments: &[TextFragment], options: &LineOptions) -> String {
        Self::lines(fragments, options).join("\n")
    }

    /// Reconstruct the ordered sequence of line strings for one page.
    /// An empty fragment set yields no lines.
    pub fn lines(fragments: &[TextFragment], options: &LineOptions) -> Vec<String> {
        if fragments.is_empty() {
            return Vec::new();
        }

        let mut ordered: Vec<&TextFragment> = fragments.iter().collect();
        ordered.sort_by(|a, b| {
            // Topmost first; near-equal rows order left to right
            if (b.y - a.y).abs() > options.same_row_tolerance {
                b.y.partial_cmp(&a.y).unwrap_or(Ordering::Equal)
            } else {
                a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal)
            }
        });

        let mut lines: Vec<Vec<&str>> = Vec::new();
        let mut current: Vec<&str> = Vec::new();
        let mut anchor_y = ordered[0].y;

        for fragment in &ordered {
            if (fragment.y - anchor_y).abs() > options.line_break_threshold {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                anchor_y = fragment.y;
            }
            // Blank fragments still move the anchor band above, they just
            // contribute no content
            if !fragment.is_blank() {
                current.push(fragment.text.as_str());
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }

        lines.into_iter().map(|line| line.join(" ")).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frag(text: &str, x: f64, y: f64) -> TextFragment {
        TextFragment::new(text, x, y)
    }

    #[test]
    fn test_scrambled_row_orders_left_to_right() {
        let fragments = vec![frag("B", 10.0, 100.0), frag("A", 0.0, 100.0)];
        let text = LineReconstructor::page_text(&fragments, &LineOptions::default());
        assert_eq!(text, "A B");
    }

    #[test]
    fn test_rows_order_top_to_bottom() {
        let fragments = vec![
            frag("bottom", 0.0, 50.0),
            frag("top", 0.0, 700.0),
            frag("middle", 0.0, 400.0),
        ];
        let lines = LineReconstructor::lines(&fragments, &LineOptions::default());
        assert_eq!(lines, vec!["top", "middle", "bottom"]);
    }

    #[test]
    fn test_line_break_threshold() {
        // Delta 20 > 8: two lines
        let fragments = vec![frag("first", 0.0, 100.0), frag("second", 0.0, 80.0)];
        let lines = LineReconstructor::lines(&fragments, &LineOptions::default());
        assert_eq!(lines.len(), 2);

        // Delta 3 <= 8: one line
        let fragments = vec![frag("first", 0.0, 100.0), frag("second", 10.0, 97.0)];
        let lines = LineReconstructor::lines(&fragments, &LineOptions::default());
        assert_eq!(lines, vec!["first second"]);
    }

    #[test]
    fn test_baseline_jitter_within_line() {
        // Jitter of 6 units: beyond the 5-unit sort tolerance but inside
        // the 8-unit break band, so still one line
        let fragments = vec![frag("a", 0.0, 100.0), frag("b", 20.0, 94.0)];
        let lines = LineReconstructor::lines(&fragments, &LineOptions::default());
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn test_blank_fragments_dropped() {
        let fragments = vec![
            frag("kept", 0.0, 100.0),
            frag("", 10.0, 100.0),
            frag("   ", 20.0, 100.0),
            frag("also", 30.0, 100.0),
        ];
        let text = LineReconstructor::page_text(&fragments, &LineOptions::default());
        assert_eq!(text, "kept also");
    }

    #[test]
    fn test_empty_input() {
        let text = LineReconstructor::page_text(&[], &LineOptions::default());
        assert!(text.is_empty());
        assert!(LineReconstructor::lines(&[], &LineOptions::default()).is_empty());
    }

    #[test]
    fn test_multi_line_page() {
        let fragments = vec![
            frag("Fig.", 0.0, 500.0),
            frag("1.", 25.0, 500.0),
            frag("A", 40.0, 500.0),
            frag("caption", 52.0, 500.0),
            frag("spanning", 0.0, 488.0),
            frag("lines", 60.0, 488.0),
        ];
        let text = LineReconstructor::page_text(&fragments, &LineOptions::default());
        assert_eq!(text, "Fig. 1. A caption\nspanning lines");
    }

    #[test]
    fn test_custom_tolerances() {
        let options = LineOptions {
            same_row_tolerance: 1.0,
            line_break_threshold: 2.0,
        };
        let fragments = vec![frag("a", 0.0, 100.0), frag("b", 10.0, 96.0)];
        let lines = LineReconstructor::lines(&fragments, &options);
        assert_eq!(lines.len(), 2);
    }
}
