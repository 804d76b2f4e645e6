//! End-to-end detection tests
//!
//! Drives the detector both through real PDF files and through an
//! in-memory page source to pin the whole-document contract: reading
//! order, dedup across pages, canonical ordering and the JSON surface.

mod common;

use paperdeck::{
    CaptionKind, DetectError, FigureDetector, NullObserver, PageSource, TextFragment,
};

/// In-memory page source, one fragment list per page
struct Pages(Vec<Vec<TextFragment>>);

impl PageSource for Pages {
    fn page_count(&self) -> u32 {
        self.0.len() as u32
    }

    fn page_fragments(&self, page: u32) -> Result<Vec<TextFragment>, DetectError> {
        self.0
            .get(page as usize - 1)
            .cloned()
            .ok_or(DetectError::PageNotFound(page))
    }
}

fn frag(text: &str, x: f64, y: f64) -> TextFragment {
    TextFragment::new(text, x, y)
}

#[test]
fn detects_captions_in_real_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = dir.path().join("paper.pdf");
    common::two_page_paper(&pdf);

    let result = FigureDetector::new().detect(&pdf).unwrap();

    assert_eq!(result.total_pages, 2);
    assert_eq!(result.figures.len(), 2);

    let figure = &result.figures[0];
    assert_eq!(figure.kind, CaptionKind::Figure);
    assert_eq!(figure.number, "1");
    assert_eq!(figure.page, 1);
    assert_eq!(figure.caption, "A widget diagram showing components.");
    assert_eq!(figure.label, "Figure 1");

    let table = &result.figures[1];
    assert_eq!(table.kind, CaptionKind::Table);
    assert_eq!(table.number, "I");
    assert_eq!(table.page, 2);
    assert_eq!(table.caption, "Comparison of results across methods.");
    assert_eq!(table.label, "Table I");
}

#[test]
fn serializes_the_documented_shape() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = dir.path().join("paper.pdf");
    common::two_page_paper(&pdf);

    let result = FigureDetector::new().detect(&pdf).unwrap();
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["totalPages"], 2);
    assert!(json["pdfPath"].as_str().unwrap().ends_with("paper.pdf"));
    assert_eq!(json["figures"][0]["type"], "figure");
    assert_eq!(json["figures"][0]["number"], "1");
    assert_eq!(json["figures"][0]["page"], 1);
    assert_eq!(json["figures"][0]["label"], "Figure 1");
    assert_eq!(json["figures"][1]["type"], "table");
    assert_eq!(json["figures"][1]["label"], "Table I");
}

#[test]
fn scrambled_fragments_reconstruct_reading_order() {
    // Fragment arrival order is meaningless; positions are everything
    let source = Pages(vec![vec![
        frag("diagram showing components.", 160.0, 500.0),
        frag("Fig.", 72.0, 500.0),
        frag("A widget", 110.0, 500.0),
        frag("1.", 95.0, 500.0),
    ]]);

    let result = FigureDetector::new()
        .detect_from(&source, "scrambled.pdf", &NullObserver)
        .unwrap();

    assert_eq!(result.figures.len(), 1);
    assert_eq!(
        result.figures[0].caption,
        "A widget diagram showing components."
    );
}

#[test]
fn cross_page_redetection_keeps_first_page() {
    let source = Pages(vec![
        vec![frag("Fig. 2. Throughput under load", 72.0, 60.0)],
        vec![frag("Fig. 2. Throughput under load for all settings.", 72.0, 720.0)],
    ]);

    let result = FigureDetector::new()
        .detect_from(&source, "spill.pdf", &NullObserver)
        .unwrap();

    assert_eq!(result.figures.len(), 1);
    assert_eq!(result.figures[0].page, 1);
}

#[test]
fn result_is_canonically_ordered() {
    let source = Pages(vec![
        vec![frag("Table II: Second table.", 72.0, 700.0)],
        vec![frag("Fig. 3. Third figure.", 72.0, 700.0)],
        vec![frag("Fig. 1. First figure.", 72.0, 700.0)],
        vec![frag("Table I: First table.", 72.0, 700.0)],
    ]);

    let result = FigureDetector::new()
        .detect_from(&source, "paper.pdf", &NullObserver)
        .unwrap();

    let labels: Vec<&str> = result.figures.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, vec!["Figure 1", "Figure 3", "Table I", "Table II"]);
}

#[test]
fn long_captions_are_truncated() {
    let caption = "word ".repeat(120);
    let source = Pages(vec![vec![frag(&format!("Fig. 1. {caption}"), 72.0, 700.0)]]);

    let result = FigureDetector::new()
        .detect_from(&source, "long.pdf", &NullObserver)
        .unwrap();

    assert_eq!(result.figures[0].caption.chars().count(), 300);
}

#[test]
fn documents_without_captions_yield_empty_results() {
    let source = Pages(vec![
        vec![frag("An abstract about interesting things.", 72.0, 700.0)],
        vec![],
    ]);

    let result = FigureDetector::new()
        .detect_from(&source, "plain.pdf", &NullObserver)
        .unwrap();

    assert!(result.figures.is_empty());
    assert_eq!(result.total_pages, 2);
}

#[test]
fn missing_file_reports_not_found() {
    let result = FigureDetector::new().detect(std::path::Path::new("/no/such/paper.pdf"));
    assert!(matches!(result, Err(DetectError::PdfNotFound(_))));
}
