//! Shared test fixtures
//!
//! Builds small real PDFs with lopdf so integration tests can exercise
//! the whole pipeline from file loading onward.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use std::path::Path;

/// Write a PDF with one page of text operations per entry in `pages`.
/// Each operation list runs inside its own BT/ET block with a 12pt
/// Helvetica font selected.
pub fn write_pdf(path: &Path, pages: Vec<Vec<Operation>>) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    let page_count = pages.len() as i64;
    for operations in pages {
        let mut all = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 12.into()]),
        ];
        all.extend(operations);
        all.push(Operation::new("ET", vec![]));

        let content = Content { operations: all };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode content"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_count,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).expect("save fixture pdf");
}

/// Show `text` at position (x, y)
pub fn text_at(x: i64, y: i64, text: &str) -> Vec<Operation> {
    vec![
        Operation::new("Td", vec![x.into(), y.into()]),
        Operation::new("Tj", vec![Object::string_literal(text)]),
    ]
}

/// A two-page paper: a figure caption on page 1, a table heading with
/// its caption on the following line on page 2.
pub fn two_page_paper(path: &Path) {
    let mut page1 = Vec::new();
    page1.extend(text_at(72, 700, "Fig. 1. A widget diagram showing components."));

    let mut page2 = Vec::new();
    page2.extend(text_at(72, 700, "TABLE I"));
    page2.extend(text_at(0, -12, "Comparison of results across methods."));

    write_pdf(path, vec![page1, page2]);
}
