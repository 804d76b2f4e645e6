//! Positioned text extraction from PDF pages
//!
//! Backs the detector's `PageSource` seam with lopdf. The walker tracks
//! a simplified text cursor through each page's content stream and emits
//! one positioned fragment per show-text operator. Glyph widths, font
//! programs and the full transformation matrix are deliberately not
//! modelled: caption detection needs fragment strings and their line
//! positions, nothing more.

use crate::detect::{DetectError, PageSource, Result, TextFragment};
use lopdf::content::Content;
use lopdf::{Document, Object};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::trace;

/// Kerning adjustment inside a `TJ` array (in thousandths of an em)
/// below which a word gap is assumed. PDFs routinely encode inter-word
/// spacing as negative offsets instead of space glyphs.
const TJ_WORD_GAP: f64 = -100.0;

/// Simplified text-positioning state within one content stream
#[derive(Debug, Clone, Copy, Default)]
struct TextCursor {
    x: f64,
    y: f64,
    leading: f64,
}

impl TextCursor {
    fn next_line(&mut self) {
        self.y -= self.leading;
    }
}

/// lopdf-backed page source
pub struct PdfTextSource {
    doc: Document,
    pages: BTreeMap<u32, lopdf::ObjectId>,
}

impl PdfTextSource {
    /// Open a PDF file
    pub fn open(path: &Path) -> Result<Self> {
        let doc = Document::load(path)?;
        Ok(Self::from_document(doc))
    }

    /// Wrap an already-loaded document
    pub fn from_document(doc: Document) -> Self {
        let pages = doc.get_pages();
        Self { doc, pages }
    }

    fn collect_fragments(&self, page_id: lopdf::ObjectId) -> Result<Vec<TextFragment>> {
        let data = self.doc.get_page_content(page_id)?;
        let content = Content::decode(&data)?;

        let mut fragments = Vec::new();
        let mut cursor = TextCursor::default();

        for operation in &content.operations {
            match operation.operator.as_str() {
                "BT" => cursor = TextCursor::default(),
                "Tm" => {
                    // Only the translation components matter here
                    if let (Some(e), Some(f)) = (
                        operation.operands.get(4).and_then(operand_number),
                        operation.operands.get(5).and_then(operand_number),
                    ) {
                        cursor.x = e;
                        cursor.y = f;
                    }
                }
                "Td" | "TD" => {
                    if let (Some(tx), Some(ty)) = (
                        operation.operands.first().and_then(operand_number),
                        operation.operands.get(1).and_then(operand_number),
                    ) {
                        cursor.x += tx;
                        cursor.y += ty;
                        if operation.operator == "TD" {
                            cursor.leading = -ty;
                        }
                    }
                }
                "TL" => {
                    if let Some(leading) = operation.operands.first().and_then(operand_number) {
                        cursor.leading = leading;
                    }
                }
                "T*" => cursor.next_line(),
                "Tj" => {
                    if let Some(obj) = operation.operands.first() {
                        push_fragment(&mut fragments, decode_string(obj), cursor);
                    }
                }
                "'" => {
                    cursor.next_line();
                    if let Some(obj) = operation.operands.first() {
                        push_fragment(&mut fragments, decode_string(obj), cursor);
                    }
                }
                "\"" => {
                    cursor.next_line();
                    if let Some(obj) = operation.operands.get(2) {
                        push_fragment(&mut fragments, decode_string(obj), cursor);
                    }
                }
                "TJ" => {
                    if let Some(Object::Array(elements)) = operation.operands.first() {
                        let mut text = String::new();
                        for element in elements {
                            match element {
                                Object::String(_, _) => text.push_str(&decode_string(element)),
                                _ => {
                                    if let Some(offset) = operand_number(element) {
                                        if offset < TJ_WORD_GAP {
                                            text.push(' ');
                                        }
                                    }
                                }
                            }
                        }
                        push_fragment(&mut fragments, text, cursor);
                    }
                }
                _ => {}
            }
        }

        trace!(fragments = fragments.len(), "page content walked");
        Ok(fragments)
    }
}

impl PageSource for PdfTextSource {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page_fragments(&self, page: u32) -> Result<Vec<TextFragment>> {
        let page_id = *self
            .pages
            .get(&page)
            .ok_or(DetectError::PageNotFound(page))?;
        self.collect_fragments(page_id)
    }
}

fn push_fragment(fragments: &mut Vec<TextFragment>, text: String, cursor: TextCursor) {
    fragments.push(TextFragment::new(text, cursor.x, cursor.y));
}

/// Decode a PDF string object: UTF-16BE when BOM-prefixed, otherwise
/// bytes map through Latin-1. Caption headings live in the ASCII range
/// shared by all the standard single-byte encodings, so no font-specific
/// decoding is attempted.
fn decode_string(obj: &Object) -> String {
    let Object::String(bytes, _) = obj else {
        return String::new();
    };
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16_lossy(&utf16)
    } else {
        bytes.iter().map(|&b| char::from(b)).collect()
    }
}

fn operand_number(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(value) => Some(*value as f64),
        Object::Real(value) => Some(f64::from(*value)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::Operation;
    use lopdf::{dictionary, Stream, StringFormat};

    fn document_with_operations(operations: Vec<Operation>) -> Document {
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
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().unwrap(),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc
    }

    fn text_ops(ops: Vec<Operation>) -> Vec<Operation> {
        let mut all = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 12.into()]),
        ];
        all.extend(ops);
        all.push(Operation::new("ET", vec![]));
        all
    }

    #[test]
    fn test_positioned_fragment() {
        let doc = document_with_operations(text_ops(vec![
            Operation::new("Td", vec![72.into(), 700.into()]),
            Operation::new("Tj", vec![Object::string_literal("Fig. 1. A widget")]),
        ]));
        let source = PdfTextSource::from_document(doc);

        assert_eq!(source.page_count(), 1);
        let fragments = source.page_fragments(1).unwrap();
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].text, "Fig. 1. A widget");
        assert_eq!(fragments[0].x, 72.0);
        assert_eq!(fragments[0].y, 700.0);
    }

    #[test]
    fn test_relative_moves_accumulate() {
        let doc = document_with_operations(text_ops(vec![
            Operation::new("Td", vec![72.into(), 700.into()]),
            Operation::new("Tj", vec![Object::string_literal("first")]),
            Operation::new("Td", vec![0.into(), (-12).into()]),
            Operation::new("Tj", vec![Object::string_literal("second")]),
        ]));
        let source = PdfTextSource::from_document(doc);

        let fragments = source.page_fragments(1).unwrap();
        assert_eq!(fragments.len(), 2);
        assert_eq!((fragments[0].x, fragments[0].y), (72.0, 700.0));
        assert_eq!((fragments[1].x, fragments[1].y), (72.0, 688.0));
    }

    #[test]
    fn test_text_matrix_sets_position() {
        let doc = document_with_operations(text_ops(vec![
            Operation::new(
                "Tm",
                vec![1.into(), 0.into(), 0.into(), 1.into(), 300.into(), 500.into()],
            ),
            Operation::new("Tj", vec![Object::string_literal("anchored")]),
        ]));
        let source = PdfTextSource::from_document(doc);

        let fragments = source.page_fragments(1).unwrap();
        assert_eq!((fragments[0].x, fragments[0].y), (300.0, 500.0));
    }

    #[test]
    fn test_leading_and_next_line() {
        let doc = document_with_operations(text_ops(vec![
            Operation::new("Td", vec![72.into(), 700.into()]),
            Operation::new("TL", vec![14.into()]),
            Operation::new("Tj", vec![Object::string_literal("first")]),
            Operation::new("T*", vec![]),
            Operation::new("Tj", vec![Object::string_literal("second")]),
        ]));
        let source = PdfTextSource::from_document(doc);

        let fragments = source.page_fragments(1).unwrap();
        assert_eq!(fragments[1].y, 686.0);
    }

    #[test]
    fn test_tj_array_kerning_gap() {
        let array: Object = vec![
            Object::string_literal("Fig."),
            (-250).into(),
            Object::string_literal("1."),
            (-20).into(),
            Object::string_literal("A"),
        ]
        .into();
        let doc = document_with_operations(text_ops(vec![
            Operation::new("Td", vec![72.into(), 700.into()]),
            Operation::new("TJ", vec![array]),
        ]));
        let source = PdfTextSource::from_document(doc);

        let fragments = source.page_fragments(1).unwrap();
        // -250 crosses the word-gap threshold, -20 is plain kerning
        assert_eq!(fragments[0].text, "Fig. 1.A");
    }

    #[test]
    fn test_utf16_string_decoded() {
        let bytes: Vec<u8> = [0xFEu8, 0xFF]
            .into_iter()
            .chain("Fig".encode_utf16().flat_map(|u| u.to_be_bytes()))
            .collect();
        let decoded = decode_string(&Object::String(bytes, StringFormat::Literal));
        assert_eq!(decoded, "Fig");
    }

    #[test]
    fn test_latin1_fallback() {
        let decoded = decode_string(&Object::String(
            vec![b'F', b'i', b'g', 0xB5],
            StringFormat::Literal,
        ));
        assert_eq!(decoded, "Figµ");
    }

    #[test]
    fn test_missing_page() {
        let doc = document_with_operations(text_ops(vec![]));
        let source = PdfTextSource::from_document(doc);

        let result = source.page_fragments(5);
        assert!(matches!(result, Err(DetectError::PageNotFound(5))));
    }
}
