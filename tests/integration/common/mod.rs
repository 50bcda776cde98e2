//! Shared helpers for integration tests.
//!
//! Test PDFs are generated in memory. Every page carries a MediaBox whose
//! width encodes a document tag and the page number, so the order of pages in
//! a merged output can be read back: page `p` (1-based) of a document tagged
//! `t` is `t * 100 + p` points wide.

#![allow(dead_code)]

use lopdf::{Document, Object, Stream, dictionary};
use std::path::{Path, PathBuf};

use pdfsplice::document::SourceDocument;

/// Build a PDF with `pages` pages for document tag `tag`.
pub fn pdf_bytes(tag: i64, pages: usize) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });

    let kids: Vec<Object> = (1..=pages as i64)
        .map(|page| {
            let content = format!("BT /F1 24 Tf 72 720 Td (doc {tag} page {page}) Tj ET");
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
            doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), (tag * 100 + page).into(), 792.into()],
                "Contents" => content_id,
            })
            .into()
        })
        .collect();

    doc.objects.insert(
        pages_id,
        dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages as i64,
            "Resources" => dictionary! {
                "Font" => dictionary! { "F1" => font_id },
            },
        }
        .into(),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("Failed to serialize test PDF");
    bytes
}

/// A source document named `name` built by [`pdf_bytes`].
pub fn source(name: &str, tag: i64, pages: usize) -> SourceDocument {
    SourceDocument::new(name, pdf_bytes(tag, pages))
}

/// Write a generated PDF into `dir` and return its path.
pub fn write_pdf(dir: &Path, name: &str, tag: i64, pages: usize) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, pdf_bytes(tag, pages)).expect("Failed to write test PDF");
    path
}

/// Page widths of a PDF in page order, as `(tag, page)` pairs.
pub fn page_tags(bytes: &[u8]) -> Vec<(i64, i64)> {
    let doc = Document::load_mem(bytes).expect("Output is not a readable PDF");
    doc.get_pages()
        .into_values()
        .map(|id| {
            let page = doc.get_dictionary(id).expect("Page is not a dictionary");
            let media_box = page
                .get(b"MediaBox")
                .and_then(Object::as_array)
                .expect("Page has no MediaBox");
            let width = media_box[2].as_i64().expect("MediaBox width is not an integer");
            (width / 100, width % 100)
        })
        .collect()
}
