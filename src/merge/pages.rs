//! Page tree operations on `lopdf` documents.
//!
//! This module handles page-level operations including:
//! - Building an empty output document
//! - Copying selected pages (with their resources) between documents
//! - Appending pages to the output page tree

use lopdf::{Dictionary, Document, Object, ObjectId, dictionary};
use std::collections::HashSet;

use crate::merge::codec::{CodecError, CodecResult};
use crate::utils::copy_references;

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Guard against cyclic `/Parent` chains in damaged files.
const MAX_TREE_DEPTH: usize = 64;

/// Create an empty document with a catalog and a page tree root.
pub fn new_output_document() -> Document {
    let mut doc = Document::with_version("1.7");

    let pages_id = doc.add_object(dictionary! {
        "Type" => "Pages",
        "Kids" => Vec::<Object>::new(),
        "Count" => 0_i64,
    });
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc
}

/// Copy the pages at `indices` from `source` into `target`.
///
/// Indices are 0-based and applied in order. Every occurrence gets its own
/// page object, so a repeated index produces independent pages that share
/// content and resources. Returns the number of pages appended.
///
/// # Errors
///
/// Returns an error if an index is out of bounds or either document's page
/// tree is damaged.
pub fn copy_pages(target: &mut Document, mut source: Document, indices: &[usize]) -> CodecResult<usize> {
    let page_count = source.get_pages().len();
    if let Some(&index) = indices.iter().find(|&&index| index >= page_count) {
        return Err(CodecError::new(format!(
            "page index {index} out of bounds for document with {page_count} pages"
        )));
    }

    // Renumber objects to avoid ID conflicts
    source.renumber_objects_with(target.max_id + 1);
    target.max_id = target.max_id.max(source.max_id);

    let source_pages: Vec<ObjectId> = source.get_pages().into_values().collect();
    let tree_ids = page_tree_ids(&source, &source_pages);
    let pages_id = page_tree_root(target)?;

    let mut new_page_ids = Vec::with_capacity(indices.len());
    for &index in indices {
        let mut page = inherited_page_dictionary(&source, source_pages[index])?;
        page.remove(b"Parent");

        // Back-links into the source tree (annotation /P, link targets)
        // would otherwise drag every page along
        for (_, value) in page.iter() {
            copy_references(target, &source, value, &tree_ids);
        }

        let page_id = target.new_object_id();
        page.set("Parent", pages_id);
        adopt_annotations(target, &mut page, page_id, &tree_ids);
        target.objects.insert(page_id, Object::Dictionary(page));
        new_page_ids.push(page_id);
    }

    append_pages(target, pages_id, &new_page_ids)?;

    Ok(new_page_ids.len())
}

/// Clone a page dictionary and fill in attributes inherited from the tree.
fn inherited_page_dictionary(source: &Document, page_id: ObjectId) -> CodecResult<Dictionary> {
    let mut page = source.get_dictionary(page_id)?.clone();
    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();

    for _ in 0..MAX_TREE_DEPTH {
        let Some(parent_id) = parent else {
            break;
        };
        let node = source.get_dictionary(parent_id)?;

        for key in INHERITABLE_KEYS {
            if !page.has(key)
                && let Ok(value) = node.get(key)
            {
                page.set(key.to_vec(), value.clone());
            }
        }

        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
    }

    Ok(page)
}

/// Ids of the source catalog, its pages and every page tree node above them.
fn page_tree_ids(source: &Document, pages: &[ObjectId]) -> HashSet<ObjectId> {
    let mut ids: HashSet<ObjectId> = pages.iter().copied().collect();

    if let Ok(root) = source.trailer.get(b"Root").and_then(Object::as_reference) {
        ids.insert(root);
    }

    for &page_id in pages {
        let mut node = page_id;
        for _ in 0..MAX_TREE_DEPTH {
            let Ok(parent) = source
                .get_dictionary(node)
                .and_then(|dict| dict.get(b"Parent"))
                .and_then(Object::as_reference)
            else {
                break;
            };
            if !ids.insert(parent) {
                break;
            }
            node = parent;
        }
    }

    ids
}

/// Point annotations owned by a source page at the copied page `page_id`.
///
/// Inline annotations are fixed in `page`; referenced ones in `target`.
fn adopt_annotations(
    target: &mut Document,
    page: &mut Dictionary,
    page_id: ObjectId,
    source_tree: &HashSet<ObjectId>,
) {
    let annots = match page.get_mut(b"Annots") {
        Ok(Object::Array(items)) => {
            for item in items.iter_mut() {
                if let Object::Dictionary(annot) = item {
                    adopt(annot, page_id, source_tree);
                }
            }
            items.clone()
        }
        Ok(Object::Reference(id)) => match target.get_object(*id).and_then(Object::as_array) {
            Ok(items) => items.clone(),
            Err(_) => return,
        },
        _ => return,
    };

    for annot in annots {
        if let Object::Reference(annot_id) = annot
            && let Ok(Object::Dictionary(dict)) = target.get_object_mut(annot_id)
        {
            adopt(dict, page_id, source_tree);
        }
    }
}

fn adopt(annot: &mut Dictionary, page_id: ObjectId, source_tree: &HashSet<ObjectId>) {
    let owned_by_source = matches!(
        annot.get(b"P"),
        Ok(Object::Reference(owner)) if source_tree.contains(owner)
    );
    if owned_by_source {
        annot.set("P", page_id);
    }
}

/// Object id of the catalog's `/Pages` node.
fn page_tree_root(doc: &Document) -> CodecResult<ObjectId> {
    let pages_id = doc
        .catalog()
        .and_then(|catalog| catalog.get(b"Pages"))
        .and_then(Object::as_reference)
        .map_err(|e| CodecError::new(format!("Failed to get pages reference: {e}")))?;
    Ok(pages_id)
}

/// Add pages to the page tree root and update its count.
fn append_pages(doc: &mut Document, pages_id: ObjectId, page_ids: &[ObjectId]) -> CodecResult<()> {
    let pages_obj = doc
        .get_object_mut(pages_id)
        .map_err(|e| CodecError::new(format!("Failed to get pages object: {e}")))?;

    let Object::Dictionary(dict) = pages_obj else {
        return Err(CodecError::new("Pages object is not a dictionary"));
    };

    let kids = dict
        .get_mut(b"Kids")
        .map_err(|_| CodecError::new("Pages dictionary missing Kids array"))?;

    let Object::Array(kids_array) = kids else {
        return Err(CodecError::new("Kids is not an array"));
    };
    kids_array.extend(page_ids.iter().map(|&id| Object::Reference(id)));

    let current_count = dict.get(b"Count").and_then(|c| c.as_i64()).unwrap_or(0);
    dict.set("Count", Object::Integer(current_count + page_ids.len() as i64));

    Ok(())
}
