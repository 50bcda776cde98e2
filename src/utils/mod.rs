//! Utilities for path collection, PDF object copying and size formatting.

use crate::error::{Result, SpliceError};
use lopdf::{Document, Object, ObjectId};
use std::collections::HashSet;
use std::path::PathBuf;

/// Expand a glob pattern into filesystem paths.
///
/// Pattern examples:
/// - `"**/*.pdf"`
/// - `"./docs/chapter-*.pdf"`
///
/// A pattern without wildcards yields the path itself if it exists.
/// Matches are returned in the order `glob` produces them (alphabetical).
///
/// Errors:
/// - Invalid patterns are reported as configuration errors.
/// - Filesystem errors from the glob iterator are propagated.
pub fn collect_paths_for_pattern<P: AsRef<str>>(pattern: P) -> Result<Vec<PathBuf>> {
    let mut resolved_paths = Vec::new();

    let paths = glob::glob(pattern.as_ref()).map_err(|err| {
        SpliceError::invalid_config(format!("Invalid pattern '{}': {err}", pattern.as_ref()))
    })?;

    for entry in paths {
        let path = entry.map_err(|err| SpliceError::Io(std::io::Error::from(err)))?;
        resolved_paths.push(path);
    }

    Ok(resolved_paths)
}

/// Copy object references from one PDF document to another.
///
/// If `obj` is a reference, this walks the structure recursively and inserts
/// missing referenced objects into the `target` document. References to ids
/// in `skip` are left as they are and not followed.
///
/// Both documents must already use disjoint object ids for the copied range;
/// renumber the source first.
pub fn copy_references(
    target: &mut Document,
    source: &Document,
    obj: &Object,
    skip: &HashSet<ObjectId>,
) {
    match obj {
        Object::Reference(ref_id) => {
            if !skip.contains(ref_id)
                && !target.objects.contains_key(ref_id)
                && let Ok(referenced_obj) = source.get_object(*ref_id)
            {
                target.objects.insert(*ref_id, referenced_obj.clone());
                copy_references(target, source, referenced_obj, skip);
            }
        }
        Object::Dictionary(dict) => {
            for (_, value) in dict.iter() {
                copy_references(target, source, value, skip);
            }
        }
        Object::Array(arr) => {
            for item in arr {
                copy_references(target, source, item, skip);
            }
        }
        Object::Stream(stream) => {
            for (_, value) in stream.dict.iter() {
                copy_references(target, source, value, skip);
            }
        }
        _ => {}
    }
}

/// Format file size as human-readable string.
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{size} bytes")
    }
}
