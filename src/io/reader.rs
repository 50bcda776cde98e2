//! Reading input files from disk.
//!
//! Inputs are read whole into memory as [`SourceDocument`]s named after
//! their file name. No PDF parsing happens here; that is left to ingestion.
//!
//! # Examples
//!
//! ```no_run
//! use pdfsplice::io::reader::PdfReader;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = PdfReader::new();
//! let paths = vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")];
//! let documents = reader.read_all(&paths, 4).await?;
//! # Ok(())
//! # }
//! ```

use log::debug;
use std::path::{Path, PathBuf};

use crate::config::InputSpec;
use crate::document::SourceDocument;
use crate::error::{Result, SpliceError};
use crate::utils::collect_paths_for_pattern;

/// Reader for input PDF files.
#[derive(Debug, Clone, Default)]
pub struct PdfReader {
    max_file_size: Option<u64>,
}

impl PdfReader {
    /// Create a reader without a size limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a reader that refuses files larger than `limit` bytes
    /// before loading them.
    pub fn with_max_file_size(limit: u64) -> Self {
        Self {
            max_file_size: Some(limit),
        }
    }

    /// Read one file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The path does not exist
    /// - The path is not a regular file
    /// - The file is larger than the reader's size limit
    /// - The file cannot be read
    pub async fn read(&self, path: &Path) -> Result<SourceDocument> {
        let metadata = tokio::fs::metadata(path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => SpliceError::file_not_found(path.to_path_buf()),
            _ => SpliceError::FailedToRead {
                path: path.to_path_buf(),
                source: e,
            },
        })?;

        if !metadata.is_file() {
            return Err(SpliceError::not_a_file(path.to_path_buf()));
        }

        if let Some(limit) = self.max_file_size
            && metadata.len() > limit
        {
            return Err(SpliceError::FileSizeExceeded {
                name: display_name(path),
                size: metadata.len(),
                limit,
            });
        }

        let content = tokio::fs::read(path)
            .await
            .map_err(|e| SpliceError::FailedToRead {
                path: path.to_path_buf(),
                source: e,
            })?;

        debug!("read {} ({} bytes)", path.display(), content.len());

        Ok(SourceDocument::new(display_name(path), content))
    }

    /// Read several files concurrently, at most `workers` at a time.
    ///
    /// Documents come back in the same order as `paths`. The first failure
    /// (in path order) is returned.
    pub async fn read_all(&self, paths: &[PathBuf], workers: usize) -> Result<Vec<SourceDocument>> {
        use futures::stream::{self, StreamExt};

        let tasks = paths.iter().enumerate().map(|(idx, path)| {
            let reader = self.clone();
            async move { (idx, reader.read(path).await) }
        });

        let mut indexed_results: Vec<(usize, Result<SourceDocument>)> = stream::iter(tasks)
            .buffer_unordered(workers.max(1))
            .collect::<Vec<_>>()
            .await;

        // Sort by original index to maintain order
        indexed_results.sort_by_key(|(idx, _)| *idx);

        indexed_results
            .into_iter()
            .map(|(_, result)| result)
            .collect()
    }
}

/// Name shown for a document: its file name, or the whole path if it has none.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Expand glob patterns in the requested inputs.
///
/// Each match inherits the range of the pattern it came from. Inputs without
/// glob metacharacters are passed through unchanged so a missing file is
/// reported by the reader.
///
/// # Errors
///
/// Returns an error if a pattern is invalid or matches nothing.
pub fn expand_inputs(inputs: &[InputSpec]) -> Result<Vec<InputSpec>> {
    let mut expanded = Vec::with_capacity(inputs.len());

    for input in inputs {
        let pattern = input.path.to_string_lossy();
        if !is_glob_pattern(&pattern) {
            expanded.push(input.clone());
            continue;
        }

        let matches = collect_paths_for_pattern(&pattern)?;
        if matches.is_empty() {
            return Err(SpliceError::file_not_found(input.path.clone()));
        }

        debug!("pattern {pattern} matched {} files", matches.len());
        expanded.extend(matches.into_iter().map(|path| InputSpec {
            path,
            range: input.range.clone(),
        }));
    }

    Ok(expanded)
}

fn is_glob_pattern(text: &str) -> bool {
    text.contains(['*', '?', '['])
}
