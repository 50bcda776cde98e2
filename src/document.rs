//! The ordered list of documents waiting to be merged.
//!
//! Each [`DocumentEntry`] keeps a source document together with its page
//! count and its current page range, so the three can never drift apart.
//! Reordering and removal work on positions in the list.

use log::debug;
use std::sync::Arc;

use crate::config::Limits;
use crate::error::{Result, SpliceError};
use crate::merge::PdfCodec;
use crate::range;

/// How far into a file the `%PDF-` marker may appear.
const PDF_HEADER_WINDOW: usize = 1024;

/// A source document: its name, raw content and size.
///
/// The content is shared read-only and never modified once added.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    name: String,
    content: Arc<[u8]>,
    size: u64,
}

impl SourceDocument {
    /// Create a document from a display name and its content.
    pub fn new(name: impl Into<String>, content: impl Into<Arc<[u8]>>) -> Self {
        let content = content.into();
        Self {
            name: name.into(),
            size: content.len() as u64,
            content,
        }
    }

    /// Display name (usually the file name).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw document bytes.
    pub fn content(&self) -> &Arc<[u8]> {
        &self.content
    }

    /// Size in bytes.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Whether the content carries a PDF header.
    pub fn looks_like_pdf(&self) -> bool {
        let window = &self.content[..self.content.len().min(PDF_HEADER_WINDOW)];
        window.windows(5).any(|bytes| bytes == b"%PDF-")
    }
}

/// A document in the merge list together with its page count and range.
#[derive(Debug, Clone)]
pub struct DocumentEntry {
    document: SourceDocument,
    page_count: usize,
    range: String,
}

impl DocumentEntry {
    /// Create an entry covering every page.
    pub fn new(document: SourceDocument, page_count: usize) -> Self {
        Self {
            document,
            page_count,
            range: range::full_range(page_count),
        }
    }

    /// The source document.
    pub fn document(&self) -> &SourceDocument {
        &self.document
    }

    /// Display name of the source document.
    pub fn name(&self) -> &str {
        self.document.name()
    }

    /// Page count recorded when the document was added.
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Current page range text.
    pub fn range(&self) -> &str {
        &self.range
    }

    /// Replace the page range text. No validation happens until merge.
    pub fn set_range(&mut self, range: impl Into<String>) {
        self.range = range.into();
    }

    /// Resolve the current range against the recorded page count.
    pub fn resolved(&self) -> Vec<usize> {
        range::resolve(&self.range, self.page_count)
    }
}

/// Ordered list of documents to merge.
#[derive(Debug, Clone, Default)]
pub struct DocumentList {
    entries: Vec<DocumentEntry>,
    limits: Limits,
}

impl DocumentList {
    /// Create an empty list with the given limits.
    pub fn new(limits: Limits) -> Self {
        Self {
            entries: Vec::new(),
            limits,
        }
    }

    /// Limits enforced on ingestion.
    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// Add a batch of files to the end of the list.
    ///
    /// The batch is accepted or rejected as a whole. Checks run in order:
    /// 1. every file must look like a PDF
    /// 2. the list may not grow past `max_files` (counting the whole batch,
    ///    duplicates included)
    /// 3. every file must be at most `max_file_size` bytes
    ///
    /// Files whose name and size match an entry already in the list are then
    /// skipped. Page counts of the remaining files are decoded concurrently,
    /// at most `jobs` at a time, and entries are appended in batch order
    /// with a full range.
    ///
    /// Returns the number of entries added.
    ///
    /// # Errors
    ///
    /// Returns an error if a check fails or a file cannot be decoded. The
    /// list is unchanged in that case.
    pub async fn ingest<C: PdfCodec>(
        &mut self,
        batch: Vec<SourceDocument>,
        codec: &Arc<C>,
        jobs: usize,
    ) -> Result<usize> {
        use futures::stream::{self, StreamExt};

        if let Some(file) = batch.iter().find(|file| !file.looks_like_pdf()) {
            return Err(SpliceError::UnsupportedFileType {
                name: file.name().to_string(),
            });
        }

        if self.entries.len() + batch.len() > self.limits.max_files {
            return Err(SpliceError::FileCountExceeded {
                limit: self.limits.max_files,
            });
        }

        if let Some(file) = batch
            .iter()
            .find(|file| file.size() > self.limits.max_file_size)
        {
            return Err(SpliceError::FileSizeExceeded {
                name: file.name().to_string(),
                size: file.size(),
                limit: self.limits.max_file_size,
            });
        }

        let unique: Vec<SourceDocument> = batch
            .into_iter()
            .filter(|file| !self.contains(file.name(), file.size()))
            .collect();

        let tasks = unique.iter().enumerate().map(|(idx, file)| {
            let codec = Arc::clone(codec);
            let content = Arc::clone(file.content());
            let name = file.name().to_string();
            async move {
                let result = tokio::task::spawn_blocking(move || codec.count_pages(&content))
                    .await
                    .map_err(|e| SpliceError::codec_failure(&name, e))
                    .and_then(|counted| counted.map_err(|e| SpliceError::codec_failure(&name, e)));
                (idx, result)
            }
        });

        let mut indexed_counts: Vec<(usize, Result<usize>)> = stream::iter(tasks)
            .buffer_unordered(jobs.max(1))
            .collect::<Vec<_>>()
            .await;

        // Sort by original index to maintain order
        indexed_counts.sort_by_key(|(idx, _)| *idx);

        let mut new_entries = Vec::with_capacity(unique.len());
        for (file, (_, count)) in unique.into_iter().zip(indexed_counts) {
            let page_count = count?;
            debug!("counted {page_count} pages in {}", file.name());
            new_entries.push(DocumentEntry::new(file, page_count));
        }

        let added = new_entries.len();
        self.entries.extend(new_entries);
        Ok(added)
    }

    /// Whether an entry with this name and size is already present.
    fn contains(&self, name: &str, size: u64) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.name() == name && entry.document().size() == size)
    }

    /// Remove the entry at `index`.
    pub fn remove(&mut self, index: usize) -> Option<DocumentEntry> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }

    /// Swap the entry at `index` with the one before it.
    ///
    /// Returns `false` (and does nothing) for the first entry or an invalid index.
    pub fn move_up(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.entries.len() {
            return false;
        }
        self.entries.swap(index - 1, index);
        true
    }

    /// Swap the entry at `index` with the one after it.
    ///
    /// Returns `false` (and does nothing) for the last entry or an invalid index.
    pub fn move_down(&mut self, index: usize) -> bool {
        if index >= self.entries.len().saturating_sub(1) {
            return false;
        }
        self.entries.swap(index, index + 1);
        true
    }

    /// Replace the range text of the entry at `index`.
    pub fn set_range(&mut self, index: usize, range: impl Into<String>) -> bool {
        match self.entries.get_mut(index) {
            Some(entry) => {
                entry.set_range(range);
                true
            }
            None => false,
        }
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in merge order.
    pub fn entries(&self) -> &[DocumentEntry] {
        &self.entries
    }

    /// Entry at `index`.
    pub fn get(&self, index: usize) -> Option<&DocumentEntry> {
        self.entries.get(index)
    }

    /// Whether another batch of files could still be added.
    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.limits.max_files
    }

    /// Total number of pages the current ranges select.
    pub fn total_pages(&self) -> usize {
        self.entries.iter().map(|entry| entry.resolved().len()).sum()
    }
}
