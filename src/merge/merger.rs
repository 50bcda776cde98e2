//! Merge orchestration.
//!
//! Walks the document list in order, resolves each entry's page range against
//! a fresh page count, and appends the selected pages to a single output
//! document. The first failure aborts the merge; nothing partial is returned.

use log::{debug, warn};
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::MERGED_FILE_NAME;
use crate::document::DocumentEntry;
use crate::error::{Result, SpliceError};
use crate::merge::codec::{LopdfCodec, PdfCodec};
use crate::range;
use crate::utils::format_file_size;

/// Statistics about a merge operation.
#[derive(Debug, Clone, Serialize)]
pub struct MergeStatistics {
    /// Number of documents merged.
    pub files_merged: usize,

    /// Total number of pages in merged document.
    pub total_pages: usize,

    /// Total size of input documents in bytes.
    pub input_size: u64,

    /// Size of the merged document in bytes.
    pub output_size: u64,

    /// Total time taken for merge.
    #[serde(serialize_with = "serialize_millis", rename = "merge_time_ms")]
    pub merge_time: Duration,
}

impl MergeStatistics {
    /// Format input size as human-readable string.
    pub fn format_input_size(&self) -> String {
        format_file_size(self.input_size)
    }

    /// Format output size as human-readable string.
    pub fn format_output_size(&self) -> String {
        format_file_size(self.output_size)
    }
}

fn serialize_millis<S: serde::Serializer>(
    duration: &Duration,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_u128(duration.as_millis())
}

/// Result of a merge operation.
#[derive(Debug, Clone)]
pub struct MergeOutput {
    /// The merged PDF.
    pub bytes: Vec<u8>,

    /// Suggested file name for the merged PDF.
    pub file_name: String,

    /// Statistics about the merge.
    pub statistics: MergeStatistics,
}

/// One document in a merge plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedDocument {
    /// Display name of the document.
    pub name: String,

    /// Page count recorded at ingestion.
    pub page_count: usize,

    /// The page range text as entered.
    pub range: String,

    /// Selected pages, 1-based, in output order.
    pub pages: Vec<usize>,
}

/// What a merge would produce, computed without touching PDF content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergePlan {
    /// Documents in merge order.
    pub documents: Vec<PlannedDocument>,

    /// Number of pages in the output.
    pub total_pages: usize,

    /// Suggested file name for the output.
    pub file_name: String,
}

/// Suggested output name: the source's own name for a single document,
/// otherwise [`MERGED_FILE_NAME`].
pub fn suggested_name(entries: &[DocumentEntry]) -> String {
    match entries {
        [only] => only.name().to_string(),
        _ => MERGED_FILE_NAME.to_string(),
    }
}

/// PDF merger that combines page selections from several documents.
pub struct Merger<C: PdfCodec = LopdfCodec> {
    codec: Arc<C>,
}

impl Merger<LopdfCodec> {
    /// Create a merger backed by `lopdf`.
    pub fn new() -> Self {
        Self::with_codec(LopdfCodec::new())
    }
}

impl Default for Merger<LopdfCodec> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: PdfCodec> Clone for Merger<C> {
    fn clone(&self) -> Self {
        Self {
            codec: Arc::clone(&self.codec),
        }
    }
}

impl<C: PdfCodec> Merger<C> {
    /// Create a merger with a specific codec.
    pub fn with_codec(codec: C) -> Self {
        Self {
            codec: Arc::new(codec),
        }
    }

    /// The codec used by this merger.
    pub fn codec(&self) -> &Arc<C> {
        &self.codec
    }

    /// Merge the entries in list order.
    ///
    /// Each entry is decoded afresh, its range resolved against the decoded
    /// page count, and the selected pages appended in resolved order.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `entries` is empty ([`SpliceError::EmptySelection`])
    /// - an entry's range selects no pages ([`SpliceError::InvalidRange`])
    /// - decoding, copying or saving fails ([`SpliceError::CodecFailure`])
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pdfsplice::document::DocumentEntry;
    /// # use pdfsplice::merge::Merger;
    /// # async fn example(entries: Vec<DocumentEntry>) -> Result<(), Box<dyn std::error::Error>> {
    /// let merger = Merger::new();
    /// let output = merger.merge(&entries).await?;
    /// println!("Merged {} files into {} pages",
    ///          output.statistics.files_merged,
    ///          output.statistics.total_pages);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn merge(&self, entries: &[DocumentEntry]) -> Result<MergeOutput> {
        if entries.is_empty() {
            return Err(SpliceError::EmptySelection);
        }

        let merge_start = Instant::now();
        let mut output = self.codec.create();
        let mut total_pages = 0;

        for entry in entries {
            let (next, copied) = self.append_entry(output, entry).await?;
            output = next;
            total_pages += copied;
        }

        let file_name = suggested_name(entries);
        let codec = Arc::clone(&self.codec);
        let bytes = tokio::task::spawn_blocking(move || codec.save(output))
            .await
            .map_err(|e| SpliceError::codec_failure(&file_name, e))?
            .map_err(|e| SpliceError::codec_failure(&file_name, e))?;

        let statistics = MergeStatistics {
            files_merged: entries.len(),
            total_pages,
            input_size: entries.iter().map(|entry| entry.document().size()).sum(),
            output_size: bytes.len() as u64,
            merge_time: merge_start.elapsed(),
        };

        debug!(
            "merged {} documents into {} pages ({})",
            statistics.files_merged,
            statistics.total_pages,
            statistics.format_output_size()
        );

        Ok(MergeOutput {
            bytes,
            file_name,
            statistics,
        })
    }

    /// Decode one entry and append its selected pages to `output`.
    ///
    /// The accumulator moves into the blocking task and comes back with the
    /// number of pages copied.
    async fn append_entry(
        &self,
        mut output: C::Output,
        entry: &DocumentEntry,
    ) -> Result<(C::Output, usize)> {
        let codec = Arc::clone(&self.codec);
        let content = Arc::clone(entry.document().content());
        let range = entry.range().to_string();
        let name = entry.name().to_string();

        let step = tokio::task::spawn_blocking(move || {
            let source = codec
                .load(&content)
                .map_err(|e| SpliceError::codec_failure(&name, e))?;
            let page_count = codec.page_count(&source);

            let indices = range::resolve(&range, page_count);
            if indices.is_empty() {
                warn!("page range {range:?} selects no pages of {name} ({page_count} pages)");
                return Err(SpliceError::invalid_range(name));
            }

            debug!("copying {} of {page_count} pages from {name}", indices.len());
            let copied = codec
                .copy_pages(&mut output, source, &indices)
                .map_err(|e| SpliceError::codec_failure(&name, e))?;
            Ok((output, copied))
        });

        step.await
            .map_err(|e| SpliceError::codec_failure(entry.name(), e))?
    }

    /// Compute the merge plan from the page counts cached at ingestion.
    ///
    /// No PDF content is decoded. The same selection and range errors as
    /// [`Merger::merge`] are reported.
    pub fn plan(&self, entries: &[DocumentEntry]) -> Result<MergePlan> {
        if entries.is_empty() {
            return Err(SpliceError::EmptySelection);
        }

        let mut documents = Vec::with_capacity(entries.len());
        for entry in entries {
            let indices = entry.resolved();
            if indices.is_empty() {
                return Err(SpliceError::invalid_range(entry.name()));
            }

            documents.push(PlannedDocument {
                name: entry.name().to_string(),
                page_count: entry.page_count(),
                range: entry.range().to_string(),
                pages: indices.into_iter().map(|index| index + 1).collect(),
            });
        }

        let total_pages = documents.iter().map(|doc| doc.pages.len()).sum();

        Ok(MergePlan {
            documents,
            total_pages,
            file_name: suggested_name(entries),
        })
    }
}
