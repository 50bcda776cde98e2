//! A merge session: the document list plus the one user-facing error line.
//!
//! Every ingestion or merge attempt clears the error first. A failure sets
//! it to the fixed message for that failure and leaves the list as it was.

use log::debug;

use crate::config::Limits;
use crate::document::{DocumentList, SourceDocument};
use crate::error::Result;
use crate::merge::{LopdfCodec, MergeOutput, MergePlan, Merger, PdfCodec};

/// Document list, merger and error state for one run.
pub struct Session<C: PdfCodec = LopdfCodec> {
    documents: DocumentList,
    merger: Merger<C>,
    jobs: usize,
    error: Option<String>,
}

impl Session<LopdfCodec> {
    /// Create a session backed by `lopdf`.
    pub fn new(limits: Limits, jobs: usize) -> Self {
        Self::with_merger(Merger::new(), limits, jobs)
    }
}

impl<C: PdfCodec> Session<C> {
    /// Create a session around an existing merger.
    pub fn with_merger(merger: Merger<C>, limits: Limits, jobs: usize) -> Self {
        Self {
            documents: DocumentList::new(limits),
            merger,
            jobs: jobs.max(1),
            error: None,
        }
    }

    /// Add a batch of files.
    ///
    /// See [`DocumentList::ingest`] for the checks applied.
    pub async fn add_files(&mut self, batch: Vec<SourceDocument>) -> Result<usize> {
        self.error = None;
        let result = self
            .documents
            .ingest(batch, self.merger.codec(), self.jobs)
            .await;
        self.record(result)
    }

    /// Merge the current list.
    pub async fn merge(&mut self) -> Result<MergeOutput> {
        self.error = None;
        let result = self.merger.merge(self.documents.entries()).await;
        self.record(result)
    }

    /// Plan a merge of the current list without decoding anything.
    pub fn plan(&mut self) -> Result<MergePlan> {
        self.error = None;
        let result = self.merger.plan(self.documents.entries());
        self.record(result)
    }

    fn record<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(ref err) = result {
            debug!("{err}");
            self.error = Some(err.user_message());
        }
        result
    }

    /// The current user-facing error, if the last attempt failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The document list.
    pub fn documents(&self) -> &DocumentList {
        &self.documents
    }

    /// Mutable access for reordering, removal and range edits.
    pub fn documents_mut(&mut self) -> &mut DocumentList {
        &mut self.documents
    }
}
