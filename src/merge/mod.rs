//! PDF merge engine.
//!
//! - [`codec`]: the page-level capability the merger relies on, and its `lopdf` implementation
//! - [`pages`]: page tree manipulation on `lopdf` documents
//! - [`merger`]: ordered orchestration over a document list

pub mod codec;
pub mod merger;
pub mod pages;

pub use codec::{CodecError, CodecResult, LopdfCodec, PdfCodec};
pub use merger::{
    MergeOutput, MergePlan, MergeStatistics, Merger, PlannedDocument, suggested_name,
};
