//! PDF codec abstraction.
//!
//! The merge orchestrator only needs three capabilities from a PDF library:
//! count pages, copy an ordered subset of pages into an accumulating output
//! document, and serialise that output. [`PdfCodec`] names them so the
//! orchestration can be exercised without real PDF parsing, and
//! [`LopdfCodec`] implements them on top of `lopdf`.

use lopdf::Document;

use crate::merge::pages;

/// Error raised by a codec operation.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct CodecError(String);

impl CodecError {
    /// Create a codec error from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl From<lopdf::Error> for CodecError {
    fn from(err: lopdf::Error) -> Self {
        Self(err.to_string())
    }
}

impl From<std::io::Error> for CodecError {
    fn from(err: std::io::Error) -> Self {
        Self(err.to_string())
    }
}

/// Result type for codec operations.
pub type CodecResult<T> = std::result::Result<T, CodecError>;

/// Page-level operations the merger needs from a PDF library.
///
/// Implementations run inside blocking tasks, so they are plain synchronous
/// code. Both associated types move between threads.
pub trait PdfCodec: Send + Sync + 'static {
    /// A decoded source document.
    type Source: Send + 'static;

    /// The accumulating output document.
    type Output: Send + 'static;

    /// Decode a document from its raw bytes.
    fn load(&self, content: &[u8]) -> CodecResult<Self::Source>;

    /// Number of pages in a decoded document.
    fn page_count(&self, source: &Self::Source) -> usize;

    /// Start an empty output document.
    fn create(&self) -> Self::Output;

    /// Append the pages at `indices` (0-based, in the given order, repeats
    /// allowed) from `source` to `output`. Returns the number of pages added.
    fn copy_pages(
        &self,
        output: &mut Self::Output,
        source: Self::Source,
        indices: &[usize],
    ) -> CodecResult<usize>;

    /// Serialise the output document.
    fn save(&self, output: Self::Output) -> CodecResult<Vec<u8>>;

    /// Decode `content` and count its pages.
    fn count_pages(&self, content: &[u8]) -> CodecResult<usize> {
        let source = self.load(content)?;
        Ok(self.page_count(&source))
    }
}

/// [`PdfCodec`] backed by `lopdf`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfCodec;

impl LopdfCodec {
    /// Create a new codec.
    pub fn new() -> Self {
        Self
    }
}

impl PdfCodec for LopdfCodec {
    type Source = Document;
    type Output = Document;

    fn load(&self, content: &[u8]) -> CodecResult<Document> {
        Ok(Document::load_mem(content)?)
    }

    fn page_count(&self, source: &Document) -> usize {
        source.get_pages().len()
    }

    fn create(&self) -> Document {
        pages::new_output_document()
    }

    fn copy_pages(
        &self,
        output: &mut Document,
        source: Document,
        indices: &[usize],
    ) -> CodecResult<usize> {
        pages::copy_pages(output, source, indices)
    }

    fn save(&self, mut output: Document) -> CodecResult<Vec<u8>> {
        output.prune_objects();

        let mut buffer = Vec::new();
        output.save_to(&mut buffer)?;
        Ok(buffer)
    }
}
