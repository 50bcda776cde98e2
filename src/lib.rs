//! pdfsplice - Merge page ranges from several PDF files into one document.
//!
//! This library provides:
//!
//! - Lenient page range resolution (`"1-3,5,2"` style)
//! - An ordered document list with batch ingestion limits
//! - A merge engine that copies the selected pages of each document, in
//!   list order, into a single output PDF
//! - Atomic output writing
//!
//! # Examples
//!
//! ## Basic Merge
//!
//! ```no_run
//! use pdfsplice::config::Limits;
//! use pdfsplice::document::SourceDocument;
//! use pdfsplice::session::Session;
//!
//! # async fn example(a: Vec<u8>, b: Vec<u8>) -> Result<(), Box<dyn std::error::Error>> {
//! let mut session = Session::new(Limits::default(), 4);
//! session
//!     .add_files(vec![SourceDocument::new("a.pdf", a), SourceDocument::new("b.pdf", b)])
//!     .await?;
//! session.documents_mut().set_range(0, "1-3");
//! session.documents_mut().move_down(0);
//!
//! let output = session.merge().await?;
//! println!("Created {} with {} pages", output.file_name, output.statistics.total_pages);
//! # Ok(())
//! # }
//! ```
//!
//! ## Resolving Ranges
//!
//! ```
//! use pdfsplice::range::resolve;
//!
//! assert_eq!(resolve("2-3,1", 5), vec![1, 2, 0]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod io;
pub mod merge;
pub mod output;
pub mod range;
pub mod session;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use document::{DocumentEntry, DocumentList, SourceDocument};
pub use error::{Result, SpliceError};
pub use merge::{LopdfCodec, Merger, PdfCodec};
pub use session::Session;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
