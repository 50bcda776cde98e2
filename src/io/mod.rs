//! File input and output.
//!
//! - [`reader`]: reading input files and expanding glob patterns
//! - [`writer`]: atomic writing of the merged document

pub mod reader;
pub mod writer;

pub use reader::{PdfReader, display_name, expand_inputs};
pub use writer::{PdfWriter, WriteStatistics};
