//! Error types for pdfsplice.
//!
//! Errors fall into two user-visible groups. Ingestion errors (too many files,
//! oversized files, non-PDF files) reject a whole batch and carry their own
//! message. Merge errors (empty selection, unusable page range, codec failure)
//! collapse into one generic message for the user, while the variant keeps the
//! offending file name for diagnostics.
//!
//! # Error Categories
//!
//! - **Ingestion Errors**: batch limits and file type checks
//! - **Merge Errors**: empty selection, empty page ranges, PDF codec failures
//! - **I/O Errors**: file not found, permission denied, etc.
//! - **Configuration Errors**: invalid arguments or input lists

use std::io;
use std::path::PathBuf;

/// Result type alias for pdfsplice operations.
pub type Result<T> = std::result::Result<T, SpliceError>;

/// Shown when an ingestion batch contains something that is not a PDF.
pub const MSG_FILE_TYPE: &str = "Only PDF files are allowed.";

/// Shown when a merge is requested with an empty document list.
pub const MSG_EMPTY_SELECTION: &str = "Select at least one PDF file to merge.";

/// Shown for every merge failure after the selection check.
pub const MSG_MERGE_FAILED: &str = "Merging failed. Please check your files and page ranges.";

/// Main error type for pdfsplice operations.
#[derive(Debug, thiserror::Error)]
pub enum SpliceError {
    /// The ingestion batch would push the document list past its limit.
    #[error("Too many files: at most {limit} documents can be merged")]
    FileCountExceeded {
        /// Maximum number of documents in the list.
        limit: usize,
    },

    /// A file in the ingestion batch is larger than allowed.
    #[error("File too large: {name} is {size} bytes, limit is {limit} bytes")]
    FileSizeExceeded {
        /// Display name of the oversized file.
        name: String,
        /// Actual size in bytes.
        size: u64,
        /// Maximum size in bytes.
        limit: u64,
    },

    /// A file in the ingestion batch is not a PDF.
    #[error("Not a PDF file: {name}")]
    UnsupportedFileType {
        /// Display name of the rejected file.
        name: String,
    },

    /// Merge was requested with no documents.
    #[error("No documents selected for merging")]
    EmptySelection,

    /// A document's page range resolved to no pages.
    #[error("Invalid page range for {name}")]
    InvalidRange {
        /// Display name of the document.
        name: String,
    },

    /// The PDF codec failed to decode, copy or serialize a document.
    #[error("PDF processing failed for {name}: {reason}")]
    CodecFailure {
        /// Display name of the document being processed.
        name: String,
        /// Underlying codec message.
        reason: String,
    },

    /// Input file was not found.
    #[error("File not found: {}", path.display())]
    FileNotFound {
        /// Path to the file that was not found.
        path: PathBuf,
    },

    /// Input path exists but is not a regular file.
    #[error("Not a file: {}", path.display())]
    NotAFile {
        /// Path that is not a file.
        path: PathBuf,
    },

    /// Failed to read an input file.
    #[error("Failed to read file: {}\n  Reason: {source}", path.display())]
    FailedToRead {
        /// Path being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Output file already exists and overwrite is not allowed.
    #[error(
        "Output file already exists: {}\n  Use --force to overwrite or choose a different output path",
        path.display()
    )]
    OutputExists {
        /// Path to the existing output file.
        path: PathBuf,
    },

    /// Failed to create output file.
    #[error("Failed to create output file: {}\n  Reason: {source}", path.display())]
    FailedToCreateOutput {
        /// Path where output should be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to write to output file.
    #[error("Failed to write to output file: {}\n  Reason: {source}", path.display())]
    FailedToWrite {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to read input list file.
    #[error("Failed to read input list file: {}\n  Reason: {source}", path.display())]
    FailedToReadInputList {
        /// Path to the input list file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Input list file contains an invalid entry.
    #[error(
        "Invalid entry in input list file: {} at line {line_number}\n  Details: {details}",
        path.display()
    )]
    InvalidInputList {
        /// Path to the input list file.
        path: PathBuf,
        /// Line number with the error.
        line_number: usize,
        /// Details about what's invalid.
        details: String,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// User cancelled the operation.
    #[error("Operation cancelled by user")]
    Cancelled,

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl SpliceError {
    /// Create a FileNotFound error.
    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    /// Create a NotAFile error.
    pub fn not_a_file(path: PathBuf) -> Self {
        Self::NotAFile { path }
    }

    /// Create an InvalidRange error.
    pub fn invalid_range(name: impl Into<String>) -> Self {
        Self::InvalidRange { name: name.into() }
    }

    /// Create a CodecFailure error.
    pub fn codec_failure(name: impl Into<String>, reason: impl ToString) -> Self {
        Self::CodecFailure {
            name: name.into(),
            reason: reason.to_string(),
        }
    }

    /// Create an OutputExists error.
    pub fn output_exists(path: PathBuf) -> Self {
        Self::OutputExists { path }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Whether this error belongs to the class that collapses into the
    /// generic merge-failure message.
    pub fn is_merge_failure(&self) -> bool {
        matches!(
            self,
            Self::InvalidRange { .. } | Self::CodecFailure { .. }
        )
    }

    /// The fixed message shown on the single user-facing error line.
    ///
    /// Errors outside the ingestion/merge taxonomy fall back to their
    /// `Display` text.
    pub fn user_message(&self) -> String {
        match self {
            Self::FileCountExceeded { limit } => format!("Maximum {limit} files allowed."),
            Self::FileSizeExceeded { limit, .. } => {
                format!("Each file must be under {} MB.", limit / (1024 * 1024))
            }
            Self::UnsupportedFileType { .. } => MSG_FILE_TYPE.to_string(),
            Self::EmptySelection => MSG_EMPTY_SELECTION.to_string(),
            Self::InvalidRange { .. } | Self::CodecFailure { .. } => MSG_MERGE_FAILED.to_string(),
            other => other.to_string(),
        }
    }

    /// Get the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileCountExceeded { .. } => 1,
            Self::FileSizeExceeded { .. } => 1,
            Self::UnsupportedFileType { .. } => 3,
            Self::EmptySelection => 1,
            Self::InvalidRange { .. } => 1,
            Self::CodecFailure { .. } => 3,
            Self::FileNotFound { .. } => 2,
            Self::NotAFile { .. } => 2,
            Self::FailedToRead { .. } => 2,
            Self::OutputExists { .. } => 4,
            Self::FailedToCreateOutput { .. } => 5,
            Self::FailedToWrite { .. } => 5,
            Self::FailedToReadInputList { .. } => 2,
            Self::InvalidInputList { .. } => 1,
            Self::InvalidConfig { .. } => 1,
            Self::Cancelled => 130, // Standard exit code for SIGINT
            Self::Io(_) => 5,
        }
    }
}
