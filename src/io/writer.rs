//! Writing the merged PDF to disk.
//!
//! Writes are atomic by default: the bytes go to a temporary file next to
//! the destination, which is then renamed into place. A failed write never
//! leaves a truncated output behind.
//!
//! # Examples
//!
//! ```no_run
//! use pdfsplice::io::writer::PdfWriter;
//! use std::path::Path;
//!
//! # async fn example(bytes: Vec<u8>) -> Result<(), Box<dyn std::error::Error>> {
//! let writer = PdfWriter::new();
//! let stats = writer.save(&bytes, Path::new("merged.pdf")).await?;
//! println!("Wrote {}", stats.format_file_size());
//! # Ok(())
//! # }
//! ```

use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task;

use crate::error::{Result, SpliceError};
use crate::utils::format_file_size;

/// Statistics about a write operation.
#[derive(Debug, Clone, Serialize)]
pub struct WriteStatistics {
    /// Time taken to write the file.
    #[serde(skip)]
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,
}

impl WriteStatistics {
    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// Writer for merged PDF bytes.
#[derive(Debug, Clone)]
pub struct PdfWriter {
    atomic: bool,
}

impl PdfWriter {
    /// Create a writer using atomic writes.
    pub fn new() -> Self {
        Self { atomic: true }
    }

    /// Create a writer that writes straight to the destination.
    pub fn non_atomic() -> Self {
        Self { atomic: false }
    }

    /// Write `bytes` to `path`, creating missing parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The parent directory cannot be created
    /// - The file cannot be created or written
    /// - The final rename fails
    pub async fn save(&self, bytes: &[u8], path: &Path) -> Result<WriteStatistics> {
        let path_buf = path.to_path_buf();
        let bytes = bytes.to_vec();
        let atomic = self.atomic;

        task::spawn_blocking(move || {
            let start = Instant::now();

            if let Some(parent) = path_buf.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent).map_err(|e| {
                    SpliceError::FailedToCreateOutput {
                        path: parent.to_path_buf(),
                        source: e,
                    }
                })?;
            }

            let write_path = if atomic {
                temp_path_for(&path_buf)
            } else {
                path_buf.clone()
            };

            let file = std::fs::File::create(&write_path).map_err(|e| {
                SpliceError::FailedToCreateOutput {
                    path: write_path.clone(),
                    source: e,
                }
            })?;

            let mut writer = std::io::BufWriter::new(file);
            let written = writer.write_all(&bytes).and_then(|()| writer.flush());
            if let Err(e) = written {
                if atomic {
                    let _ = std::fs::remove_file(&write_path);
                }
                return Err(SpliceError::FailedToWrite {
                    path: write_path,
                    source: e,
                });
            }
            drop(writer);

            if atomic {
                std::fs::rename(&write_path, &path_buf).map_err(|e| {
                    let _ = std::fs::remove_file(&write_path);
                    SpliceError::FailedToWrite {
                        path: path_buf.clone(),
                        source: e,
                    }
                })?;
            }

            Ok::<_, SpliceError>(WriteStatistics {
                write_time: start.elapsed(),
                file_size: bytes.len() as u64,
                output_path: path_buf,
            })
        })
        .await
        .map_err(|e| SpliceError::Io(std::io::Error::other(format!("Write task failed: {e}"))))?
    }

    /// Check if a file can be written to the given path.
    ///
    /// A missing parent directory is fine (it will be created); an existing
    /// read-only one is not.
    pub async fn can_write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && let Ok(metadata) = tokio::fs::metadata(parent).await
        {
            if !metadata.is_dir() {
                return Err(SpliceError::invalid_config(format!(
                    "Output directory is not a directory: {}",
                    parent.display()
                )));
            }

            if metadata.permissions().readonly() {
                return Err(SpliceError::invalid_config(format!(
                    "Output directory is not writable: {}",
                    parent.display()
                )));
            }
        }

        Ok(())
    }

    /// Check if output file exists.
    pub async fn exists(&self, path: &Path) -> bool {
        tokio::fs::metadata(path).await.is_ok()
    }
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Temporary sibling used for atomic writes (`out.pdf` -> `.out.pdf.tmp`).
fn temp_path_for(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{file_name}.tmp"))
}
