//! Configuration module for pdfsplice.
//!
//! This module holds the validated settings that drive ingestion and merging:
//! - Ingestion limits (file count and per-file size)
//! - Output location and overwrite behavior
//! - Output verbosity
//! - Concurrency for page counting

use crate::error::{Result, SpliceError};
use std::path::{Path, PathBuf};

/// Default maximum number of documents in one merge.
pub const DEFAULT_MAX_FILES: usize = 10;

/// Default maximum size of a single document, in bytes (10 MB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// File name offered for the output when more than one document is merged.
pub const MERGED_FILE_NAME: &str = "merged.pdf";

/// Limits enforced when files are added to a document list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum number of documents the list may hold.
    pub max_files: usize,

    /// Maximum size of a single document in bytes.
    pub max_file_size: u64,
}

impl Limits {
    /// Create limits from a file count and a per-file size in megabytes.
    pub fn new(max_files: usize, max_file_size_mb: u64) -> Self {
        Self {
            max_files,
            max_file_size: max_file_size_mb.saturating_mul(1024 * 1024),
        }
    }

    /// Check that the limits admit at least one non-empty file.
    pub fn validate(&self) -> Result<()> {
        if self.max_files == 0 {
            return Err(SpliceError::invalid_config(
                "Maximum number of files must be at least 1",
            ));
        }

        if self.max_file_size == 0 {
            return Err(SpliceError::invalid_config(
                "Maximum file size must be at least 1 MB",
            ));
        }

        Ok(())
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_files: DEFAULT_MAX_FILES,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

/// Output file overwrite behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwriteMode {
    /// Prompt the user before overwriting (default).
    #[default]
    Prompt,
    /// Always overwrite without prompting.
    Force,
    /// Never overwrite, error if file exists.
    NoClobber,
}

/// One requested input: a file plus the page range to take from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSpec {
    /// Path to the PDF file (may be a glob pattern before expansion).
    pub path: PathBuf,

    /// Page range for this file; `None` means the default for the run.
    pub range: Option<String>,
}

impl InputSpec {
    /// Create an input without an explicit range.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            range: None,
        }
    }

    /// Create an input with an explicit range.
    pub fn with_range(path: impl Into<PathBuf>, range: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            range: Some(range.into()),
        }
    }

    /// Parse `path` or `path:RANGE`.
    ///
    /// The text after the last `:` counts as a range only if it is non-empty
    /// and made of digits, commas, hyphens and spaces. Anything else is part
    /// of the path, so `C:\docs\a.pdf` stays a plain path.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdfsplice::config::InputSpec;
    ///
    /// let spec = InputSpec::parse("report.pdf:1-3,5");
    /// assert_eq!(spec.path.to_str(), Some("report.pdf"));
    /// assert_eq!(spec.range.as_deref(), Some("1-3,5"));
    /// ```
    pub fn parse(raw: &str) -> Self {
        if let Some((path, range)) = raw.rsplit_once(':')
            && !path.is_empty()
            && is_range_text(range)
        {
            return Self::with_range(path, range.trim());
        }

        Self::new(raw)
    }
}

fn is_range_text(text: &str) -> bool {
    !text.trim().is_empty()
        && text
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, ',' | '-' | ' '))
}

/// Complete configuration for a merge run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Requested inputs (in merge order).
    pub inputs: Vec<InputSpec>,

    /// Explicit output file path.
    pub output: Option<PathBuf>,

    /// Directory for the output when no explicit path is given.
    pub out_dir: PathBuf,

    /// Range applied to inputs that carry none.
    pub default_range: Option<String>,

    /// Dry run mode - show the merge plan without creating output.
    pub dry_run: bool,

    /// Print the plan or summary as JSON.
    pub json: bool,

    /// Verbose output mode.
    pub verbose: bool,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,

    /// File overwrite behavior.
    pub overwrite_mode: OverwriteMode,

    /// Number of concurrent page-count jobs (None = auto-detect).
    pub jobs: Option<usize>,

    /// Ingestion limits.
    pub limits: Limits,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            output: None,
            out_dir: PathBuf::from("."),
            default_range: None,
            dry_run: false,
            json: false,
            verbose: false,
            quiet: false,
            overwrite_mode: OverwriteMode::Prompt,
            jobs: None,
            limits: Limits::default(),
        }
    }
}

impl Config {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No input files are specified
    /// - Verbose and quiet modes are both enabled
    /// - Jobs count is zero
    /// - Limits are zero
    /// - The explicit output path is one of the inputs
    pub fn validate(&self) -> Result<()> {
        if self.inputs.is_empty() {
            return Err(SpliceError::invalid_config("No input files specified"));
        }

        if self.verbose && self.quiet {
            return Err(SpliceError::invalid_config(
                "Cannot use both --verbose and --quiet",
            ));
        }

        if let Some(jobs) = self.jobs
            && jobs == 0
        {
            return Err(SpliceError::invalid_config(
                "Number of jobs must be at least 1",
            ));
        }

        self.limits.validate()?;

        if let Some(ref output) = self.output {
            self.ensure_not_an_input(output)?;
        }

        Ok(())
    }

    /// Reject an output path that would overwrite one of the inputs.
    pub fn ensure_not_an_input(&self, output: &Path) -> Result<()> {
        if self.is_an_input(output) {
            return Err(SpliceError::invalid_config(format!(
                "Output file cannot be the same as an input file: {}",
                output.display()
            )));
        }
        Ok(())
    }

    fn is_an_input(&self, path: &Path) -> bool {
        self.inputs.iter().any(|input| same_path(&input.path, path))
    }

    /// Resolve where the merged document goes.
    ///
    /// An explicit `--output` wins. Otherwise the suggested name is placed in
    /// the output directory; if that would land on an input (a single file
    /// merged next to itself), `<stem>-pages.pdf`, `<stem>-pages-2.pdf`, ...
    /// is used instead.
    pub fn output_path(&self, suggested_name: &str) -> PathBuf {
        if let Some(ref output) = self.output {
            return output.clone();
        }

        let candidate = self.out_dir.join(suggested_name);
        if !self.is_an_input(&candidate) {
            return candidate;
        }

        let stem = Path::new(suggested_name)
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| suggested_name.to_string());

        (1..)
            .map(|n| match n {
                1 => format!("{stem}-pages.pdf"),
                n => format!("{stem}-pages-{n}.pdf"),
            })
            .map(|name| self.out_dir.join(name))
            .find(|path| !self.is_an_input(path))
            .unwrap_or(candidate)
    }

    /// Get the effective number of parallel jobs.
    ///
    /// Returns the configured job count, or the number of CPU cores if auto-detect.
    pub fn effective_jobs(&self) -> usize {
        self.jobs.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }
}

/// Whether two paths name the same file, following symlinks when both exist.
fn same_path(a: &Path, b: &Path) -> bool {
    if let (Ok(a), Ok(b)) = (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        return a == b;
    }

    match (std::path::absolute(a), std::path::absolute(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
