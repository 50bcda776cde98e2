//! CLI argument parsing for pdfsplice.
//!
//! This module defines the command-line interface structure using `clap`.
//! It handles argument parsing, validation, and help text generation.
//!
//! # Examples
//!
//! ```no_run
//! use pdfsplice::cli::Cli;
//! use clap::Parser;
//!
//! let cli = Cli::parse();
//! println!("Merging {} inputs", cli.inputs.len());
//! ```

use clap::Parser;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::config::{
    Config, DEFAULT_MAX_FILE_SIZE, DEFAULT_MAX_FILES, InputSpec, Limits, OverwriteMode,
};
use crate::error::{Result, SpliceError};

const DEFAULT_MAX_FILE_SIZE_MB: u64 = DEFAULT_MAX_FILE_SIZE / (1024 * 1024);

/// Merge page ranges from several PDF files into one document.
///
/// Each input may carry its own page range (`file.pdf:1-3,5`). Pages are
/// taken in the order written, inputs in the order given.
#[derive(Parser, Debug)]
#[command(name = "pdfsplice")]
#[command(version)]
#[command(about = "Merge page ranges from several PDF files into one document", long_about = None)]
#[command(author)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Input PDF files to merge (in order), optionally with a page range
    ///
    /// Write `FILE:RANGE` to take only some pages. A range is a comma
    /// separated list of page numbers and inclusive spans. Glob patterns
    /// are expanded and every match inherits the range.
    ///
    /// Examples:
    ///   pdfsplice a.pdf b.pdf -o both.pdf
    ///   pdfsplice report.pdf:1-3,7 appendix.pdf:2 -o short.pdf
    ///   pdfsplice 'chapter*.pdf' -o book.pdf
    #[arg(value_name = "INPUT", required_unless_present = "input_list")]
    pub inputs: Vec<String>,

    /// Output PDF file path
    ///
    /// Defaults to the input's own name when there is one input, otherwise
    /// `merged.pdf`, inside --out-dir.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Directory for the output when --output is not given
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub out_dir: PathBuf,

    /// Page range for inputs that do not carry their own (e.g. "1-5,10")
    ///
    /// Page numbers are 1-based. Out-of-range numbers are clamped to the
    /// document; unreadable parts are ignored.
    #[arg(short, long, value_name = "RANGE")]
    pub pages: Option<String>,

    /// Read inputs from a file (one `FILE[:RANGE]` per line)
    ///
    /// Lines starting with '#' and blank lines are ignored. Use '-' to read
    /// from stdin. Listed inputs come after the ones on the command line.
    #[arg(long, value_name = "FILE")]
    pub input_list: Option<PathBuf>,

    /// Dry run - show which pages would be merged without writing anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Print the merge plan or result summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Verbose output - show details for each input
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Force overwrite of existing output file without confirmation
    #[arg(short, long)]
    pub force: bool,

    /// Never overwrite existing output file
    #[arg(long, conflicts_with = "force")]
    pub no_clobber: bool,

    /// Number of inputs decoded concurrently when counting pages
    ///
    /// Default is number of CPU cores.
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Maximum number of input documents
    #[arg(long, value_name = "N", env = "PDFSPLICE_MAX_FILES", default_value_t = DEFAULT_MAX_FILES)]
    pub max_files: usize,

    /// Maximum size of a single input document, in megabytes
    #[arg(
        long,
        value_name = "MB",
        env = "PDFSPLICE_MAX_FILE_SIZE_MB",
        default_value_t = DEFAULT_MAX_FILE_SIZE_MB
    )]
    pub max_file_size_mb: u64,
}

impl Cli {
    /// Build a validated Config from the arguments and the full input list.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration validation fails.
    pub fn to_config(&self, inputs: Vec<InputSpec>) -> Result<Config> {
        let overwrite_mode = if self.force {
            OverwriteMode::Force
        } else if self.no_clobber {
            OverwriteMode::NoClobber
        } else {
            OverwriteMode::Prompt
        };

        let config = Config {
            inputs,
            output: self.output.clone(),
            out_dir: self.out_dir.clone(),
            default_range: self.pages.clone(),
            dry_run: self.dry_run,
            json: self.json,
            verbose: self.verbose,
            quiet: self.quiet,
            overwrite_mode,
            jobs: self.jobs,
            limits: Limits::new(self.max_files, self.max_file_size_mb),
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate CLI arguments before processing.
    ///
    /// Performs early validation that doesn't require file I/O.
    pub fn validate(&self) -> Result<()> {
        if self.inputs.is_empty() && self.input_list.is_none() {
            return Err(SpliceError::invalid_config("No input files specified"));
        }

        if let Some(jobs) = self.jobs
            && jobs == 0
        {
            return Err(SpliceError::invalid_config(
                "Number of jobs must be at least 1",
            ));
        }

        Limits::new(self.max_files, self.max_file_size_mb).validate()
    }

    /// Get all inputs including those from the input-list file.
    ///
    /// Inputs from the file are appended after direct inputs.
    ///
    /// # Errors
    ///
    /// Returns an error if the input list cannot be read or parsed, or if
    /// no inputs remain.
    pub async fn get_all_inputs(&self) -> Result<Vec<InputSpec>> {
        let mut all_inputs: Vec<InputSpec> =
            self.inputs.iter().map(|raw| InputSpec::parse(raw)).collect();

        if let Some(ref input_list_path) = self.input_list {
            let additional_inputs = read_input_list(input_list_path).await?;
            all_inputs.extend(additional_inputs);
        }

        if all_inputs.is_empty() {
            return Err(SpliceError::invalid_config("No input files specified"));
        }

        Ok(all_inputs)
    }
}

/// Read inputs from a list file, or from stdin when the path is `-`.
async fn read_input_list(path: &Path) -> Result<Vec<InputSpec>> {
    if path.as_os_str() == "-" {
        let stdin = BufReader::new(tokio::io::stdin());
        return parse_input_list(stdin, path).await;
    }

    let file = tokio::fs::File::open(path)
        .await
        .map_err(|e| SpliceError::FailedToReadInputList {
            path: path.to_path_buf(),
            source: e,
        })?;

    parse_input_list(BufReader::new(file), path).await
}

/// Parse `FILE[:RANGE]` lines. Comments and blank lines are skipped.
async fn parse_input_list<R>(reader: R, path: &Path) -> Result<Vec<InputSpec>>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut inputs = Vec::new();
    let mut line_number = 0;

    while let Some(line) =
        lines
            .next_line()
            .await
            .map_err(|e| SpliceError::FailedToReadInputList {
                path: path.to_path_buf(),
                source: e,
            })?
    {
        line_number += 1;
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.ends_with(':') {
            return Err(SpliceError::InvalidInputList {
                path: path.to_path_buf(),
                line_number,
                details: format!("Missing page range after ':' in '{line}'"),
            });
        }

        inputs.push(InputSpec::parse(line));
    }

    Ok(inputs)
}
