//! Output formatting and display for pdfsplice.
//!
//! This module handles all user-facing output including:
//! - Formatted status messages
//! - The dry-run merge plan
//! - The post-merge summary
//! - JSON rendering for `--json`
//!
//! # Examples
//!
//! ```no_run
//! use pdfsplice::output::OutputFormatter;
//! use pdfsplice::config::Config;
//!
//! # fn example(config: Config) {
//! let formatter = OutputFormatter::from_config(&config);
//! formatter.info("Starting merge");
//! formatter.success("Merge completed successfully");
//! # }
//! ```

pub mod formatter;

pub use formatter::{MessageLevel, OutputFormatter, Verbosity};

use serde::Serialize;

use crate::error::{Result, SpliceError};
use crate::io::WriteStatistics;
use crate::merge::{MergePlan, MergeStatistics};

/// Everything reported after a successful merge.
#[derive(Debug, Clone, Serialize)]
pub struct MergeReport<'a> {
    /// Where the output went.
    #[serde(flatten)]
    pub write: &'a WriteStatistics,

    /// Merge statistics.
    pub merge: &'a MergeStatistics,
}

/// Render a value as pretty-printed JSON.
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| SpliceError::Io(std::io::Error::other(e)))
}

/// Format the pages of a plan entry compactly (`1-3, 5, 2`).
pub fn format_pages(pages: &[usize]) -> String {
    let mut parts = Vec::new();
    let mut iter = pages.iter().copied().peekable();

    while let Some(start) = iter.next() {
        let mut end = start;
        while iter.peek() == Some(&(end + 1)) {
            end += 1;
            iter.next();
        }

        if end == start {
            parts.push(start.to_string());
        } else {
            parts.push(format!("{start}-{end}"));
        }
    }

    parts.join(", ")
}

/// Display a dry-run plan to the user.
pub fn display_plan(formatter: &OutputFormatter, plan: &MergePlan) {
    formatter.section("Merge plan:");
    for (index, document) in plan.documents.iter().enumerate() {
        formatter.list_item(
            index + 1,
            &format!(
                "{} ({} of {} pages: {})",
                document.name,
                document.pages.len(),
                document.page_count,
                format_pages(&document.pages)
            ),
        );
        formatter.detail("range", &document.range);
    }
    formatter.blank_line();
    formatter.info(&format!(
        "Would write {} pages to {}",
        plan.total_pages, plan.file_name
    ));
}

/// Display the summary of a completed merge.
pub fn display_summary(formatter: &OutputFormatter, report: &MergeReport<'_>) {
    formatter.success(&format!(
        "Merged {} file(s) into {} ({} pages, {})",
        report.merge.files_merged,
        report.write.output_path.display(),
        report.merge.total_pages,
        report.write.format_file_size()
    ));
    formatter.detail("input size", &report.merge.format_input_size());
    formatter.detail(
        "merge time",
        &format!("{:.2}s", report.merge.merge_time.as_secs_f64()),
    );
}
