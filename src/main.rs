//! pdfsplice - Merge page ranges from several PDF files into one document.

use clap::Parser;
use std::path::{Path, PathBuf};
use std::process;

use pdfsplice::cli::Cli;
use pdfsplice::config::OverwriteMode;
use pdfsplice::error::{Result, SpliceError};
use pdfsplice::io::{PdfReader, PdfWriter, expand_inputs};
use pdfsplice::merge::suggested_name;
use pdfsplice::output::{MergeReport, OutputFormatter, display_plan, display_summary, to_json};
use pdfsplice::session::Session;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        log::debug!("{err:?}");
        eprintln!("Error: {}", err.user_message());
        process::exit(err.exit_code());
    }
}

/// Main application logic.
async fn run(cli: Cli) -> Result<()> {
    cli.validate()?;

    let all_inputs = cli.get_all_inputs().await?;
    let mut config = cli.to_config(all_inputs)?;
    config.inputs = expand_inputs(&config.inputs)?;

    // Keep stdout clean for JSON
    let formatter = if config.json {
        OutputFormatter::quiet()
    } else {
        OutputFormatter::from_config(&config)
    };

    formatter.debug(&format!("{} v{}", pdfsplice::NAME, pdfsplice::VERSION));

    let jobs = config.effective_jobs();
    let paths: Vec<PathBuf> = config.inputs.iter().map(|input| input.path.clone()).collect();

    formatter.info(&format!("Reading {} file(s)...", paths.len()));
    let documents = PdfReader::with_max_file_size(config.limits.max_file_size)
        .read_all(&paths, jobs)
        .await?;

    let mut session = Session::new(config.limits, jobs);
    session.add_files(documents).await?;

    // One batch into an empty list: entries line up with inputs
    for (index, input) in config.inputs.iter().enumerate() {
        if let Some(range) = input.range.as_ref().or(config.default_range.as_ref()) {
            session.documents_mut().set_range(index, range.clone());
        }
    }

    for entry in session.documents().entries() {
        formatter.detail(
            entry.name(),
            &format!("{} pages, range {}", entry.page_count(), entry.range()),
        );
    }

    if config.dry_run {
        let plan = session.plan()?;
        if config.json {
            println!("{}", to_json(&plan)?);
        } else {
            display_plan(&formatter, &plan);
        }
        return Ok(());
    }

    let output_path = config.output_path(&suggested_name(session.documents().entries()));
    config.ensure_not_an_input(&output_path)?;

    let writer = PdfWriter::new();
    writer.can_write(&output_path).await?;
    handle_output_overwrite(&output_path, config.overwrite_mode, &formatter).await?;

    formatter.info("Merging documents...");
    let output = session.merge().await?;

    formatter.debug(&format!("Writing to: {}", output_path.display()));
    let write_stats = writer.save(&output.bytes, &output_path).await?;

    let report = MergeReport {
        write: &write_stats,
        merge: &output.statistics,
    };
    if config.json {
        println!("{}", to_json(&report)?);
    } else {
        display_summary(&formatter, &report);
    }

    Ok(())
}

/// Handle output file overwrite scenarios.
async fn handle_output_overwrite(
    output: &Path,
    mode: OverwriteMode,
    formatter: &OutputFormatter,
) -> Result<()> {
    if !PdfWriter::new().exists(output).await {
        return Ok(());
    }

    match mode {
        OverwriteMode::Force => Ok(()),
        OverwriteMode::NoClobber => Err(SpliceError::output_exists(output.to_path_buf())),
        OverwriteMode::Prompt => {
            // In quiet mode, treat as no-clobber
            if formatter.is_quiet() {
                return Err(SpliceError::output_exists(output.to_path_buf()));
            }

            formatter.warning(&format!("Output file already exists: {}", output.display()));

            use std::io::{self, Write};
            print!("Overwrite? [y/N]: ");
            io::stdout().flush().ok();

            let mut response = String::new();
            io::stdin().read_line(&mut response)?;

            let response = response.trim().to_lowercase();
            if response == "y" || response == "yes" {
                Ok(())
            } else {
                Err(SpliceError::Cancelled)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_handle_output_overwrite_force() {
        let temp_file = NamedTempFile::new().unwrap();
        let formatter = OutputFormatter::quiet();

        let result =
            handle_output_overwrite(temp_file.path(), OverwriteMode::Force, &formatter).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_handle_output_overwrite_no_clobber() {
        let temp_file = NamedTempFile::new().unwrap();
        let formatter = OutputFormatter::quiet();

        let result =
            handle_output_overwrite(temp_file.path(), OverwriteMode::NoClobber, &formatter).await;
        assert!(matches!(result, Err(SpliceError::OutputExists { .. })));
    }

    #[tokio::test]
    async fn test_handle_output_overwrite_quiet_prompt() {
        let temp_file = NamedTempFile::new().unwrap();
        let formatter = OutputFormatter::quiet();

        let result =
            handle_output_overwrite(temp_file.path(), OverwriteMode::Prompt, &formatter).await;
        assert!(matches!(result, Err(SpliceError::OutputExists { .. })));
    }

    #[tokio::test]
    async fn test_handle_output_overwrite_nonexistent() {
        let formatter = OutputFormatter::quiet();
        let result = handle_output_overwrite(
            Path::new("/definitely/not/here.pdf"),
            OverwriteMode::Prompt,
            &formatter,
        )
        .await;
        assert!(result.is_ok());
    }
}
