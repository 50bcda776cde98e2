//! Integration tests for dry-run planning, including the command-line binary.

use pdfsplice::config::Limits;
use pdfsplice::session::Session;
use std::process::Command;
use tempfile::TempDir;

use crate::common::{page_tags, source, write_pdf};

fn pdfsplice() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_pdfsplice"));
    command.env_remove("PDFSPLICE_MAX_FILES");
    command.env_remove("PDFSPLICE_MAX_FILE_SIZE_MB");
    command.env_remove("RUST_LOG");
    command
}

#[tokio::test]
async fn test_plan_matches_merge() {
    let mut session = Session::new(Limits::default(), 2);
    session
        .add_files(vec![source("a.pdf", 1, 4), source("b.pdf", 2, 2)])
        .await
        .unwrap();
    session.documents_mut().set_range(0, "4,1-2");

    let plan = session.plan().unwrap();
    let output = session.merge().await.unwrap();

    assert_eq!(plan.total_pages, output.statistics.total_pages);
    assert_eq!(plan.file_name, output.file_name);

    let planned: Vec<(i64, i64)> = plan
        .documents
        .iter()
        .zip([1, 2])
        .flat_map(|(doc, tag)| doc.pages.iter().map(move |&p| (tag, p as i64)))
        .collect();
    assert_eq!(planned, page_tags(&output.bytes));
}

#[test]
fn test_cli_dry_run_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_pdf(temp_dir.path(), "a.pdf", 1, 3);
    let b = write_pdf(temp_dir.path(), "b.pdf", 2, 2);

    let out = pdfsplice()
        .arg(format!("{}:3,1", a.display()))
        .arg(&b)
        .arg("--out-dir")
        .arg(temp_dir.path())
        .args(["--dry-run", "--json"])
        .output()
        .unwrap();

    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let plan: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(plan["total_pages"], 4);
    assert_eq!(plan["file_name"], "merged.pdf");
    assert_eq!(plan["documents"][0]["pages"], serde_json::json!([3, 1]));
    assert!(!temp_dir.path().join("merged.pdf").exists());
}

#[test]
fn test_cli_merges_with_default_pages() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_pdf(temp_dir.path(), "a.pdf", 1, 3);
    let b = write_pdf(temp_dir.path(), "b.pdf", 2, 3);
    let output = temp_dir.path().join("joined.pdf");

    let out = pdfsplice()
        .arg(&a)
        .arg(format!("{}:3", b.display()))
        .args(["--pages", "1-2", "-q", "-o"])
        .arg(&output)
        .output()
        .unwrap();

    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let written = std::fs::read(&output).unwrap();
    assert_eq!(page_tags(&written), vec![(1, 1), (1, 2), (2, 3)]);
}

#[test]
fn test_cli_reports_generic_merge_failure() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_pdf(temp_dir.path(), "a.pdf", 1, 2);
    let output = temp_dir.path().join("out.pdf");

    let out = pdfsplice()
        .arg(format!("{}:7-9", a.display()))
        .arg("-o")
        .arg(&output)
        .output()
        .unwrap();

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Merging failed. Please check your files and page ranges."));
    assert!(stderr.matches("WARN").count() <= 1, "stderr: {stderr}");
    assert!(!output.exists());
}

#[test]
fn test_cli_rejects_oversized_input() {
    let temp_dir = TempDir::new().unwrap();
    let big = temp_dir.path().join("big.pdf");
    let mut bytes = crate::common::pdf_bytes(1, 1);
    bytes.resize(2 * 1024 * 1024, b' ');
    std::fs::write(&big, bytes).unwrap();
    let output = temp_dir.path().join("out.pdf");

    let out = pdfsplice()
        .arg(&big)
        .args(["--max-file-size-mb", "1", "-o"])
        .arg(&output)
        .output()
        .unwrap();

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Each file must be under 1 MB."), "stderr: {stderr}");
    assert!(!output.exists());
}

#[test]
fn test_cli_no_clobber() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_pdf(temp_dir.path(), "a.pdf", 1, 1);
    let output = temp_dir.path().join("out.pdf");
    std::fs::write(&output, b"existing").unwrap();

    let out = pdfsplice()
        .arg(&a)
        .args(["--no-clobber", "-o"])
        .arg(&output)
        .output()
        .unwrap();

    assert_eq!(out.status.code(), Some(4));
    assert_eq!(std::fs::read(&output).unwrap(), b"existing");
}

#[test]
fn test_cli_single_input_next_to_itself() {
    let temp_dir = TempDir::new().unwrap();
    let report = write_pdf(temp_dir.path(), "report.pdf", 1, 3);
    let original = std::fs::read(&report).unwrap();

    let out = pdfsplice()
        .current_dir(temp_dir.path())
        .args(["report.pdf:1-2", "-q"])
        .output()
        .unwrap();

    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(std::fs::read(&report).unwrap(), original);

    let written = std::fs::read(temp_dir.path().join("report-pages.pdf")).unwrap();
    assert_eq!(page_tags(&written), vec![(1, 1), (1, 2)]);
}
