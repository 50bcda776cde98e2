//! Integration tests for merging real PDFs with page ranges.

use pdfsplice::config::Limits;
use pdfsplice::io::{PdfReader, PdfWriter};
use pdfsplice::session::Session;
use rstest::rstest;
use tempfile::TempDir;

use crate::common::{page_tags, source, write_pdf};

fn new_session() -> Session {
    Session::new(Limits::default(), 2)
}

#[tokio::test]
async fn test_merge_two_pdfs_full_ranges() {
    let mut session = new_session();
    session
        .add_files(vec![source("a.pdf", 1, 2), source("b.pdf", 2, 3)])
        .await
        .unwrap();

    let output = session.merge().await.unwrap();

    assert_eq!(output.file_name, "merged.pdf");
    assert_eq!(output.statistics.files_merged, 2);
    assert_eq!(output.statistics.total_pages, 5);
    assert_eq!(
        page_tags(&output.bytes),
        vec![(1, 1), (1, 2), (2, 1), (2, 2), (2, 3)]
    );
}

#[rstest]
#[case("1-3", vec![1, 2, 3])]
#[case("5,1", vec![5, 1])]
#[case("2,2,4", vec![2, 2, 4])]
#[case("0-2", vec![1, 2])]
#[case("4-99", vec![4, 5])]
#[case("3,abc,1", vec![3, 1])]
#[tokio::test]
async fn test_merge_applies_range(#[case] range: &str, #[case] expected_pages: Vec<i64>) {
    let mut session = new_session();
    session.add_files(vec![source("doc.pdf", 3, 5)]).await.unwrap();
    session.documents_mut().set_range(0, range);

    let output = session.merge().await.unwrap();

    let expected: Vec<(i64, i64)> = expected_pages.into_iter().map(|p| (3, p)).collect();
    assert_eq!(page_tags(&output.bytes), expected);
    assert_eq!(output.statistics.total_pages, expected.len());
}

#[tokio::test]
async fn test_merge_follows_reordered_list() {
    let mut session = new_session();
    session
        .add_files(vec![
            source("a.pdf", 1, 2),
            source("b.pdf", 2, 2),
            source("c.pdf", 3, 1),
        ])
        .await
        .unwrap();

    session.documents_mut().set_range(0, "2");
    assert!(session.documents_mut().move_up(2));
    assert!(session.documents_mut().move_up(1));

    let output = session.merge().await.unwrap();
    assert_eq!(
        page_tags(&output.bytes),
        vec![(3, 1), (1, 2), (2, 1), (2, 2)]
    );
}

#[tokio::test]
async fn test_single_file_keeps_name_and_pages() {
    let mut session = new_session();
    session.add_files(vec![source("report.pdf", 4, 6)]).await.unwrap();

    let output = session.merge().await.unwrap();

    assert_eq!(output.file_name, "report.pdf");
    assert_eq!(page_tags(&output.bytes).len(), 6);
}

#[tokio::test]
async fn test_same_document_twice() {
    let mut session = new_session();
    let doc = source("a.pdf", 1, 3);
    session.add_files(vec![doc.clone(), doc]).await.unwrap();
    session.documents_mut().set_range(1, "3,1");

    let output = session.merge().await.unwrap();
    assert_eq!(
        page_tags(&output.bytes),
        vec![(1, 1), (1, 2), (1, 3), (1, 3), (1, 1)]
    );
}

#[tokio::test]
async fn test_merge_read_from_disk_and_write() {
    let temp_dir = TempDir::new().unwrap();
    let paths = vec![
        write_pdf(temp_dir.path(), "one.pdf", 1, 1),
        write_pdf(temp_dir.path(), "two.pdf", 2, 2),
    ];

    let documents = PdfReader::new().read_all(&paths, 2).await.unwrap();
    let mut session = new_session();
    session.add_files(documents).await.unwrap();
    let output = session.merge().await.unwrap();

    let output_path = temp_dir.path().join("out").join(&output.file_name);
    let stats = PdfWriter::new()
        .save(&output.bytes, &output_path)
        .await
        .unwrap();

    assert_eq!(stats.file_size, output.bytes.len() as u64);
    let written = std::fs::read(&output_path).unwrap();
    assert_eq!(page_tags(&written), vec![(1, 1), (2, 1), (2, 2)]);
}
