//! Integration tests for error handling and edge cases.

use pdfsplice::config::Limits;
use pdfsplice::document::SourceDocument;
use pdfsplice::error::{MSG_EMPTY_SELECTION, MSG_FILE_TYPE, MSG_MERGE_FAILED, SpliceError};
use pdfsplice::session::Session;

use crate::common::source;

#[tokio::test]
async fn test_merge_with_nothing_selected() {
    let mut session = Session::new(Limits::default(), 1);

    let err = session.merge().await.unwrap_err();

    assert!(matches!(err, SpliceError::EmptySelection));
    assert_eq!(session.error(), Some(MSG_EMPTY_SELECTION));
}

#[tokio::test]
async fn test_invalid_range_aborts_without_output() {
    let mut session = Session::new(Limits::default(), 1);
    session
        .add_files(vec![source("a.pdf", 1, 3), source("b.pdf", 2, 5)])
        .await
        .unwrap();
    session.documents_mut().set_range(1, "9-2");

    let err = session.merge().await.unwrap_err();

    match err {
        SpliceError::InvalidRange { ref name } => assert_eq!(name, "b.pdf"),
        other => panic!("expected InvalidRange, got {other:?}"),
    }
    assert_eq!(session.error(), Some(MSG_MERGE_FAILED));
}

#[tokio::test]
async fn test_empty_range_text_is_invalid() {
    let mut session = Session::new(Limits::default(), 1);
    session.add_files(vec![source("a.pdf", 1, 3)]).await.unwrap();
    session.documents_mut().set_range(0, "");

    assert!(matches!(
        session.merge().await,
        Err(SpliceError::InvalidRange { .. })
    ));
}

#[tokio::test]
async fn test_oversized_file_rejects_whole_batch() {
    let small = source("small.pdf", 1, 1);
    let limit = small.size() + 1;
    let big = SourceDocument::new("big.pdf", {
        let mut bytes = small.content().to_vec();
        bytes.extend(std::iter::repeat_n(b' ', 64));
        bytes
    });

    let mut session = Session::new(
        Limits {
            max_files: 10,
            max_file_size: limit,
        },
        1,
    );

    let result = session.add_files(vec![small, big]).await;

    assert!(matches!(result, Err(SpliceError::FileSizeExceeded { .. })));
    assert!(session.documents().is_empty());
    assert!(session.error().is_some());
}

#[tokio::test]
async fn test_eleventh_file_is_rejected() {
    let mut session = Session::new(Limits::default(), 4);
    let batch: Vec<SourceDocument> = (0..10)
        .map(|i| source(&format!("{i}.pdf"), 1, 1))
        .collect();
    session.add_files(batch).await.unwrap();

    let result = session.add_files(vec![source("extra.pdf", 2, 1)]).await;

    assert!(matches!(result, Err(SpliceError::FileCountExceeded { limit: 10 })));
    assert_eq!(session.error(), Some("Maximum 10 files allowed."));
    assert_eq!(session.documents().len(), 10);
}

#[tokio::test]
async fn test_non_pdf_is_rejected() {
    let mut session = Session::new(Limits::default(), 1);
    let result = session
        .add_files(vec![SourceDocument::new("notes.txt", b"just text".to_vec())])
        .await;

    assert!(matches!(result, Err(SpliceError::UnsupportedFileType { .. })));
    assert_eq!(session.error(), Some(MSG_FILE_TYPE));
}

#[tokio::test]
async fn test_corrupt_pdf_rejects_batch() {
    let mut session = Session::new(Limits::default(), 2);
    let corrupt = SourceDocument::new("corrupt.pdf", b"%PDF-1.7\nthis is not a pdf body".to_vec());

    let result = session
        .add_files(vec![source("good.pdf", 1, 1), corrupt])
        .await;

    assert!(matches!(result, Err(SpliceError::CodecFailure { ref name, .. }) if name == "corrupt.pdf"));
    assert!(session.documents().is_empty());
}
