//! Integration tests for document list handling across a session.

use pdfsplice::config::Limits;
use pdfsplice::session::Session;

use crate::common::{page_tags, source};

#[tokio::test]
async fn test_ingestion_defaults_and_duplicates() {
    let mut session = Session::new(Limits::default(), 3);

    let added = session
        .add_files(vec![source("a.pdf", 1, 4), source("b.pdf", 2, 1)])
        .await
        .unwrap();
    assert_eq!(added, 2);

    let ranges: Vec<&str> = session
        .documents()
        .entries()
        .iter()
        .map(|entry| entry.range())
        .collect();
    assert_eq!(ranges, vec!["1-4", "1-1"]);

    // Same name and size as an existing entry
    let added = session
        .add_files(vec![source("a.pdf", 1, 4), source("c.pdf", 3, 2)])
        .await
        .unwrap();
    assert_eq!(added, 1);
    assert_eq!(session.documents().len(), 3);
}

#[tokio::test]
async fn test_remove_then_merge() {
    let mut session = Session::new(Limits::default(), 2);
    session
        .add_files(vec![
            source("a.pdf", 1, 1),
            source("b.pdf", 2, 1),
            source("c.pdf", 3, 1),
        ])
        .await
        .unwrap();

    let removed = session.documents_mut().remove(1).unwrap();
    assert_eq!(removed.name(), "b.pdf");

    let output = session.merge().await.unwrap();
    assert_eq!(page_tags(&output.bytes), vec![(1, 1), (3, 1)]);
}

#[tokio::test]
async fn test_clear_then_merge_fails() {
    let mut session = Session::new(Limits::default(), 2);
    session.add_files(vec![source("a.pdf", 1, 1)]).await.unwrap();
    session.documents_mut().clear();

    assert!(session.merge().await.is_err());
}

#[tokio::test]
async fn test_range_edits_after_failure_recover() {
    let mut session = Session::new(Limits::default(), 2);
    session.add_files(vec![source("a.pdf", 1, 3)]).await.unwrap();

    session.documents_mut().set_range(0, "nope");
    assert!(session.merge().await.is_err());
    assert!(session.error().is_some());

    session.documents_mut().set_range(0, "2-3");
    let output = session.merge().await.unwrap();
    assert!(session.error().is_none());
    assert_eq!(page_tags(&output.bytes), vec![(1, 2), (1, 3)]);
}
