//! Integration tests for fetching prompts by partial name

use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;
use prompts::{DocumentStore, Error, FetchOptions, Fetcher};
use std::path::Path;

fn fetch(root: &Path, fragment: &str) -> prompts::Result<prompts::FetchedDocument> {
    let store = DocumentStore::new(root).unwrap();
    Fetcher::new(&store).fetch(fragment, &FetchOptions::default())
}

#[test]
fn test_fetch_case_insensitive() {
    let temp = TempDir::new().unwrap();
    temp.child("Deploy.md").write_str("# Deploy\n").unwrap();

    let fetched = fetch(temp.path(), "deploy").unwrap();

    assert_eq!(fetched.document.name, "Deploy.md");
    assert_eq!(fetched.content, "# Deploy\n");
}

#[test]
fn test_fetch_returns_exact_bytes() {
    let temp = TempDir::new().unwrap();
    let content = "line one\r\n\tindented — ünïcode\n\ntrailing  \n";
    temp.child("guide.md").write_str(content).unwrap();

    let fetched = fetch(temp.path(), "GUIDE").unwrap();

    assert_eq!(fetched.content.as_bytes(), content.as_bytes());
    temp.child("guide.md").assert(content);
}

#[test]
fn test_fetch_first_match_in_path_order() {
    let temp = TempDir::new().unwrap();
    temp.child("b/review-code.md").write_str("from b").unwrap();
    temp.child("a/review-docs.md").write_str("from a").unwrap();
    temp.child("review.md").write_str("from root").unwrap();

    let fetched = fetch(temp.path(), "review").unwrap();

    assert_eq!(fetched.document.relative_path, "a/review-docs.md");
    assert!(predicate::str::contains("from a").eval(&fetched.content));
}

#[test]
fn test_fetch_not_found_names_fragment() {
    let temp = TempDir::new().unwrap();
    temp.child("release-notes.md").write_str("notes").unwrap();

    let err = fetch(temp.path(), "missing-thing").unwrap_err();

    assert!(matches!(err, Error::NoMatch(ref f) if f == "missing-thing"));
    assert!(predicate::str::contains("'missing-thing'").eval(&err.to_string()));
}

#[test]
fn test_fetch_empty_corpus_is_not_found() {
    let temp = TempDir::new().unwrap();

    let err = fetch(temp.path(), "anything").unwrap_err();
    assert!(matches!(err, Error::NoMatch(_)));
}

#[test]
fn test_fetch_missing_root() {
    let temp = TempDir::new().unwrap();

    let err = fetch(&temp.path().join("gone"), "anything").unwrap_err();
    assert!(matches!(err, Error::RootNotFound(_)));
}

#[test]
fn test_fetch_ignores_non_markdown() {
    let temp = TempDir::new().unwrap();
    temp.child("deploy.txt").write_str("plain").unwrap();

    assert!(matches!(fetch(temp.path(), "deploy"), Err(Error::NoMatch(_))));
}

#[test]
fn test_fetch_read_error_does_not_fall_back() {
    let temp = TempDir::new().unwrap();
    temp.child("a-deploy.md").write_binary(&[0xff, 0xfe, 0xfd]).unwrap();
    temp.child("b-deploy.md").write_str("readable").unwrap();

    let err = fetch(temp.path(), "deploy").unwrap_err();

    match err {
        Error::DocumentRead { path, .. } => assert!(path.ends_with("a-deploy.md")),
        other => panic!("expected read error, got {:?}", other),
    }
}

#[test]
fn test_fetch_read_error_with_fallback() {
    let temp = TempDir::new().unwrap();
    temp.child("a-deploy.md").write_binary(&[0xff, 0xfe, 0xfd]).unwrap();
    temp.child("b-deploy.md").write_str("readable").unwrap();

    let store = DocumentStore::new(temp.path()).unwrap();
    let options = FetchOptions {
        fallback_on_read_error: true,
    };
    let fetched = Fetcher::new(&store).fetch("deploy", &options).unwrap();

    assert_eq!(fetched.document.name, "b-deploy.md");
    assert_eq!(fetched.content, "readable");
}

#[test]
fn test_fetch_fallback_exhausted_reports_read_error() {
    let temp = TempDir::new().unwrap();
    temp.child("only-deploy.md").write_binary(&[0xc3, 0x28]).unwrap();

    let store = DocumentStore::new(temp.path()).unwrap();
    let options = FetchOptions {
        fallback_on_read_error: true,
    };
    let err = Fetcher::new(&store).fetch("deploy", &options).unwrap_err();

    assert!(matches!(err, Error::DocumentRead { .. }));
}
