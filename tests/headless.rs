mod common;

use common::mock_service::{MockResponse, MockService};
use common::{test_config, write_file};
use locale_tool::headless::{run_apply, run_find, HeadlessError};

#[tokio::test]
async fn find_prints_report_and_forwards_template() {
    let mock = MockService::start().await;
    mock.enqueue_response(MockResponse::json(
        r#"{"success": true, "count": 1, "elements": [{"start": 7, "inner_text": "저장"}]}"#,
    ))
    .await;

    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "form.tsx", 64);
    let config = test_config(&mock.base_url());
    let mut out = Vec::new();

    run_find(&config, &path, Some("bvt"), &mut out).await.unwrap();

    let printed = String::from_utf8(out).unwrap();
    assert!(printed.contains("Total Korean elements found: 1"));
    assert!(printed.contains("Position: 7"));
    assert!(printed.contains("저장"));

    let requests = mock.captured_requests().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].form_field("template_type").as_deref(), Some("bvt"));
}

#[tokio::test]
async fn find_surfaces_service_rejection() {
    let mock = MockService::start().await;
    mock.enqueue_response(MockResponse::error(400, "message", "Invalid file format"))
        .await;

    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "form.tsx", 8);
    let config = test_config(&mock.base_url());
    let mut out = Vec::new();

    let err = run_find(&config, &path, None, &mut out).await.unwrap_err();
    assert!(matches!(err, HeadlessError::Search(_)));
    assert_eq!(err.to_string(), "Search failed: Invalid file format");
    assert!(out.is_empty());
}

#[tokio::test]
async fn intake_errors_never_reach_the_service() {
    let mock = MockService::start().await;
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "notes.md", 8);
    let config = test_config(&mock.base_url());
    let mut out = Vec::new();

    let err = run_find(&config, &path, None, &mut out).await.unwrap_err();
    assert_eq!(err.to_string(), "Please select a .tsx file");
    assert!(mock.captured_requests().await.is_empty());
}

#[tokio::test]
async fn apply_saves_processed_file() {
    let mock = MockService::start().await;
    mock.enqueue_response(MockResponse::file(b"bt(\"W1\")", None))
        .await;

    let dir = tempfile::tempdir().unwrap();
    let out_dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "page.tsx", 16);
    let config = test_config(&mock.base_url());
    let mut out = Vec::new();

    let saved = run_apply(&config, &path, None, out_dir.path(), &mut out)
        .await
        .unwrap();

    assert_eq!(saved, out_dir.path().join("processed_page.tsx"));
    assert_eq!(std::fs::read(&saved).unwrap(), b"bt(\"W1\")");
    let printed = String::from_utf8(out).unwrap();
    assert!(printed.contains("Translation Results"));
    assert!(printed.contains(&format!("Saved {}", saved.display())));
}

#[tokio::test]
async fn apply_failure_saves_nothing() {
    let mock = MockService::start().await;
    mock.enqueue_response(MockResponse::raw(500, "boom")).await;

    let dir = tempfile::tempdir().unwrap();
    let out_dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "page.tsx", 16);
    let config = test_config(&mock.base_url());
    let mut out = Vec::new();

    let err = run_apply(&config, &path, None, out_dir.path(), &mut out)
        .await
        .unwrap_err();
    assert!(matches!(err, HeadlessError::Apply(_)));
    assert!(err.to_string().starts_with("Translation failed: "));
    assert_eq!(std::fs::read_dir(out_dir.path()).unwrap().count(), 0);
}
