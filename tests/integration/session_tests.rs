//! SessionController end-to-end against a mock backend

use seo_scout::credentials::{CredentialStore, MemoryCredentialStore, SqliteCredentialStore};
use seo_scout::{
    HttpBackend, ScoutError, SessionController, SessionPhase, SessionSettings, ValidationError,
};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEY: &str = "openai_api_key";

fn test_settings() -> SessionSettings {
    SessionSettings {
        poll_interval: Duration::from_millis(10),
        ..SessionSettings::default()
    }
}

fn controller_for(
    server: &MockServer,
    store: MemoryCredentialStore,
) -> SessionController<HttpBackend, MemoryCredentialStore> {
    let backend = HttpBackend::new(&server.uri(), Duration::from_secs(5)).unwrap();
    SessionController::new(backend, store, test_settings()).expect("Failed to create controller")
}

fn with_key() -> MemoryCredentialStore {
    MemoryCredentialStore::with_entry(KEY, "sk-test")
}

fn status_body(status: &str, progress: u32) -> serde_json::Value {
    json!({
        "status": status,
        "progress": progress,
        "total_pages": 10,
        "crawled_pages": progress / 10,
        "url": "https://example.com"
    })
}

async fn mount_accept(server: &MockServer, task_id: &str) {
    Mock::given(method("POST"))
        .and(path("/crawl/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"message": "Crawl started", "task_id": task_id})),
        )
        .expect(1)
        .mount(server)
        .await;
}

/// Mounts one single-use status response per entry, served in order
async fn mount_statuses(server: &MockServer, task_id: &str, bodies: Vec<serde_json::Value>) {
    for body in bodies {
        Mock::given(method("GET"))
            .and(path(format!("/crawl-status/{}", task_id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .up_to_n_times(1)
            .mount(server)
            .await;
    }
}

async fn requests_to(server: &MockServer, request_path: &str) -> usize {
    server
        .received_requests()
        .await
        .expect("Request recording is enabled")
        .iter()
        .filter(|r| r.url.path() == request_path)
        .count()
}

#[tokio::test]
async fn test_full_flow_running_running_completed() {
    let server = MockServer::start().await;
    mount_accept(&server, "task-1").await;
    mount_statuses(
        &server,
        "task-1",
        vec![
            status_body("running", 10),
            status_body("running", 55),
            status_body("completed", 100),
        ],
    )
    .await;

    Mock::given(method("POST"))
        .and(path("/generate-report/"))
        .and(body_json(json!({"openai_api_key": "sk-test"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"report": "All good"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/clear-database/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "cleared"})))
        .expect(1)
        .mount(&server)
        .await;

    let mut controller = controller_for(&server, with_key());
    let report = controller
        .submit_crawl("https://example.com", 10)
        .await
        .expect("Crawl flow should succeed");

    assert_eq!(report.text, "All good");
    assert_eq!(requests_to(&server, "/crawl-status/task-1").await, 3);

    // The timer was cancelled; waiting several intervals adds no polls
    let handle = controller.last_poll_handle().unwrap().clone();
    assert!(handle.is_cancelled());
    tokio::time::sleep(Duration::from_millis(60)).await;
    assert_eq!(requests_to(&server, "/crawl-status/task-1").await, 3);

    let snapshot = controller.snapshot();
    assert_eq!(snapshot.phase, SessionPhase::Idle);
    assert_eq!(snapshot.report.unwrap().text, "All good");
}

#[tokio::test]
async fn test_failed_crawl_never_requests_report() {
    let server = MockServer::start().await;
    mount_accept(&server, "task-2").await;
    mount_statuses(
        &server,
        "task-2",
        vec![json!({"status": "failed", "progress": 20, "error": "timeout"})],
    )
    .await;

    Mock::given(method("POST"))
        .and(path("/generate-report/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"report": "unused"})))
        .expect(0)
        .mount(&server)
        .await;

    let mut controller = controller_for(&server, with_key());
    let err = controller
        .submit_crawl("https://example.com", 10)
        .await
        .unwrap_err();

    assert!(matches!(err, ScoutError::TaskFailed { .. }));
    let snapshot = controller.snapshot();
    assert_eq!(snapshot.phase, SessionPhase::Idle);
    assert!(snapshot.notification.unwrap().message.contains("timeout"));
}

#[tokio::test]
async fn test_clear_failure_after_report_is_not_fatal() {
    let server = MockServer::start().await;
    mount_accept(&server, "task-3").await;
    mount_statuses(&server, "task-3", vec![status_body("completed", 100)]).await;

    Mock::given(method("POST"))
        .and(path("/generate-report/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"report": "Keep me"})))
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/clear-database/"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"detail": "database is locked"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut controller = controller_for(&server, with_key());
    let report = controller
        .submit_crawl("https://example.com", 10)
        .await
        .expect("Report should survive a failed clear");
    assert_eq!(report.text, "Keep me");

    let snapshot = controller.snapshot();
    assert_eq!(snapshot.report.unwrap().text, "Keep me");

    let notification = snapshot.notification.unwrap();
    assert!(notification.is_error());
    assert!(notification.message.contains("database is locked"));

    let history = controller.notifications().history();
    assert!(history
        .iter()
        .any(|n| !n.is_error() && n.message.contains("report generated")));
}

#[tokio::test]
async fn test_invalid_url_sends_nothing() {
    let server = MockServer::start().await;
    let mut controller = controller_for(&server, with_key());

    let err = controller.submit_crawl("not-a-url", 10).await.unwrap_err();

    assert!(matches!(
        err,
        ScoutError::Validation(ValidationError::InvalidUrl { .. })
    ));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_key_sends_nothing() {
    let server = MockServer::start().await;
    let mut controller = controller_for(&server, MemoryCredentialStore::new());

    let err = controller.generate_report().await.unwrap_err();

    assert!(matches!(
        err,
        ScoutError::Validation(ValidationError::MissingCredential)
    ));
    assert!(controller.snapshot().credential_prompt);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_saved_key_is_used_after_reopening_store() {
    let server = MockServer::start().await;
    let dir = tempfile::TempDir::new().unwrap();
    let store_path = dir.path().join("credentials.db");

    Mock::given(method("POST"))
        .and(path("/generate-report/"))
        .and(body_json(json!({"openai_api_key": "sk-from-disk"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"report": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/clear-database/"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    {
        let backend = HttpBackend::new(&server.uri(), Duration::from_secs(5)).unwrap();
        let store = SqliteCredentialStore::new(&store_path).unwrap();
        let mut controller = SessionController::new(backend, store, test_settings()).unwrap();
        assert!(!controller.has_credential());
        controller.save_credential("sk-from-disk").unwrap();
    }

    let store = SqliteCredentialStore::new(&store_path).unwrap();
    assert_eq!(store.get(KEY).unwrap().as_deref(), Some("sk-from-disk"));

    let backend = HttpBackend::new(&server.uri(), Duration::from_secs(5)).unwrap();
    let mut controller = SessionController::new(backend, store, test_settings()).unwrap();
    assert!(controller.has_credential());

    let report = controller.generate_report().await.unwrap();
    assert_eq!(report.text, "ok");
}

#[tokio::test]
async fn test_manual_clear_reports_backend_detail() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/clear-database/"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"detail": "cannot delete"})),
        )
        .mount(&server)
        .await;

    let mut controller = controller_for(&server, with_key());
    let err = controller.clear_remote_data().await.unwrap_err();

    assert!(err.to_string().contains("cannot delete"));
    assert_eq!(controller.phase(), SessionPhase::Idle);
    assert!(controller
        .snapshot()
        .notification
        .unwrap()
        .message
        .contains("cannot delete"));
}
