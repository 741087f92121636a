//! HttpBackend against a mock backend

use seo_scout::api::{ApiError, BackendApi, HttpBackend, TaskStatus};
use seo_scout::CrawlRequest;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn backend_for(server: &MockServer) -> HttpBackend {
    HttpBackend::new(&server.uri(), Duration::from_secs(5)).expect("Failed to build backend")
}

#[tokio::test]
async fn test_start_crawl_sends_url_and_max_pages() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/crawl/"))
        .and(body_json(json!({"url": "https://example.com", "max_pages": 25})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"message": "Crawl started", "task_id": "task-42"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let request = CrawlRequest::new("https://example.com", 25).unwrap();
    let accepted = backend.start_crawl(&request).await.unwrap();

    assert_eq!(accepted.task_id, "task-42");
    assert_eq!(accepted.message, "Crawl started");
}

#[tokio::test]
async fn test_start_crawl_rejection_carries_detail() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/crawl/"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"detail": "The OpenAI API key is required"})),
        )
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let request = CrawlRequest::new("https://example.com", 5).unwrap();
    let err = backend.start_crawl(&request).await.unwrap_err();

    assert_eq!(
        err,
        ApiError::Backend {
            status: 400,
            detail: Some("The OpenAI API key is required".to_string()),
        }
    );
}

#[tokio::test]
async fn test_non_json_error_body_has_no_detail() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/clear-database/"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = backend_for(&server).clear_database().await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Backend {
            status: 502,
            detail: None,
        }
    );
    assert_eq!(err.user_message(), "Unknown error");
}

#[tokio::test]
async fn test_crawl_status_parses_progress() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/crawl-status/task-42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "running",
            "progress": 55,
            "total_pages": 20,
            "crawled_pages": 11,
            "url": "https://example.com"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let status = backend_for(&server).crawl_status("task-42").await.unwrap();

    assert_eq!(status.status, TaskStatus::Running);
    assert_eq!(status.progress, 55);
    assert_eq!(status.crawled_pages, 11);
}

#[tokio::test]
async fn test_unknown_status_is_a_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/crawl-status/t"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "paused"})))
        .mount(&server)
        .await;

    let err = backend_for(&server).crawl_status("t").await.unwrap_err();
    assert!(matches!(err, ApiError::Decode { .. }));
}

#[tokio::test]
async fn test_generate_report_sends_api_key() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/generate-report/"))
        .and(body_json(json!({"openai_api_key": "sk-test"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"report": "# Technical SEO report"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let report = backend_for(&server).generate_report("sk-test").await.unwrap();
    assert_eq!(report, "# Technical SEO report");
}

#[tokio::test]
async fn test_clear_database_accepts_empty_success() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/clear-database/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    assert!(backend_for(&server).clear_database().await.is_ok());
}

#[tokio::test]
async fn test_list_results() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/results/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 1,
                "url": "https://example.com/",
                "status_code": 200,
                "title_tag": "Home",
                "h1_count": 1,
                "load_time": 0.42,
                "mobile_friendly": true
            },
            {"id": 2, "url": "https://example.com/about", "status_code": 404}
        ])))
        .mount(&server)
        .await;

    let results = backend_for(&server).list_results().await.unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].title_tag, "Home");
    assert!(results[0].mobile_friendly);
    assert_eq!(results[1].status_code, 404);
}

#[tokio::test]
async fn test_base_url_with_path_prefix() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/clear-database/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let backend =
        HttpBackend::new(&format!("{}/api", server.uri()), Duration::from_secs(5)).unwrap();
    assert!(backend.clear_database().await.is_ok());
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    // Bind and release a port so nothing is listening on it
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let backend =
        HttpBackend::new(&format!("http://127.0.0.1:{}", port), Duration::from_secs(2)).unwrap();
    let err = backend.clear_database().await.unwrap_err();

    assert!(err.is_transport());
    assert_eq!(
        err.user_message(),
        seo_scout::api::NETWORK_ERROR_MESSAGE
    );
}
