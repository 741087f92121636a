//! HTTP client for the backend
//!
//! This module handles all HTTP requests made by SEO Scout, including:
//! - Building the `reqwest` client
//! - Mapping non-2xx responses to `ApiError::Backend` with the backend's detail
//! - Classifying transport failures
//! - Decoding JSON bodies into the wire types

use crate::api::types::{
    CrawlAccepted, CrawlStatus, ErrorBody, GenerateReportBody, ReportBody, SeoResult,
    StartCrawlBody,
};
use crate::api::{ApiError, ApiResult, BackendApi};
use crate::config::BackendConfig;
use crate::session::CrawlRequest;
use crate::url::{endpoint, parse_base_url, task_status_endpoint};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// Builds the HTTP client used for every backend request
///
/// Only a connect timeout is set. A request that connects but never answers
/// is left to hang, matching the poll loop's "one request at a time" model.
///
/// # Example
///
/// ```no_run
/// use seo_scout::api::build_http_client;
/// use std::time::Duration;
///
/// let client = build_http_client(Duration::from_secs(10)).unwrap();
/// ```
pub fn build_http_client(connect_timeout: Duration) -> Result<Client, reqwest::Error> {
    let user_agent = format!("seo-scout/{}", env!("CARGO_PKG_VERSION"));

    Client::builder()
        .user_agent(user_agent)
        .connect_timeout(connect_timeout)
        .gzip(true)
        .brotli(true)
        .build()
}

/// `BackendApi` over HTTP
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

impl HttpBackend {
    /// Creates a backend client rooted at `base_url`
    ///
    /// # Arguments
    ///
    /// * `base_url` - Root of the backend service, e.g. `https://host` or `http://host/api`
    /// * `connect_timeout` - TCP connect timeout
    pub fn new(base_url: &str, connect_timeout: Duration) -> ApiResult<Self> {
        let base_url = parse_base_url(base_url)?;
        let client = build_http_client(connect_timeout).map_err(|e| ApiError::Transport {
            operation: "build client",
            message: e.to_string(),
        })?;

        Ok(Self { client, base_url })
    }

    /// Creates a backend client from the `[backend]` config section
    pub fn from_config(config: &BackendConfig) -> ApiResult<Self> {
        Self::new(
            &config.base_url,
            Duration::from_secs(config.connect_timeout_secs),
        )
    }

    /// Uses an existing `reqwest::Client`
    pub fn with_client(client: Client, base_url: &str) -> ApiResult<Self> {
        Ok(Self {
            client,
            base_url: parse_base_url(base_url)?,
        })
    }

    /// The backend root every endpoint is joined to
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

impl BackendApi for HttpBackend {
    async fn start_crawl(&self, request: &CrawlRequest) -> ApiResult<CrawlAccepted> {
        const OP: &str = "start crawl";
        let url = endpoint(&self.base_url, "crawl/")?;
        tracing::debug!("POST {} (max_pages={})", url, request.max_pages());

        let body = StartCrawlBody {
            url: request.url(),
            max_pages: request.max_pages(),
        };

        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| classify_transport(OP, e))?;

        decode_json(OP, ensure_success(response).await?).await
    }

    async fn crawl_status(&self, task_id: &str) -> ApiResult<CrawlStatus> {
        const OP: &str = "crawl status";
        let url = task_status_endpoint(&self.base_url, task_id)?;
        tracing::trace!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_transport(OP, e))?;

        decode_json(OP, ensure_success(response).await?).await
    }

    async fn generate_report(&self, api_key: &str) -> ApiResult<String> {
        const OP: &str = "generate report";
        let url = endpoint(&self.base_url, "generate-report/")?;
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(url)
            .json(&GenerateReportBody {
                openai_api_key: api_key,
            })
            .send()
            .await
            .map_err(|e| classify_transport(OP, e))?;

        let body: ReportBody = decode_json(OP, ensure_success(response).await?).await?;
        Ok(body.report)
    }

    async fn clear_database(&self) -> ApiResult<()> {
        const OP: &str = "clear database";
        let url = endpoint(&self.base_url, "clear-database/")?;
        tracing::debug!("DELETE {}", url);

        let response = self
            .client
            .delete(url)
            .send()
            .await
            .map_err(|e| classify_transport(OP, e))?;

        ensure_success(response).await?;
        Ok(())
    }

    async fn list_results(&self) -> ApiResult<Vec<SeoResult>> {
        const OP: &str = "list results";
        let url = endpoint(&self.base_url, "results/")?;
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_transport(OP, e))?;

        decode_json(OP, ensure_success(response).await?).await
    }
}

/// Turns a non-2xx response into `ApiError::Backend`
async fn ensure_success(response: Response) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    // An unreadable body just means there is no detail to show
    let body = response.text().await.unwrap_or_default();
    let detail = extract_detail(&body);
    tracing::debug!("Backend returned {} (detail: {:?})", status, detail);

    Err(ApiError::Backend {
        status: status.as_u16(),
        detail,
    })
}

async fn decode_json<T: DeserializeOwned>(
    operation: &'static str,
    response: Response,
) -> ApiResult<T> {
    response.json::<T>().await.map_err(|e| {
        if e.is_decode() {
            ApiError::Decode {
                operation,
                message: e.to_string(),
            }
        } else {
            classify_transport(operation, e)
        }
    })
}

/// Pulls a human-readable `detail` string out of an error body
///
/// Only a JSON object whose `detail` is a non-empty string counts. Other
/// shapes (plain text, FastAPI validation arrays, empty bodies) yield `None`.
pub fn extract_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail? {
        serde_json::Value::String(detail) if !detail.trim().is_empty() => Some(detail),
        _ => None,
    }
}

fn classify_transport(operation: &'static str, err: reqwest::Error) -> ApiError {
    let message = if err.is_timeout() {
        "Request timeout".to_string()
    } else if err.is_connect() {
        "Connection refused".to_string()
    } else {
        err.to_string()
    };

    ApiError::Transport { operation, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        assert!(build_http_client(Duration::from_secs(5)).is_ok());
    }

    #[test]
    fn test_new_rejects_bad_base_url() {
        let result = HttpBackend::new("not a url", Duration::from_secs(1));
        assert!(matches!(result, Err(ApiError::Endpoint(_))));
    }

    #[test]
    fn test_base_url_normalized_with_slash() {
        let backend =
            HttpBackend::new("http://127.0.0.1:8000/api", Duration::from_secs(1)).unwrap();
        assert_eq!(backend.base_url().as_str(), "http://127.0.0.1:8000/api/");
    }

    #[test]
    fn test_extract_detail_string() {
        assert_eq!(
            extract_detail(r#"{"detail":"Invalid API key"}"#),
            Some("Invalid API key".to_string())
        );
    }

    #[test]
    fn test_extract_detail_other_shapes() {
        assert_eq!(extract_detail(""), None);
        assert_eq!(extract_detail("Internal Server Error"), None);
        assert_eq!(extract_detail(r#"{"message":"nope"}"#), None);
        assert_eq!(extract_detail(r#"{"detail":""}"#), None);
        assert_eq!(
            extract_detail(r#"{"detail":[{"loc":["body","url"],"msg":"invalid"}]}"#),
            None
        );
    }
}
