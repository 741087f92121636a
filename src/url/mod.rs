//! URL handling for SEO Scout
//!
//! Two concerns live here: checking user-entered crawl targets before they are
//! submitted, and building backend endpoint URLs from the configured base.

use crate::ValidationError;
use url::Url;

/// Parses user input as an absolute URL
///
/// Surrounding whitespace is ignored. No scheme whitelist is applied and the
/// URL is not normalized; anything `Url::parse` accepts as absolute passes.
///
/// # Examples
///
/// ```
/// use seo_scout::url::parse_absolute_url;
///
/// assert!(parse_absolute_url("https://example.com").is_ok());
/// assert!(parse_absolute_url("example.com").is_err());
/// ```
pub fn parse_absolute_url(input: &str) -> Result<Url, ValidationError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::InvalidUrl {
            url: input.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    Url::parse(trimmed).map_err(|e| ValidationError::InvalidUrl {
        url: trimmed.to_string(),
        reason: e.to_string(),
    })
}

/// Parses the backend root so that relative endpoint paths join beneath it
///
/// `Url::join` replaces the last path segment unless the base ends with `/`,
/// so a missing trailing slash is added here.
pub fn parse_base_url(input: &str) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(input.trim())?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Builds an endpoint URL such as `crawl/` beneath the backend root
pub fn endpoint(base: &Url, path: &str) -> Result<Url, url::ParseError> {
    base.join(path.trim_start_matches('/'))
}

/// Builds `crawl-status/{task_id}` with the task id as a single encoded segment
pub fn task_status_endpoint(base: &Url, task_id: &str) -> Result<Url, url::ParseError> {
    let mut url = endpoint(base, "crawl-status/")?;
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().push(task_id);
    }
    Ok(url)
}
