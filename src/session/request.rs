use crate::url::parse_absolute_url;
use crate::ValidationError;

/// Smallest page budget a crawl may request
pub const MIN_MAX_PAGES: u32 = 1;

/// Largest page budget a crawl may request
pub const MAX_MAX_PAGES: u32 = 100;

/// A validated crawl submission
///
/// Only constructible through [`CrawlRequest::new`], so holding one means the
/// URL is absolute and the page budget is in range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlRequest {
    url: String,
    max_pages: u32,
}

impl CrawlRequest {
    /// Validates user input into a request
    ///
    /// # Examples
    ///
    /// ```
    /// use seo_scout::CrawlRequest;
    ///
    /// let request = CrawlRequest::new(" https://example.com ", 10).unwrap();
    /// assert_eq!(request.url(), "https://example.com");
    /// assert!(CrawlRequest::new("https://example.com", 0).is_err());
    /// ```
    pub fn new(url: &str, max_pages: u32) -> Result<Self, ValidationError> {
        parse_absolute_url(url)?;

        if !(MIN_MAX_PAGES..=MAX_MAX_PAGES).contains(&max_pages) {
            return Err(ValidationError::MaxPagesOutOfRange(max_pages));
        }

        Ok(Self {
            url: url.trim().to_string(),
            max_pages,
        })
    }

    /// The URL as entered, minus surrounding whitespace
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn max_pages(&self) -> u32 {
        self.max_pages
    }
}
