use crate::extractor;
use crate::fetcher::{
    errors::{FetchError, NetworkError},
    pipeline::process_response,
    types::FetchedArticle,
};
use once_cell::sync::Lazy;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::{info, instrument, warn};
use url::Url;

const MAX_BODY_SIZE: u64 = 5 * 1024 * 1024; // 5MB
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_MAX_ARTICLE_CHARS: usize = 15_000;

static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .connect_timeout(Duration::from_secs(10))
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(10))
        .default_headers({
            let mut headers = reqwest::header::HeaderMap::new();
            headers.insert(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"
                    .parse()
                    .unwrap(),
            );
            headers
        })
        .build()
        .expect("Failed to build HTTP client")
});

/// Checks the URL shape before any network access.
pub fn validate_url(url: &str) -> Result<Url, FetchError> {
    if url.is_empty() {
        return Err(FetchError::InvalidUrl("url is empty".to_string()));
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(FetchError::InvalidUrl(format!(
            "{url}: must start with http:// or https://"
        )));
    }

    Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{url}: {e}")))
}

/// Downloads a page and turns it into noisy article text.
#[derive(Debug, Clone)]
pub struct Fetcher {
    timeout: Duration,
    max_article_chars: usize,
    min_article_chars: usize,
}

impl Fetcher {
    pub fn new(timeout: Duration, max_article_chars: usize) -> Self {
        Self {
            timeout,
            max_article_chars,
            min_article_chars: 0,
        }
    }

    /// Pages whose extracted text is shorter than this count as having no content.
    /// Zero disables the check.
    pub fn with_min_article_chars(mut self, min_article_chars: usize) -> Self {
        self.min_article_chars = min_article_chars;
        self
    }

    #[instrument(skip_all, fields(url = %url))]
    pub async fn fetch(&self, url: &str) -> Result<FetchedArticle, FetchError> {
        let parsed_url = validate_url(url)?;

        let response = HTTP_CLIENT
            .get(parsed_url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(NetworkError::from_reqwest_error)?;

        // Check content length before downloading
        if let Some(content_length) = response.content_length()
            && content_length > MAX_BODY_SIZE
        {
            return Err(FetchError::BodyTooLarge(content_length));
        }

        let final_url = response.url().clone();
        let status = response.status();

        if !status.is_success() {
            return Err(NetworkError::Http { status }.into());
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|ct| ct.to_str().ok())
            .unwrap_or("text/html")
            .to_string();

        let body_bytes = response
            .bytes()
            .await
            .map_err(|e| NetworkError::Body(e.to_string()))?;

        // Content-Length may be missing or wrong
        if body_bytes.len() as u64 > MAX_BODY_SIZE {
            return Err(FetchError::BodyTooLarge(body_bytes.len() as u64));
        }

        let page = process_response(final_url, status, body_bytes, &content_type);
        let article =
            extractor::extract(&page, self.max_article_chars).ok_or(FetchError::NoContentFound)?;

        let chars = article.text.char_count();
        if chars < self.min_article_chars {
            warn!(
                "Extracted only {} chars from {}, below the minimum of {}",
                chars, article.url, self.min_article_chars
            );
            return Err(FetchError::NoContentFound);
        }

        info!(
            "Fetched {} (status: {}, charset: {:?}, {} chars, body fallback: {}, truncated: {})",
            article.url,
            page.status,
            page.charset,
            article.text.char_count(),
            article.used_body_fallback,
            article.truncation.is_some()
        );

        Ok(article)
    }
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT, DEFAULT_MAX_ARTICLE_CHARS)
    }
}
