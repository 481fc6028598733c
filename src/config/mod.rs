//! Configuration handling for the application.
//!
//! Every knob has a default, so `Config::from_env` succeeds with an empty
//! environment. Values that are present but cannot be parsed are reported as
//! a `ConfigError` instead of being silently replaced by defaults.

use std::env;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::analysis::DEFAULT_VOCABULARY_COUNT;
use crate::fetcher::client::{DEFAULT_MAX_ARTICLE_CHARS, DEFAULT_TIMEOUT};
use crate::generation::RetryPolicy;
use crate::generation::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::generation::retry::{DEFAULT_BASE_DELAY, DEFAULT_MAX_ATTEMPTS};

pub const ENV_GEMINI_API_KEY: &str = "GEMINI_API_KEY";
pub const ENV_GEMINI_MODEL: &str = "GEMINI_MODEL";
pub const ENV_GEMINI_BASE_URL: &str = "GEMINI_BASE_URL";
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_FETCH_TIMEOUT_SECS: &str = "FETCH_TIMEOUT_SECS";
pub const ENV_MAX_ARTICLE_CHARS: &str = "MAX_ARTICLE_CHARS";
pub const ENV_MIN_ARTICLE_CHARS: &str = "MIN_ARTICLE_CHARS";
pub const ENV_VOCAB_COUNT: &str = "VOCAB_COUNT";
pub const ENV_GENERATION_MAX_ATTEMPTS: &str = "GENERATION_MAX_ATTEMPTS";
pub const ENV_BACKOFF_BASE_MS: &str = "BACKOFF_BASE_MS";
pub const ENV_VERIFY_EXAMPLES: &str = "VERIFY_EXAMPLES";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

/// Application runtime configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    gemini_api_key: Option<String>,
    gemini_model: String,
    gemini_base_url: String,
    bind_addr: String,
    fetch_timeout: Duration,
    max_article_chars: usize,
    min_article_chars: usize,
    vocabulary_count: usize,
    retry_policy: RetryPolicy,
    verify_examples: bool,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field(
                "gemini_api_key",
                &self.gemini_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("gemini_model", &self.gemini_model)
            .field("gemini_base_url", &self.gemini_base_url)
            .field("bind_addr", &self.bind_addr)
            .field("fetch_timeout", &self.fetch_timeout)
            .field("max_article_chars", &self.max_article_chars)
            .field("min_article_chars", &self.min_article_chars)
            .field("vocabulary_count", &self.vocabulary_count)
            .field("retry_policy", &self.retry_policy)
            .field("verify_examples", &self.verify_examples)
            .finish()
    }
}

impl Config {
    /// Load from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let gemini_api_key = env::var(ENV_GEMINI_API_KEY)
            .ok()
            .filter(|key| !key.trim().is_empty());
        let gemini_model = env::var(ENV_GEMINI_MODEL).unwrap_or(defaults.gemini_model);
        let gemini_base_url = env::var(ENV_GEMINI_BASE_URL).unwrap_or(defaults.gemini_base_url);
        let bind_addr = env::var(ENV_BIND_ADDR).unwrap_or(defaults.bind_addr);

        let fetch_timeout = parse_var::<u64>(ENV_FETCH_TIMEOUT_SECS)?
            .map(Duration::from_secs)
            .unwrap_or(defaults.fetch_timeout);
        let max_article_chars =
            parse_var(ENV_MAX_ARTICLE_CHARS)?.unwrap_or(defaults.max_article_chars);
        let min_article_chars =
            parse_var(ENV_MIN_ARTICLE_CHARS)?.unwrap_or(defaults.min_article_chars);
        let vocabulary_count = parse_var(ENV_VOCAB_COUNT)?.unwrap_or(defaults.vocabulary_count);
        let max_attempts = parse_var(ENV_GENERATION_MAX_ATTEMPTS)?
            .unwrap_or(defaults.retry_policy.max_attempts);
        let base_delay = parse_var::<u64>(ENV_BACKOFF_BASE_MS)?
            .map(Duration::from_millis)
            .unwrap_or(defaults.retry_policy.base_delay);
        let verify_examples = parse_var(ENV_VERIFY_EXAMPLES)?.unwrap_or(defaults.verify_examples);

        require_positive(ENV_FETCH_TIMEOUT_SECS, fetch_timeout.as_secs())?;
        require_positive(ENV_MAX_ARTICLE_CHARS, max_article_chars as u64)?;
        require_positive(ENV_VOCAB_COUNT, vocabulary_count as u64)?;
        require_positive(ENV_GENERATION_MAX_ATTEMPTS, u64::from(max_attempts))?;

        Ok(Self {
            gemini_api_key,
            gemini_model,
            gemini_base_url,
            bind_addr,
            fetch_timeout,
            max_article_chars,
            min_article_chars,
            vocabulary_count,
            retry_policy: RetryPolicy {
                max_attempts,
                base_delay,
            },
            verify_examples,
        })
    }

    /// Credential used when a caller does not supply its own.
    pub fn gemini_api_key(&self) -> Option<&str> {
        self.gemini_api_key.as_deref()
    }
    pub fn gemini_model(&self) -> &str {
        &self.gemini_model
    }
    pub fn gemini_base_url(&self) -> &str {
        &self.gemini_base_url
    }
    /// TCP bind address (host:port) for the HTTP server.
    pub fn bind_addr(&self) -> &str {
        &self.bind_addr
    }
    pub fn fetch_timeout(&self) -> Duration {
        self.fetch_timeout
    }
    pub fn max_article_chars(&self) -> usize {
        self.max_article_chars
    }
    /// Zero means any non-empty extraction is accepted.
    pub fn min_article_chars(&self) -> usize {
        self.min_article_chars
    }
    pub fn vocabulary_count(&self) -> usize {
        self.vocabulary_count
    }
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry_policy
    }
    /// Whether example sentences are checked against the article text.
    pub fn verify_examples(&self) -> bool {
        self.verify_examples
    }

    pub fn with_gemini_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.gemini_base_url = base_url.into();
        self
    }

    pub fn with_gemini_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.gemini_api_key = Some(api_key.into());
        self
    }

    pub fn with_retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            gemini_model: DEFAULT_MODEL.to_string(),
            gemini_base_url: DEFAULT_BASE_URL.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            fetch_timeout: DEFAULT_TIMEOUT,
            max_article_chars: DEFAULT_MAX_ARTICLE_CHARS,
            min_article_chars: 0,
            vocabulary_count: DEFAULT_VOCABULARY_COUNT,
            retry_policy: RetryPolicy {
                max_attempts: DEFAULT_MAX_ATTEMPTS,
                base_delay: DEFAULT_BASE_DELAY,
            },
            verify_examples: false,
        }
    }
}

fn require_positive(field: &'static str, value: u64) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::InvalidValue {
            field,
            reason: "must be at least 1".to_string(),
        });
    }
    Ok(())
}

fn parse_var<T>(name: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::InvalidValue {
                field: name,
                reason: format!("{raw:?}: {e}"),
            }),
        Err(_) => Ok(None),
    }
}

/// Errors that can occur while building a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}
