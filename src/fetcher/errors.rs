use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error("network error: {0}")]
    Network(#[from] NetworkError),

    #[error("body too large ({0} bytes)")]
    BodyTooLarge(u64),

    #[error("no readable content found on the page")]
    NoContentFound,
}

/// Underlying cause of a failed download.
#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("http error {status}")]
    Http { status: reqwest::StatusCode },

    #[error("connect timeout")]
    ConnectTimeout,

    #[error("request timeout")]
    RequestTimeout,

    #[error("too many redirects")]
    RedirectLoop,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("failed to read body: {0}")]
    Body(String),

    #[error("unknown: {0}")]
    Unknown(String),
}

impl FetchError {
    /// Errors raised before any request left the process.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::InvalidUrl(_))
    }
}

impl NetworkError {
    pub fn from_reqwest_error(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            if err.is_connect() {
                Self::ConnectTimeout
            } else {
                Self::RequestTimeout
            }
        } else if err.is_redirect() {
            Self::RedirectLoop
        } else if let Some(status) = err.status() {
            Self::Http { status }
        } else if err.is_connect() || err.is_request() {
            Self::Connect(err.to_string())
        } else if err.is_body() || err.is_decode() {
            Self::Body(err.to_string())
        } else {
            Self::Unknown(err.to_string())
        }
    }
}
