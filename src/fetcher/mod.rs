pub mod client;
pub mod errors;
pub mod pipeline;
pub mod types;

pub use client::{Fetcher, validate_url};
pub use errors::{FetchError, NetworkError};
pub use types::{Charset, FetchedArticle, PageResponse};
