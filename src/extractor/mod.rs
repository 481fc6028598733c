pub mod model;
pub mod reader;

#[cfg(test)]
mod tests;

pub use model::{ArticleText, TextKind, Truncation};

use tracing::warn;

use crate::fetcher::types::{FetchedArticle, PageResponse};

/// Builds noisy article text from a downloaded page.
///
/// Returns `None` when the page has no readable text at all.
pub fn extract(page: &PageResponse, max_chars: usize) -> Option<FetchedArticle> {
    let extraction = reader::extract_text(&page.body_utf8);
    if extraction.text.is_empty() {
        return None;
    }

    let (text, truncation) = model::truncate_chars(extraction.text, max_chars);
    if let Some(truncation) = truncation {
        warn!(
            "Article text truncated from {} to {} characters",
            truncation.original_chars, truncation.kept_chars
        );
    }

    Some(FetchedArticle {
        url: page.url_final.clone(),
        text: ArticleText::noisy(text),
        truncation,
        used_body_fallback: extraction.used_body_fallback,
    })
}
