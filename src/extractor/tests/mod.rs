use bytes::Bytes;
use reqwest::StatusCode;
use std::fs;
use url::Url;

use crate::extractor::{TextKind, extract, model::TRUNCATION_MARKER};
use crate::fetcher::pipeline::process_response;
use crate::fetcher::types::PageResponse;

#[test]
fn test_extract_article_fixture() {
    let html = fs::read_to_string("src/extractor/tests/fixtures/article.html")
        .expect("Failed to read test fixture");

    let page = create_test_page(html, "https://example.com/science/cave-fish");
    let article = extract(&page, 15_000).unwrap();

    assert_eq!(article.text.kind(), TextKind::Noisy);
    assert!(!article.used_body_fallback);
    assert!(article.truncation.is_none());

    let text = article.text.as_str();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines[0],
        "Scientists find a new species living in deep caves"
    );
    assert!(text.contains("previously unknown species of blind fish"));
    assert!(text.contains("Why it matters"));
    // Paragraph-level noise survives extraction; the cleaner removes it later.
    assert!(text.contains("Subscribe to our newsletter"));
    assert!(!text.contains("window.analytics"));
    assert!(!text.contains("Home"));
}

#[test]
fn test_extract_short_page_uses_whole_body() {
    let html = "<html><body><p>Scientists discovered a new species. It lives in deep caves.</p></body></html>";

    let page = create_test_page(html.to_string(), "https://example.com/short");
    let article = extract(&page, 15_000).unwrap();

    assert!(article.used_body_fallback);
    assert_eq!(
        article.text.as_str(),
        "Scientists discovered a new species. It lives in deep caves."
    );
}

#[test]
fn test_extract_truncates_long_article() {
    let paragraph = format!("<p>{}</p>", "word ".repeat(500));
    let html = format!("<html><body>{}</body></html>", paragraph.repeat(10));

    let page = create_test_page(html, "https://example.com/long");
    let article = extract(&page, 1_000).unwrap();

    assert_eq!(article.text.char_count(), 1_000 + TRUNCATION_MARKER.len());
    assert!(article.text.as_str().ends_with(TRUNCATION_MARKER));
    let truncation = article.truncation.unwrap();
    assert_eq!(truncation.kept_chars, 1_000);
    assert!(truncation.original_chars > 1_000);
}

#[test]
fn test_extract_empty_page() {
    let html = "<html><head><title>Nothing</title></head><body><script>x()</script></body></html>";

    let page = create_test_page(html.to_string(), "https://example.com/empty");
    assert!(extract(&page, 15_000).is_none());
}

#[test]
fn test_malformed_html() {
    let html = "<html><head><title>Broken</title><body><p>Unclosed tags<div>More content";

    let page = create_test_page(html.to_string(), "https://example.com/broken");
    let article = extract(&page, 15_000).unwrap();

    assert!(article.text.as_str().contains("Unclosed tags"));
}

fn create_test_page(html: String, url: &str) -> PageResponse {
    process_response(
        Url::parse(url).unwrap(),
        StatusCode::OK,
        Bytes::from(html),
        "text/html; charset=utf-8",
    )
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_extract_never_panics(html in ".*") {
            let page = create_test_page(html, "https://example.com");
            let _ = extract(&page, 500);
        }

        #[test]
        fn test_extract_respects_length_limit(html in ".*", max in 1usize..200) {
            let page = create_test_page(html, "https://example.com");
            if let Some(article) = extract(&page, max) {
                prop_assert!(article.text.char_count() <= max + TRUNCATION_MARKER.len());
            }
        }
    }
}
