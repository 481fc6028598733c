use newsvocab::fetcher::{FetchError, Fetcher, NetworkError};
use std::time::Duration;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header_regex, method, path},
};

fn long_paragraphs() -> String {
    "<h1>Storm hits coast</h1>\
     <p>A powerful storm made landfall on Tuesday, bringing heavy rain and strong winds to coastal towns.</p>\
     <p>Officials urged residents to stay indoors until the warning is lifted.</p>"
        .to_string()
}

fn html(body: &str) -> String {
    format!("<html><head><title>Test</title></head><body>{body}</body></html>")
}

#[tokio::test]
async fn test_fetch_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/news"))
        .and(header_regex("user-agent", "^Mozilla/5.0"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(html(&long_paragraphs()).into_bytes())
                .insert_header("Content-Type", "text/html; charset=utf-8"),
        )
        .mount(&mock_server)
        .await;

    let url = format!("{}/news", mock_server.uri());
    let article = Fetcher::default().fetch(&url).await.unwrap();

    assert_eq!(article.url.as_str(), url);
    assert!(!article.text.is_clean());
    assert!(!article.used_body_fallback);
    assert!(article.truncation.is_none());
    assert!(article.text.as_str().starts_with("Storm hits coast\nA powerful storm"));
}

#[tokio::test]
async fn test_fetch_short_page_uses_body_fallback() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/short"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(html("<p>Tiny.</p><div>Breaking: more text here.</div>").into_bytes())
                .insert_header("Content-Type", "text/html"),
        )
        .mount(&mock_server)
        .await;

    let url = format!("{}/short", mock_server.uri());
    let article = Fetcher::default().fetch(&url).await.unwrap();

    assert!(article.used_body_fallback);
    assert_eq!(article.text.as_str(), "Tiny.\nBreaking: more text here.");
}

#[tokio::test]
async fn test_fetch_truncates_long_article() {
    let mock_server = MockServer::start().await;
    let body = format!("<p>{}</p>", "lorem ipsum ".repeat(100));

    Mock::given(method("GET"))
        .and(path("/long"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(html(&body).into_bytes())
                .insert_header("Content-Type", "text/html"),
        )
        .mount(&mock_server)
        .await;

    let url = format!("{}/long", mock_server.uri());
    let article = Fetcher::new(Duration::from_secs(5), 300)
        .fetch(&url)
        .await
        .unwrap();

    assert_eq!(article.text.char_count(), 303);
    assert!(article.text.as_str().ends_with("..."));
    let truncation = article.truncation.unwrap();
    assert_eq!(truncation.kept_chars, 300);
    assert_eq!(truncation.original_chars, "lorem ipsum ".repeat(100).trim().len());
}

#[tokio::test]
async fn test_fetch_404() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/notfound"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let url = format!("{}/notfound", mock_server.uri());
    let result = Fetcher::default().fetch(&url).await;

    match result {
        Err(FetchError::Network(NetworkError::Http { status })) => {
            assert_eq!(status.as_u16(), 404);
        }
        other => panic!("Expected HTTP 404 error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_500() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/error"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let url = format!("{}/error", mock_server.uri());
    let result = Fetcher::default().fetch(&url).await;

    // Fetch failures are not retried.
    match result {
        Err(FetchError::Network(NetworkError::Http { status })) => {
            assert_eq!(status.as_u16(), 500);
        }
        other => panic!("Expected HTTP 500 error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_redirect() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/redirect"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", "/final"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/final"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(html(&long_paragraphs()).into_bytes())
                .insert_header("Content-Type", "text/html"),
        )
        .mount(&mock_server)
        .await;

    let url = format!("{}/redirect", mock_server.uri());
    let article = Fetcher::default().fetch(&url).await.unwrap();

    assert!(article.url.as_str().ends_with("/final"));
    assert!(article.text.as_str().contains("Storm hits coast"));
}

#[tokio::test]
async fn test_fetch_gzip_compression() {
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;

    let original_content = html(&long_paragraphs());

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(original_content.as_bytes()).unwrap();
    let compressed_data = encoder.finish().unwrap();

    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/gzipped"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(compressed_data)
                .insert_header("Content-Type", "text/html; charset=utf-8")
                .insert_header("Content-Encoding", "gzip"),
        )
        .mount(&mock_server)
        .await;

    let url = format!("{}/gzipped", mock_server.uri());
    let article = Fetcher::default().fetch(&url).await.unwrap();

    assert!(article.text.as_str().contains("A powerful storm made landfall"));
}

#[tokio::test]
async fn test_fetch_windows_1252_page() {
    let mock_server = MockServer::start().await;
    let mut body = b"<html><body><p>Caf".to_vec();
    body.push(0xE9);
    body.extend_from_slice(b" owners reopened after the long winter closure, serving soup and bread to the whole neighbourhood.</p></body></html>");

    Mock::given(method("GET"))
        .and(path("/latin"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(body)
                .insert_header("Content-Type", "text/html; charset=windows-1252"),
        )
        .mount(&mock_server)
        .await;

    let url = format!("{}/latin", mock_server.uri());
    let article = Fetcher::default().fetch(&url).await.unwrap();

    assert!(article.text.as_str().starts_with("Café owners"));
}

#[tokio::test]
async fn test_fetch_empty_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/empty"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(html("<script>track()</script>").into_bytes())
                .insert_header("Content-Type", "text/html"),
        )
        .mount(&mock_server)
        .await;

    let url = format!("{}/empty", mock_server.uri());
    let result = Fetcher::default().fetch(&url).await;

    assert!(matches!(result, Err(FetchError::NoContentFound)));
}

#[tokio::test]
async fn test_fetch_short_page_below_minimum() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/stub"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(html("<p>Page not found.</p>").into_bytes())
                .insert_header("Content-Type", "text/html"),
        )
        .mount(&mock_server)
        .await;

    let url = format!("{}/stub", mock_server.uri());

    let accepted = Fetcher::default().fetch(&url).await.unwrap();
    assert_eq!(accepted.text.as_str(), "Page not found.");

    let result = Fetcher::default()
        .with_min_article_chars(50)
        .fetch(&url)
        .await;
    assert!(matches!(result, Err(FetchError::NoContentFound)));
}

#[tokio::test]
async fn test_fetch_body_too_large() {
    let mock_server = MockServer::start().await;

    // 6MB > 5MB limit
    let large_body = "x".repeat(6 * 1024 * 1024);

    Mock::given(method("GET"))
        .and(path("/large"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(large_body.as_bytes())
                .insert_header("Content-Type", "text/html"),
        )
        .mount(&mock_server)
        .await;

    let url = format!("{}/large", mock_server.uri());
    let result = Fetcher::default().fetch(&url).await;

    match result {
        Err(FetchError::BodyTooLarge(size)) => {
            assert_eq!(size, 6 * 1024 * 1024);
        }
        other => panic!("Expected BodyTooLarge error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(html(&long_paragraphs()).into_bytes())
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let url = format!("{}/slow", mock_server.uri());
    let result = Fetcher::new(Duration::from_millis(200), 15_000)
        .fetch(&url)
        .await;

    assert!(matches!(
        result,
        Err(FetchError::Network(NetworkError::RequestTimeout))
    ));
}

#[tokio::test]
async fn test_fetch_invalid_url() {
    for url in ["not-a-valid-url", "", "ftp://example.com/file"] {
        let result = Fetcher::default().fetch(url).await;
        assert!(
            matches!(result, Err(FetchError::InvalidUrl(_))),
            "expected InvalidUrl for {url:?}"
        );
    }
}
