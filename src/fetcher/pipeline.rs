use crate::fetcher::types::{Charset, PageResponse};
use bytes::Bytes;
use encoding_rs::Encoding;
use regex::Regex;
use reqwest::StatusCode;
use std::sync::LazyLock;
use tracing::warn;
use url::Url;

static CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).unwrap());

static META_CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<meta\s+[^>]*?charset\s*=\s*["']?([^"'\s/>]+)"#).unwrap());

pub fn process_response(
    url_final: Url,
    status: StatusCode,
    body_bytes: Bytes,
    content_type: &str,
) -> PageResponse {
    let encoding = detect_encoding(content_type, &body_bytes);
    let body_utf8 = decode_to_utf8(&body_bytes, encoding);

    PageResponse {
        url_final,
        status,
        charset: Charset::from_encoding(encoding),
        body_utf8,
    }
}

fn detect_encoding(content_type: &str, body_bytes: &[u8]) -> &'static Encoding {
    // 1. Content-Type header
    if let Some(encoding) = label_from(&CHARSET_REGEX, content_type) {
        return encoding;
    }

    // 2. <meta charset> or http-equiv in the first 4KB
    let search_bytes = &body_bytes[..body_bytes.len().min(4096)];
    let search_str = String::from_utf8_lossy(search_bytes);
    if let Some(encoding) = label_from(&META_CHARSET_REGEX, &search_str) {
        return encoding;
    }

    // 3. Heuristic detection
    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(search_bytes, body_bytes.len() <= 4096);
    detector.guess(None, true)
}

fn label_from(regex: &Regex, haystack: &str) -> Option<&'static Encoding> {
    let label = regex.captures(haystack)?.get(1)?.as_str().to_lowercase();
    Encoding::for_label(label.as_bytes())
}

fn decode_to_utf8(body_bytes: &[u8], encoding: &'static Encoding) -> String {
    let (decoded, used, had_errors) = encoding.decode(body_bytes);

    if had_errors {
        warn!(
            encoding = used.name(),
            "page contained malformed byte sequences; replaced them"
        );
    }

    decoded.into_owned()
}
