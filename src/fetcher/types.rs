use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::extractor::model::{ArticleText, Truncation};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Charset {
    Utf8,
    Windows1252,
    ShiftJis,
    Gb2312,
    Big5,
    Other(String),
}

impl Charset {
    pub fn from_encoding(encoding: &'static encoding_rs::Encoding) -> Self {
        use std::ptr;

        if ptr::eq(encoding, encoding_rs::UTF_8) {
            Self::Utf8
        } else if ptr::eq(encoding, encoding_rs::WINDOWS_1252) {
            Self::Windows1252
        } else if ptr::eq(encoding, encoding_rs::SHIFT_JIS) {
            Self::ShiftJis
        } else if ptr::eq(encoding, encoding_rs::GBK) || ptr::eq(encoding, encoding_rs::GB18030) {
            Self::Gb2312
        } else if ptr::eq(encoding, encoding_rs::BIG5) {
            Self::Big5
        } else {
            Self::Other(encoding.name().to_string())
        }
    }
}

/// A downloaded page, decoded to UTF-8.
#[derive(Debug)]
pub struct PageResponse {
    pub url_final: Url,
    pub status: StatusCode,
    pub charset: Charset,
    pub body_utf8: String,
}

/// Noisy article text pulled from a page, ready for cleaning.
#[derive(Debug, Clone)]
pub struct FetchedArticle {
    pub url: Url,
    pub text: ArticleText,
    pub truncation: Option<Truncation>,
    /// Set when paragraph extraction came up short and the whole body was used.
    pub used_body_fallback: bool,
}
