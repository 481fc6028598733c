use once_cell::sync::Lazy;
use scraper::{Html, Selector};

/// Paragraph extraction shorter than this triggers the body-wide fallback.
pub const MIN_PARAGRAPH_CHARS: usize = 100;

const HIDDEN_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

static PARAGRAPH_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("p, h1, h2, h3").expect("valid paragraph selector"));

static BODY_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("body").expect("valid body selector"));

#[derive(Debug, PartialEq, Eq)]
pub struct Extraction {
    pub text: String,
    pub used_body_fallback: bool,
}

pub fn extract_text(html: &str) -> Extraction {
    let document = Html::parse_document(html);

    let paragraphs = paragraph_text(&document);
    if paragraphs.chars().count() >= MIN_PARAGRAPH_CHARS {
        return Extraction {
            text: paragraphs,
            used_body_fallback: false,
        };
    }

    let body = body_text(&document);
    if body.is_empty() {
        return Extraction {
            text: paragraphs,
            used_body_fallback: false,
        };
    }

    Extraction {
        text: body,
        used_body_fallback: true,
    }
}

/// Headings and paragraphs in document order, one per line.
fn paragraph_text(document: &Html) -> String {
    document
        .select(&PARAGRAPH_SELECTOR)
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Every visible text node under `<body>`, one per line.
fn body_text(document: &Html) -> String {
    let Some(body) = document.select(&BODY_SELECTOR).next() else {
        return String::new();
    };

    let mut lines = Vec::new();
    for node in body.descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };

        let hidden = node
            .parent()
            .and_then(|parent| parent.value().as_element())
            .is_some_and(|element| HIDDEN_ELEMENTS.contains(&element.name()));
        if hidden {
            continue;
        }

        let trimmed = text.trim();
        if !trimmed.is_empty() {
            lines.push(trimmed);
        }
    }

    lines.join("\n")
}
