use serde::Serialize;
use utoipa::ToSchema;

/// Appended to article text cut at the length limit.
pub const TRUNCATION_MARKER: &str = "...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TextKind {
    /// Raw extraction, may still contain menus, captions and footers.
    Noisy,
    /// Core article body after model filtering.
    Clean,
}

/// Plain-text rendering of an article. Never mutated once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleText {
    text: String,
    kind: TextKind,
}

impl ArticleText {
    pub fn noisy(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: TextKind::Noisy,
        }
    }

    pub fn clean(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: TextKind::Clean,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> TextKind {
        self.kind
    }

    pub fn is_clean(&self) -> bool {
        self.kind == TextKind::Clean
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Truncation {
    pub original_chars: usize,
    pub kept_chars: usize,
}

/// Cuts `text` to `max_chars` characters and appends [`TRUNCATION_MARKER`].
pub fn truncate_chars(text: String, max_chars: usize) -> (String, Option<Truncation>) {
    let original_chars = text.chars().count();
    if original_chars <= max_chars {
        return (text, None);
    }

    let mut truncated: String = text.chars().take(max_chars).collect();
    truncated.push_str(TRUNCATION_MARKER);

    (
        truncated,
        Some(Truncation {
            original_chars,
            kept_chars: max_chars,
        }),
    )
}
