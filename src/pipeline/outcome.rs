use serde::Serialize;
use std::fmt;
use url::Url;
use utoipa::ToSchema;

use crate::analysis::{SummaryError, VocabError, Vocabulary};
use crate::extractor::ArticleText;

/// Something the reader should know about a run that still completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    ArticleTruncated {
        original_chars: usize,
        kept_chars: usize,
    },
    /// Cleaning failed and the raw extraction was analyzed instead.
    CleaningFallback { reason: String },
    VocabularyTruncated { produced: usize, kept: usize },
    UnverifiedExamples { words: Vec<String> },
}

impl Notice {
    pub fn is_degradation(&self) -> bool {
        matches!(self, Self::CleaningFallback { .. })
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ArticleTruncated {
                original_chars,
                kept_chars,
            } => write!(
                f,
                "article text was cut from {original_chars} to {kept_chars} characters before processing"
            ),
            Self::CleaningFallback { reason } => write!(
                f,
                "could not isolate the article body ({reason}); using the full extracted text, which may contain noise"
            ),
            Self::VocabularyTruncated { produced, kept } => write!(
                f,
                "showing the first {kept} of {produced} vocabulary entries"
            ),
            Self::UnverifiedExamples { words } => write!(
                f,
                "example sentences not found in the article for: {}",
                words.join(", ")
            ),
        }
    }
}

/// Everything a run produced, stage by stage.
#[derive(Debug)]
pub struct PipelineOutcome {
    pub url: Url,
    /// Clean text, or the noisy extraction when cleaning failed.
    pub article: ArticleText,
    pub summary: Result<String, SummaryError>,
    pub vocabulary: Result<Vocabulary, VocabError>,
    pub notices: Vec<Notice>,
}

impl PipelineOutcome {
    pub fn is_degraded(&self) -> bool {
        self.notices.iter().any(Notice::is_degradation)
    }

    /// True when every stage produced its result.
    pub fn is_complete(&self) -> bool {
        self.article.is_clean() && self.summary.is_ok() && self.vocabulary.is_ok()
    }

    /// One human-readable line per failed stage.
    pub fn failure_messages(&self) -> Vec<String> {
        let mut messages = Vec::new();
        if let Err(err) = &self.summary {
            messages.push(err.to_string());
        }
        if let Err(err) = &self.vocabulary {
            messages.push(err.to_string());
        }
        messages
    }

    /// Model output the vocabulary stage could not decode, if any.
    pub fn raw_vocabulary_response(&self) -> Option<&str> {
        match &self.vocabulary {
            Err(VocabError::MalformedJson { raw, .. }) => Some(raw),
            _ => None,
        }
    }
}
