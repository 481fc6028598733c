use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::analysis::{VocabError, VocabularyEntry};
use crate::extractor::TextKind;
use crate::pipeline::{Notice, PipelineOutcome};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateLessonRequest {
    pub url: String,
    /// Overrides the server's configured credential when present.
    #[serde(default)]
    pub api_key: Option<String>,
}

impl CreateLessonRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.url.is_empty() {
            return Err("URL cannot be empty".to_string());
        }
        if self.url.len() > 2048 {
            return Err("URL too long".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StageError {
    #[schema(value_type = String, example = "vocabulary")]
    pub stage: &'static str,
    pub message: String,
    /// Unparseable model output, kept for diagnostics.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LessonResponse {
    pub url: String,
    pub article: String,
    pub article_kind: TextKind,
    pub summary: Option<String>,
    pub vocabulary: Option<Vec<VocabularyEntry>>,
    pub errors: Vec<StageError>,
    pub notices: Vec<NoticeResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NoticeResponse {
    #[serde(flatten)]
    pub notice: Notice,
    pub message: String,
}

impl From<PipelineOutcome> for LessonResponse {
    fn from(outcome: PipelineOutcome) -> Self {
        let mut errors = Vec::new();

        let summary = match outcome.summary {
            Ok(summary) => Some(summary),
            Err(err) => {
                errors.push(StageError {
                    stage: "summary",
                    message: err.to_string(),
                    raw_response: None,
                });
                None
            }
        };

        let vocabulary = match outcome.vocabulary {
            Ok(vocabulary) => Some(vocabulary.entries),
            Err(err) => {
                let raw_response = match &err {
                    VocabError::MalformedJson { raw, .. } => Some(raw.clone()),
                    _ => None,
                };
                errors.push(StageError {
                    stage: "vocabulary",
                    message: err.to_string(),
                    raw_response,
                });
                None
            }
        };

        let notices = outcome
            .notices
            .into_iter()
            .map(|notice| NoticeResponse {
                message: notice.to_string(),
                notice,
            })
            .collect();

        Self {
            url: outcome.url.to_string(),
            article_kind: outcome.article.kind(),
            article: outcome.article.into_string(),
            summary,
            vocabulary,
            errors,
            notices,
        }
    }
}
