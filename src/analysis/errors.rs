use thiserror::Error;

use crate::generation::GenerationError;

#[derive(Error, Debug)]
pub enum CleaningError {
    #[error("content cleaning failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("content cleaning returned no text")]
    EmptyResponse,
}

#[derive(Error, Debug)]
pub enum SummaryError {
    #[error("summary generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("summary generation returned no text")]
    EmptyResponse,
}

#[derive(Error, Debug)]
pub enum VocabError {
    #[error("vocabulary generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("vocabulary generation returned no text")]
    EmptyResponse,

    /// The model answered, but not with the JSON the schema asked for.
    #[error("vocabulary response is not valid JSON: {source}")]
    MalformedJson {
        raw: String,
        #[source]
        source: serde_json::Error,
    },
}
