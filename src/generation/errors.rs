use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// Reported by the provider or its transport; worth retrying.
    #[error("api error: {0}")]
    Api(String),

    /// The request itself is broken or the reply cannot be understood.
    #[error("non-retryable error: {0}")]
    NonRetryable(String),

    #[error("gave up after {attempts} attempts: {last}")]
    Exhausted { attempts: u32, last: String },
}

impl GenerationError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Api(_))
    }
}
