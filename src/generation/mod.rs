pub mod errors;
pub mod gemini;
pub mod retry;
pub mod schema;

pub use errors::GenerationError;
pub use gemini::GeminiClient;
pub use retry::{RetryPolicy, RetryingGenerator, backoff_delay};
pub use schema::{Schema, SchemaType};

use async_trait::async_trait;

/// One call to a text generation service.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub system_instruction: Option<String>,
    pub response_schema: Option<Schema>,
    pub expect_json: bool,
}

impl GenerationRequest {
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system_instruction: None,
            response_schema: None,
            expect_json: false,
        }
    }

    /// A request whose answer must be JSON matching `schema`.
    pub fn json(prompt: impl Into<String>, schema: Schema) -> Self {
        Self {
            prompt: prompt.into(),
            system_instruction: None,
            response_schema: Some(schema),
            expect_json: true,
        }
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }
}

/// A generation backend. Implementations return the raw response text; an
/// empty string means the service produced no result.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError>;
}
