use tracing::instrument;

use crate::analysis::errors::SummaryError;
use crate::extractor::ArticleText;
use crate::generation::{GenerationRequest, RetryingGenerator};

const SYSTEM_INSTRUCTION: &str = "You are a news summarizer who writes fluent, natural Thai.";

fn build_request(article: &ArticleText) -> GenerationRequest {
    let prompt = format!(
        "Summarize the following English news article in Thai. Keep it concise and easy \
to understand, as a single paragraph.\n\n---\n\n{}",
        article.as_str()
    );

    GenerationRequest::text(prompt).with_system_instruction(SYSTEM_INSTRUCTION)
}

/// One-paragraph Thai summary of `article`.
#[instrument(skip_all)]
pub async fn summarize(
    generator: &RetryingGenerator,
    article: &ArticleText,
) -> Result<String, SummaryError> {
    let response = generator.generate(&build_request(article)).await?;

    let summary = response.trim();
    if summary.is_empty() {
        return Err(SummaryError::EmptyResponse);
    }

    Ok(summary.to_string())
}
