use tracing::{info, instrument};

use crate::analysis::errors::CleaningError;
use crate::extractor::ArticleText;
use crate::generation::{GenerationRequest, RetryingGenerator};

const SYSTEM_INSTRUCTION: &str = "You are a precise core article extractor. \
Reply with clean article text only, without commentary.";

fn build_request(noisy: &ArticleText) -> GenerationRequest {
    let prompt = format!(
        "The text below was scraped from a news web page. It may contain unrelated \
material such as navigation menus, advertisements, image captions, related links \
and site footers.\n\
1. Keep only the core body of the news article (lead, body paragraphs, conclusion).\n\
2. Discard headers, footers, menus, related links and captions that are not part of the story.\n\
3. Reply with the selected article text only.\n\n\
--- Scraped text ---\n{}",
        noisy.as_str()
    );

    GenerationRequest::text(prompt).with_system_instruction(SYSTEM_INSTRUCTION)
}

/// Asks the model to strip page chrome from `noisy`, keeping the article body.
#[instrument(skip_all, fields(input_chars = noisy.char_count()))]
pub async fn clean(
    generator: &RetryingGenerator,
    noisy: &ArticleText,
) -> Result<ArticleText, CleaningError> {
    let response = generator.generate(&build_request(noisy)).await?;

    let text = response.trim();
    if text.is_empty() {
        return Err(CleaningError::EmptyResponse);
    }

    info!("Cleaned article down to {} chars", text.chars().count());
    Ok(ArticleText::clean(text))
}
