use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use utoipa::ToSchema;

use crate::analysis::errors::VocabError;
use crate::extractor::ArticleText;
use crate::generation::{GenerationRequest, RetryingGenerator, Schema};

pub const DEFAULT_VOCABULARY_COUNT: usize = 10;

const SYSTEM_INSTRUCTION: &str = "You are an English teacher who builds lessons from real \
news. Respond only with JSON that matches the given schema.";

const FIELD_ENGLISH_WORD: &str = "englishWord";
const FIELD_THAI_TRANSLATION: &str = "thaiTranslation";
const FIELD_EXAMPLE_SENTENCE: &str = "exampleSentence";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyEntry {
    #[serde(alias = "English_Word")]
    pub english_word: String,
    #[serde(alias = "Thai_Translation")]
    pub thai_translation: String,
    /// Expected to be copied from the article; the model is trusted on this.
    #[serde(alias = "Example_Sentence")]
    pub example_sentence: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Vocabulary {
    pub entries: Vec<VocabularyEntry>,
    /// How many entries the model produced when more than requested.
    pub truncated_from: Option<usize>,
}

impl Vocabulary {
    pub fn is_truncated(&self) -> bool {
        self.truncated_from.is_some()
    }
}

pub fn vocabulary_schema() -> Schema {
    Schema::array(Schema::object([
        (
            FIELD_ENGLISH_WORD,
            Schema::string().with_description("A high-school level English word from the article"),
        ),
        (
            FIELD_THAI_TRANSLATION,
            Schema::string().with_description("Thai translation of the word"),
        ),
        (
            FIELD_EXAMPLE_SENTENCE,
            Schema::string()
                .with_description("A full sentence from the original article that uses the word"),
        ),
    ]))
}

fn build_request(article: &ArticleText, count: usize) -> GenerationRequest {
    let prompt = format!(
        "From the news article below, pick {count} vocabulary words suitable for \
upper-secondary students. For each word give the Thai translation and an example \
sentence that uses the word, copied from the original article text only.\n\n---\n\n{}",
        article.as_str()
    );

    GenerationRequest::json(prompt, vocabulary_schema()).with_system_instruction(SYSTEM_INSTRUCTION)
}

/// Decodes a schema-constrained response, keeping at most `count` entries.
pub fn parse_vocabulary(raw: &str, count: usize) -> Result<Vocabulary, VocabError> {
    let mut entries: Vec<VocabularyEntry> =
        serde_json::from_str(raw).map_err(|source| VocabError::MalformedJson {
            raw: raw.to_string(),
            source,
        })?;

    let produced = entries.len();
    let truncated_from = (produced > count).then(|| {
        entries.truncate(count);
        produced
    });

    Ok(Vocabulary {
        entries,
        truncated_from,
    })
}

#[instrument(skip_all, fields(count = count))]
pub async fn extract_vocabulary(
    generator: &RetryingGenerator,
    article: &ArticleText,
    count: usize,
) -> Result<Vocabulary, VocabError> {
    let response = generator.generate(&build_request(article, count)).await?;
    if response.trim().is_empty() {
        return Err(VocabError::EmptyResponse);
    }

    let vocabulary = parse_vocabulary(&response, count)?;
    if let Some(produced) = vocabulary.truncated_from {
        warn!("Model produced {} vocabulary entries, keeping the first {}", produced, count);
    }
    info!("Extracted {} vocabulary entries", vocabulary.entries.len());

    Ok(vocabulary)
}

/// Words whose example sentence does not appear verbatim in `article`.
pub fn unverified_examples(vocabulary: &Vocabulary, article: &ArticleText) -> Vec<String> {
    vocabulary
        .entries
        .iter()
        .filter(|entry| !article.as_str().contains(entry.example_sentence.trim()))
        .map(|entry| entry.english_word.clone())
        .collect()
}
