//! The three model-backed stages: cleaning, summarizing and vocabulary
//! extraction. Each builds a fresh [`GenerationRequest`] and goes through the
//! shared [`RetryingGenerator`].
//!
//! [`GenerationRequest`]: crate::generation::GenerationRequest
//! [`RetryingGenerator`]: crate::generation::RetryingGenerator

pub mod cleaner;
pub mod errors;
pub mod summarizer;
pub mod vocabulary;

pub use cleaner::clean;
pub use errors::{CleaningError, SummaryError, VocabError};
pub use summarizer::summarize;
pub use vocabulary::{
    DEFAULT_VOCABULARY_COUNT, Vocabulary, VocabularyEntry, extract_vocabulary, unverified_examples,
};
