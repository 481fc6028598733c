pub mod outcome;

pub use outcome::{Notice, PipelineOutcome};

use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::analysis::{self, DEFAULT_VOCABULARY_COUNT};
use crate::config::Config;
use crate::fetcher::{FetchError, Fetcher, validate_url};
use crate::generation::{GeminiClient, RetryingGenerator};

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("missing API credential")]
    MissingCredential,

    #[error("fetch stage failed: {0}")]
    Fetch(#[from] FetchError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Fetching,
    Cleaning,
    Analyzing,
    Done,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Fetching => "fetching",
            Self::Cleaning => "cleaning",
            Self::Analyzing => "analyzing",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    pub vocabulary_count: usize,
    pub verify_examples: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            vocabulary_count: DEFAULT_VOCABULARY_COUNT,
            verify_examples: false,
        }
    }
}

impl From<&Config> for PipelineOptions {
    fn from(config: &Config) -> Self {
        Self {
            vocabulary_count: config.vocabulary_count(),
            verify_examples: config.verify_examples(),
        }
    }
}

/// Fetch → clean → summarize + extract vocabulary, for one URL at a time.
pub struct Pipeline {
    fetcher: Fetcher,
    generator: RetryingGenerator,
    options: PipelineOptions,
}

impl Pipeline {
    pub fn new(fetcher: Fetcher, generator: RetryingGenerator, options: PipelineOptions) -> Self {
        Self {
            fetcher,
            generator,
            options,
        }
    }

    /// Builds a Gemini-backed pipeline. Only the presence of the credential is checked.
    pub fn from_config(config: &Config, credential: &str) -> Result<Self, PipelineError> {
        if credential.trim().is_empty() {
            return Err(PipelineError::MissingCredential);
        }

        let client = GeminiClient::new(
            credential,
            config.gemini_model(),
            config.gemini_base_url(),
        );

        Ok(Self::new(
            Fetcher::new(config.fetch_timeout(), config.max_article_chars())
                .with_min_article_chars(config.min_article_chars()),
            RetryingGenerator::new(Arc::new(client), config.retry_policy()),
            PipelineOptions::from(config),
        ))
    }

    #[instrument(skip(self))]
    pub async fn process(&self, url: &str) -> Result<PipelineOutcome, PipelineError> {
        let mut stage = Stage::Idle;

        advance(&mut stage, Stage::Fetching);
        let fetched = match self.fetcher.fetch(url).await {
            Ok(fetched) => fetched,
            Err(err) => {
                advance(&mut stage, Stage::Failed);
                warn!("Fetching {} failed: {}", url, err);
                return Err(err.into());
            }
        };

        let mut notices = Vec::new();
        if let Some(truncation) = fetched.truncation {
            notices.push(Notice::ArticleTruncated {
                original_chars: truncation.original_chars,
                kept_chars: truncation.kept_chars,
            });
        }

        advance(&mut stage, Stage::Cleaning);
        let article = match analysis::clean(&self.generator, &fetched.text).await {
            Ok(clean) => clean,
            Err(err) => {
                warn!("Cleaning failed, continuing with noisy text: {}", err);
                notices.push(Notice::CleaningFallback {
                    reason: err.to_string(),
                });
                fetched.text.clone()
            }
        };

        advance(&mut stage, Stage::Analyzing);
        let summary = analysis::summarize(&self.generator, &article).await;
        if let Err(err) = &summary {
            warn!("{}", err);
        }

        let vocabulary =
            analysis::extract_vocabulary(&self.generator, &article, self.options.vocabulary_count)
                .await;
        match &vocabulary {
            Ok(vocabulary) => {
                if let Some(produced) = vocabulary.truncated_from {
                    notices.push(Notice::VocabularyTruncated {
                        produced,
                        kept: vocabulary.entries.len(),
                    });
                }
                if self.options.verify_examples {
                    let words = analysis::unverified_examples(vocabulary, &article);
                    if !words.is_empty() {
                        notices.push(Notice::UnverifiedExamples { words });
                    }
                }
            }
            Err(err) => warn!("{}", err),
        }

        advance(&mut stage, Stage::Done);

        Ok(PipelineOutcome {
            url: fetched.url,
            article,
            summary,
            vocabulary,
            notices,
        })
    }
}

fn advance(stage: &mut Stage, next: Stage) {
    info!("Pipeline stage {} -> {}", stage, next);
    *stage = next;
}

/// Processes one URL with a Gemini-backed pipeline built from `config`.
///
/// The URL is validated before the credential so malformed input never
/// reaches the network or the credential check.
pub async fn run(
    url: &str,
    credential: &str,
    config: &Config,
) -> Result<PipelineOutcome, PipelineError> {
    validate_url(url)?;
    let pipeline = Pipeline::from_config(config, credential)?;
    pipeline.process(url).await
}
