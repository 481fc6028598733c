#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use newsvocab::app_state::{AppState, router};
use newsvocab::config::Config;
use newsvocab::fetcher::Fetcher;
use newsvocab::generation::{
    GenerationError, GenerationRequest, RetryPolicy, RetryingGenerator, TextGenerator,
};
use newsvocab::pipeline::{Pipeline, PipelineOptions};

pub const ARTICLE_TEXT: &str = "Scientists discovered a new species. It lives in deep caves.";
pub const THAI_SUMMARY: &str = "นักวิทยาศาสตร์ค้นพบสัตว์สายพันธุ์ใหม่ที่อาศัยอยู่ในถ้ำลึก";

/// Answers each stage with a canned result and records every request.
pub struct StubGenerator {
    cleaner: Result<String, GenerationError>,
    summary: Result<String, GenerationError>,
    vocabulary: Result<String, GenerationError>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl StubGenerator {
    pub fn new(
        cleaner: Result<String, GenerationError>,
        summary: Result<String, GenerationError>,
        vocabulary: Result<String, GenerationError>,
    ) -> Arc<Self> {
        Arc::new(Self {
            cleaner,
            summary,
            vocabulary,
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn cleaner_requests(&self) -> Vec<GenerationRequest> {
        self.requests()
            .into_iter()
            .filter(is_cleaner_request)
            .collect()
    }

    pub fn analysis_requests(&self) -> Vec<GenerationRequest> {
        self.requests()
            .into_iter()
            .filter(|request| !is_cleaner_request(request))
            .collect()
    }
}

fn is_cleaner_request(request: &GenerationRequest) -> bool {
    !request.expect_json && request.prompt.contains("--- Scraped text ---")
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        self.requests.lock().unwrap().push(request.clone());

        if request.expect_json {
            self.vocabulary.clone()
        } else if is_cleaner_request(request) {
            self.cleaner.clone()
        } else {
            self.summary.clone()
        }
    }
}

pub fn vocabulary_json(words: &[(&str, &str, &str)]) -> String {
    let entries: Vec<_> = words
        .iter()
        .map(|(word, thai, sentence)| {
            serde_json::json!({
                "englishWord": word,
                "thaiTranslation": thai,
                "exampleSentence": sentence,
            })
        })
        .collect();
    serde_json::to_string(&entries).unwrap()
}

pub fn numbered_vocabulary_json(n: usize) -> String {
    let entries: Vec<_> = (0..n)
        .map(|i| {
            serde_json::json!({
                "englishWord": format!("word{i}"),
                "thaiTranslation": format!("คำ{i}"),
                "exampleSentence": format!("Sentence {i}."),
            })
        })
        .collect();
    serde_json::to_string(&entries).unwrap()
}

pub fn test_pipeline(stub: Arc<StubGenerator>, options: PipelineOptions) -> Pipeline {
    test_pipeline_with_limit(stub, options, 15_000)
}

pub fn test_pipeline_with_limit(
    stub: Arc<StubGenerator>,
    options: PipelineOptions,
    max_article_chars: usize,
) -> Pipeline {
    let policy = RetryPolicy {
        max_attempts: 3,
        base_delay: Duration::ZERO,
    };
    Pipeline::new(
        Fetcher::new(Duration::from_secs(5), max_article_chars),
        RetryingGenerator::new(stub, policy),
        options,
    )
}

pub fn article_html(body: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><title>Cave news</title></head><body>{body}</body></html>"
    )
}

pub fn test_config(gemini_base_url: &str) -> Config {
    Config::default()
        .with_gemini_base_url(gemini_base_url)
        .with_retry_policy(RetryPolicy {
            max_attempts: 2,
            base_delay: Duration::from_millis(5),
        })
}

pub fn test_app(config: Config) -> Router {
    router(AppState::new(config))
}
