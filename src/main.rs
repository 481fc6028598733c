use anyhow::{Context, Result, bail};
use newsvocab::{config::Config, pipeline};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let Some(url) = std::env::args().nth(1) else {
        bail!("usage: newsvocab <article-url>");
    };

    let config = Config::from_env()?;
    let credential = config
        .gemini_api_key()
        .context("GEMINI_API_KEY environment variable not set")?;

    let outcome = pipeline::run(&url, credential, &config).await?;

    for notice in &outcome.notices {
        println!("note: {notice}");
    }

    println!("== Article ({:?})\n{}\n", outcome.article.kind(), outcome.article.as_str());

    if let Ok(summary) = &outcome.summary {
        println!("== สรุปข่าว\n{summary}\n");
    }

    if let Ok(vocabulary) = &outcome.vocabulary {
        println!("== คำศัพท์");
        for (i, entry) in vocabulary.entries.iter().enumerate() {
            println!(
                "{:>2}. {} - {}\n    {}",
                i + 1,
                entry.english_word,
                entry.thai_translation,
                entry.example_sentence
            );
        }
        println!();
    }

    let failures = outcome.failure_messages();
    if !failures.is_empty() {
        println!("== Errors");
        for message in &failures {
            println!("error: {message}");
        }
        if let Some(raw) = outcome.raw_vocabulary_response() {
            println!("raw vocabulary response:\n{raw}");
        }
    }

    Ok(())
}
