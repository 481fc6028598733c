use anyhow::Result;
use newsvocab::{
    app_state::{AppState, router},
    config::Config,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // LOG_FORMAT=json switches to one JSON object per line.
    let json_logs = std::env::var("LOG_FORMAT").is_ok_and(|format| format == "json");
    if json_logs {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(EnvFilter::from_default_env())
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .init();
    }

    let config = Config::from_env()?;
    info!("Starting API with {:?}", config);
    if config.gemini_api_key().is_none() {
        info!("No GEMINI_API_KEY set; requests must supply api_key");
    }

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router(AppState::new(config))).await?;
    Ok(())
}
