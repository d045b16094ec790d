use std::sync::Arc;

use anyhow::Context;
use gemini_relay::{build_app, config::AppConfig, init_tracing, run_server, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; variables may come from the real environment.
    let _ = dotenvy::dotenv();
    init_tracing("info");

    let config = AppConfig::from_env();
    if config.gemini.api_key.is_empty() {
        tracing::warn!("GEMINI_API_KEY is not set; upstream calls will be rejected");
    }

    let state = AppState::from_config(&config);
    tracing::info!(
        model = %state.relay.model(),
        persona = state.relay.has_persona(),
        "Initialized Gemini relay"
    );

    let app = build_app(Arc::new(state));

    run_server(app, &config.host, config.port)
        .await
        .with_context(|| format!("server failed on {}:{}", config.host, config.port))
}
