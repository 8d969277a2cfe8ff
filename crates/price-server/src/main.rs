//! price-server
//!
//! Axum server in front of the live crypto price agent. Each request runs
//! the agent on a blocking thread with its own execution context.

mod config;
mod handlers;
mod state;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agent_core::LlmProvider;
use agent_runtime::OpenAiProvider;
use crypto_prices::{CoinLoreClient, PriceAgent, PriceAgentConfig, TickerSource};

use crate::config::ServerConfig;
use crate::handlers::{chat_handler, health_check, list_coins, list_models, prices_handler};
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health & info
        .route("/health", get(health_check))
        .route("/api/models", get(list_models))
        .route("/api/coins", get(list_coins))
        // Agent API
        .route("/api/prices", post(prices_handler))
        .route("/api/chat", post(chat_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    // Missing credentials stop the process here, before anything binds.
    let config = ServerConfig::from_env()?;
    tracing::info!(?config, "Configuration loaded");

    let provider: Arc<dyn LlmProvider> = Arc::new(OpenAiProvider::from_config(config.llm.clone())?);

    match provider.health_check().await {
        Ok(true) => {
            tracing::info!(endpoint = %config.llm.base_url, "✓ Model endpoint reachable");
            if let Ok(models) = provider.list_models().await {
                tracing::debug!(count = models.len(), "Models listed");
            }
        }
        Ok(false) | Err(_) => {
            tracing::warn!(endpoint = %config.llm.base_url, "⚠ Model endpoint not reachable - price requests will fail");
        }
    }

    let source: Arc<dyn TickerSource> = Arc::new(CoinLoreClient::new(config.ticker_url.as_str())?);

    let agent = PriceAgent::new(
        provider.clone(),
        source,
        PriceAgentConfig::default()
            .with_model(config.model.as_str())
            .with_tool_use(config.tool_use()),
    );
    tracing::info!(
        agent = %agent.config().name,
        model = %config.model,
        tool_use = ?config.tool_use(),
        "Price agent ready"
    );

    let state = AppState {
        provider,
        agent: Arc::new(agent),
    };

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;

    tracing::info!("🚀 price-server running on http://{}", config.bind_addr);
    tracing::info!("  GET  /health       - Health check");
    tracing::info!("  GET  /api/models   - List available models");
    tracing::info!("  GET  /api/coins    - Coins offered for selection");
    tracing::info!("  POST /api/prices   - Live prices for selected symbols");
    tracing::info!("  POST /api/chat     - Free-text prompt");

    axum::serve(listener, router(state)).await?;

    Ok(())
}
