//! HTTP Handlers

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use agent_core::{provider::ModelInfo, AgentError};
use crypto_prices::{Coin, PriceAgent, PriceCard, NO_SELECTION_WARNING, TOP_COINS};

use crate::state::AppState;

// ============================================================================
// Request / Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub model_endpoint_connected: bool,
}

#[derive(Debug, Serialize)]
pub struct CoinsResponse {
    pub coins: Vec<Coin>,
}

#[derive(Debug, Deserialize)]
pub struct PricesRequest {
    #[serde(default)]
    pub symbols: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct PricesResponse {
    pub cards: Vec<PriceCard>,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub message: String,
    pub agent: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, error: impl Into<String>, code: &str) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
            code: code.into(),
        }),
    )
}

fn agent_failure(e: &AgentError) -> ApiError {
    tracing::error!(error = %e, "Agent run failed");
    api_error(StatusCode::INTERNAL_SERVER_ERROR, e.user_message(), "AGENT_ERROR")
}

/// Run a blocking agent call off the async workers.
///
/// Every agent call owns a private runtime, which cannot be started from a
/// worker thread.
async fn run_blocking<T, F>(agent: &std::sync::Arc<PriceAgent>, call: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&PriceAgent) -> agent_core::Result<T> + Send + 'static,
{
    let agent = agent.clone();
    tokio::task::spawn_blocking(move || call(&agent))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Agent task aborted");
            api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "An unexpected error occurred.",
                "TASK_ABORTED",
            )
        })?
        .map_err(|e| agent_failure(&e))
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let model_endpoint_connected = state.provider.health_check().await.unwrap_or(false);

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        model_endpoint_connected,
    })
}

/// Models served by the configured endpoint
pub async fn list_models(
    State(state): State<AppState>,
) -> Result<Json<Vec<ModelInfo>>, ApiError> {
    state.provider.list_models().await.map(Json).map_err(|e| {
        tracing::warn!(error = %e, "Model listing failed");
        api_error(StatusCode::BAD_GATEWAY, e.user_message(), "MODELS_UNAVAILABLE")
    })
}

/// Coins offered for selection
pub async fn list_coins() -> Json<CoinsResponse> {
    Json(CoinsResponse {
        coins: TOP_COINS.to_vec(),
    })
}

/// One agent run per selected symbol, in order
pub async fn prices_handler(
    State(state): State<AppState>,
    Json(request): Json<PricesRequest>,
) -> Result<Json<PricesResponse>, ApiError> {
    let symbols: Vec<String> = request
        .symbols
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if symbols.is_empty() {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            NO_SELECTION_WARNING,
            "NO_SELECTION",
        ));
    }

    tracing::info!(count = symbols.len(), "Fetching live prices");
    let cards = run_blocking(&state.agent, move |agent| agent.live_prices(&symbols)).await?;

    Ok(Json(PricesResponse { cards }))
}

/// Free-text prompt to the price agent
pub async fn chat_handler(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let prompt = request.message.trim().to_string();
    if prompt.is_empty() {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "Message must not be empty.",
            "EMPTY_MESSAGE",
        ));
    }

    let message = run_blocking(&state.agent, move |agent| agent.run_agent(&prompt)).await?;

    Ok(Json(ChatResponse {
        message,
        agent: state.agent.config().name.clone(),
    }))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request},
        Router,
    };
    use rust_decimal::Decimal;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use agent_core::{Completion, MockProvider, ToolCall};
    use crypto_prices::{PriceAgentConfig, StaticTickerSource, Ticker};

    use super::*;
    use crate::router;

    fn btc() -> Ticker {
        Ticker {
            symbol: "BTC".into(),
            name: "Bitcoin".into(),
            price_usd: "64000".into(),
            percent_change_24h: "-1.2".into(),
            market_cap_usd: Decimal::new(1_260_000_000_000, 0),
            volume_24h: Decimal::new(30_000_000_000, 0),
        }
    }

    fn price_call(symbol: &str) -> Completion {
        let mut args = HashMap::new();
        args.insert("symbol".to_string(), json!(symbol));
        Completion::with_tool_calls(
            vec![ToolCall::new("get_crypto_price", args).with_id(format!("call_{symbol}"))],
            "mock",
        )
    }

    fn app(provider: MockProvider) -> Router {
        let provider = Arc::new(provider);
        let source = Arc::new(StaticTickerSource::new(&[btc()]));
        let agent = PriceAgent::new(provider.clone(), source, PriceAgentConfig::default());
        router(AppState {
            provider,
            agent: Arc::new(agent),
        })
    }

    fn post(uri: &str, body: &Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::get("/health").body(Body::empty()).unwrap();
        let (status, body) = send(app(MockProvider::new([])), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["model_endpoint_connected"], true);
    }

    #[tokio::test]
    async fn test_coins() {
        let request = Request::get("/api/coins").body(Body::empty()).unwrap();
        let (status, body) = send(app(MockProvider::new([])), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["coins"].as_array().unwrap().len(), 6);
        assert_eq!(body["coins"][0]["label"], "Bitcoin (BTC)");
        assert_eq!(body["coins"][5]["symbol"], "LTC");
    }

    #[tokio::test]
    async fn test_prices_in_request_order() {
        let provider = MockProvider::new([price_call("BTC"), price_call("DOGE")]);
        let request = post("/api/prices", &json!({ "symbols": ["BTC", "DOGE"] }));
        let (status, body) = send(app(provider), request).await;

        assert_eq!(status, StatusCode::OK);
        let cards = body["cards"].as_array().unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0]["symbol"], "BTC");
        assert!(cards[0]["content"]
            .as_str()
            .unwrap()
            .starts_with("### Bitcoin (BTC)"));
        assert_eq!(
            cards[1]["content"],
            "❌ Symbol 'DOGE' not found. Try BTC, ETH, etc."
        );
    }

    #[tokio::test]
    async fn test_empty_selection_warns() {
        let request = post("/api/prices", &json!({ "symbols": [] }));
        let (status, body) = send(app(MockProvider::new([])), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Please select at least one coin.");
    }

    #[tokio::test]
    async fn test_chat_returns_tool_text() {
        let request = post("/api/chat", &json!({ "message": "What is BTC at?" }));
        let (status, body) = send(app(MockProvider::new([price_call("BTC")])), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["agent"], "CryptoDataAgent");
        assert!(body["message"].as_str().unwrap().contains("`$64000`"));
    }

    #[tokio::test]
    async fn test_model_fault_is_server_error() {
        let provider = MockProvider::with_script([Err("upstream exploded".to_string())]);
        let request = post("/api/chat", &json!({ "message": "BTC" }));
        let (status, body) = send(app(provider), request).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], "AGENT_ERROR");
        assert!(body["error"]
            .as_str()
            .unwrap()
            .starts_with("The AI service encountered an error"));
    }
}
