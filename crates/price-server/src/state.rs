//! Application State

use std::sync::Arc;

use agent_core::LlmProvider;
use crypto_prices::PriceAgent;

/// Shared application state, assembled once at startup
#[derive(Clone)]
pub struct AppState {
    /// Model endpoint, for health reporting
    pub provider: Arc<dyn LlmProvider>,

    /// The price agent every request runs through
    pub agent: Arc<PriceAgent>,
}
