//! Service Kit - Agent Tools
//!
//! Domain-specific tools that implement `agent_core::Tool`.

mod price_lookup;

pub use price_lookup::{PriceLookupTool, TOOL_NAME};
