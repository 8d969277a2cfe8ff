//! Execution Context
//!
//! A single-shot cooperative runtime owned by exactly one agent run.
//! Acquired before the run, released when dropped, whichever way the run
//! ends.
//!
//! ```rust,ignore
//! let context = ExecutionContext::acquire()?;
//! let answer = context.run(agent.ask("Get me the live price of BTC"))??;
//! ```

use std::future::Future;

use chrono::{DateTime, Utc};
use tokio::runtime::{Builder, Runtime};
use uuid::Uuid;

use crate::error::{AgentError, Result};

/// Unique identifier of one execution context
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RunId(String);

impl RunId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Scoped current-thread runtime for one agent run
pub struct ExecutionContext {
    id: RunId,
    started_at: DateTime<Utc>,
    runtime: Option<Runtime>,
}

impl ExecutionContext {
    /// Acquire a fresh context.
    ///
    /// Must not be called from inside another tokio runtime's worker thread;
    /// async callers go through `spawn_blocking`.
    pub fn acquire() -> Result<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| AgentError::Context(e.to_string()))?;

        let id = RunId::new();
        tracing::debug!(run_id = %id, "Execution context acquired");

        Ok(Self {
            id,
            started_at: Utc::now(),
            runtime: Some(runtime),
        })
    }

    /// Drive a future to completion on this context
    pub fn run<F: Future>(&self, future: F) -> Result<F::Output> {
        let runtime = self
            .runtime
            .as_ref()
            .ok_or_else(|| AgentError::Context("context already released".into()))?;
        Ok(runtime.block_on(future))
    }

    pub const fn id(&self) -> &RunId {
        &self.id
    }

    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Time since the context was acquired
    pub fn elapsed(&self) -> chrono::Duration {
        Utc::now() - self.started_at
    }
}

impl Drop for ExecutionContext {
    fn drop(&mut self) {
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
        tracing::debug!(
            run_id = %self.id,
            elapsed_ms = self.elapsed().num_milliseconds(),
            "Execution context released"
        );
    }
}
