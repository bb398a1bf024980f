//! Query executor
//!
//! Performs exactly one request per call. Retries, if wanted, belong to the
//! caller.

use super::params::QueryParams;
use crate::error::Result;
use crate::http::Transport;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Executes parameter sets against a fixed endpoint
#[derive(Clone)]
pub struct QueryExecutor {
    transport: Arc<dyn Transport>,
    endpoint: String,
}

impl QueryExecutor {
    /// Create an executor for `endpoint`
    pub fn new(transport: Arc<dyn Transport>, endpoint: impl Into<String>) -> Self {
        Self {
            transport,
            endpoint: endpoint.into(),
        }
    }

    /// Endpoint URL this executor targets
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Same transport, different endpoint
    #[must_use]
    pub fn with_endpoint(&self, endpoint: impl Into<String>) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            endpoint: endpoint.into(),
        }
    }

    /// Execute one API call
    ///
    /// `format=json` is always requested and `action` defaults to `query`.
    pub async fn execute(&self, params: QueryParams) -> Result<Value> {
        let mut params = params.with("format", "json");
        if !params.contains("action") {
            params.set("action", "query");
        }

        debug!(
            "API call: {} action={}",
            self.endpoint,
            params.get("action").unwrap_or_default()
        );
        self.transport.fetch(&self.endpoint, &params).await
    }
}

impl std::fmt::Debug for QueryExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryExecutor")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}
