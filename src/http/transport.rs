//! Transport abstraction

use crate::error::Result;
use crate::query::QueryParams;
use async_trait::async_trait;
use serde_json::Value;

/// Performs one request and decodes the reply into an untyped JSON tree
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch `endpoint` with `params` encoded into the query string
    async fn fetch(&self, endpoint: &str, params: &QueryParams) -> Result<Value>;
}
