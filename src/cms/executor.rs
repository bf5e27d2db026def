//! Query executor boundary.

use std::collections::BTreeSet;

use async_trait::async_trait;
use serde_json::Value;

use super::error::UpstreamError;

/// Result of one upstream query: the data payload plus the cache tags the
/// CMS attached to the response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOutcome {
    pub data: Value,
    pub tags: BTreeSet<String>,
}

/// Executes GraphQL queries against the upstream CMS.
///
/// Implementations fail with [`UpstreamError`] on transport problems or a
/// non-empty GraphQL error list; they never touch the cache.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn execute(&self, query: &str, variables: &Value) -> Result<QueryOutcome, UpstreamError>;
}
