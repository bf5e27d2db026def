use thiserror::Error;

/// Failure of the upstream GraphQL executor.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("unexpected upstream status {status}")]
    Status { status: u16 },
    #[error("undecodable upstream response: {0}")]
    Decode(String),
    #[error("GraphQL error response: {}", errors.join("; "))]
    GraphQl { errors: Vec<String> },
}

/// Failure of the key-value store backing the cache.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }
}

/// Errors surfaced by the tagged query cache.
///
/// `resolve` can fail either way; `invalidate_by_tags` only ever raises
/// [`StoreError`], so it keeps the narrower type.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
