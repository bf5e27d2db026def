//! The tag-indexed query cache.
//!
//! `resolve` serves cached results by fingerprint and, on a miss, records a
//! reverse index entry (tag → fingerprint) for every tag the upstream
//! reported before storing the result itself. `invalidate_by_tags` walks
//! that index and evicts whatever the named tags still point at.
//!
//! Concurrent resolves of the same fingerprint may both miss and both hit
//! the upstream; results are idempotent to overwrite, so no single-flight
//! coordination is attempted.

use std::sync::Arc;

use metrics::counter;
use serde_json::Value;
use tracing::{debug, info};

use super::error::{CacheError, StoreError};
use super::executor::QueryExecutor;
use super::fingerprint::QueryFingerprint;
use super::store::KeyValueStore;

/// Outcome of one `invalidate_by_tags` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvalidationReport {
    /// Tags examined, counting duplicates.
    pub tags_processed: usize,
    /// Fingerprints whose result entries were actually removed.
    pub evicted: Vec<QueryFingerprint>,
}

/// Query cache with tag-based invalidation.
///
/// Owns all mutation of tag and result entries in the injected store.
pub struct TaggedQueryCache {
    store: Arc<dyn KeyValueStore>,
    executor: Arc<dyn QueryExecutor>,
}

impl TaggedQueryCache {
    pub fn new(store: Arc<dyn KeyValueStore>, executor: Arc<dyn QueryExecutor>) -> Self {
        Self { store, executor }
    }

    /// Resolve a query through the cache.
    ///
    /// Hits return the stored payload with no side effects. Misses execute
    /// the upstream query; on success one tag mapping is written per
    /// reported tag (last write wins) followed by the result entry. On
    /// upstream failure nothing is written.
    pub async fn resolve(&self, query: &str, variables: &Value) -> Result<Value, CacheError> {
        let fingerprint = QueryFingerprint::compute(query, variables);

        if let Some(cached) = self.store.get(fingerprint.as_str()).await? {
            counter!("glossa_cms_cache_hit_total").increment(1);
            debug!(fingerprint = %fingerprint, "returning cached query result");
            return Ok(cached);
        }

        counter!("glossa_cms_cache_miss_total").increment(1);
        info!(fingerprint = %fingerprint, "executing upstream query");
        let outcome = self.executor.execute(query, variables).await?;

        // Mappings go in before the result entry: a crash in between leaves
        // a tag pointing at a missing entry, which reads as a miss and heals
        // on the next resolve.
        for tag in &outcome.tags {
            debug!(tag, fingerprint = %fingerprint, "indexing cache tag");
            self.store
                .put(tag, Value::String(fingerprint.as_str().to_owned()))
                .await?;
        }
        counter!("glossa_cms_tags_indexed_total").increment(outcome.tags.len() as u64);

        self.store
            .put(fingerprint.as_str(), outcome.data.clone())
            .await?;
        debug!(fingerprint = %fingerprint, tag_count = outcome.tags.len(), "cached query result");

        Ok(outcome.data)
    }

    /// Evict every cached result reachable from the given tags.
    ///
    /// A tag without an active mapping is normal (never queried, or already
    /// invalidated) and is skipped; the mapping entry itself is removed
    /// whether or not it pointed at a live result. Calling this twice with
    /// the same tags leaves the store in the same state as calling it once.
    pub async fn invalidate_by_tags(
        &self,
        tags: &[String],
    ) -> Result<InvalidationReport, StoreError> {
        let mut report = InvalidationReport::default();

        for tag in tags {
            report.tags_processed += 1;

            match self.store.get(tag).await? {
                Some(Value::String(stored)) => {
                    let fingerprint = QueryFingerprint::from_stored(stored);
                    self.store.forget(fingerprint.as_str()).await?;
                    debug!(tag, fingerprint = %fingerprint, "evicted query result for tag");
                    report.evicted.push(fingerprint);
                }
                Some(_) => {
                    // The key exists but does not hold a mapping; treat it as
                    // stale and let the unconditional forget below drop it.
                    debug!(tag, "tag key held a non-mapping value");
                }
                None => {
                    debug!(tag, "no active mapping for tag");
                }
            }

            self.store.forget(tag).await?;
        }

        counter!("glossa_cms_queries_invalidated_total").increment(report.evicted.len() as u64);
        info!(
            tags_processed = report.tags_processed,
            queries_invalidated = report.evicted.len(),
            "cache invalidation completed"
        );

        Ok(report)
    }
}
