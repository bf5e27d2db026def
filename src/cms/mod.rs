//! CMS query caching with tag-based invalidation.
//!
//! GraphQL query results are cached keyed by a fingerprint of query +
//! variables. Every result carries the set of cache tags the CMS attached to
//! it; a reverse index (tag → fingerprint) kept in the same store lets an
//! inbound invalidation event evict the dependent results without knowing
//! which queries produced them.
//!
//! The store and the executor are abstract boundaries injected at the
//! composition root; this module owns all mutation of tag and result entries.

mod error;
mod events;
mod executor;
mod fingerprint;
mod query_cache;
mod store;

pub use error::{CacheError, StoreError, UpstreamError};
pub use events::{EventAttributes, EventEntity, EventError, InvalidationEvent};
pub use executor::{QueryExecutor, QueryOutcome};
pub use fingerprint::QueryFingerprint;
pub use query_cache::{InvalidationReport, TaggedQueryCache};
pub use store::{KeyValueStore, MemoryStore};
