//! Glossa: a small localized-content site backed by a headless CMS.
//!
//! Content pages fetch localized labels over GraphQL; query results are
//! cached in a flat key-value store and indexed by the cache tags the CMS
//! reports, so a webhook notification can evict exactly the results that
//! depend on changed content. The tag-indexed query cache lives in [`cms`].

pub mod application;
pub mod cms;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
