//! Localized label loading through the tagged query cache.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::debug;

use crate::cms::{CacheError, TaggedQueryCache};
use crate::domain::labels::{LabelRecord, Locale};

#[derive(Debug, Error)]
pub enum LabelError {
    #[error(transparent)]
    Cache(#[from] CacheError),
    #[error("malformed label payload: {0}")]
    Payload(String),
}

/// Loads the localized UI labels for the public site.
pub struct LabelService {
    cache: Arc<TaggedQueryCache>,
}

#[derive(Debug, Deserialize)]
struct AllLabelsPayload {
    #[serde(rename = "allLabels", default)]
    all_labels: Vec<LabelRecord>,
}

impl LabelService {
    pub fn new(cache: Arc<TaggedQueryCache>) -> Self {
        Self { cache }
    }

    /// Load the label map for a locale, keyed by label code.
    pub async fn load(&self, locale: Locale) -> Result<BTreeMap<String, String>, LabelError> {
        let query = all_labels_query(locale);
        let payload = self.cache.resolve(&query, &json!({})).await?;

        let decoded: AllLabelsPayload =
            serde_json::from_value(payload).map_err(|err| LabelError::Payload(err.to_string()))?;

        debug!(locale = %locale, count = decoded.all_labels.len(), "loaded labels");

        Ok(decoded
            .all_labels
            .into_iter()
            .map(|label| (label.code, label.translation))
            .collect())
    }
}

fn all_labels_query(locale: Locale) -> String {
    format!(
        "query {{ allLabels(locale: {locale}) {{ code translation }} }}",
        locale = locale.as_str()
    )
}
