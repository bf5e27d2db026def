//! Invalidation event contract.
//!
//! The CMS posts a JSON event naming cache tags whose dependent query
//! results must be evicted. Deserialization is permissive (every field
//! optional) and the shape is checked explicitly afterwards, so a malformed
//! payload yields a descriptive client error instead of an opaque
//! deserialization failure.

use serde::Deserialize;
use thiserror::Error;

/// Entity sentinel the CMS uses for tag-invalidation events.
pub const CACHE_TAGS_ENTITY: &str = "cda_cache_tags";
/// Event type carried by invalidation notifications.
pub const INVALIDATE_EVENT: &str = "invalidate";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EventError {
    #[error("invalid payload structure")]
    Malformed,
    #[error("no cache tags found in payload")]
    EmptyTagSet,
}

/// Inbound invalidation event.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InvalidationEvent {
    pub entity_type: Option<String>,
    pub event_type: Option<String>,
    pub entity: Option<EventEntity>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EventEntity {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub attributes: Option<EventAttributes>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EventAttributes {
    pub tags: Option<Vec<String>>,
}

impl InvalidationEvent {
    /// Validate the event shape and extract its tag list.
    ///
    /// Both discriminators and the nested entity type must equal their
    /// sentinels and `entity.attributes` must be present; otherwise the
    /// event is malformed. A structurally valid event with no tags is
    /// rejected separately so the boundary can report it distinctly.
    pub fn validated_tags(&self) -> Result<Vec<String>, EventError> {
        if self.entity_type.as_deref() != Some(CACHE_TAGS_ENTITY) {
            return Err(EventError::Malformed);
        }
        if self.event_type.as_deref() != Some(INVALIDATE_EVENT) {
            return Err(EventError::Malformed);
        }

        let entity = self.entity.as_ref().ok_or(EventError::Malformed)?;
        if entity.kind.as_deref() != Some(CACHE_TAGS_ENTITY) {
            return Err(EventError::Malformed);
        }
        let attributes = entity.attributes.as_ref().ok_or(EventError::Malformed)?;

        let tags = attributes.tags.clone().unwrap_or_default();
        if tags.is_empty() {
            return Err(EventError::EmptyTagSet);
        }

        Ok(tags)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn event_from(value: serde_json::Value) -> InvalidationEvent {
        serde_json::from_value(value).expect("permissive deserialization")
    }

    #[test]
    fn well_formed_event_yields_tags() {
        let event = event_from(json!({
            "entity_type": "cda_cache_tags",
            "event_type": "invalidate",
            "entity": {
                "type": "cda_cache_tags",
                "attributes": { "tags": ["label-42", "page-7"] }
            }
        }));

        let tags = event.validated_tags().expect("valid event");
        assert_eq!(tags, vec!["label-42".to_string(), "page-7".to_string()]);
    }

    #[test]
    fn empty_tag_list_is_rejected_distinctly() {
        let event = event_from(json!({
            "entity_type": "cda_cache_tags",
            "event_type": "invalidate",
            "entity": {
                "type": "cda_cache_tags",
                "attributes": { "tags": [] }
            }
        }));

        assert_eq!(event.validated_tags(), Err(EventError::EmptyTagSet));
    }

    #[test]
    fn missing_tags_field_counts_as_empty() {
        let event = event_from(json!({
            "entity_type": "cda_cache_tags",
            "event_type": "invalidate",
            "entity": {
                "type": "cda_cache_tags",
                "attributes": {}
            }
        }));

        assert_eq!(event.validated_tags(), Err(EventError::EmptyTagSet));
    }

    #[test]
    fn missing_attributes_is_malformed() {
        let event = event_from(json!({
            "entity_type": "cda_cache_tags",
            "event_type": "invalidate",
            "entity": { "type": "cda_cache_tags" }
        }));

        assert_eq!(event.validated_tags(), Err(EventError::Malformed));
    }

    #[test]
    fn wrong_discriminators_are_malformed() {
        let wrong_entity_type = event_from(json!({
            "entity_type": "item",
            "event_type": "invalidate",
            "entity": { "type": "cda_cache_tags", "attributes": { "tags": ["t"] } }
        }));
        assert_eq!(wrong_entity_type.validated_tags(), Err(EventError::Malformed));

        let wrong_event_type = event_from(json!({
            "entity_type": "cda_cache_tags",
            "event_type": "publish",
            "entity": { "type": "cda_cache_tags", "attributes": { "tags": ["t"] } }
        }));
        assert_eq!(wrong_event_type.validated_tags(), Err(EventError::Malformed));

        let mismatched_entity = event_from(json!({
            "entity_type": "cda_cache_tags",
            "event_type": "invalidate",
            "entity": { "type": "item", "attributes": { "tags": ["t"] } }
        }));
        assert_eq!(mismatched_entity.validated_tags(), Err(EventError::Malformed));
    }

    #[test]
    fn empty_object_is_malformed() {
        let event = event_from(json!({}));
        assert_eq!(event.validated_tags(), Err(EventError::Malformed));
    }
}
