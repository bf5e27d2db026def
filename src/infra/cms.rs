//! Reqwest-backed GraphQL executor for the headless CMS.
//!
//! Sends `X-Cache-Tags: true` so the CMS reports the cache tags touched by
//! the query, and parses them back out of the space-separated response
//! header of the same name.

use std::collections::BTreeSet;
use std::time::Instant;

use async_trait::async_trait;
use metrics::histogram;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::cms::{QueryExecutor, QueryOutcome, UpstreamError};
use crate::config::CmsSettings;

use super::error::InfraError;

const CACHE_TAGS_HEADER: &str = "X-Cache-Tags";

pub struct GraphQlExecutor {
    client: reqwest::Client,
    endpoint: Url,
    api_token: String,
}

#[derive(Debug, Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: &'a Value,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphQlErrorItem>,
}

#[derive(Debug, Deserialize)]
struct GraphQlErrorItem {
    #[serde(default)]
    message: String,
}

impl GraphQlExecutor {
    pub fn new(settings: &CmsSettings) -> Result<Self, InfraError> {
        let client = reqwest::Client::builder()
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| {
                InfraError::configuration(format!("failed to build CMS HTTP client: {err}"))
            })?;

        Ok(Self {
            client,
            endpoint: settings.endpoint.clone(),
            api_token: settings.api_token.clone(),
        })
    }
}

#[async_trait]
impl QueryExecutor for GraphQlExecutor {
    async fn execute(&self, query: &str, variables: &Value) -> Result<QueryOutcome, UpstreamError> {
        let started = Instant::now();

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(AUTHORIZATION, format!("Bearer {}", self.api_token))
            .header(ACCEPT, "application/json")
            .header(CACHE_TAGS_HEADER, "true")
            .json(&GraphQlRequest { query, variables })
            .send()
            .await
            .map_err(|err| UpstreamError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
            });
        }

        // Read the tags before the body consumes the response.
        let tags = parse_cache_tags(
            response
                .headers()
                .get(CACHE_TAGS_HEADER)
                .and_then(|value| value.to_str().ok()),
        );

        let body: GraphQlResponse = response
            .json()
            .await
            .map_err(|err| UpstreamError::Decode(err.to_string()))?;

        if !body.errors.is_empty() {
            return Err(UpstreamError::GraphQl {
                errors: body.errors.into_iter().map(|item| item.message).collect(),
            });
        }

        histogram!("glossa_cms_upstream_query_ms").record(started.elapsed().as_millis() as f64);
        debug!(tag_count = tags.len(), "upstream query succeeded");

        Ok(QueryOutcome {
            data: body
                .data
                .unwrap_or_else(|| Value::Object(serde_json::Map::new())),
            tags,
        })
    }
}

fn parse_cache_tags(header: Option<&str>) -> BTreeSet<String> {
    header
        .unwrap_or_default()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_are_split_on_whitespace() {
        let tags = parse_cache_tags(Some("label-42  page-7 label-42"));
        assert_eq!(tags.len(), 2);
        assert!(tags.contains("label-42"));
        assert!(tags.contains("page-7"));
    }

    #[test]
    fn absent_or_blank_header_yields_no_tags() {
        assert!(parse_cache_tags(None).is_empty());
        assert!(parse_cache_tags(Some("")).is_empty());
        assert!(parse_cache_tags(Some("   ")).is_empty());
    }

    #[test]
    fn graphql_error_list_deserializes() {
        let body: GraphQlResponse = serde_json::from_str(
            r#"{"errors": [{"message": "field `allLabelz` not found"}]}"#,
        )
        .expect("deserialize");

        assert!(body.data.is_none());
        assert_eq!(body.errors.len(), 1);
        assert_eq!(body.errors[0].message, "field `allLabelz` not found");
    }
}
