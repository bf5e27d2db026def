//! CMS cache-invalidation webhook.
//!
//! The CMS calls this endpoint when content changes, naming the cache tags
//! that must no longer serve stale results. Shape problems are the caller's
//! fault (400); only a store failure is ours (500, generic body, detail in
//! the operational log).

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use metrics::counter;
use tracing::info;

use crate::application::error::HttpError;
use crate::cms::{EventError, InvalidationEvent};

use super::HttpState;

const SOURCE: &str = "infra::http::webhook";

pub fn routes() -> Router<HttpState> {
    Router::new().route("/hooks/cms/invalidate", post(invalidate_cache))
}

async fn invalidate_cache(
    State(state): State<HttpState>,
    payload: Result<Json<InvalidationEvent>, JsonRejection>,
) -> Response {
    let Json(event) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            counter!("glossa_webhook_rejected_total").increment(1);
            return HttpError::new(
                SOURCE,
                StatusCode::BAD_REQUEST,
                "Invalid payload structure",
                rejection.to_string(),
            )
            .into_response();
        }
    };

    let tags = match event.validated_tags() {
        Ok(tags) => tags,
        Err(err) => {
            counter!("glossa_webhook_rejected_total").increment(1);
            let public_message = match err {
                EventError::Malformed => "Invalid payload structure",
                EventError::EmptyTagSet => "No cache tags found",
            };
            return HttpError::new(SOURCE, StatusCode::BAD_REQUEST, public_message, err.to_string())
                .into_response();
        }
    };

    info!(tag_count = tags.len(), tags = ?tags, "cache invalidation webhook received");

    match state.cache.invalidate_by_tags(&tags).await {
        Ok(report) => {
            info!(
                tags_processed = report.tags_processed,
                queries_invalidated = report.evicted.len(),
                "cache invalidated successfully"
            );
            (StatusCode::OK, "Cache invalidated successfully").into_response()
        }
        Err(err) => HttpError::from_error(
            SOURCE,
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error",
            &err,
        )
        .into_response(),
    }
}
