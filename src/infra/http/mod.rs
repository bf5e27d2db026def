mod middleware;
mod public;
mod webhook;

use std::sync::Arc;

use axum::{Router, middleware as axum_middleware};

use crate::application::labels::LabelService;
use crate::cms::TaggedQueryCache;

use middleware::{log_responses, set_request_context};

#[derive(Clone)]
pub struct HttpState {
    pub labels: Arc<LabelService>,
    pub cache: Arc<TaggedQueryCache>,
}

/// Assemble the public router: content pages plus the CMS webhook.
pub fn build_router(state: HttpState) -> Router {
    public::routes()
        .merge(webhook::routes())
        .with_state(state)
        .layer(axum_middleware::from_fn(log_responses))
        .layer(axum_middleware::from_fn(set_request_context))
}
