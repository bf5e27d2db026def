//! Public content pages.

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};

use crate::application::error::HttpError;
use crate::application::labels::LabelError;
use crate::cms::CacheError;
use crate::domain::labels::Locale;
use crate::presentation::views::{WelcomeTemplate, render_template_response};

use super::HttpState;

pub fn routes() -> Router<HttpState> {
    Router::new()
        .route("/", get(welcome_default))
        .route("/{locale}", get(welcome))
}

async fn welcome_default(State(state): State<HttpState>) -> Response {
    render_welcome(&state, Locale::default()).await
}

async fn welcome(State(state): State<HttpState>, Path(locale): Path<String>) -> Response {
    match locale.parse::<Locale>() {
        Ok(locale) => render_welcome(&state, locale).await,
        Err(err) => HttpError::new(
            "infra::http::welcome",
            StatusCode::NOT_FOUND,
            "Unknown locale",
            err.to_string(),
        )
        .into_response(),
    }
}

async fn render_welcome(state: &HttpState, locale: Locale) -> Response {
    match state.labels.load(locale).await {
        Ok(labels) => {
            let template = WelcomeTemplate::new(locale, labels);
            render_template_response(template, StatusCode::OK)
        }
        Err(err) => label_error_to_response(err),
    }
}

fn label_error_to_response(err: LabelError) -> Response {
    const SOURCE: &str = "infra::http::render_welcome";

    match err {
        LabelError::Cache(CacheError::Upstream(upstream)) => HttpError::from_error(
            SOURCE,
            StatusCode::BAD_GATEWAY,
            "Content service unavailable",
            &upstream,
        ),
        LabelError::Cache(CacheError::Store(store)) => HttpError::from_error(
            SOURCE,
            StatusCode::SERVICE_UNAVAILABLE,
            "Cache store unavailable",
            &store,
        ),
        LabelError::Payload(detail) => HttpError::new(
            SOURCE,
            StatusCode::INTERNAL_SERVER_ERROR,
            "Unexpected upstream payload",
            detail,
        ),
    }
    .into_response()
}
