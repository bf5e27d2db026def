use std::collections::BTreeMap;

use askama::{Error as AskamaError, Template};
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::application::error::HttpError;
use crate::domain::labels::Locale;

#[derive(Debug, Error)]
#[error("{public_message}")]
pub struct TemplateRenderError {
    pub(crate) source: &'static str,
    pub(crate) public_message: &'static str,
    #[source]
    pub(crate) error: AskamaError,
}

impl TemplateRenderError {
    pub fn new(source: &'static str, public_message: &'static str, error: AskamaError) -> Self {
        Self {
            source,
            public_message,
            error,
        }
    }
}

impl From<TemplateRenderError> for HttpError {
    fn from(err: TemplateRenderError) -> Self {
        let TemplateRenderError {
            source,
            public_message,
            error,
        } = err;

        HttpError::from_error(
            source,
            StatusCode::INTERNAL_SERVER_ERROR,
            public_message,
            &error,
        )
    }
}

pub fn render_template<T: Template>(template: T) -> Result<Html<String>, HttpError> {
    template.render().map(Html).map_err(|err| {
        TemplateRenderError::new(
            "presentation::views::render_template",
            "Template rendering failed",
            err,
        )
        .into()
    })
}

pub fn render_template_response<T: Template>(template: T, status: StatusCode) -> Response {
    match render_template(template) {
        Ok(html) => (status, html).into_response(),
        Err(err) => err.into_response(),
    }
}

#[derive(Clone)]
pub struct LabelView {
    pub code: String,
    pub translation: String,
}

#[derive(Template)]
#[template(path = "welcome.html")]
pub struct WelcomeTemplate {
    pub locale: &'static str,
    pub labels: Vec<LabelView>,
}

impl WelcomeTemplate {
    pub fn new(locale: Locale, labels: BTreeMap<String, String>) -> Self {
        Self {
            locale: locale.as_str(),
            labels: labels
                .into_iter()
                .map(|(code, translation)| LabelView { code, translation })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn welcome_template_renders_labels() {
        let mut labels = BTreeMap::new();
        labels.insert("greeting".to_string(), "Bonjour".to_string());

        let template = WelcomeTemplate::new(Locale::Fr, labels);
        let html = template.render().expect("render");

        assert!(html.contains("lang=\"fr\""));
        assert!(html.contains("greeting"));
        assert!(html.contains("Bonjour"));
    }

    #[test]
    fn welcome_template_renders_without_labels() {
        let template = WelcomeTemplate::new(Locale::En, BTreeMap::new());
        let html = template.render().expect("render");
        assert!(html.contains("lang=\"en\""));
    }
}
