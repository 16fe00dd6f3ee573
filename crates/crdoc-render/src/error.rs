//! Render error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Template error in {template}: {source}")]
    Template {
        template: String,
        #[source]
        source: minijinja::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RenderError {
    pub fn template(template: &str, source: minijinja::Error) -> Self {
        Self::Template {
            template: template.to_string(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, RenderError>;
