use thiserror::Error;

use crate::forms::validation::ValidationErrors;

/// Application-wide error types.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Relay error: {0}")]
    Relay(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Helper conversion from anyhow::Error
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors)
    }
}

/// Problems found while loading the embedded content collections.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Malformed {collection} JSON: {source}")]
    Malformed {
        collection: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{collection}/{id}: field '{field}' has a blank {locale} variant")]
    BlankText {
        collection: &'static str,
        id: String,
        field: &'static str,
        locale: &'static str,
    },

    #[error("{collection}: duplicate id '{id}'")]
    DuplicateId { collection: &'static str, id: String },

    #[error("{collection}/{id}: unknown reference '{target}'")]
    DanglingReference {
        collection: &'static str,
        id: String,
        target: String,
    },
}
