//! Error types for the catalog API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Search engine unreachable: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("Search engine returned {status}: {body}")]
    Store { status: u16, body: String },

    #[error("Malformed document: {0}")]
    Mapping(#[from] movies_query::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Failures of the search engine or of the documents it returned.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Error::Upstream(_) | Error::Store { .. } | Error::Mapping(_)
        )
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            _ if self.is_upstream() => {
                tracing::error!(error = %self, "Search engine failure");
                (
                    StatusCode::BAD_GATEWAY,
                    "Search engine unavailable".to_string(),
                )
            }
            Error::NotFound { .. } => (StatusCode::NOT_FOUND, self.to_string()),
            Error::Validation(message) => (StatusCode::UNPROCESSABLE_ENTITY, message.clone()),
            _ => {
                tracing::error!("Internal error: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
