use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while reading documents returned by the search index.
#[derive(Debug, Error)]
pub enum Error {
    #[error("missing field '{0}' in document")]
    MissingField(String),

    #[error("invalid identifier in field '{field}': {value}")]
    InvalidId { field: String, value: String },

    #[error("invalid value for field '{field}': {message}")]
    InvalidField { field: String, message: String },
}

impl Error {
    pub(crate) fn missing(field: impl Into<String>) -> Self {
        Self::MissingField(field.into())
    }

    pub(crate) fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            message: message.into(),
        }
    }
}
