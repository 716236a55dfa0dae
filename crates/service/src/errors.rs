use thiserror::Error;

/// Business-rule failures surfaced to the API layer. Display is the raw
/// message; the transport maps kinds to status codes.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Duplicate(String),
    #[error("{0}")]
    Validation(String),
    #[error("database error: {0}")]
    Db(String),
}
