use thiserror::Error;

/// Failure taxonomy for ad generation. No variant is retried anywhere:
/// every error propagates straight to the request handler and terminates
/// the request.
#[derive(Debug, Error)]
pub enum AdGenError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("document not found: {0}")]
    DocumentNotFound(String),

    #[error("document store failure: {0}")]
    Store(String),

    #[error("completion service failure: {0}")]
    Upstream(String),
}

pub type Result<T> = std::result::Result<T, AdGenError>;
