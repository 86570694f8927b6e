//! Command handler errors.

use thiserror::Error;

use courier_core::error::{EngineError, StoreError};

/// Everything that can fail a submission.
///
/// Client input errors map to 4xx and are never retried; engine and store
/// failures map to 500 and leave retries to the caller.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Only POST is accepted on the command path.
    #[error("method not allowed")]
    MethodNotAllowed,

    /// The request body is not a valid submission.
    #[error("malformed request body: {0}")]
    MalformedBody(String),

    /// The declared output location is not in the configured bucket.
    #[error("invalid output location")]
    InvalidOutputLocation,

    /// The declared workgroup is not the configured workgroup.
    #[error("invalid workgroup")]
    InvalidWorkgroup,

    /// No requester identity in the request.
    #[error("missing requester identity")]
    MissingRequester,

    /// The engine rejected or failed the submission.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// The status write failed. The query may already be running; there is
    /// no compensating cancellation.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CommandError {
    /// HTTP status code this error surfaces as.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MethodNotAllowed => 405,
            Self::MalformedBody(_)
            | Self::InvalidOutputLocation
            | Self::InvalidWorkgroup
            | Self::MissingRequester => 400,
            Self::Engine(_) | Self::Store(_) => 500,
        }
    }
}
