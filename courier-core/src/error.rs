//! Error types shared across the courier crates.

use thiserror::Error;

/// Cold-start configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is absent.
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// A variable is present but unparseable.
    #[error("invalid value for {var}: {value}")]
    InvalidVar { var: &'static str, value: String },
}

/// Status store errors.
///
/// A lost conditional update is *not* an error — see
/// [`UpdateOutcome::Superseded`](crate::store::UpdateOutcome).
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store request itself failed (network, throttling, auth).
    #[error("status store request failed: {0}")]
    Request(String),

    /// A stored item is missing an expected attribute.
    #[error("malformed status item: missing {0}")]
    MalformedItem(&'static str),
}

/// Query engine errors.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine request failed.
    #[error("query engine request failed: {0}")]
    Request(String),

    /// The engine response is missing an expected field.
    #[error("query engine response missing {0}")]
    MissingField(&'static str),
}

/// Download-link minting errors.
///
/// The completion handler treats these as degraded, not fatal.
#[derive(Debug, Error)]
pub enum LinkError {
    /// Presigning failed.
    #[error("failed to mint download link: {0}")]
    Presign(String),
}
