//! Completion handler errors.

use thiserror::Error;

use courier_core::error::{EngineError, StoreError};
use courier_mail::MailError;

/// Errors that fail the whole invocation.
///
/// Degraded conditions (lost conditional update, failed link minting,
/// missing or ambiguous index lookup) are *not* errors; they are named
/// variants of [`CompletionOutcome`](crate::CompletionOutcome). Everything
/// here is re-raised to the hosting runtime, which owns retry and alerting.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// The engine reported the query FAILED. Fatal for this invocation; no
    /// domain-level recovery is attempted.
    #[error("query execution {execution_id} reported FAILED")]
    QueryFailed { execution_id: String },

    /// Fetching the result location failed.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// The requester lookup failed (store error, not a missing record).
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The notification could not be sent.
    #[error(transparent)]
    Notify(#[from] MailError),
}

impl CompletionError {
    /// Whether this is the terminal-failure signal rather than a transient
    /// infrastructure error.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::QueryFailed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_query_failure_is_fatal() {
        assert!(
            CompletionError::QueryFailed {
                execution_id: "exec-1".to_string()
            }
            .is_fatal()
        );
        assert!(!CompletionError::Engine(EngineError::Request("x".to_string())).is_fatal());
        assert!(!CompletionError::Store(StoreError::Request("x".to_string())).is_fatal());
        assert!(!CompletionError::Notify(MailError::Provider("x".to_string())).is_fatal());
    }
}
