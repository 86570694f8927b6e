//! Status store port.
//!
//! Both handlers run under a request-per-invocation model with no shared
//! in-process state, so all concurrency correctness rests on this port's
//! conditional-write primitive: a status transition is applied only while the
//! stored record still belongs to the same execution.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::status::{QueryState, RecordKey, StatusRecord};

/// Result of a secondary-index lookup by execution id.
///
/// The index is non-unique by construction (expected unique in practice), so
/// zero and many are named outcomes rather than errors: the completion
/// handler degrades to a fallback recipient instead of dropping the
/// notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// Exactly one record matched.
    Unique(RecordKey),
    /// No record matched (expired, purged, or not yet visible).
    Missing,
    /// More than one record matched.
    Ambiguous(usize),
}

/// Result of a conditional status update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The condition held and the status was written.
    Applied,
    /// The stored record no longer carries this execution id; a newer
    /// submission has superseded it. Harmless, by design of the protocol.
    Superseded,
}

/// Persistent key-value table holding the current status per requester.
#[async_trait]
pub trait StatusStore: Send + Sync {
    /// Unconditional upsert; overwrites any prior record for the requester.
    async fn put(&self, record: StatusRecord) -> Result<(), StoreError>;

    /// Resolve an execution id back to its requester via the secondary index.
    async fn find_by_execution_id(&self, execution_id: &str) -> Result<Lookup, StoreError>;

    /// Set the status for `requester_id`, but only while the stored record
    /// still carries `execution_id`.
    async fn update_status(
        &self,
        requester_id: &str,
        execution_id: &str,
        next: QueryState,
    ) -> Result<UpdateOutcome, StoreError>;
}

#[async_trait]
impl<T: StatusStore + ?Sized> StatusStore for std::sync::Arc<T> {
    async fn put(&self, record: StatusRecord) -> Result<(), StoreError> {
        (**self).put(record).await
    }

    async fn find_by_execution_id(&self, execution_id: &str) -> Result<Lookup, StoreError> {
        (**self).find_by_execution_id(execution_id).await
    }

    async fn update_status(
        &self,
        requester_id: &str,
        execution_id: &str,
        next: QueryState,
    ) -> Result<UpdateOutcome, StoreError> {
        (**self).update_status(requester_id, execution_id, next).await
    }
}
