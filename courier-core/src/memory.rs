//! In-memory status store.
//!
//! Faithful to the persistent store's semantics: unconditional upsert keyed
//! by requester, keys-only secondary lookup, conditional update, and
//! purge-on-read of expired records. Used by handler tests and local runs.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

use crate::error::StoreError;
use crate::status::{QueryState, StatusRecord};
use crate::store::{Lookup, StatusStore, UpdateOutcome};

/// In-memory [`StatusStore`] implementation.
#[derive(Default)]
pub struct MemoryStatusStore {
    records: RwLock<HashMap<String, StatusRecord>>,
}

impl MemoryStatusStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the record stored for a requester, if any.
    pub fn get(&self, requester_id: &str) -> Option<StatusRecord> {
        self.records.read().get(requester_id).cloned()
    }
}

#[async_trait]
impl StatusStore for MemoryStatusStore {
    async fn put(&self, record: StatusRecord) -> Result<(), StoreError> {
        self.records
            .write()
            .insert(record.requester_id.clone(), record);
        Ok(())
    }

    async fn find_by_execution_id(&self, execution_id: &str) -> Result<Lookup, StoreError> {
        let now = Utc::now();
        let records = self.records.read();
        let mut matches = records
            .values()
            .filter(|r| r.execution_id == execution_id && !r.is_expired(now));
        match (matches.next(), matches.count()) {
            (None, _) => Ok(Lookup::Missing),
            (Some(record), 0) => Ok(Lookup::Unique(record.key())),
            (Some(_), more) => Ok(Lookup::Ambiguous(more + 1)),
        }
    }

    async fn update_status(
        &self,
        requester_id: &str,
        execution_id: &str,
        next: QueryState,
    ) -> Result<UpdateOutcome, StoreError> {
        let mut records = self.records.write();
        match records.get_mut(requester_id) {
            // An absent record fails the condition the same way the
            // persistent store does.
            None => Ok(UpdateOutcome::Superseded),
            Some(record) if record.execution_id != execution_id => Ok(UpdateOutcome::Superseded),
            Some(record) => {
                record.status = next;
                Ok(UpdateOutcome::Applied)
            }
        }
    }
}
