//! Query status lifecycle.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How long a status record stays visible before the store purges it.
pub const RECORD_TTL_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Query state as observed from the engine's state-change notifications.
///
/// The authoritative state machine lives in the engine:
/// `QUEUED -> RUNNING -> {SUCCEEDED | FAILED | CANCELLED}`. Terminal states
/// are never re-entered. The command handler only ever writes `Queued`; all
/// later transitions are applied by the completion handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QueryState {
    Queued,
    Running,
    Succeeded,
    Failed,
    Cancelled,
}

impl QueryState {
    /// Wire representation, identical to the engine's own state strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Queued => "QUEUED",
            Self::Running => "RUNNING",
            Self::Succeeded => "SUCCEEDED",
            Self::Failed => "FAILED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Whether this state can never be left.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed | Self::Cancelled)
    }
}

impl fmt::Display for QueryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized query state string.
#[derive(Debug, Error)]
#[error("unknown query state: {0}")]
pub struct UnknownState(pub String);

impl FromStr for QueryState {
    type Err = UnknownState;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "QUEUED" => Ok(Self::Queued),
            "RUNNING" => Ok(Self::Running),
            "SUCCEEDED" => Ok(Self::Succeeded),
            "FAILED" => Ok(Self::Failed),
            "CANCELLED" => Ok(Self::Cancelled),
            other => Err(UnknownState(other.to_string())),
        }
    }
}

/// One current-status record per requester.
///
/// A new submission for the same requester overwrites the previous record;
/// no history is retained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRecord {
    /// Partition identity; at most one current record per requester.
    pub requester_id: String,
    /// Opaque identifier assigned by the engine at submission time.
    pub execution_id: String,
    /// Current observed state.
    pub status: QueryState,
    /// Absolute purge time, seconds since epoch. Set at creation, never
    /// refreshed on update.
    pub expires_at: i64,
}

impl StatusRecord {
    /// Build the initial record written by the command handler.
    pub fn queued(
        requester_id: impl Into<String>,
        execution_id: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            requester_id: requester_id.into(),
            execution_id: execution_id.into(),
            status: QueryState::Queued,
            expires_at: now.timestamp() + RECORD_TTL_SECONDS,
        }
    }

    /// Whether the store would already have purged this record.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now.timestamp()
    }

    /// The record's key pair.
    pub fn key(&self) -> RecordKey {
        RecordKey {
            requester_id: self.requester_id.clone(),
            execution_id: self.execution_id.clone(),
        }
    }
}

/// Key pair resolved through the secondary index.
///
/// The index projects keys only, so a lookup yields this and not a full
/// [`StatusRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordKey {
    pub requester_id: String,
    pub execution_id: String,
}
