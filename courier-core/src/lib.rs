//! # Courier Core
//!
//! Domain model and service ports for the Athena query courier.
//!
//! The courier tracks one in-flight (or recently completed) query per
//! requester. The command side submits a query to the engine and records a
//! `QUEUED` status; the completion side resolves the engine's asynchronous
//! state-change notification back to the requester, mails a time-limited
//! download link, and applies a conditional status update.
//!
//! This crate holds everything the two handlers share:
//!
//! - [`StatusRecord`] and [`QueryState`] — the status lifecycle
//! - [`StatusStore`] — the conditional-write store port (plus
//!   [`MemoryStatusStore`] for local use and tests)
//! - [`QueryEngine`] — the query engine port and its wire types
//! - [`LinkMinter`] — the presigned-download-link port
//! - [`CourierConfig`] — cold-start configuration read from the environment

pub mod config;
pub mod engine;
pub mod error;
pub mod link;
pub mod memory;
pub mod s3uri;
pub mod status;
pub mod store;

pub use config::CourierConfig;
pub use engine::{QueryEngine, QuerySubmission, SubmissionAck};
pub use error::{ConfigError, EngineError, LinkError, StoreError};
pub use link::LinkMinter;
pub use memory::MemoryStatusStore;
pub use s3uri::S3Uri;
pub use status::{QueryState, RecordKey, StatusRecord};
pub use store::{Lookup, StatusStore, UpdateOutcome};
