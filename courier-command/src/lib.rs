//! # Courier Command
//!
//! The command side of the courier: accepts a query submission over the API
//! Gateway proxy integration, validates it against the configured output
//! bucket and workgroup, forwards it to the query engine, and records the
//! initial `QUEUED` status for the requester.

mod error;
mod handler;

pub use error::CommandError;
pub use handler::CommandHandler;
