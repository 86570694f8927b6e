//! # Courier Completion
//!
//! The event side of the courier: invoked once per query state-change
//! notification, at least once per transition. On success it fetches the
//! result location, mints a presigned download link, mails the requester,
//! and applies a conditional status update that a newer submission always
//! wins against.

mod error;
mod event;
mod handler;

pub use error::CompletionError;
pub use event::{EVENT_DETAIL_TYPE, EVENT_SOURCE, QueryStateChangeDetail};
pub use handler::{CompletionHandler, CompletionOutcome, Recipient, UpdateDisposition};
