//! # Courier Mail
//!
//! Results-ready notifications for the query courier.
//!
//! A small mail layer: an [`Email`] value type with validation, a
//! [`Transport`] trait, an AWS SES implementation, and the fixed HTML
//! template the completion handler sends.

mod email;
mod error;
mod ses;
mod template;
mod transport;

pub use email::Email;
pub use error::{MailError, Result};
pub use ses::SesTransport;
pub use template::{RESULTS_READY_SUBJECT, results_ready_html};
pub use transport::Transport;
