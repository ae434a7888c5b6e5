//! Alert mailbox mining for WarnMe.
//!
//! Read-only Gmail access: search campus alert emails by sender, subject,
//! or time, load them in full, and export the results to CSV.

pub mod client;
pub mod error;
pub mod export;
pub mod query;
pub mod types;

pub use client::GmailClient;
pub use error::MailError;
pub use export::write_csv;
pub use query::SearchQuery;
pub use types::{EmailRecord, MessageListResponse, MessageRef};
