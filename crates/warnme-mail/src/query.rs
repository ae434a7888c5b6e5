//! Gmail search expression construction.

use chrono::{DateTime, Utc};

/// Builder for Gmail search expressions.
///
/// Produces the same operator syntax a user would type into the Gmail
/// search box: `from:`, `subject:"…"`, `newer_than:<n>d`, `after:<ts>`.
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    sender: Option<String>,
    subject: Option<String>,
    newer_than_days: Option<u32>,
    after: Option<DateTime<Utc>>,
}

impl SearchQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Match messages from this sender address.
    pub fn from_sender(mut self, sender: &str) -> Self {
        self.sender = Some(sender.to_string());
        self
    }

    /// Match messages whose subject contains this text.
    pub fn with_subject(mut self, subject: &str) -> Self {
        self.subject = Some(subject.to_string());
        self
    }

    /// Match messages received within the last `days` days.
    pub fn newer_than_days(mut self, days: u32) -> Self {
        self.newer_than_days = Some(days);
        self
    }

    /// Match messages received after this instant.
    pub fn after(mut self, time: DateTime<Utc>) -> Self {
        self.after = Some(time);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.sender.is_none()
            && self.subject.is_none()
            && self.newer_than_days.is_none()
            && self.after.is_none()
    }

    /// Render the Gmail search expression.
    pub fn to_query_string(&self) -> String {
        let mut terms = Vec::new();

        if let Some(sender) = &self.sender {
            terms.push(format!("from:{}", sender));
        }
        if let Some(subject) = &self.subject {
            terms.push(format!("subject:\"{}\"", subject));
        }
        if let Some(days) = self.newer_than_days {
            terms.push(format!("newer_than:{}d", days));
        }
        if let Some(time) = self.after {
            // Gmail's after: operator accepts a unix timestamp
            terms.push(format!("after:{}", time.timestamp()));
        }

        terms.join(" ")
    }
}
