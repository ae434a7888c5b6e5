//! CSV export of alert email records.

use std::io::Write;

use serde::Serialize;

use crate::error::MailError;
use crate::types::EmailRecord;

/// Flat CSV row for one alert email.
#[derive(Debug, Serialize)]
struct CsvRecord<'a> {
    id: &'a str,
    thread_id: &'a str,
    subject: &'a str,
    sender: &'a str,
    to: &'a str,
    received_iso: String,
    snippet: &'a str,
    body_text: &'a str,
    labels: String,
}

impl<'a> From<&'a EmailRecord> for CsvRecord<'a> {
    fn from(record: &'a EmailRecord) -> Self {
        Self {
            id: &record.id,
            thread_id: &record.thread_id,
            subject: &record.subject,
            sender: &record.sender,
            to: &record.to,
            received_iso: record
                .received_at
                .map(|t| t.to_rfc3339())
                .unwrap_or_default(),
            snippet: &record.snippet,
            body_text: record.body_text.as_deref().unwrap_or_default(),
            labels: record.labels.join(","),
        }
    }
}

/// Write records as CSV with a header row.
pub fn write_csv<W: Write>(records: &[EmailRecord], writer: W) -> Result<(), MailError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for record in records {
        csv_writer.serialize(CsvRecord::from(record))?;
    }

    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record(id: &str) -> EmailRecord {
        EmailRecord {
            id: id.to_string(),
            thread_id: format!("thread-{}", id),
            subject: "WarnMe: Community Advisory".to_string(),
            sender: "ucberkeley@warnme.berkeley.edu".to_string(),
            to: "students@berkeley.edu".to_string(),
            received_at: Some(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap()),
            snippet: "Avoid the area...".to_string(),
            body_text: Some("Avoid the 2100 block".to_string()),
            labels: vec!["INBOX".to_string(), "UNREAD".to_string()],
        }
    }

    #[test]
    fn test_write_csv() {
        let mut buffer = Vec::new();
        write_csv(&[record("msg1"), record("msg2")], &mut buffer).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        let mut lines = output.lines();

        assert_eq!(
            lines.next().unwrap(),
            "id,thread_id,subject,sender,to,received_iso,snippet,body_text,labels"
        );
        let first = lines.next().unwrap();
        assert!(first.starts_with("msg1,"));
        assert!(first.contains("2024-02-01T00:00:00+00:00"));
        assert!(first.contains("\"INBOX,UNREAD\""));
        assert_eq!(lines.count(), 1);
    }

    #[test]
    fn test_write_csv_handles_missing_fields() {
        let mut empty = record("msg1");
        empty.received_at = None;
        empty.body_text = None;

        let mut buffer = Vec::new();
        write_csv(&[empty], &mut buffer).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(output.lines().count(), 2);
    }
}
