//! Gmail API types and the flattened alert email record.

use base64::engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One alert email, flattened for analysis and CSV export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailRecord {
    pub id: String,
    pub thread_id: String,
    pub subject: String,
    pub sender: String,
    pub to: String,
    pub received_at: Option<DateTime<Utc>>,
    pub snippet: String,
    /// Prefers `text/plain`, falls back to `text/html`.
    pub body_text: Option<String>,
    pub labels: Vec<String>,
}

/// Gmail API message response structure.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMessage {
    pub id: String,
    pub thread_id: String,
    #[serde(default)]
    pub label_ids: Vec<String>,
    #[serde(default)]
    pub snippet: String,
    pub internal_date: Option<String>,
    pub payload: Option<MessagePayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagePayload {
    pub mime_type: Option<String>,
    #[serde(default)]
    pub headers: Vec<Header>,
    pub body: Option<MessageBody>,
    #[serde(default)]
    pub parts: Vec<MessagePart>,
}

#[derive(Debug, Deserialize)]
pub struct Header {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct MessageBody {
    pub data: Option<String>,
    pub size: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagePart {
    pub mime_type: String,
    pub body: Option<MessageBody>,
    #[serde(default)]
    pub parts: Vec<MessagePart>,
}

impl EmailRecord {
    /// Convert API response to a flattened record.
    pub fn from_api(api: ApiMessage) -> Self {
        let headers = api.payload.as_ref().map(|p| &p.headers);

        let sender = header_value(headers, "from").unwrap_or_default();
        let to = header_value(headers, "to").unwrap_or_default();
        let subject = header_value(headers, "subject").unwrap_or_default();

        // The Date header is what the sender claims; internalDate is when
        // Gmail received the message. Prefer the header, fall back to
        // internalDate.
        let received_at = header_value(headers, "date")
            .and_then(|d| DateTime::parse_from_rfc2822(&d).ok())
            .map(|d| d.with_timezone(&Utc))
            .or_else(|| {
                api.internal_date
                    .as_ref()
                    .and_then(|d| d.parse::<i64>().ok())
                    .and_then(DateTime::from_timestamp_millis)
            });

        let body_text = api.payload.as_ref().and_then(body_from_payload);

        Self {
            id: api.id,
            thread_id: api.thread_id,
            subject,
            sender,
            to,
            received_at,
            snippet: api.snippet,
            body_text,
            labels: api.label_ids,
        }
    }
}

fn header_value(headers: Option<&Vec<Header>>, name: &str) -> Option<String> {
    headers
        .and_then(|h| h.iter().find(|h| h.name.eq_ignore_ascii_case(name)))
        .map(|h| h.value.clone())
}

fn body_from_payload(payload: &MessagePayload) -> Option<String> {
    // Single-part messages carry the text directly on the payload body
    if payload.parts.is_empty() {
        return payload.body.as_ref().and_then(decode_body);
    }

    find_part(&payload.parts, "text/plain").or_else(|| find_part(&payload.parts, "text/html"))
}

fn find_part(parts: &[MessagePart], mime_type: &str) -> Option<String> {
    for part in parts {
        if part.mime_type == mime_type {
            if let Some(text) = part.body.as_ref().and_then(decode_body) {
                return Some(text);
            }
        }
        // Multipart/alternative nests the text parts one level down
        if let Some(text) = find_part(&part.parts, mime_type) {
            return Some(text);
        }
    }
    None
}

fn decode_body(body: &MessageBody) -> Option<String> {
    let data = body.data.as_ref()?;
    let bytes = URL_SAFE_NO_PAD
        .decode(data.as_bytes())
        .or_else(|_| URL_SAFE.decode(data.as_bytes()))
        .ok()?;
    String::from_utf8(bytes).ok()
}

/// API response for message list.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageListResponse {
    #[serde(default)]
    pub messages: Vec<MessageRef>,
    pub next_page_token: Option<String>,
    pub result_size_estimate: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRef {
    pub id: String,
    pub thread_id: String,
}
