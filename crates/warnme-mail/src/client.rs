//! Read-only Gmail API client.

use tracing::instrument;

use crate::error::MailError;
use crate::query::SearchQuery;
use crate::types::*;

const GMAIL_API_BASE: &str = "https://gmail.googleapis.com";
const PAGE_SIZE: usize = 50;

pub struct GmailClient {
    client: reqwest::Client,
    access_token: String,
    base_url: String,
}

impl GmailClient {
    pub fn new(access_token: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            access_token: access_token.to_string(),
            base_url: GMAIL_API_BASE.to_string(),
        }
    }

    #[cfg(test)]
    pub fn new_with_base_url(access_token: &str, base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            access_token: access_token.to_string(),
            base_url: base_url.to_string(),
        }
    }

    fn auth_header(&self) -> String {
        format!("Bearer {}", self.access_token)
    }

    /// List message IDs (metadata only, not full messages).
    #[instrument(skip(self), level = "info")]
    pub async fn list_message_ids(
        &self,
        query: Option<&str>,
        page_token: Option<&str>,
    ) -> Result<MessageListResponse, MailError> {
        let mut url = format!("{}/gmail/v1/users/me/messages", self.base_url);
        let mut params = vec![];

        if let Some(q) = query {
            params.push(format!("q={}", urlencoding::encode(q)));
        }
        if let Some(pt) = page_token {
            params.push(format!("pageToken={}", pt));
        }
        params.push(format!("maxResults={}", PAGE_SIZE));

        if !params.is_empty() {
            url = format!("{}?{}", url, params.join("&"));
        }

        let response =
            self.client.get(&url).header("Authorization", self.auth_header()).send().await?;

        self.handle_response(response).await
    }

    /// Get a single message with full details.
    #[instrument(skip(self), level = "info")]
    pub async fn get_message(&self, message_id: &str) -> Result<EmailRecord, MailError> {
        let url =
            format!("{}/gmail/v1/users/me/messages/{}?format=full", self.base_url, message_id);

        let response =
            self.client.get(&url).header("Authorization", self.auth_header()).send().await?;

        let api_msg: ApiMessage = self.handle_response(response).await?;
        Ok(EmailRecord::from_api(api_msg))
    }

    /// Run a search and load each matching message in full.
    ///
    /// Pages through the listing until `max_results` records are loaded
    /// or the mailbox runs out of matches.
    #[instrument(skip(self), level = "info")]
    pub async fn search(
        &self,
        query: &SearchQuery,
        max_results: usize,
    ) -> Result<Vec<EmailRecord>, MailError> {
        let query_string = query.to_query_string();
        let query_param = (!query_string.is_empty()).then_some(query_string.as_str());

        let mut records = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let page = self.list_message_ids(query_param, page_token.as_deref()).await?;

            for message_ref in &page.messages {
                if records.len() >= max_results {
                    break;
                }
                records.push(self.get_message(&message_ref.id).await?);
            }

            page_token = page.next_page_token;
            if page_token.is_none() || records.len() >= max_results {
                break;
            }
        }

        tracing::info!("Loaded {} messages", records.len());
        Ok(records)
    }

    /// Helper to handle API responses and errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, MailError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| MailError::ApiError(format!("JSON parse error: {}", e)))
        } else if status.as_u16() == 401 {
            Err(MailError::TokenExpired)
        } else if status.as_u16() == 403 {
            Err(MailError::AuthRequired)
        } else if status.as_u16() == 404 {
            let text = response.text().await.unwrap_or_default();
            Err(MailError::MessageNotFound(text))
        } else if status.as_u16() == 429 {
            // Extract retry-after if available
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            Err(MailError::RateLimited(retry_after))
        } else {
            let text = response.text().await.unwrap_or_default();
            Err(MailError::ApiError(format!("{}: {}", status, text)))
        }
    }
}
