//! Log store client

use batchsync_core::dto::log::{GetLogEventsRequest, GetLogEventsResponse};
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;

use crate::error::Result;
use crate::handle_response;

const TARGET_HEADER: &str = "X-Amz-Target";
const TARGET_PREFIX: &str = "Logs_20140328";
const JSON_1_1: &str = "application/x-amz-json-1.1";

/// HTTP client for the log store
///
/// Operations are `POST /` with the operation named in a target header.
#[derive(Debug, Clone)]
pub struct LogsClient {
    base_url: String,
    client: Client,
}

impl LogsClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch one page of events from a log stream
    ///
    /// A missing stream surfaces as [`crate::ClientError::NotFound`].
    pub async fn get_log_events(&self, req: &GetLogEventsRequest) -> Result<GetLogEventsResponse> {
        let url = format!("{}/", self.base_url);
        tracing::debug!(
            "GetLogEvents {}/{} (token: {:?})",
            req.log_group_name,
            req.log_stream_name,
            req.next_token
        );

        let response = self
            .client
            .post(&url)
            .header(TARGET_HEADER, format!("{}.GetLogEvents", TARGET_PREFIX))
            .header(CONTENT_TYPE, JSON_1_1)
            .body(serde_json::to_vec(req).map_err(|e| {
                crate::ClientError::InvalidRequest(format!("Failed to encode request: {}", e))
            })?)
            .send()
            .await?;

        handle_response(response).await
    }
}
