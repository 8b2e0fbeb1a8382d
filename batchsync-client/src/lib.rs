//! Batchsync HTTP Clients
//!
//! Thin, typed adapters for the two remote services batchsync depends on:
//!
//! - [`BatchClient`]: the job execution service (definitions, submission, status)
//! - [`LogsClient`]: the log store (paginated log events)
//!
//! Both speak JSON over HTTP and return the DTOs from `batchsync-core`.
//! Request signing is not handled here; inject a pre-configured
//! `reqwest::Client` through `with_client`, or point the base URL at a
//! signing proxy or a local emulator.
//!
//! # Example
//!
//! ```no_run
//! use batchsync_client::BatchClient;
//! use batchsync_core::dto::job_definition::DescribeJobDefinitionsRequest;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), batchsync_client::ClientError> {
//!     let client = BatchClient::new("http://localhost:4566");
//!
//!     let page = client
//!         .describe_job_definitions(&DescribeJobDefinitionsRequest::active("my-job"))
//!         .await?;
//!
//!     println!("Found {} revision(s)", page.job_definitions.len());
//!     Ok(())
//! }
//! ```

pub mod error;
mod job_definitions;
mod jobs;
mod logs;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use logs::LogsClient;

use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// HTTP client for the job execution service
///
/// Every operation is a `POST` of a JSON body to a `/v1/<operation>` path:
/// - Job definitions (describe, register)
/// - Jobs (submit, describe)
#[derive(Debug, Clone)]
pub struct BatchClient {
    /// Base URL of the service (e.g., "https://batch.us-east-1.amazonaws.com")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl BatchClient {
    /// Create a new job execution service client
    ///
    /// # Example
    /// ```
    /// use batchsync_client::BatchClient;
    ///
    /// let client = BatchClient::new("http://localhost:4566");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new client around a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings or
    /// default headers (credentials) on the transport.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the service
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST a JSON request to `/v1/{operation}` and decode the JSON response
    async fn call<Req, T>(&self, operation: &str, req: &Req) -> Result<T>
    where
        Req: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}/v1/{}", self.base_url, operation);
        tracing::debug!("POST {}", url);

        let response = self.client.post(&url).json(req).send().await?;

        handle_response(response).await
    }
}

// =============================================================================
// Response Handlers
// =============================================================================

/// Check the status code and deserialize the JSON body
///
/// Non-success responses are classified by [`ClientError::from_response`].
pub(crate) async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();

    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(ClientError::from_response(status.as_u16(), error_text));
    }

    response
        .json()
        .await
        .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = BatchClient::new("http://localhost:4566");
        assert_eq!(client.base_url(), "http://localhost:4566");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = BatchClient::new("http://localhost:4566/");
        assert_eq!(client.base_url(), "http://localhost:4566");
    }

    #[test]
    fn test_client_with_custom_client() {
        let client = BatchClient::with_client("http://localhost:4566", Client::new());
        assert_eq!(client.base_url(), "http://localhost:4566");
    }
}
