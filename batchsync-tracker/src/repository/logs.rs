//! Log store repository

use async_trait::async_trait;
use batchsync_client::{LogsClient, Result};
use batchsync_core::dto::log::{GetLogEventsRequest, GetLogEventsResponse};

/// Repository trait for the log store
#[async_trait]
pub trait LogRepository: Send + Sync {
    /// Fetches one page of events from a log stream
    ///
    /// A stream that does not exist yet is reported as a not-found error;
    /// interpreting that is left to the caller.
    async fn get_log_events(&self, req: GetLogEventsRequest) -> Result<GetLogEventsResponse>;
}

#[async_trait]
impl LogRepository for LogsClient {
    async fn get_log_events(&self, req: GetLogEventsRequest) -> Result<GetLogEventsResponse> {
        LogsClient::get_log_events(self, &req).await
    }
}
