//! Log page fetcher
//!
//! Reads a log stream head-first (oldest first) and follows forward tokens
//! until the store stops handing out new ones. Head-first order is what
//! keeps timestamps monotonic for the cursor.

use std::sync::Arc;

use batchsync_core::domain::log::LogEvent;
use batchsync_core::dto::log::{GetLogEventsRequest, GetLogEventsResponse};
use tracing::debug;

use crate::config::TrackerConfig;
use crate::error::Result;
use crate::repository::LogRepository;
use crate::tracking::TrackingCursor;

/// Events fetched by one [`LogFetcher::fetch_logs_since`] call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogBatch {
    /// Largest timestamp seen, or the requested start when nothing came back
    pub last_timestamp: i64,
    /// Events in stream order
    pub events: Vec<LogEvent>,
}

/// Pulls log events for a run's stream
pub struct LogFetcher {
    logs: Arc<dyn LogRepository>,
    log_group: String,
    limit: Option<u32>,
}

impl LogFetcher {
    /// Creates a fetcher for streams in `log_group`
    ///
    /// # Arguments
    /// * `logs` - The log store
    /// * `log_group` - Log group holding the streams
    /// * `limit` - Optional page size for every request
    pub fn new(logs: Arc<dyn LogRepository>, log_group: impl Into<String>, limit: Option<u32>) -> Self {
        Self {
            logs,
            log_group: log_group.into(),
            limit,
        }
    }

    pub fn from_config(logs: Arc<dyn LogRepository>, config: &TrackerConfig) -> Self {
        Self::new(logs, config.log_group.clone(), config.max_log_lines)
    }

    /// Fetches every event at or after `since`, across as many pages as needed
    ///
    /// A stream that does not exist yet yields an empty batch. Paging stops
    /// when the forward token is missing, empty, or equal to the one just
    /// sent (the store's end-of-stream signal).
    pub async fn fetch_logs_since(&self, stream: &str, since: i64) -> Result<LogBatch> {
        let mut req = GetLogEventsRequest {
            log_group_name: self.log_group.clone(),
            log_stream_name: stream.to_string(),
            start_time: Some(since),
            start_from_head: true,
            next_token: None,
            limit: self.limit,
        };
        let mut batch = LogBatch {
            last_timestamp: since,
            events: Vec::new(),
        };

        loop {
            let Some(page) = self.get_page(&req).await? else {
                debug!("Log stream {} does not exist yet", stream);
                break;
            };

            for event in page.events {
                batch.last_timestamp = batch.last_timestamp.max(event.timestamp);
                batch.events.push(event);
            }

            match page.next_forward_token.filter(|t| !t.is_empty()) {
                Some(token) if req.next_token.as_deref() != Some(token.as_str()) => {
                    debug!("Following forward token for {}", stream);
                    req.next_token = Some(token);
                }
                _ => break,
            }
        }

        Ok(batch)
    }

    /// Fetches what the cursor has not delivered yet and advances it
    pub async fn fetch_new_events(
        &self,
        stream: &str,
        cursor: &mut TrackingCursor,
    ) -> Result<Vec<LogEvent>> {
        let batch = self.fetch_logs_since(stream, cursor.timestamp()).await?;
        Ok(cursor.admit(batch.events))
    }

    /// Fetches the most recent page of a stream, newest page first
    ///
    /// Independent of any cursor. A missing stream yields no events.
    pub async fn fetch_log_tail(&self, stream: &str) -> Result<Vec<LogEvent>> {
        let req = GetLogEventsRequest {
            log_group_name: self.log_group.clone(),
            log_stream_name: stream.to_string(),
            start_time: None,
            start_from_head: false,
            next_token: None,
            limit: self.limit,
        };

        Ok(self
            .get_page(&req)
            .await?
            .map(|page| page.events)
            .unwrap_or_default())
    }

    /// One request; `None` when the stream is not there
    async fn get_page(&self, req: &GetLogEventsRequest) -> Result<Option<GetLogEventsResponse>> {
        match self.logs.get_log_events(req.clone()).await {
            Ok(page) => Ok(Some(page)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
