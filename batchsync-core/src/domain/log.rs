//! Log domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single line of job output from the log store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEvent {
    /// Epoch milliseconds
    pub timestamp: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingestion_time: Option<i64>,
}

impl LogEvent {
    pub fn new(timestamp: i64, message: impl Into<String>) -> Self {
        Self {
            timestamp,
            message: message.into(),
            ingestion_time: None,
        }
    }

    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }

    /// Renders as `[2024-01-02T03:04:05.678Z] message`
    pub fn render(&self) -> String {
        match self.datetime() {
            Some(at) => format!(
                "[{}] {}",
                at.format("%Y-%m-%dT%H:%M:%S%.3fZ"),
                self.message
            ),
            None => format!("[{}] {}", self.timestamp, self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_millisecond_precision() {
        let event = LogEvent::new(1_704_164_645_678, "hello");
        assert_eq!(event.render(), "[2024-01-02T03:04:05.678Z] hello");
    }

    #[test]
    fn test_render_pads_whole_seconds() {
        let event = LogEvent::new(0, "epoch");
        assert_eq!(event.render(), "[1970-01-01T00:00:00.000Z] epoch");
    }
}
