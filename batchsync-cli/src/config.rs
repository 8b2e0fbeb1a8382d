//! Configuration module
//!
//! Service endpoints plus the tracker settings read from the environment.

use std::sync::Arc;

use anyhow::Result;
use batchsync_client::{BatchClient, LogsClient};
use batchsync_tracker::{DefinitionReconciler, JobTracker, TrackerConfig};

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the job execution service
    pub batch_url: String,

    /// URL of the log store
    pub logs_url: String,

    /// Intervals, log group and failure policy
    pub tracker: TrackerConfig,
}

impl Config {
    /// Builds the configuration and validates the tracker settings
    pub fn load(batch_url: String, logs_url: String) -> Result<Self> {
        let tracker = TrackerConfig::from_env();
        tracker.validate()?;

        Ok(Self {
            batch_url,
            logs_url,
            tracker,
        })
    }

    pub fn batch_client(&self) -> Arc<BatchClient> {
        Arc::new(BatchClient::new(&self.batch_url))
    }

    pub fn logs_client(&self) -> Arc<LogsClient> {
        Arc::new(LogsClient::new(&self.logs_url))
    }

    pub fn reconciler(&self) -> DefinitionReconciler {
        DefinitionReconciler::from_config(self.batch_client(), &self.tracker)
    }

    /// Tracker wired to both services with the given settings
    pub fn job_tracker(&self, tracker: TrackerConfig) -> JobTracker {
        JobTracker::new(self.batch_client(), self.logs_client(), tracker)
    }
}
