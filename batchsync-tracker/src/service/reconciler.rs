//! Job definition reconciler
//!
//! Makes the latest remote revision of a job definition match a local
//! declaration:
//! 1. Fetch the highest active revision for the name
//! 2. Compare it with the local declaration, ignoring server-managed fields
//! 3. If equivalent, use it as is
//! 4. Otherwise register a new revision, wait for the service to settle,
//!    re-read and verify once
//!
//! The service offers no read-after-write consistency for definitions,
//! hence the settle wait. There is exactly one settle-and-recheck; a
//! mismatch after it is fatal.
//!
//! Concurrent reconciliation of the same name from several callers is not
//! coordinated here. The remote service is the only serialization point;
//! callers that need more must serialize themselves.

use std::sync::Arc;
use std::time::Duration;

use batchsync_core::domain::job_definition::{JobDefinition, LocalJobDefinition};
use serde_json::Value;
use tokio::time;
use tracing::{debug, error, info};

use crate::config::TrackerConfig;
use crate::error::{Result, TrackerError};
use crate::repository::JobRepository;

/// Brings remote job definitions in line with local declarations
pub struct DefinitionReconciler {
    jobs: Arc<dyn JobRepository>,
    settle_interval: Duration,
}

impl DefinitionReconciler {
    /// Creates a new reconciler
    ///
    /// # Arguments
    /// * `jobs` - The job execution service
    /// * `settle_interval` - Wait between registering and re-reading
    pub fn new(jobs: Arc<dyn JobRepository>, settle_interval: Duration) -> Self {
        Self {
            jobs,
            settle_interval,
        }
    }

    pub fn from_config(jobs: Arc<dyn JobRepository>, config: &TrackerConfig) -> Self {
        Self::new(jobs, config.settle_interval)
    }

    /// Returns the ARN-bearing remote definition matching `local`
    ///
    /// Registers a new revision only when the latest one differs.
    ///
    /// # Errors
    /// * `DefinitionNotFound` - no active revision exists for the name
    /// * `UnsupportedPagination` - the listing spans several pages
    /// * `ReconciliationDivergence` - the re-read still differs after registering
    pub async fn reconcile(&self, local: &LocalJobDefinition) -> Result<JobDefinition> {
        let name = local.name();
        let remote = self.fetch_latest(name).await?;

        if remote.is_equivalent(local.definition()) {
            info!(
                "Job definition '{}' is up to date at revision {}, skipping update",
                name,
                revision_label(&remote)
            );
            return Ok(remote);
        }

        info!(
            "Job definition '{}' differs from revision {}, registering a new revision",
            name,
            revision_label(&remote)
        );
        debug!("Remote definition:\n{:#}", pretty(&remote));
        debug!("Local definition:\n{:#}", pretty(local.definition()));

        let registered = self.jobs.register_job_definition(local).await?;
        info!(
            "Registered job definition {} (revision {})",
            registered.job_definition_arn, registered.revision
        );

        debug!(
            "Waiting {:?} for the registration to become visible",
            self.settle_interval
        );
        time::sleep(self.settle_interval).await;

        let refreshed = self.fetch_latest(name).await?;
        if !refreshed.is_equivalent(local.definition()) {
            error!(
                "Job definition '{}' still differs after registering revision {}",
                name, registered.revision
            );
            error!("Local definition:\n{:#}", pretty(local.definition()));
            error!("Remote definition:\n{:#}", pretty(&refreshed));
            return Err(TrackerError::ReconciliationDivergence {
                local: Box::new(local.definition().clone()),
                remote: Box::new(refreshed),
            });
        }

        Ok(refreshed)
    }

    /// Fetches the highest active revision of a definition
    pub async fn fetch_latest(&self, name: &str) -> Result<JobDefinition> {
        let page = self.jobs.describe_job_definitions(name).await?;

        if page.has_more() {
            return Err(TrackerError::UnsupportedPagination(format!(
                "Describing job definition '{}'",
                name
            )));
        }

        page.latest()
            .cloned()
            .ok_or_else(|| TrackerError::DefinitionNotFound(name.to_string()))
    }
}

fn revision_label(definition: &JobDefinition) -> String {
    definition
        .revision
        .map(|r| r.to_string())
        .unwrap_or_else(|| "?".to_string())
}

fn pretty(definition: &JobDefinition) -> Value {
    Value::Object(definition.content())
}
