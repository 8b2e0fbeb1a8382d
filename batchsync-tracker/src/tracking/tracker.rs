//! Job tracker
//!
//! Polls one run until it reaches a terminal status. While the run is
//! RUNNING, each cycle pulls the log lines written since the previous
//! cycle. On FAILED it waits a grace period, prints the tail of the log and
//! reports the failure according to the configured policy.

use std::sync::Arc;

use batchsync_core::domain::job::{JobRun, JobStatus};
use tokio::time;
use tracing::{debug, info, warn};

use crate::config::{FailurePolicy, TrackerConfig};
use crate::error::{Result, TrackerError};
use crate::repository::{JobRepository, LogRepository};
use crate::tracking::{LogFetcher, TrackerSink, TrackingCursor};

/// How a tracked run ended
#[derive(Debug, Clone, PartialEq)]
pub enum TrackingOutcome {
    Succeeded(JobRun),
    Failed { run: JobRun, reason: String },
}

impl TrackingOutcome {
    pub fn run(&self) -> &JobRun {
        match self {
            TrackingOutcome::Succeeded(run) => run,
            TrackingOutcome::Failed { run, .. } => run,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, TrackingOutcome::Succeeded(_))
    }

    /// Turns a failed outcome into [`TrackerError::JobFailed`]
    pub fn into_result(self) -> Result<JobRun> {
        match self {
            TrackingOutcome::Succeeded(run) => Ok(run),
            TrackingOutcome::Failed { run, reason } => Err(TrackerError::JobFailed {
                job_name: run.job_name,
                job_id: run.job_id,
                status: run.status,
                reason,
            }),
        }
    }
}

/// Polling tracker for a single run
///
/// Each `follow`/`track` call owns a fresh [`TrackingCursor`]; nothing is
/// shared between calls or between trackers.
pub struct JobTracker {
    jobs: Arc<dyn JobRepository>,
    fetcher: LogFetcher,
    config: TrackerConfig,
}

impl JobTracker {
    /// Creates a new job tracker
    pub fn new(
        jobs: Arc<dyn JobRepository>,
        logs: Arc<dyn LogRepository>,
        config: TrackerConfig,
    ) -> Self {
        let fetcher = LogFetcher::from_config(logs, &config);
        Self {
            jobs,
            fetcher,
            config,
        }
    }

    pub fn fetcher(&self) -> &LogFetcher {
        &self.fetcher
    }

    /// Tracks a run and applies the configured failure policy
    ///
    /// Under [`FailurePolicy::Raise`] a FAILED run becomes
    /// `Err(TrackerError::JobFailed)`; the sink has already received the
    /// failure reason and the log tail by then.
    pub async fn track(&self, job_id: &str, sink: &mut dyn TrackerSink) -> Result<TrackingOutcome> {
        let outcome = self.follow(job_id, sink).await?;

        match self.config.failure_policy {
            FailurePolicy::Raise => outcome.into_result().map(TrackingOutcome::Succeeded),
            FailurePolicy::Report => Ok(outcome),
        }
    }

    /// Tracks a run until it is terminal and reports how it ended
    ///
    /// A FAILED run is an `Ok` outcome here; only faults are errors.
    pub async fn follow(&self, job_id: &str, sink: &mut dyn TrackerSink) -> Result<TrackingOutcome> {
        info!(
            "Tracking job {} (poll interval: {:?})",
            job_id, self.config.poll_interval
        );

        let mut cursor = TrackingCursor::new();

        loop {
            let run = self.describe_run(job_id).await?;
            debug!("Job {} is {}", job_id, run.status);

            // SUCCEEDED gets one last drain for lines written after the
            // previous RUNNING poll.
            if matches!(run.status, JobStatus::Running | JobStatus::Succeeded) {
                if let Some(stream) = run.log_stream_name() {
                    let events = self.fetcher.fetch_new_events(stream, &mut cursor).await?;
                    if !events.is_empty() {
                        debug!("Fetched {} new log event(s) for job {}", events.len(), job_id);
                    }
                    for event in &events {
                        sink.log_event(event);
                    }
                }
            }

            sink.heartbeat(&run);

            match run.status {
                JobStatus::Succeeded => {
                    info!("Job [{} - {}] succeeded", run.job_name, run.job_id);
                    return Ok(TrackingOutcome::Succeeded(run));
                }
                JobStatus::Failed => {
                    let reason = run.failure_reason().to_string();
                    warn!("Job [{} - {}] failed: {}", run.job_name, run.job_id, reason);
                    sink.failure(&run, &reason);

                    // Trailing output takes a while to reach the log store
                    time::sleep(self.config.failure_grace_period).await;

                    if let Some(stream) = run.log_stream_name() {
                        let tail = self.fetcher.fetch_log_tail(stream).await?;
                        sink.tail(&tail);
                    }

                    return Ok(TrackingOutcome::Failed { run, reason });
                }
                _ => {}
            }

            time::sleep(self.config.poll_interval).await;
        }
    }

    /// Describes exactly one run
    async fn describe_run(&self, job_id: &str) -> Result<JobRun> {
        let mut runs = self.jobs.describe_jobs(&[job_id.to_string()]).await?;

        match runs.len() {
            0 => Err(TrackerError::JobNotFound(job_id.to_string())),
            1 => Ok(runs.remove(0)),
            count => Err(TrackerError::MultipleJobsMatched {
                job_id: job_id.to_string(),
                count,
            }),
        }
    }
}
