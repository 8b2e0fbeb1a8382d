//! Error types for reconciliation and tracking

use batchsync_client::ClientError;
use batchsync_core::domain::job::JobStatus;
use batchsync_core::domain::job_definition::JobDefinition;
use thiserror::Error;

/// Result type alias for tracker operations
pub type Result<T> = std::result::Result<T, TrackerError>;

/// Errors surfaced by the reconciler, the submitter and the tracker
///
/// None of these are retried internally. Collaborator errors pass through
/// unchanged as [`TrackerError::Service`].
#[derive(Debug, Error)]
pub enum TrackerError {
    /// No active remote definition exists under this name
    #[error("Job definition not found: {0}")]
    DefinitionNotFound(String),

    /// Local and remote definitions still differ after settle-and-recheck
    #[error(
        "Job definition '{}' still differs from the local declaration after registering a new revision",
        .local.name
    )]
    ReconciliationDivergence {
        local: Box<JobDefinition>,
        remote: Box<JobDefinition>,
    },

    /// A status query for one identifier returned several runs
    #[error("Expected exactly one job for id {job_id}, got {count}")]
    MultipleJobsMatched { job_id: String, count: usize },

    /// A status query returned no run at all
    #[error("Job not found: {0}")]
    JobNotFound(String),

    /// A listing returned a continuation token we do not follow
    #[error("{0} returned more than one page of results, which is not supported")]
    UnsupportedPagination(String),

    /// Submission needs an ARN-bearing definition
    #[error("Job definition '{0}' has no ARN; reconcile it before submitting")]
    MissingArn(String),

    /// The tracked run ended in FAILED
    #[error("Job [{job_name} - {job_id}] {status}: {reason}")]
    JobFailed {
        job_name: String,
        job_id: String,
        status: JobStatus,
        reason: String,
    },

    /// Error from the job execution service or the log store
    #[error(transparent)]
    Service(#[from] ClientError),
}

impl TrackerError {
    /// Whether this error reports a failed run rather than a fault
    pub fn is_job_failure(&self) -> bool {
        matches!(self, TrackerError::JobFailed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_failed_message_names_run() {
        let err = TrackerError::JobFailed {
            job_name: "example".to_string(),
            job_id: "a1b2".to_string(),
            status: JobStatus::Failed,
            reason: "Essential container in task exited".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Job [example - a1b2] FAILED: Essential container in task exited"
        );
        assert!(err.is_job_failure());
    }

    #[test]
    fn test_service_errors_pass_through() {
        let err: TrackerError = ClientError::api_error(500, "boom").into();
        assert_eq!(err.to_string(), "API error (status 500): boom");
        assert!(!err.is_job_failure());
    }
}
