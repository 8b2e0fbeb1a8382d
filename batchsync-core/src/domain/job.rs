//! Job run domain types

use serde::{Deserialize, Serialize};

/// One execution of a job definition
///
/// Created by a successful submission. Status is owned by the remote
/// service; the tracker only observes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRun {
    pub job_id: String,
    pub job_name: String,
    #[serde(default)]
    pub job_queue: Option<String>,
    /// ARN of the definition revision the run was submitted against
    #[serde(default)]
    pub job_definition: Option<String>,
    pub status: JobStatus,
    #[serde(default)]
    pub status_reason: Option<String>,
    #[serde(default)]
    pub container: Option<ContainerDetail>,
}

/// Container section of a job run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerDetail {
    #[serde(default)]
    pub command: Vec<String>,
    #[serde(default)]
    pub log_stream_name: Option<String>,
    #[serde(default)]
    pub exit_code: Option<i32>,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Job run status as reported by the remote service
///
/// `Submitted`, `Pending`, `Runnable` and `Starting` are all "not yet
/// running, not terminal" and are treated alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Submitted,
    Pending,
    Runnable,
    Starting,
    Running,
    Succeeded,
    Failed,
}

impl JobStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Succeeded | JobStatus::Failed)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            JobStatus::Submitted => "SUBMITTED",
            JobStatus::Pending => "PENDING",
            JobStatus::Runnable => "RUNNABLE",
            JobStatus::Starting => "STARTING",
            JobStatus::Running => "RUNNING",
            JobStatus::Succeeded => "SUCCEEDED",
            JobStatus::Failed => "FAILED",
        };
        write!(f, "{}", s)
    }
}

impl JobRun {
    /// Log stream the run writes to, once the service has assigned one
    pub fn log_stream_name(&self) -> Option<&str> {
        self.container
            .as_ref()
            .and_then(|c| c.log_stream_name.as_deref())
            .filter(|name| !name.is_empty())
    }

    /// Human-readable failure reason
    ///
    /// Prefers the run-level status reason, then the container reason.
    pub fn failure_reason(&self) -> &str {
        self.status_reason
            .as_deref()
            .filter(|r| !r.is_empty())
            .or_else(|| {
                self.container
                    .as_ref()
                    .and_then(|c| c.reason.as_deref())
                    .filter(|r| !r.is_empty())
            })
            .unwrap_or("unknown")
    }
}
