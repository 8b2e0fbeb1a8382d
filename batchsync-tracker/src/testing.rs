//! In-memory fakes of the remote services for unit tests

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use batchsync_client::{ClientError, Result};
use batchsync_core::domain::job::{ContainerDetail, JobRun, JobStatus};
use batchsync_core::domain::job_definition::{JobDefinition, LocalJobDefinition};
use batchsync_core::domain::log::LogEvent;
use batchsync_core::dto::job::{SubmitJobRequest, SubmitJobResponse};
use batchsync_core::dto::job_definition::{JobDefinitionPage, RegisteredJobDefinition};
use batchsync_core::dto::log::{GetLogEventsRequest, GetLogEventsResponse};
use serde_json::json;

use crate::config::TrackerConfig;
use crate::repository::{JobRepository, LogRepository};
use crate::tracking::TrackerSink;

pub const JOB_ID: &str = "run-1";
pub const JOB_NAME: &str = "example";
pub const STREAM: &str = "example/default/run-1";

/// Config with every wait set to zero
pub fn instant_config() -> TrackerConfig {
    TrackerConfig {
        poll_interval: Duration::ZERO,
        failure_grace_period: Duration::ZERO,
        settle_interval: Duration::ZERO,
        ..TrackerConfig::default()
    }
}

pub fn local_definition(image: &str) -> LocalJobDefinition {
    LocalJobDefinition::from_json(
        &json!({
            "jobDefinitionName": "x",
            "type": "container",
            "containerProperties": { "image": image, "command": ["run"] }
        })
        .to_string(),
    )
    .unwrap()
}

pub fn remote_definition(image: &str, revision: u32) -> JobDefinition {
    serde_json::from_value(json!({
        "jobDefinitionName": "x",
        "jobDefinitionArn": arn("x", revision),
        "revision": revision,
        "status": "ACTIVE",
        "type": "container",
        "containerProperties": {
            "image": image,
            "command": ["run"],
            "volumes": [],
            "environment": [],
            "mountPoints": []
        },
        "parameters": {}
    }))
    .unwrap()
}

pub fn arn(name: &str, revision: u32) -> String {
    format!(
        "arn:aws:batch:us-east-1:123456789012:job-definition/{}:{}",
        name, revision
    )
}

pub fn events(items: &[(i64, &str)]) -> Vec<LogEvent> {
    items
        .iter()
        .map(|(ts, msg)| LogEvent::new(*ts, *msg))
        .collect()
}

// =============================================================================
// Log store
// =============================================================================

/// Paginating log store
///
/// Forward tokens encode the offset of the next event, so a token that
/// reaches the end of a stream comes back unchanged.
pub struct FakeLogStore {
    state: Mutex<LogStoreState>,
}

struct LogStoreState {
    streams: HashMap<String, Vec<LogEvent>>,
    page_size: usize,
    requests: Vec<GetLogEventsRequest>,
}

impl FakeLogStore {
    pub fn new(page_size: usize) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(LogStoreState {
                streams: HashMap::new(),
                page_size,
                requests: Vec::new(),
            }),
        })
    }

    /// Appends events; a stream only comes into existence with its first event
    pub fn push(&self, stream: &str, new_events: Vec<LogEvent>) {
        if new_events.is_empty() {
            return;
        }
        let mut state = self.state.lock().unwrap();
        state
            .streams
            .entry(stream.to_string())
            .or_default()
            .extend(new_events);
    }

    pub fn requests(&self) -> Vec<GetLogEventsRequest> {
        self.state.lock().unwrap().requests.clone()
    }
}

#[async_trait]
impl LogRepository for FakeLogStore {
    async fn get_log_events(&self, req: GetLogEventsRequest) -> Result<GetLogEventsResponse> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(req.clone());

        let page_size = req
            .limit
            .map(|l| l as usize)
            .unwrap_or(state.page_size)
            .min(state.page_size);

        let stream = state
            .streams
            .get(&req.log_stream_name)
            .ok_or_else(|| ClientError::NotFound(req.log_stream_name.clone()))?;

        if !req.start_from_head {
            let start = stream.len().saturating_sub(page_size);
            return Ok(GetLogEventsResponse {
                events: stream[start..].to_vec(),
                next_forward_token: Some(format!("f/{}", stream.len())),
                next_backward_token: Some(format!("b/{}", start)),
            });
        }

        let offset = match req.next_token.as_deref() {
            Some(token) => token
                .strip_prefix("f/")
                .and_then(|n| n.parse::<usize>().ok())
                .unwrap_or(0),
            None => {
                let since = req.start_time.unwrap_or(0);
                stream
                    .iter()
                    .position(|e| e.timestamp >= since)
                    .unwrap_or(stream.len())
            }
        };
        let end = (offset + page_size).min(stream.len());

        Ok(GetLogEventsResponse {
            events: stream[offset..end].to_vec(),
            next_forward_token: Some(format!("f/{}", end)),
            next_backward_token: Some(format!("b/{}", offset)),
        })
    }
}

// =============================================================================
// Job execution service
// =============================================================================

/// One scripted status observation
pub struct PollStep {
    pub status: JobStatus,
    /// Events that land in the run's log stream at this observation
    pub events: Vec<LogEvent>,
    pub reason: Option<String>,
}

impl PollStep {
    pub fn new(status: JobStatus) -> Self {
        Self {
            status,
            events: Vec::new(),
            reason: None,
        }
    }

    pub fn with_events(mut self, items: &[(i64, &str)]) -> Self {
        self.events = events(items);
        self
    }

    pub fn with_reason(mut self, reason: &str) -> Self {
        self.reason = Some(reason.to_string());
        self
    }
}

#[derive(Default)]
pub struct JobServiceState {
    pub definitions: Vec<JobDefinition>,
    pub definitions_next_token: Option<String>,
    /// Registrations succeed but never become visible to describe
    pub ignore_registrations: bool,
    pub registrations: Vec<LocalJobDefinition>,
    pub describe_definition_calls: usize,

    pub submissions: Vec<SubmitJobRequest>,

    pub script: VecDeque<PollStep>,
    pub last_status: Option<(JobStatus, Option<String>)>,
    pub describe_job_calls: usize,
    pub matches_per_query: usize,
}

/// Scripted job execution service
///
/// Each `describe_jobs` call consumes one [`PollStep`]; once the script
/// runs out, the last status repeats.
pub struct FakeJobService {
    pub state: Mutex<JobServiceState>,
    logs: Option<Arc<FakeLogStore>>,
}

impl FakeJobService {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(JobServiceState {
                matches_per_query: 1,
                ..Default::default()
            }),
            logs: None,
        })
    }

    pub fn with_definitions(definitions: Vec<JobDefinition>) -> Arc<Self> {
        let service = Self::new();
        service.state.lock().unwrap().definitions = definitions;
        service
    }

    pub fn scripted(steps: Vec<PollStep>, logs: Arc<FakeLogStore>) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(JobServiceState {
                script: steps.into(),
                matches_per_query: 1,
                ..Default::default()
            }),
            logs: Some(logs),
        })
    }

    pub fn registration_count(&self) -> usize {
        self.state.lock().unwrap().registrations.len()
    }

    pub fn describe_definition_calls(&self) -> usize {
        self.state.lock().unwrap().describe_definition_calls
    }

    pub fn describe_job_calls(&self) -> usize {
        self.state.lock().unwrap().describe_job_calls
    }
}

#[async_trait]
impl JobRepository for FakeJobService {
    async fn describe_job_definitions(&self, name: &str) -> Result<JobDefinitionPage> {
        let mut state = self.state.lock().unwrap();
        state.describe_definition_calls += 1;

        Ok(JobDefinitionPage {
            job_definitions: state
                .definitions
                .iter()
                .filter(|d| d.name == name)
                .cloned()
                .collect(),
            next_token: state.definitions_next_token.clone(),
        })
    }

    async fn register_job_definition(
        &self,
        definition: &LocalJobDefinition,
    ) -> Result<RegisteredJobDefinition> {
        let mut state = self.state.lock().unwrap();
        state.registrations.push(definition.clone());

        let revision = state
            .definitions
            .iter()
            .filter(|d| d.name == definition.name())
            .filter_map(|d| d.revision)
            .max()
            .unwrap_or(0)
            + 1;
        let arn = arn(definition.name(), revision);

        if !state.ignore_registrations {
            let mut stored = definition.definition().clone();
            stored.arn = Some(arn.clone());
            stored.revision = Some(revision);
            stored.status = Some("ACTIVE".to_string());
            state.definitions.push(stored);
        }

        Ok(RegisteredJobDefinition {
            job_definition_name: definition.name().to_string(),
            job_definition_arn: arn,
            revision,
        })
    }

    async fn submit_job(&self, req: SubmitJobRequest) -> Result<SubmitJobResponse> {
        let mut state = self.state.lock().unwrap();
        let response = SubmitJobResponse {
            job_id: uuid::Uuid::new_v4().to_string(),
            job_name: req.job_name.clone(),
            job_arn: None,
        };
        state.submissions.push(req);
        Ok(response)
    }

    async fn describe_jobs(&self, job_ids: &[String]) -> Result<Vec<JobRun>> {
        let mut state = self.state.lock().unwrap();
        state.describe_job_calls += 1;

        if job_ids.first().map(String::as_str) != Some(JOB_ID) {
            return Ok(Vec::new());
        }

        let (status, reason) = match state.script.pop_front() {
            Some(step) => {
                if let Some(logs) = &self.logs {
                    logs.push(STREAM, step.events);
                }
                let observed = (step.status, step.reason);
                state.last_status = Some(observed.clone());
                observed
            }
            None => state
                .last_status
                .clone()
                .unwrap_or((JobStatus::Submitted, None)),
        };

        let has_stream = matches!(
            status,
            JobStatus::Running | JobStatus::Succeeded | JobStatus::Failed
        );
        let run = JobRun {
            job_id: JOB_ID.to_string(),
            job_name: JOB_NAME.to_string(),
            job_queue: Some("queue".to_string()),
            job_definition: Some(arn("x", 1)),
            status,
            status_reason: reason,
            container: Some(ContainerDetail {
                command: vec!["run".to_string()],
                log_stream_name: has_stream.then(|| STREAM.to_string()),
                exit_code: None,
                reason: None,
            }),
        };

        Ok(vec![run; state.matches_per_query])
    }
}

// =============================================================================
// Sink
// =============================================================================

/// Sink that records everything it is given
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<LogEvent>,
    /// `(job_name, job_id, status)` per heartbeat
    pub heartbeats: Vec<(String, String, JobStatus)>,
    pub failures: Vec<String>,
    pub tail: Vec<LogEvent>,
    /// Every call in order, for sequencing assertions
    pub timeline: Vec<String>,
}

impl RecordingSink {
    pub fn messages(&self) -> Vec<&str> {
        self.events.iter().map(|e| e.message.as_str()).collect()
    }

    pub fn statuses(&self) -> Vec<JobStatus> {
        self.heartbeats.iter().map(|(_, _, status)| *status).collect()
    }
}

impl TrackerSink for RecordingSink {
    fn log_event(&mut self, event: &LogEvent) {
        self.timeline.push(format!("event:{}", event.message));
        self.events.push(event.clone());
    }

    fn heartbeat(&mut self, run: &JobRun) {
        self.timeline.push(format!("status:{}", run.status));
        self.heartbeats
            .push((run.job_name.clone(), run.job_id.clone(), run.status));
    }

    fn failure(&mut self, _run: &JobRun, reason: &str) {
        self.timeline.push(format!("failure:{}", reason));
        self.failures.push(reason.to_string());
    }

    fn tail(&mut self, events: &[LogEvent]) {
        self.timeline.push(format!("tail:{}", events.len()));
        self.tail.extend_from_slice(events);
    }
}
