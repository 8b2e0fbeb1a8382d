//! Batchsync Tracker
//!
//! Keeps a remote job definition in step with a local declaration, submits
//! runs against it, and follows a run to completion while streaming its log.
//!
//! Architecture:
//! - Configuration: intervals, log group and failure policy
//! - Repositories: narrow async interfaces to the job execution service and
//!   the log store, implemented for the HTTP clients
//! - Services: definition reconciliation and job submission
//! - Tracking: the log page fetcher, its cursor, and the polling job tracker
//!
//! Collaborators are injected as `Arc<dyn ..>` so every component can be
//! driven by in-memory fakes.

pub mod config;
pub mod error;
pub mod repository;
pub mod service;
pub mod tracking;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{FailurePolicy, TrackerConfig};
pub use error::{Result, TrackerError};
pub use repository::{JobRepository, LogRepository};
pub use service::{DefinitionReconciler, submit_job};
pub use tracking::{JobTracker, LogBatch, LogFetcher, TrackerSink, TrackingCursor, TrackingOutcome};
