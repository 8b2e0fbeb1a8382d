//! Tracking output

use batchsync_core::domain::job::JobRun;
use batchsync_core::domain::log::LogEvent;

/// Destination for everything the tracker reports
///
/// Implement this trait to decide how tracking output is presented: the
/// CLI prints it, tests record it.
pub trait TrackerSink: Send {
    /// A log line fetched while the run was active, in stream order
    fn log_event(&mut self, event: &LogEvent);

    /// Status line, once per poll cycle
    fn heartbeat(&mut self, run: &JobRun);

    /// The run reached FAILED
    fn failure(&mut self, run: &JobRun, reason: &str);

    /// Most recent page of the log, fetched after a failure
    fn tail(&mut self, events: &[LogEvent]);
}
