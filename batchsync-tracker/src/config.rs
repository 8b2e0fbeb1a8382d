//! Tracker configuration
//!
//! Defines the intervals, log location and failure policy used by the
//! reconciler and the job tracker.

use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

/// Log group the job execution service writes container output to
pub const DEFAULT_LOG_GROUP: &str = "/aws/batch/job";

/// Largest page the log store accepts
pub const MAX_LOG_PAGE: u32 = 10_000;

/// What the tracker does when a run ends in FAILED
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Return `TrackerError::JobFailed` after emitting diagnostics
    Raise,
    /// Emit diagnostics and return normally
    Report,
}

impl FromStr for FailurePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "raise" => Ok(FailurePolicy::Raise),
            "report" => Ok(FailurePolicy::Report),
            other => anyhow::bail!("unknown failure policy '{}' (expected raise or report)", other),
        }
    }
}

/// Tracker configuration
///
/// All intervals are configurable so tests can run with zero waits and
/// slow environments can stretch the settle window.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Time between status polls
    pub poll_interval: Duration,

    /// Wait after observing FAILED before fetching the log tail, so that
    /// trailing output has reached the log store
    pub failure_grace_period: Duration,

    /// Wait after registering a definition before re-reading it; the
    /// service offers no read-after-write consistency
    pub settle_interval: Duration,

    /// Log group holding the runs' log streams
    pub log_group: String,

    /// Page size limit for every log request
    pub max_log_lines: Option<u32>,

    /// Raise or report on FAILED
    pub failure_policy: FailurePolicy,
}

impl TrackerConfig {
    /// Creates a configuration with defaults
    pub fn new() -> Self {
        Self {
            poll_interval: Duration::from_secs(4),
            failure_grace_period: Duration::from_secs(10),
            settle_interval: Duration::from_secs(20),
            log_group: DEFAULT_LOG_GROUP.to_string(),
            max_log_lines: None,
            failure_policy: FailurePolicy::Raise,
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Every variable is optional; unset values keep defaults, unparsable
    /// ones keep defaults with a warning:
    /// - BATCHSYNC_POLL_INTERVAL (seconds, default: 4)
    /// - BATCHSYNC_FAILURE_GRACE (seconds, default: 10)
    /// - BATCHSYNC_SETTLE_INTERVAL (seconds, default: 20)
    /// - BATCHSYNC_LOG_GROUP (default: /aws/batch/job)
    /// - BATCHSYNC_MAX_LOG_LINES (default: unlimited)
    /// - BATCHSYNC_FAILURE_POLICY (raise | report, default: raise)
    pub fn from_env() -> Self {
        let defaults = Self::new();

        let poll_interval = env_secs("BATCHSYNC_POLL_INTERVAL").unwrap_or(defaults.poll_interval);
        let failure_grace_period =
            env_secs("BATCHSYNC_FAILURE_GRACE").unwrap_or(defaults.failure_grace_period);
        let settle_interval =
            env_secs("BATCHSYNC_SETTLE_INTERVAL").unwrap_or(defaults.settle_interval);

        let log_group = std::env::var("BATCHSYNC_LOG_GROUP")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.log_group);

        let max_log_lines = env_parsed::<u32>("BATCHSYNC_MAX_LOG_LINES");

        let failure_policy = env_parsed::<FailurePolicy>("BATCHSYNC_FAILURE_POLICY")
            .unwrap_or(defaults.failure_policy);

        Self {
            poll_interval,
            failure_grace_period,
            settle_interval,
            log_group,
            max_log_lines,
            failure_policy,
        }
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.poll_interval.is_zero() {
            anyhow::bail!("poll_interval must be greater than 0");
        }

        if self.log_group.is_empty() {
            anyhow::bail!("log_group cannot be empty");
        }

        if let Some(limit) = self.max_log_lines {
            if limit == 0 || limit > MAX_LOG_PAGE {
                anyhow::bail!("max_log_lines must be between 1 and {}", MAX_LOG_PAGE);
            }
        }

        Ok(())
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn env_secs(name: &str) -> Option<Duration> {
    env_parsed::<u64>(name).map(Duration::from_secs)
}

fn env_parsed<T: FromStr>(name: &str) -> Option<T> {
    parse_setting(name, std::env::var(name).ok().as_deref())
}

/// Parses a setting; a value that is set but unparsable is reported and ignored
fn parse_setting<T: FromStr>(name: &str, raw: Option<&str>) -> Option<T> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;
    match raw.parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring {}={:?}: not a valid value, using the default", name, raw);
            None
        }
    }
}
