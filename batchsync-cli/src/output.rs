//! Terminal output for tracked runs

use std::fmt::Display;
use std::io::{self, Write};

use batchsync_core::domain::job::{JobRun, JobStatus};
use batchsync_core::domain::log::LogEvent;
use batchsync_tracker::TrackerSink;
use colored::*;
use tracing::debug;

/// Prints tracking output as it arrives
///
/// Log lines go out verbatim (timestamp prefixed) so they can be piped;
/// status lines and failure diagnostics are colored.
///
/// Write errors (e.g. a closed pipe) do not stop tracking; the first one is
/// logged and later output is still attempted.
pub struct ConsoleSink<W: Write + Send> {
    out: W,
    write_failed: bool,
}

impl ConsoleSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            write_failed: false,
        }
    }

    /// Whether any line could not be written
    pub fn write_failed(&self) -> bool {
        self.write_failed
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, line: impl Display) {
        if let Err(e) = writeln!(self.out, "{}", line) {
            if !self.write_failed {
                debug!("Failed to write tracking output: {}", e);
            }
            self.write_failed = true;
        }
    }

    fn separator(&mut self) {
        self.line("-".repeat(80).dimmed());
    }
}

impl<W: Write + Send> TrackerSink for ConsoleSink<W> {
    fn log_event(&mut self, event: &LogEvent) {
        self.line(event.render());
    }

    fn heartbeat(&mut self, run: &JobRun) {
        self.line(format!(
            "Job [{} - {}] {}",
            run.job_name.bold(),
            run.job_id.dimmed(),
            colorize_status(run.status)
        ));
    }

    fn failure(&mut self, _run: &JobRun, reason: &str) {
        self.separator();
        self.line(format!("{} {}", "Fail Reason:".red().bold(), reason));
    }

    fn tail(&mut self, events: &[LogEvent]) {
        self.separator();
        if events.is_empty() {
            self.line("No log output found.".yellow());
        }
        for event in events {
            self.line(event.render());
        }
        self.separator();
    }
}

/// Colorize job status for display
pub fn colorize_status(status: JobStatus) -> ColoredString {
    let status_str = status.to_string();
    match status {
        JobStatus::Submitted | JobStatus::Pending | JobStatus::Runnable => status_str.yellow(),
        JobStatus::Starting | JobStatus::Running => status_str.cyan(),
        JobStatus::Succeeded => status_str.green(),
        JobStatus::Failed => status_str.red(),
    }
}
