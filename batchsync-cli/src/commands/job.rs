//! Job command handlers
//!
//! Submits runs against a reconciled definition, follows them to
//! completion and prints their logs.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use batchsync_core::domain::job::JobRun;
use batchsync_tracker::{
    FailurePolicy, JobRepository, JobTracker, LogFetcher, TrackingOutcome, submit_job,
};
use chrono::{DateTime, Utc};
use clap::Subcommand;
use colored::*;
use tracing::warn;

use crate::config::Config;
use crate::loader::load_definition;
use crate::output::{ConsoleSink, colorize_status};

/// Job subcommands
#[derive(Subcommand)]
pub enum JobCommands {
    /// Sync a definition, submit a run of it and track the run
    Submit {
        /// Path to the job definition JSON file
        file: PathBuf,

        /// Job queue to submit to
        #[arg(short, long)]
        queue: String,

        /// Run name (default: <definition>-<UTC timestamp>)
        #[arg(short, long)]
        name: Option<String>,

        /// Report a failed run instead of exiting with an error
        #[arg(long)]
        no_fail: bool,

        /// Command override for the container
        #[arg(last = true)]
        command: Vec<String>,
    },
    /// Track an existing run
    Track {
        /// Job run identifier
        job_id: String,

        /// Report a failed run instead of exiting with an error
        #[arg(long)]
        no_fail: bool,
    },
    /// Print a run's log
    Logs {
        /// Job run identifier
        job_id: String,

        /// Only the most recent page
        #[arg(long)]
        tail: bool,
    },
}

/// Handle job commands
///
/// # Arguments
/// * `command` - The job command to execute
/// * `config` - The CLI configuration
pub async fn handle_job_command(command: JobCommands, config: &Config) -> Result<()> {
    match command {
        JobCommands::Submit {
            file,
            queue,
            name,
            no_fail,
            command,
        } => submit_and_track(config, file, &queue, name, no_fail, command).await,
        JobCommands::Track { job_id, no_fail } => {
            track_job(&tracker(config, no_fail), &job_id).await
        }
        JobCommands::Logs { job_id, tail } => print_logs(config, &job_id, tail).await,
    }
}

fn tracker(config: &Config, no_fail: bool) -> JobTracker {
    let mut settings = config.tracker.clone();
    if no_fail {
        settings = settings.with_failure_policy(FailurePolicy::Report);
    }
    config.job_tracker(settings)
}

async fn submit_and_track(
    config: &Config,
    file: PathBuf,
    queue: &str,
    name: Option<String>,
    no_fail: bool,
    command: Vec<String>,
) -> Result<()> {
    let local = load_definition(&file)?;
    let definition = config.reconciler().reconcile(&local).await?;

    let job_name = name.unwrap_or_else(|| default_job_name(&definition.name, Utc::now()));
    let jobs = config.batch_client();
    let job_id = submit_job(jobs.as_ref(), &definition, &job_name, queue, command).await?;

    println!(
        "{} Submitted job {} ({})",
        "✓".green(),
        job_name.bold(),
        job_id.cyan()
    );

    track_job(&tracker(config, no_fail), &job_id).await
}

async fn track_job(tracker: &JobTracker, job_id: &str) -> Result<()> {
    let mut sink = ConsoleSink::stdout();
    let outcome = tracker.track(job_id, &mut sink).await?;
    if sink.write_failed() {
        warn!("Some tracking output for job {} could not be written", job_id);
    }

    match outcome {
        TrackingOutcome::Succeeded(run) => print_final_status(&run),
        TrackingOutcome::Failed { run, reason } => {
            print_final_status(&run);
            println!("  Reason: {}", reason.red());
        }
    }

    Ok(())
}

async fn print_logs(config: &Config, job_id: &str, tail: bool) -> Result<()> {
    let jobs = config.batch_client();
    let runs = JobRepository::describe_jobs(jobs.as_ref(), &[job_id.to_string()])
        .await
        .with_context(|| format!("Failed to describe job {}", job_id))?;

    let Some(run) = runs.into_iter().next() else {
        bail!("Job not found: {}", job_id);
    };
    let Some(stream) = run.log_stream_name() else {
        println!(
            "{}",
            format!("Job {} has no log stream yet ({}).", job_id, run.status).yellow()
        );
        return Ok(());
    };

    let fetcher = LogFetcher::from_config(config.logs_client(), &config.tracker);
    let events = if tail {
        fetcher.fetch_log_tail(stream).await?
    } else {
        fetcher.fetch_logs_since(stream, 0).await?.events
    };

    if events.is_empty() {
        println!("{}", "No logs found for this job.".yellow());
        return Ok(());
    }

    for event in &events {
        println!("{}", event.render());
    }

    Ok(())
}

fn print_final_status(run: &JobRun) {
    println!();
    println!(
        "Job [{} - {}] finished: {}",
        run.job_name.bold(),
        run.job_id.dimmed(),
        colorize_status(run.status)
    );
}

/// `<definition>-<YYYYMMDDTHHMMSS>` in UTC
fn default_job_name(definition: &str, at: DateTime<Utc>) -> String {
    format!("{}-{}", definition, at.format("%Y%m%dT%H%M%S"))
}
