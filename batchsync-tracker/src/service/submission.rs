//! Job submission against a reconciled definition

use batchsync_core::domain::job_definition::JobDefinition;
use batchsync_core::dto::job::{ContainerOverrides, SubmitJobRequest};
use tracing::info;

use crate::error::{Result, TrackerError};
use crate::repository::JobRepository;

/// Submits a run of `definition` and returns the run identifier
///
/// The definition must carry an ARN, which is what
/// [`DefinitionReconciler::reconcile`](crate::DefinitionReconciler::reconcile)
/// returns. An empty `command` keeps the definition's own command.
pub async fn submit_job(
    jobs: &dyn JobRepository,
    definition: &JobDefinition,
    job_name: &str,
    job_queue: &str,
    command: Vec<String>,
) -> Result<String> {
    let arn = definition
        .arn
        .clone()
        .ok_or_else(|| TrackerError::MissingArn(definition.name.clone()))?;

    let container_overrides = (!command.is_empty()).then(|| ContainerOverrides { command });

    let response = jobs
        .submit_job(SubmitJobRequest {
            job_name: job_name.to_string(),
            job_queue: job_queue.to_string(),
            job_definition: arn.clone(),
            container_overrides,
        })
        .await?;

    info!(
        "Submitted job [{} - {}] to {} using {}",
        response.job_name, response.job_id, job_queue, arn
    );

    Ok(response.job_id)
}
