//! Job execution service repository
//!
//! Definitions, submission and run status.

use async_trait::async_trait;
use batchsync_client::{BatchClient, Result};
use batchsync_core::domain::job::JobRun;
use batchsync_core::domain::job_definition::LocalJobDefinition;
use batchsync_core::dto::job::{DescribeJobsRequest, SubmitJobRequest, SubmitJobResponse};
use batchsync_core::dto::job_definition::{
    DescribeJobDefinitionsRequest, JobDefinitionPage, RegisteredJobDefinition,
};

/// Repository trait for the job execution service
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Lists the active revisions of a job definition
    ///
    /// Returns one page as delivered, continuation token included.
    ///
    /// # Arguments
    /// * `name` - The job definition name
    async fn describe_job_definitions(&self, name: &str) -> Result<JobDefinitionPage>;

    /// Registers a new revision with the content of `definition`
    async fn register_job_definition(
        &self,
        definition: &LocalJobDefinition,
    ) -> Result<RegisteredJobDefinition>;

    /// Submits a run
    async fn submit_job(&self, req: SubmitJobRequest) -> Result<SubmitJobResponse>;

    /// Describes runs by identifier
    ///
    /// # Arguments
    /// * `job_ids` - The run identifiers to describe
    async fn describe_jobs(&self, job_ids: &[String]) -> Result<Vec<JobRun>>;
}

#[async_trait]
impl JobRepository for BatchClient {
    async fn describe_job_definitions(&self, name: &str) -> Result<JobDefinitionPage> {
        BatchClient::describe_job_definitions(self, &DescribeJobDefinitionsRequest::active(name))
            .await
    }

    async fn register_job_definition(
        &self,
        definition: &LocalJobDefinition,
    ) -> Result<RegisteredJobDefinition> {
        BatchClient::register_job_definition(self, definition).await
    }

    async fn submit_job(&self, req: SubmitJobRequest) -> Result<SubmitJobResponse> {
        BatchClient::submit_job(self, &req).await
    }

    async fn describe_jobs(&self, job_ids: &[String]) -> Result<Vec<JobRun>> {
        let response = BatchClient::describe_jobs(
            self,
            &DescribeJobsRequest {
                jobs: job_ids.to_vec(),
            },
        )
        .await?;

        Ok(response.jobs)
    }
}
