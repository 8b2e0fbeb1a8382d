//! Job definition endpoints

use crate::BatchClient;
use crate::error::Result;
use batchsync_core::domain::job_definition::LocalJobDefinition;
use batchsync_core::dto::job_definition::{
    DescribeJobDefinitionsRequest, JobDefinitionPage, RegisteredJobDefinition,
};

impl BatchClient {
    // =============================================================================
    // Job Definitions
    // =============================================================================

    /// List job definition revisions
    ///
    /// Returns a single page; the caller decides what a `next_token` means.
    pub async fn describe_job_definitions(
        &self,
        req: &DescribeJobDefinitionsRequest,
    ) -> Result<JobDefinitionPage> {
        self.call("describejobdefinitions", req).await
    }

    /// Register a new revision of a job definition
    ///
    /// The service assigns the ARN and the next revision number.
    pub async fn register_job_definition(
        &self,
        definition: &LocalJobDefinition,
    ) -> Result<RegisteredJobDefinition> {
        self.call("registerjobdefinition", &definition.register_body())
            .await
    }
}
