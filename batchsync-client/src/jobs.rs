//! Job endpoints

use crate::BatchClient;
use crate::error::Result;
use batchsync_core::dto::job::{
    DescribeJobsRequest, DescribeJobsResponse, SubmitJobRequest, SubmitJobResponse,
};

impl BatchClient {
    // =============================================================================
    // Job Lifecycle
    // =============================================================================

    /// Submit a run of a job definition
    pub async fn submit_job(&self, req: &SubmitJobRequest) -> Result<SubmitJobResponse> {
        self.call("submitjob", req).await
    }

    /// Describe runs by identifier
    pub async fn describe_jobs(&self, req: &DescribeJobsRequest) -> Result<DescribeJobsResponse> {
        self.call("describejobs", req).await
    }
}
