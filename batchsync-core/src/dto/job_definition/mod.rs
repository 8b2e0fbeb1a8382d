//! Job definition DTOs

use serde::{Deserialize, Serialize};

use crate::domain::job_definition::JobDefinition;

/// Status filter that excludes deregistered revisions
pub const ACTIVE_STATUS: &str = "ACTIVE";

/// Request to list job definition revisions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeJobDefinitionsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_definition_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

impl DescribeJobDefinitionsRequest {
    /// Active revisions of a single definition name
    pub fn active(name: impl Into<String>) -> Self {
        Self {
            job_definition_name: Some(name.into()),
            status: Some(ACTIVE_STATUS.to_string()),
            next_token: None,
        }
    }
}

/// One page of job definition revisions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDefinitionPage {
    #[serde(default)]
    pub job_definitions: Vec<JobDefinition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

impl JobDefinitionPage {
    /// Whether the service reported more results than this page holds
    pub fn has_more(&self) -> bool {
        self.next_token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// The highest revision on the page
    pub fn latest(&self) -> Option<&JobDefinition> {
        self.job_definitions
            .iter()
            .max_by_key(|def| def.revision.unwrap_or(0))
    }
}

/// Response of a register call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredJobDefinition {
    pub job_definition_name: String,
    pub job_definition_arn: String,
    pub revision: u32,
}
