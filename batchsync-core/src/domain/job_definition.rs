//! Job definition domain types
//!
//! A job definition is a named, versioned description of a batch job. The
//! remote service stores every revision and stamps each one with
//! server-managed metadata (ARN, revision, status). Everything else is
//! caller-meaningful content, kept as an open JSON map so that fields the
//! service adds later survive a round trip untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::equivalence;

/// Keys the remote service assigns on its own.
pub const SERVER_MANAGED_KEYS: [&str; 3] = ["jobDefinitionArn", "revision", "status"];

/// Job definition record as stored by the job execution service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDefinition {
    #[serde(rename = "jobDefinitionName")]
    pub name: String,

    #[serde(
        rename = "jobDefinitionArn",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub arn: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Caller-meaningful content (type, containerProperties, parameters, ...)
    #[serde(flatten)]
    pub spec: Map<String, Value>,
}

impl JobDefinition {
    /// Creates a definition with no server-managed fields
    pub fn new(name: impl Into<String>, spec: Map<String, Value>) -> Self {
        Self {
            name: name.into(),
            arn: None,
            revision: None,
            status: None,
            spec,
        }
    }

    /// Returns a copy without `arn`, `revision` and `status`
    ///
    /// Idempotent: normalizing an already-normalized definition yields an
    /// equal value. Absent metadata is not an error.
    pub fn normalized(&self) -> JobDefinition {
        let mut spec = self.spec.clone();
        // A flattened map can still carry these keys if the record was
        // assembled by hand rather than deserialized.
        for key in SERVER_MANAGED_KEYS {
            spec.remove(key);
        }

        JobDefinition {
            name: self.name.clone(),
            arn: None,
            revision: None,
            status: None,
            spec,
        }
    }

    /// Whether any server-managed field is populated
    pub fn has_server_metadata(&self) -> bool {
        self.arn.is_some() || self.revision.is_some() || self.status.is_some()
    }

    /// Semantic content as a JSON object: the name plus the spec map
    pub fn content(&self) -> Map<String, Value> {
        let mut content = self.spec.clone();
        content.insert(
            "jobDefinitionName".to_string(),
            Value::String(self.name.clone()),
        );
        content
    }

    /// Structural equality on semantic content only
    ///
    /// Server-managed fields are ignored on both sides and an absent field
    /// equals a present-but-empty one. The relation is symmetric.
    pub fn is_equivalent(&self, other: &JobDefinition) -> bool {
        let a = self.normalized().content();
        let b = other.normalized().content();
        equivalence::maps_equivalent(&a, &b)
    }

    /// Container image, if the definition declares one
    pub fn image(&self) -> Option<&str> {
        self.spec
            .get("containerProperties")
            .and_then(|props| props.get("image"))
            .and_then(Value::as_str)
    }

    /// Default container command, if the definition declares one
    pub fn command(&self) -> Option<Vec<&str>> {
        self.spec
            .get("containerProperties")
            .and_then(|props| props.get("command"))
            .and_then(Value::as_array)
            .map(|args| args.iter().filter_map(Value::as_str).collect())
    }
}

/// A locally declared job definition, treated as the source of truth
///
/// Never carries server-managed fields: every constructor normalizes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "JobDefinition")]
pub struct LocalJobDefinition(JobDefinition);

impl LocalJobDefinition {
    pub fn new(name: impl Into<String>, spec: Map<String, Value>) -> Self {
        Self(JobDefinition::new(name, spec))
    }

    /// Parses a definition from JSON in the register-request shape
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn definition(&self) -> &JobDefinition {
        &self.0
    }

    /// Body of a register call: name plus content, nothing server-managed
    pub fn register_body(&self) -> Map<String, Value> {
        self.0.content()
    }
}

impl From<JobDefinition> for LocalJobDefinition {
    fn from(definition: JobDefinition) -> Self {
        Self(definition.normalized())
    }
}

impl AsRef<JobDefinition> for LocalJobDefinition {
    fn as_ref(&self) -> &JobDefinition {
        &self.0
    }
}
