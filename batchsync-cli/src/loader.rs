//! Local job definition files
//!
//! A definition file is the JSON body of a register call. Server-managed
//! fields, if present (e.g. a file saved from `definition show`), are
//! dropped on load.

use std::path::Path;

use anyhow::{Context, Result, bail};
use batchsync_core::domain::job_definition::LocalJobDefinition;
use tracing::debug;

/// Reads and parses a definition file
pub fn load_definition(path: &Path) -> Result<LocalJobDefinition> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read job definition file {}", path.display()))?;

    let definition = parse_definition(&contents)
        .with_context(|| format!("Invalid job definition in {}", path.display()))?;
    debug!(
        "Loaded job definition '{}' from {}",
        definition.name(),
        path.display()
    );

    Ok(definition)
}

pub fn parse_definition(contents: &str) -> Result<LocalJobDefinition> {
    let definition = LocalJobDefinition::from_json(contents)?;

    if definition.name().is_empty() {
        bail!("jobDefinitionName cannot be empty");
    }

    Ok(definition)
}
