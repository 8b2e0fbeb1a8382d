//! Job definition command handlers

use std::path::PathBuf;

use anyhow::Result;
use batchsync_core::domain::job_definition::JobDefinition;
use clap::Subcommand;
use colored::*;

use crate::config::Config;
use crate::loader::load_definition;

/// Definition subcommands
#[derive(Subcommand)]
pub enum DefinitionCommands {
    /// Make the remote definition match a local file
    Sync {
        /// Path to the job definition JSON file
        file: PathBuf,
    },
    /// Show the latest active revision of a definition
    Show {
        /// Job definition name
        name: String,
    },
}

pub async fn handle_definition_command(command: DefinitionCommands, config: &Config) -> Result<()> {
    match command {
        DefinitionCommands::Sync { file } => sync_definition(config, file).await,
        DefinitionCommands::Show { name } => show_definition(config, &name).await,
    }
}

async fn sync_definition(config: &Config, file: PathBuf) -> Result<()> {
    let local = load_definition(&file)?;
    let remote = config.reconciler().reconcile(&local).await?;

    println!("{} Job definition is in sync", "✓".green());
    print_definition_summary(&remote);

    Ok(())
}

async fn show_definition(config: &Config, name: &str) -> Result<()> {
    let remote = config.reconciler().fetch_latest(name).await?;

    print_definition_summary(&remote);
    println!();
    println!("{}", serde_json::to_string_pretty(&remote)?);

    Ok(())
}

fn print_definition_summary(definition: &JobDefinition) {
    println!("  Name:     {}", definition.name.cyan());
    if let Some(arn) = &definition.arn {
        println!("  ARN:      {}", arn);
    }
    if let Some(revision) = definition.revision {
        println!("  Revision: {}", revision);
    }
    if let Some(image) = definition.image() {
        println!("  Image:    {}", image.dimmed());
    }
}
