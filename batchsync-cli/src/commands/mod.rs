//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod definition;
mod job;

pub use definition::DefinitionCommands;
pub use job::JobCommands;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Job definition management
    Definition {
        #[command(subcommand)]
        command: DefinitionCommands,
    },
    /// Job submission and tracking
    Job {
        #[command(subcommand)]
        command: JobCommands,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
///
/// # Arguments
/// * `command` - The command to execute
/// * `config` - The CLI configuration
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Definition { command } => {
            definition::handle_definition_command(command, config).await
        }
        Commands::Job { command } => job::handle_job_command(command, config).await,
    }
}
