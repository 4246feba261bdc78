//! CLI command-name contract for logging and routing.

use crate::cli::parse::{AddCommands, Commands, GetCommands};

/// Command name string for log spans (e.g. "get.templates", "add.cluster").
pub fn command_name(command: &Commands) -> String {
    match command {
        Commands::Get { command } => format!("get.{}", get_command_name(command)),
        Commands::Add { command } => format!("add.{}", add_command_name(command)),
    }
}

pub fn get_command_name(command: &GetCommands) -> &'static str {
    match command {
        GetCommands::Template {
            list_parameters: true,
            ..
        } => "template_parameters",
        GetCommands::Template { .. } => "templates",
        GetCommands::Credential { .. } => "credentials",
    }
}

pub fn add_command_name(command: &AddCommands) -> &'static str {
    match command {
        AddCommands::Cluster { dry_run: true, .. } => "cluster_dry_run",
        AddCommands::Cluster { .. } => "cluster",
    }
}
