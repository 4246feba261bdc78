//! CLI parse: clap types for gitops. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// GitOps CLI - CAPI cluster templates and credentials
#[derive(Parser)]
#[command(name = "gitops")]
#[command(about = "Weave GitOps command line: CAPI cluster templates, credentials and clusters")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Template catalog API endpoint (overrides configuration)
    #[arg(long, short = 'e', global = true)]
    pub endpoint: Option<String>,

    /// Configuration file path (layered over the global config file)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, global = true, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stderr, stdout, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Display one or many resources
    Get {
        #[command(subcommand)]
        command: GetCommands,
    },
    /// Add a new resource
    Add {
        #[command(subcommand)]
        command: AddCommands,
    },
}

#[derive(Subcommand)]
pub enum GetCommands {
    /// Display one or many CAPI templates
    #[command(visible_alias = "templates")]
    #[command(after_help = "Examples:
  # Get all CAPI templates
  gitops get templates

  # Get all AWS CAPI templates
  gitops get templates --provider aws

  # Show the parameters of a CAPI template
  gitops get template <template-name> --list-parameters")]
    Template {
        /// Template name
        name: Option<String>,
        /// Show parameters of CAPI template
        #[arg(long, requires = "name")]
        list_parameters: bool,
        /// Filter templates by provider
        #[arg(long)]
        provider: Option<String>,
        /// Output format (text, table or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Display the CAPI credentials available for new clusters
    #[command(visible_alias = "credentials")]
    Credential {
        /// Output format (text, table or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

#[derive(Subcommand)]
pub enum AddCommands {
    /// Add a CAPI cluster by opening a pull request rendered from a template
    Cluster {
        /// Template to create the cluster from
        #[arg(long)]
        from_template: String,
        /// Template parameter value (repeatable)
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,
        /// Name of the CAPI credential to create the cluster with
        #[arg(long)]
        set_credentials: Option<String>,
        /// Print the rendered template instead of opening a pull request
        #[arg(long)]
        dry_run: bool,
        /// URL of the repository to open the pull request against
        #[arg(long, required_unless_present = "dry_run")]
        url: Option<String>,
        /// Branch to create the pull request from
        #[arg(long, required_unless_present = "dry_run")]
        branch: Option<String>,
        /// Branch the pull request targets
        #[arg(long, default_value = "main")]
        base: String,
        /// Title of the pull request
        #[arg(long, default_value = "Creates capi template")]
        title: String,
        /// Description of the pull request
        #[arg(long, default_value = "Creates capi template")]
        description: String,
        /// Commit message
        #[arg(long, default_value = "Creates capi template")]
        commit_message: String,
    },
}
