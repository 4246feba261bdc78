//! GitOps CLI Binary
//!
//! Command-line interface for CAPI cluster templates and credentials.

use clap::Parser;
use gitops::cli::{Cli, RunContext};
use gitops::config::ConfigLoader;
use gitops::logging::{init_logging, LoggingConfig};
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    let config = match ConfigLoader::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", gitops::cli::map_error(&e));
            process::exit(1);
        }
    };

    let logging_config = build_logging_config(&cli, &config.logging);
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("GitOps CLI starting");

    let context = match RunContext::from_config(config, cli.endpoint.clone()) {
        Ok(ctx) => {
            info!(endpoint = %ctx.endpoint(), "CLI context initialized");
            ctx
        }
        Err(e) => {
            error!("Error initializing CLI context: {}", e);
            eprintln!("{}", gitops::cli::map_error(&e));
            process::exit(1);
        }
    };

    match context.execute(&cli.command) {
        Ok(output) => {
            info!("Command completed successfully");
            print!("{}", output);
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", gitops::cli::map_error(&e));
            process::exit(1);
        }
    }
}

/// Build logging configuration from CLI args over the config file's logging section.
fn build_logging_config(cli: &Cli, file_config: &LoggingConfig) -> LoggingConfig {
    // If --verbose is not set, disable logging
    if !cli.verbose {
        return LoggingConfig {
            level: "off".to_string(),
            ..LoggingConfig::default()
        };
    }

    let mut config = file_config.clone();

    // Override with CLI arguments (highest priority)
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.file = Some(file.clone());
    }

    config
}
