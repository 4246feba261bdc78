//! CLI domain: parse, route, help, and output only.
//! No catalog logic; single route table dispatches to the reporter.

mod help;
mod output;
mod parse;
mod route;

pub use help::command_name;
pub use output::map_error;
pub use parse::{AddCommands, Cli, Commands, GetCommands};
pub use route::{parse_parameter_values, RunContext};
