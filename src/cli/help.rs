//! CLI help and command-name contract for logging and routing.

use crate::cli::parse::{CacheCommands, Commands};

/// Command name string for log records (e.g. "export", "cache.clear", "tool.black").
pub fn command_name(command: &Commands) -> String {
    match command {
        Commands::Export { .. } => "export".to_string(),
        Commands::Explain { .. } => "explain".to_string(),
        Commands::Cache { command } => format!("cache.{}", cache_command_name(command)),
        Commands::External(args) => match args.first() {
            Some(tool) => format!("tool.{}", tool),
            None => "tool".to_string(),
        },
    }
}

pub fn cache_command_name(command: &CacheCommands) -> &'static str {
    match command {
        CacheCommands::Show { .. } => "show",
        CacheCommands::Clear { .. } => "clear",
    }
}
