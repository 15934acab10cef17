//! CLI domain: parse, route, help, output, and presentation only.
//! No domain orchestration; single route table dispatches to domain services.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::{cache_command_name, command_name};
pub use output::{exit_code, map_error};
pub use parse::{CacheCommands, Cli, Commands};
pub use presentation::{
    format_cache_listing, format_explain_json, format_explain_text, format_size_kb,
};
pub use route::RunContext;
