//! CLI parse: clap types for drytoml. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// drytoml - Keep TOML configuration DRY with transclusion
#[derive(Parser, Debug)]
#[command(name = "drytoml")]
#[command(about = "Resolve TOML documents that extend other documents")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (layered over the global config)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Cache directory for remote documents
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the fully resolved document
    Export {
        /// Document to resolve
        #[arg(default_value = "pyproject.toml")]
        file: PathBuf,
        /// Extend key (overrides configuration)
        #[arg(long)]
        key: Option<String>,
    },
    /// Show each transclusion performed while resolving
    Explain {
        /// Document to resolve
        #[arg(default_value = "pyproject.toml")]
        file: PathBuf,
        /// Extend key (overrides configuration)
        #[arg(long)]
        key: Option<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Manage the remote document cache
    Cache {
        #[command(subcommand)]
        command: CacheCommands,
    },
    /// Run a wrapped tool against the resolved configuration
    #[command(external_subcommand)]
    External(Vec<String>),
}

#[derive(Subcommand, Debug)]
pub enum CacheCommands {
    /// List cached documents with their sizes
    Show {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Remove cached documents
    Clear {
        /// Only remove this entry (cache file name or original URL)
        #[arg(long)]
        name: Option<String>,
        /// Do not ask for confirmation
        #[arg(long)]
        force: bool,
    },
}
