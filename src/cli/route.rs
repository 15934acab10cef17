//! CLI route: single route table and run context. Dispatches to the resolver,
//! the fetch cache and the tool wrappers, then to presentation.

use crate::cli::command_name;
use crate::cli::parse::{CacheCommands, Commands};
use crate::cli::presentation::{format_cache_listing, format_explain_json, format_explain_text};
use crate::config::{ConfigLoader, DryConfig};
use crate::error::ApiError;
use crate::fetch::{cache, CacheService, Fetcher};
use crate::resolver::{ResolveOptions, Resolver};
use crate::tooling;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Runtime context for CLI execution: loaded configuration and the fetcher
/// shared by every resolution of the command.
pub struct RunContext {
    config: DryConfig,
    fetcher: Fetcher,
}

impl RunContext {
    /// Create run context from an optional config path and cache override. Uses ConfigLoader only.
    pub fn new(config_path: Option<PathBuf>, cache_dir: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = ConfigLoader::load(config_path.as_deref())?;
        Self::from_config(config, cache_dir)
    }

    /// Build the HTTP-backed fetcher. Cache root precedence: `cache_dir`,
    /// then the configured directory, then the platform default.
    pub fn from_config(config: DryConfig, cache_dir: Option<PathBuf>) -> Result<Self, ApiError> {
        let root = cache_dir
            .or_else(|| config.cache.dir.clone())
            .unwrap_or_else(cache::default_root);
        debug!(cache_root = %root.display(), "Using cache directory");
        let fetcher = Fetcher::http(CacheService::new(root), config.cache.timeout())?;
        Ok(Self::with_fetcher(config, fetcher))
    }

    pub fn with_fetcher(config: DryConfig, fetcher: Fetcher) -> Self {
        Self { config, fetcher }
    }

    pub fn config(&self) -> &DryConfig {
        &self.config
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        let name = command_name(command);
        info!(command = %name, "Executing command");
        let result = self.execute_inner(command);
        match &result {
            Ok(_) => debug!(command = %name, "Command succeeded"),
            Err(e) => debug!(command = %name, error = %e, "Command failed"),
        }
        result
    }

    fn execute_inner(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Export { file, key } => self.handle_export(file, key.as_deref()),
            Commands::Explain { file, key, format } => {
                self.handle_explain(file, key.as_deref(), format)
            }
            Commands::Cache { command } => match command {
                CacheCommands::Show { format } => self.handle_cache_show(format),
                CacheCommands::Clear { name, force } => {
                    self.handle_cache_clear(name.as_deref(), *force)
                }
            },
            Commands::External(args) => self.handle_tool(args),
        }
    }

    fn resolver(&self, key: Option<&str>) -> Resolver<'_> {
        let extend_key = key.unwrap_or(self.config.extend_key.as_str()).to_string();
        Resolver::with_options(&self.fetcher, ResolveOptions { extend_key })
    }

    fn handle_export(&self, file: &Path, key: Option<&str>) -> Result<String, ApiError> {
        let document = self.resolver(key).resolve_file(file)?;
        Ok(toml::to_string(&document)?)
    }

    fn handle_explain(
        &self,
        file: &Path,
        key: Option<&str>,
        format: &str,
    ) -> Result<String, ApiError> {
        let mut resolver = self.resolver(key).with_trace();
        resolver.resolve_file(file)?;
        let steps = resolver.take_trace();
        let root = file.display().to_string();
        if format == "json" {
            format_explain_json(&root, &steps)
        } else {
            Ok(format_explain_text(&root, &steps))
        }
    }

    fn handle_cache_show(&self, format: &str) -> Result<String, ApiError> {
        let cache = self.fetcher.cache();
        format_cache_listing(cache.root(), &cache.entries()?, format)
    }

    fn handle_cache_clear(&self, name: Option<&str>, force: bool) -> Result<String, ApiError> {
        let cache = self.fetcher.cache();
        if !force {
            use dialoguer::Confirm;
            let confirmed = Confirm::new()
                .with_prompt("Clear cache?")
                .default(false)
                .interact()
                .map_err(|e| ApiError::ConfigError(format!("Failed to get user input: {}", e)))?;

            if !confirmed {
                return Err(ApiError::Aborted);
            }
        }

        let removed = cache.clear(name)?;
        if removed == 0 {
            return Err(ApiError::NothingCleared(cache.root().to_path_buf()));
        }
        info!(removed, root = %cache.root().display(), "Cleared cache");
        format_cache_listing(cache.root(), &cache.entries()?, "text")
    }

    fn handle_tool(&self, args: &[String]) -> Result<String, ApiError> {
        let Some((name, tool_args)) = args.split_first() else {
            return Err(ApiError::ConfigError("Missing command".to_string()));
        };
        let spec = tooling::lookup(name, &self.config.tools)?;
        let mut resolver = self.resolver(None);
        let status = tooling::run(&spec, tool_args, &mut resolver)?;
        if status.success() {
            Ok(String::new())
        } else {
            Err(ApiError::ToolExit {
                tool: spec.name,
                code: status.code().unwrap_or(1),
            })
        }
    }
}
