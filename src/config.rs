//! Configuration System
//!
//! Layered runtime configuration for the resolver, the fetch cache, logging
//! and tool wrappers. Layers, lowest to highest precedence: built-in
//! defaults, the global config file, an explicit `--config` file, and
//! `DRYTOML_*` environment variables.

use crate::logging::LoggingConfig;
use crate::resolver::DEFAULT_EXTEND_KEY;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DryConfig {
    /// Directive key that triggers transclusion
    #[serde(default = "default_extend_key")]
    pub extend_key: String,

    /// Remote document cache
    #[serde(default)]
    pub cache: CacheConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Extra wrapped tools, by command name
    #[serde(default)]
    pub tools: HashMap<String, ToolConfig>,
}

fn default_extend_key() -> String {
    DEFAULT_EXTEND_KEY.to_string()
}

impl Default for DryConfig {
    fn default() -> Self {
        Self {
            extend_key: default_extend_key(),
            cache: CacheConfig::default(),
            logging: LoggingConfig::default(),
            tools: HashMap::new(),
        }
    }
}

/// Remote document cache settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Cache root; unset means the platform cache directory
    #[serde(default)]
    pub dir: Option<PathBuf>,

    /// HTTP timeout in seconds; 0 disables the timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl CacheConfig {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

/// A user-defined wrapped tool.
///
/// Exactly one of `flags` (config passed as a command-line option) or `envs`
/// (config passed through environment variables) must be set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Executable to run; defaults to the tool name
    #[serde(default)]
    pub program: Option<String>,

    #[serde(default)]
    pub flags: Vec<String>,

    #[serde(default)]
    pub envs: Vec<String>,
}

impl ToolConfig {
    pub fn validate(&self) -> Result<(), String> {
        match (self.flags.is_empty(), self.envs.is_empty()) {
            (true, true) => Err("Must define either flags or envs".to_string()),
            (false, false) => Err("Cannot define both flags and envs".to_string()),
            _ => Ok(()),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    ExtendKey(String),
    Tool(String, String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::ExtendKey(msg) => write!(f, "extend_key: {}", msg),
            ValidationError::Tool(name, msg) => write!(f, "Tool '{}': {}", name, msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl DryConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.extend_key.trim().is_empty() {
            errors.push(ValidationError::ExtendKey("cannot be empty".to_string()));
        }

        let mut names: Vec<&String> = self.tools.keys().collect();
        names.sort();
        for name in names {
            if let Err(e) = self.tools[name].validate() {
                errors.push(ValidationError::Tool(name.clone(), e));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
