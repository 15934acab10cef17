//! Known wrappable tools and how each one is told where its config lives.

use crate::config::ToolConfig;
use crate::error::ApiError;
use std::collections::HashMap;

/// How the resolved config path reaches the tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Injection {
    /// Command-line option; the first listed one is used when none is given
    Flag(Vec<String>),
    /// Environment variables, all set to the resolved path
    Env(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSpec {
    pub name: String,
    pub program: String,
    pub injection: Injection,
}

impl ToolSpec {
    fn flags(name: &str, flags: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            program: name.to_string(),
            injection: Injection::Flag(flags.iter().map(|f| f.to_string()).collect()),
        }
    }

    fn envs(name: &str, vars: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            program: name.to_string(),
            injection: Injection::Env(vars.iter().map(|v| v.to_string()).collect()),
        }
    }

    /// Spec for a tool declared under `[tools.<name>]`
    pub fn from_config(name: &str, config: &ToolConfig) -> Self {
        let injection = if config.envs.is_empty() {
            Injection::Flag(config.flags.clone())
        } else {
            Injection::Env(config.envs.clone())
        };
        Self {
            name: name.to_string(),
            program: config.program.clone().unwrap_or_else(|| name.to_string()),
            injection,
        }
    }
}

pub fn builtin_tools() -> Vec<ToolSpec> {
    vec![
        ToolSpec::flags("black", &["--config"]),
        ToolSpec::flags("isort", &["--sp", "--settings-path", "--settings-file", "--settings"]),
        ToolSpec::flags("pylint", &["--rcfile"]),
        ToolSpec::envs("flakehell", &["FLAKEHELL_TOML", "PYLINTRC"]),
        ToolSpec::envs("flake8helled", &["FLAKEHELL_TOML", "PYLINTRC"]),
    ]
}

/// Find a tool by command name. Configured tools shadow builtins.
pub fn lookup(name: &str, configured: &HashMap<String, ToolConfig>) -> Result<ToolSpec, ApiError> {
    if let Some(config) = configured.get(name) {
        return Ok(ToolSpec::from_config(name, config));
    }
    builtin_tools()
        .into_iter()
        .find(|tool| tool.name == name)
        .ok_or_else(|| ApiError::ConfigError(format!("Invalid command {}", name)))
}
