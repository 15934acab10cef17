//! Config loader facade: assembles the layered builder and deserializes it.

use super::merge::merge_policy::builder_with_defaults;
use super::sources::{environment, explicit_file, global_file};
use super::DryConfig;
use config::ConfigError;
use std::path::Path;
use tracing::debug;

/// Loads [`DryConfig`] from its layered sources
#[derive(Debug, Default)]
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load defaults, the global file, `explicit` (when given) and the
    /// environment, in that order, then validate.
    pub fn load(explicit: Option<&Path>) -> Result<DryConfig, ConfigError> {
        let mut builder = global_file::add_to_builder(builder_with_defaults()?)?;
        if let Some(path) = explicit {
            builder = explicit_file::add_to_builder(builder, path)?;
        }
        builder = environment::add_to_builder(builder)?;

        let config: DryConfig = builder.build()?.try_deserialize()?;
        validated(config)
    }
}

fn validated(config: DryConfig) -> Result<DryConfig, ConfigError> {
    config.validate().map_err(|errors| {
        let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        ConfigError::Message(format!(
            "Configuration validation failed:\n{}",
            messages.join("\n")
        ))
    })?;
    debug!(extend_key = %config.extend_key, tools = config.tools.len(), "Configuration loaded");
    Ok(config)
}
