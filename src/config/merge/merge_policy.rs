//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("extend_key", crate::resolver::DEFAULT_EXTEND_KEY)?
        .set_default("cache.timeout_secs", 30)?
        .set_default("logging.level", "warn")?
        .set_default("logging.output", "stderr")
}
