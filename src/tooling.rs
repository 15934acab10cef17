//! Tool wrappers
//!
//! Run third-party tools against a resolved copy of their configuration
//! file, so tools that know nothing about transclusion see a flat document.

pub mod registry;
pub mod wrapper;

pub use registry::{builtin_tools, lookup, Injection, ToolSpec};
pub use wrapper::{materialize, run, split_config_arg, ConfigArgs, DEFAULT_CONFIG};
