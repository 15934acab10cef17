//! drytoml: TOML transclusion
//!
//! Resolves TOML documents that pull in content from other documents (local
//! files or URLs) through an extend key, `__extends` by default. The result
//! is a single document with no extend keys left, in which the referencing
//! document's own values take precedence over what it extends.

pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod reference;
pub mod resolver;
pub mod tooling;
pub mod tree;

pub use error::{ApiError, ResolveError};
pub use reference::Reference;
pub use resolver::{ResolveOptions, Resolver, TransclusionStep};
