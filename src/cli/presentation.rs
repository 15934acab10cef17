//! CLI presentation: text and json formatters per command family.

mod cache;
mod explain;

pub use cache::{format_cache_listing, format_size_kb};
pub use explain::{format_explain_json, format_explain_text};

use crate::error::ApiError;

fn to_pretty_json<T: serde::Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value).map_err(|e| ApiError::Serialize(e.to_string()))
}
