//! Cache presentation: `cache show` and the listing printed after `cache clear`.

use super::to_pretty_json;
use crate::error::ApiError;
use crate::fetch::CacheEntryInfo;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use std::path::Path;

/// Row name of the grand total
const TOTAL_ROW: &str = "__total__";

/// Size in kilobytes with one decimal
pub fn format_size_kb(bytes: u64) -> String {
    format!("{:.1}", bytes as f64 / 1024.0)
}

pub fn format_cache_listing(
    root: &Path,
    entries: &[CacheEntryInfo],
    format: &str,
) -> Result<String, ApiError> {
    let total: u64 = entries.iter().map(|e| e.size).sum();

    if format == "json" {
        let rows: Vec<serde_json::Value> = entries
            .iter()
            .map(|e| serde_json::json!({ "name": e.name, "size": e.size }))
            .collect();
        return to_pretty_json(&serde_json::json!({
            "root": root,
            "entries": rows,
            "total": total,
        }));
    }

    if entries.is_empty() {
        return Ok(format!("Cache is empty: {}", root.display()));
    }

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Entry", "Size (kb)"]);
    for entry in entries {
        table.add_row(vec![entry.name.clone(), format_size_kb(entry.size)]);
    }
    table.add_row(vec![TOTAL_ROW.to_string(), format_size_kb(total)]);

    let title = format!("Cache: {}", root.display());
    Ok(format!("{}\n{}", title.bold(), table))
}
