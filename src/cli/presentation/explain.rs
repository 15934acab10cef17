//! Explain presentation: the transclusion steps behind a resolved document.

use super::to_pretty_json;
use crate::error::ApiError;
use crate::resolver::TransclusionStep;
use std::fmt::Write;

pub fn format_explain_text(root: &str, steps: &[TransclusionStep]) -> String {
    if steps.is_empty() {
        return format!("No transclusions in {}", root);
    }

    let mut out = format!("Transclusions for {} ({}):", root, steps.len());
    for step in steps {
        let indent = "  ".repeat(step.level + 1);
        let _ = write!(out, "\n{}{} -> {}", indent, step.reference, step.target);
    }
    out
}

pub fn format_explain_json(root: &str, steps: &[TransclusionStep]) -> Result<String, ApiError> {
    to_pretty_json(&serde_json::json!({ "root": root, "steps": steps }))
}
