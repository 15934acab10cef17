//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::ApiError;

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &ApiError) -> String {
    match e {
        // The tool already reported its own failure.
        ApiError::ToolExit { .. } => String::new(),
        other => other.to_string(),
    }
}

/// Process exit code for a failed command. Wrapped tools keep their own code.
pub fn exit_code(e: &ApiError) -> i32 {
    match e {
        ApiError::ToolExit { code, .. } => *code,
        _ => 1,
    }
}
