//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::CardError;

/// Map domain errors to a single line for CLI output.
pub fn map_error(e: &CardError) -> String {
    e.to_string().lines().collect::<Vec<_>>().join("; ")
}
