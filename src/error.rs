//! Error types for agent card editing, composition and export.

use crate::agent::validation::{FieldKind, InvalidReason};
use thiserror::Error;

/// Errors surfaced by the form model, the composer and the CLI.
///
/// None of these are fatal to the process: every variant is reported to the
/// user and the session carries on with its previous state.
#[derive(Debug, Error)]
pub enum CardError {
    #[error("Invalid {field}: {reason}")]
    Validation {
        field: FieldKind,
        reason: InvalidReason,
    },

    #[error("Cannot add {list}: list already holds the maximum of {bound}")]
    Capacity { list: FieldKind, bound: usize },

    #[error("No {list} at position {index} (list has {len})")]
    IndexOutOfRange {
        list: FieldKind,
        index: usize,
        len: usize,
    },

    #[error("Unsupported image format: {0} (expected PNG or JPEG)")]
    UnsupportedImageFormat(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Font error: {0}")]
    Font(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Profile error: {0}")]
    Profile(String),

    #[error("Input error: {0}")]
    Input(String),
}

impl From<config::ConfigError> for CardError {
    fn from(err: config::ConfigError) -> Self {
        CardError::ConfigError(err.to_string())
    }
}

impl From<dialoguer::Error> for CardError {
    fn from(err: dialoguer::Error) -> Self {
        CardError::Input(format!("Failed to get user input: {}", err))
    }
}
