//! Error types for the schema compiler

use std::path::PathBuf;

use thiserror::Error;

/// Result type for compiler operations
pub type Result<T> = std::result::Result<T, FieldgenError>;

/// Schema compiler errors. Every variant is fatal: the pipeline aborts on
/// the first failure and never emits artifacts from a partial model.
#[derive(Error, Debug)]
pub enum FieldgenError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse schema file {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Invalid schema: {0}")]
    Schema(String),

    #[error("No translation for type {raw:?} (field {field:?})")]
    UnknownType { field: String, raw: String },

    #[error("Render error: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
