//! Pipeline configuration
//!
//! The binaries translate their command-line flags into an explicit
//! [`Config`] value that is passed into the pipeline entry points. Nothing
//! in the library reads ambient process state, which keeps both pipelines
//! unit-testable without argument parsing.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{FieldgenError, Result};

/// Configuration for one compiler run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory containing `.yml` schema files.
    #[serde(default = "default_schema_dir")]
    pub schema_dir: PathBuf,

    /// Output directory for generated source files.
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,

    /// Schema version stamped into the generated artifacts. Required.
    pub version: String,
}

impl Config {
    pub fn new(schema_dir: PathBuf, out_dir: PathBuf, version: String) -> Self {
        Self {
            schema_dir,
            out_dir,
            version,
        }
    }

    /// Reject configurations that must fail before any schema loads.
    pub fn validate(&self) -> Result<()> {
        if self.version.is_empty() {
            return Err(FieldgenError::Config("version is required".to_string()));
        }
        Ok(())
    }
}

fn default_schema_dir() -> PathBuf {
    PathBuf::from("schemas/")
}

fn default_out_dir() -> PathBuf {
    PathBuf::from("code/go/ecs")
}
