//! Output module for validating and exporting records
//!
//! This module handles:
//! - Checking records against the fixed record schema
//! - Writing records as a pretty-printed JSON array
//! - Writing records as flattened CSV

mod csv_output;
mod json_output;
pub mod schema;

pub use csv_output::{export_to_csv, flatten_record};
pub use json_output::export_to_json;
pub use schema::{validate_records, validate_values};

use crate::record::Record;
use crate::{ConfigError, OutputResult};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("json"),
            Self::Csv => f.write_str("csv"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => Err(ConfigError::UnknownFormat(s.to_string())),
        }
    }
}

/// Exports records in the requested format
///
/// # Arguments
///
/// * `records` - The records to write
/// * `output_path` - Destination file
/// * `format` - JSON or CSV
pub fn export_records(records: &[Record], output_path: &Path, format: OutputFormat) -> OutputResult<()> {
    match format {
        OutputFormat::Json => export_to_json(records, output_path),
        OutputFormat::Csv => export_to_csv(records, output_path),
    }
}

/// Creates the parent directory of `path` if it does not exist
pub(crate) fn ensure_parent_dir(path: &Path) -> OutputResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
