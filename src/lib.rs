//! SpyFu bulk URLs: a small bulk data-collection tool
//!
//! This crate takes a list of website URLs, queries the SpyFu marketing
//! intelligence API (or a deterministic sample generator) for each domain,
//! normalizes the results into a uniform record schema, validates the batch
//! and exports it to JSON or CSV.

pub mod client;
pub mod config;
pub mod output;
pub mod record;
pub mod runner;
pub mod url;

use thiserror::Error;

/// Main error type for bulk runs
#[derive(Debug, Error)]
pub enum BulkError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Output error: {0}")]
    Output(#[from] OutputError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to parse JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Input URLs file not found: {0}")]
    InputNotFound(String),

    #[error("No URLs found in input file: {0}")]
    EmptyInput(String),

    #[error("Unsupported process type '{given}'. Supported types: {supported}")]
    UnknownProcessType { given: String, supported: String },

    #[error("Unsupported export format: {0}")]
    UnknownFormat(String),
}

/// Errors raised while talking to the API
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Invalid proxy URL '{proxy}': {source}")]
    Proxy { proxy: String, source: reqwest::Error },

    #[error("Unexpected response shape from {endpoint}: expected {expected}")]
    UnexpectedShape {
        endpoint: String,
        expected: &'static str,
    },
}

/// Aggregate schema validation failure
#[derive(Debug, Error)]
#[error("Schema validation failed for {count} field(s).")]
pub struct ValidationError {
    /// Number of violations across all records
    pub count: usize,

    /// One message per violation, prefixed with the record index
    pub messages: Vec<String>,
}

/// Errors raised while writing output files
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type alias for bulk operations
pub type Result<T> = std::result::Result<T, BulkError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for API operations
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Result type alias for output operations
pub type OutputResult<T> = std::result::Result<T, OutputError>;

// Re-export commonly used types
pub use client::{ProxyRotator, RequestThrottler, SpyfuClient};
pub use config::Settings;
pub use output::{export_records, OutputFormat};
pub use record::{ProcessType, Record, RecordKind};
pub use runner::{run_bulk, RunOptions, RunReport};
pub use crate::url::normalize_domain;
