//! Configuration module
//!
//! This module handles loading, parsing, and validating settings files.
//! Settings problems are never fatal: [`load_settings`] falls back to the
//! defaults and logs a warning.
//!
//! # Example
//!
//! ```no_run
//! use spyfu_bulk::config::load_settings;
//! use std::path::Path;
//!
//! let settings = load_settings(Some(Path::new("settings.toml")));
//! println!("Sample mode: {}", settings.use_sample_data);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{ProxyConfig, Settings, API_KEY_ENV, DEFAULT_BASE_URL};

// Re-export parser functions
pub use parser::{compute_settings_hash, load_settings, load_settings_file};
