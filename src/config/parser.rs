use crate::config::types::Settings;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads and parses a settings file from the given path
///
/// Files ending in `.json` are parsed as JSON, everything else as TOML.
///
/// # Arguments
///
/// * `path` - Path to the settings file
///
/// # Returns
///
/// * `Ok(Settings)` - Successfully loaded and validated settings
/// * `Err(ConfigError)` - Failed to load, parse, or validate the settings
pub fn load_settings_file(path: &Path) -> Result<Settings, ConfigError> {
    let content = std::fs::read_to_string(path)?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let settings: Settings = if is_json {
        serde_json::from_str(&content)?
    } else {
        toml::from_str(&content)?
    };

    validate(&settings)?;

    Ok(settings)
}

/// Loads settings, falling back to defaults on any problem
///
/// A bad settings file never aborts a run: missing, unreadable,
/// unparseable or invalid files are logged and replaced by
/// [`Settings::default`].
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use spyfu_bulk::config::load_settings;
///
/// let settings = load_settings(Some(Path::new("settings.toml")));
/// println!("Requests per minute: {}", settings.requests_per_minute);
/// ```
pub fn load_settings(path: Option<&Path>) -> Settings {
    let Some(path) = path else {
        return Settings::default();
    };

    if !path.exists() {
        tracing::warn!("Settings file {} not found, using defaults.", path.display());
        return Settings::default();
    }

    match load_settings_file(path) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!(
                "Failed to load settings file {}: {}. Using defaults.",
                path.display(),
                e
            );
            Settings::default()
        }
    }
}

/// Computes a SHA-256 hash of the settings file content
///
/// Logged at startup so runs can be traced back to the settings they used.
///
/// # Returns
///
/// * `Ok(String)` - Hex-encoded SHA-256 hash of the file content
/// * `Err(ConfigError)` - Failed to read the file
pub fn compute_settings_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read(path)?;
    let mut hasher = Sha256::new();
    hasher.update(&content);
    Ok(hex::encode(hasher.finalize()))
}
