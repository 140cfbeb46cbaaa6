use crate::config::types::Settings;
use crate::ConfigError;
use url::Url;

/// Validates the loaded settings
pub fn validate(settings: &Settings) -> Result<(), ConfigError> {
    validate_base_url(&settings.spyfu_base_url)?;
    validate_timeout(settings.timeout_seconds)?;
    validate_proxies(settings)?;
    Ok(())
}

/// Validates the API base URL
fn validate_base_url(base_url: &str) -> Result<(), ConfigError> {
    let url = Url::parse(base_url).map_err(|e| {
        ConfigError::Validation(format!("Invalid spyfu_base_url '{}': {}", base_url, e))
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "spyfu_base_url must use http or https, got '{}'",
            url.scheme()
        )));
    }

    Ok(())
}

fn validate_timeout(timeout_seconds: u64) -> Result<(), ConfigError> {
    if timeout_seconds < 1 {
        return Err(ConfigError::Validation(
            "timeout_seconds must be >= 1".to_string(),
        ));
    }
    Ok(())
}

/// Validates every proxy URL
fn validate_proxies(settings: &Settings) -> Result<(), ConfigError> {
    for proxy in settings.proxies.all_urls() {
        Url::parse(proxy).map_err(|e| {
            ConfigError::Validation(format!("Invalid proxy URL '{}': {}", proxy, e))
        })?;
    }
    Ok(())
}
