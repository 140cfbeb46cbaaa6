use crate::ConfigError;
use std::path::Path;

/// Reads the URLs to process from a text file
///
/// One URL per line. Lines are trimmed; blank lines and lines starting
/// with `#` are skipped.
///
/// # Returns
///
/// * `Ok(Vec<String>)` - At least one URL, in file order
/// * `Err(ConfigError)` - The file is missing, unreadable, or has no URLs
pub fn read_urls_from_file(path: &Path) -> Result<Vec<String>, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::InputNotFound(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)?;
    let urls = parse_url_list(&content);

    if urls.is_empty() {
        return Err(ConfigError::EmptyInput(path.display().to_string()));
    }

    Ok(urls)
}

/// Extracts URLs from the text of an input file
pub fn parse_url_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
