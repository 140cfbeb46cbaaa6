use serde::{Deserialize, Deserializer};

/// Default SpyFu base URL
pub const DEFAULT_BASE_URL: &str = "https://www.spyfu.com";

/// Environment variable consulted when no API key is configured
pub const API_KEY_ENV: &str = "SPYFU_API_KEY";

/// Runtime settings for a bulk run
///
/// Every field has a default, so an empty settings file is valid.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the SpyFu API
    pub spyfu_base_url: String,

    /// API key; falls back to the `SPYFU_API_KEY` environment variable
    pub spyfu_api_key: Option<String>,

    /// Synthesize deterministic sample data instead of calling the API
    pub use_sample_data: bool,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,

    /// Proxy endpoints to rotate through
    #[serde(deserialize_with = "null_as_default")]
    pub proxies: ProxyConfig,

    /// Outbound request budget; values below 1 are clamped by the throttler
    pub requests_per_minute: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            spyfu_base_url: DEFAULT_BASE_URL.to_string(),
            spyfu_api_key: None,
            use_sample_data: true,
            timeout_seconds: 20,
            proxies: ProxyConfig::default(),
            requests_per_minute: 60,
        }
    }
}

impl Settings {
    /// Returns the configured API key, or the one from the environment
    ///
    /// Empty strings count as absent.
    pub fn resolved_api_key(&self) -> Option<String> {
        self.spyfu_api_key
            .clone()
            .filter(|key| !key.is_empty())
            .or_else(|| std::env::var(API_KEY_ENV).ok().filter(|key| !key.is_empty()))
    }
}

/// Proxy configuration
///
/// Either a `rotating` list (order and duplicates kept) or separate `http`
/// and `https` lists (merged as a set).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    pub rotating: Option<Vec<String>>,

    #[serde(deserialize_with = "null_as_default")]
    pub http: Vec<String>,

    #[serde(deserialize_with = "null_as_default")]
    pub https: Vec<String>,
}

impl ProxyConfig {
    /// Builds a config from a rotating list
    pub fn rotating(proxies: Vec<String>) -> Self {
        Self {
            rotating: Some(proxies),
            ..Self::default()
        }
    }

    /// Returns every proxy URL mentioned in the config
    pub fn all_urls(&self) -> impl Iterator<Item = &String> {
        self.rotating
            .iter()
            .flatten()
            .chain(self.http.iter())
            .chain(self.https.iter())
    }
}

/// Treats an explicit `null` like a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
