//! SpyFu API client
//!
//! Single entry point for the fetch operations used by the record builders.
//! Each operation maps to one [`Endpoint`] and runs either in sample mode
//! (deterministic synthetic data, no network) or live mode (throttled,
//! proxy-rotated HTTP GET).

use crate::client::response::{decode_body, into_items, into_stats};
use crate::client::sample::{current_hour, sample_response};
use crate::client::{Endpoint, ProxyRotator, RequestThrottler};
use crate::config::{Settings, DEFAULT_BASE_URL};
use crate::{ApiError, ApiResult};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Proxy};
use serde_json::{Map, Value};
use std::time::Duration;
use tokio::sync::OnceCell;

/// Identifying user agent sent with every live request
pub const USER_AGENT: &str = concat!("SpyfuBulkUrlsClient/", env!("CARGO_PKG_VERSION"));

/// Client for the SpyFu API
///
/// Sample mode is used when `use_sample_data` is set or no API key is
/// available; live mode otherwise.
///
/// Live mode keeps one pooled HTTP client per configured proxy (or a single
/// direct client), built on first use and reused for every later request.
#[derive(Debug)]
pub struct SpyfuClient {
    base_url: String,
    api_key: Option<String>,
    use_sample_data: bool,
    timeout: Duration,
    proxies: ProxyRotator,
    throttler: RequestThrottler,
    sample_hour: Option<i64>,
    http_clients: OnceCell<Vec<Client>>,
}

impl SpyfuClient {
    /// Creates a sample-mode client with default throttling and no proxies
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            use_sample_data: true,
            timeout: Duration::from_secs(20),
            proxies: ProxyRotator::default(),
            throttler: RequestThrottler::default(),
            sample_hour: None,
            http_clients: OnceCell::new(),
        }
    }

    /// Creates a client from the run settings
    ///
    /// The API key falls back to the `SPYFU_API_KEY` environment variable.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.spyfu_base_url.clone())
            .with_api_key(settings.resolved_api_key())
            .with_sample_data(settings.use_sample_data)
            .with_timeout(Duration::from_secs(settings.timeout_seconds))
            .with_proxies(ProxyRotator::from_config(&settings.proxies))
            .with_throttler(RequestThrottler::new(settings.requests_per_minute))
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    pub fn with_sample_data(mut self, use_sample_data: bool) -> Self {
        self.use_sample_data = use_sample_data;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self.http_clients = OnceCell::new();
        self
    }

    pub fn with_proxies(mut self, proxies: ProxyRotator) -> Self {
        self.proxies = proxies;
        self.http_clients = OnceCell::new();
        self
    }

    pub fn with_throttler(mut self, throttler: RequestThrottler) -> Self {
        self.throttler = throttler;
        self
    }

    /// Pins sample data to a fixed hour bucket instead of the wall clock
    pub fn with_sample_hour(mut self, hour: i64) -> Self {
        self.sample_hour = Some(hour);
        self
    }

    /// Returns true if calls are answered with synthetic data
    pub fn is_sample_mode(&self) -> bool {
        self.use_sample_data || self.api_key.is_none()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get_top_competitors(
        &self,
        domain: &str,
        country: Option<&str>,
    ) -> ApiResult<Vec<Value>> {
        self.fetch_items(Endpoint::TopCompetitors, domain, country)
            .await
    }

    pub async fn get_most_valuable_keywords(
        &self,
        domain: &str,
        country: Option<&str>,
    ) -> ApiResult<Vec<Value>> {
        self.fetch_items(Endpoint::MostValuableKeywords, domain, country)
            .await
    }

    pub async fn get_newly_ranked_keywords(
        &self,
        domain: &str,
        country: Option<&str>,
    ) -> ApiResult<Vec<Value>> {
        self.fetch_items(Endpoint::NewlyRankedKeywords, domain, country)
            .await
    }

    pub async fn get_top_ads(&self, domain: &str, country: Option<&str>) -> ApiResult<Vec<Value>> {
        self.fetch_items(Endpoint::TopAds, domain, country).await
    }

    pub async fn get_domain_stats(
        &self,
        domain: &str,
        country: Option<&str>,
    ) -> ApiResult<Map<String, Value>> {
        let value = self.request(Endpoint::DomainStats, domain, country).await?;
        into_stats(Endpoint::DomainStats, value)
    }

    async fn fetch_items(
        &self,
        endpoint: Endpoint,
        domain: &str,
        country: Option<&str>,
    ) -> ApiResult<Vec<Value>> {
        let value = self.request(endpoint, domain, country).await?;
        into_items(endpoint, value)
    }

    /// Issues one logical request, in sample or live mode
    pub async fn request(
        &self,
        endpoint: Endpoint,
        domain: &str,
        country: Option<&str>,
    ) -> ApiResult<Value> {
        if self.is_sample_mode() {
            tracing::debug!(
                "Using sample data mode for endpoint={} domain={}",
                endpoint,
                domain
            );
            let hour = self.sample_hour.unwrap_or_else(current_hour);
            return Ok(sample_response(endpoint, domain, country, hour));
        }

        self.request_live(endpoint, domain, country).await
    }

    async fn request_live(
        &self,
        endpoint: Endpoint,
        domain: &str,
        country: Option<&str>,
    ) -> ApiResult<Value> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), endpoint.path());

        let mut params = vec![("domain", domain)];
        if let Some(country) = country {
            params.push(("country", country));
        }

        self.throttler.acquire().await;

        let client = self.next_http_client().await?;

        tracing::debug!("Requesting {} with params={:?}", url, params);
        let mut request = client.get(&url).query(&params);
        if let Some(api_key) = &self.api_key {
            request = request.header(AUTHORIZATION, format!("Bearer {}", api_key));
        }

        let response = request.send().await.map_err(|source| ApiError::Http {
            url: url.clone(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        let body = response
            .text()
            .await
            .map_err(|source| ApiError::Http { url, source })?;

        Ok(decode_body(endpoint, &content_type, &body))
    }
}

impl SpyfuClient {
    /// Picks the pooled client for the next proxy in the rotation
    async fn next_http_client(&self) -> ApiResult<&Client> {
        let clients = self
            .http_clients
            .get_or_try_init(|| async { self.build_http_clients() })
            .await?;
        let index = self.proxies.next_index().unwrap_or(0);
        Ok(&clients[index])
    }

    /// One client per proxy slot, in rotation order, or one direct client
    fn build_http_clients(&self) -> ApiResult<Vec<Client>> {
        if self.proxies.is_empty() {
            return Ok(vec![build_http_client(self.timeout, None)?]);
        }

        self.proxies
            .proxies()
            .iter()
            .map(|proxy| build_http_client(self.timeout, Some(proxy)))
            .collect()
    }
}

impl Default for SpyfuClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Builds an HTTP client, optionally routed through a proxy
///
/// # Arguments
///
/// * `timeout` - Total request timeout
/// * `proxy` - Proxy URL applied to both http and https traffic, if any
pub fn build_http_client(timeout: Duration, proxy: Option<&str>) -> ApiResult<Client> {
    let mut builder = Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .gzip(true)
        .brotli(true);

    if let Some(proxy) = proxy {
        let proxy_config = Proxy::all(proxy).map_err(|source| ApiError::Proxy {
            proxy: proxy.to_string(),
            source,
        })?;
        builder = builder.proxy(proxy_config);
    }

    builder.build().map_err(|source| ApiError::Http {
        url: String::new(),
        source,
    })
}
