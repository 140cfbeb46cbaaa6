//! Round-robin proxy rotation

use crate::config::ProxyConfig;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Cycles through configured proxy URLs in round-robin order
///
/// Built from a `rotating` list the order (and any duplicates) is kept.
/// Built from `http`/`https` lists the URLs are merged as a set.
#[derive(Debug, Default)]
pub struct ProxyRotator {
    proxies: Vec<String>,
    cursor: AtomicUsize,
}

impl ProxyRotator {
    /// Creates a rotator over an explicit proxy list
    pub fn new(proxies: Vec<String>) -> Self {
        Self {
            proxies,
            cursor: AtomicUsize::new(0),
        }
    }

    /// Creates a rotator from the proxy section of the settings
    pub fn from_config(config: &ProxyConfig) -> Self {
        let proxies = match &config.rotating {
            Some(rotating) => rotating.clone(),
            None => config
                .http
                .iter()
                .chain(config.https.iter())
                .cloned()
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect(),
        };

        if proxies.is_empty() {
            tracing::info!("Proxy rotator initialized without proxies.");
        } else {
            tracing::info!("Proxy rotator loaded {} proxies.", proxies.len());
        }

        Self::new(proxies)
    }

    /// Returns the next proxy URL, wrapping around indefinitely
    ///
    /// Returns `None` when no proxies are configured.
    pub fn next_proxy(&self) -> Option<&str> {
        self.next_index().map(|index| self.proxies[index].as_str())
    }

    /// Advances the rotation and returns the position of the chosen proxy
    pub fn next_index(&self) -> Option<usize> {
        if self.proxies.is_empty() {
            return None;
        }

        let index = self.cursor.fetch_add(1, Ordering::Relaxed) % self.proxies.len();
        tracing::debug!("Using proxy: {}", self.proxies[index]);
        Some(index)
    }

    /// Proxy URLs in rotation order
    pub fn proxies(&self) -> &[String] {
        &self.proxies
    }

    /// Number of proxies in the rotation
    pub fn len(&self) -> usize {
        self.proxies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proxies.is_empty()
    }
}
