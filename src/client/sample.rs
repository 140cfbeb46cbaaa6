//! Deterministic sample data
//!
//! Sample mode never touches the network. Each response is derived from a
//! seed over `(endpoint, domain, country, hour)`, so repeated calls within
//! the same clock hour return identical data.
//!
//! The generator is SHA-256 based: the seed is the first 8 bytes of
//! `SHA-256("endpoint|domain|country|hour")`, and the n-th value is the
//! first 8 bytes of `SHA-256(seed || n)`, both big-endian.

use crate::client::Endpoint;
use chrono::{DateTime, Duration, Utc};
use serde_json::{json, Map, Value};
use sha2::{Digest, Sha256};

/// Country used for seeding when none is given
const DEFAULT_COUNTRY: &str = "US";

const COMPETITOR_SUFFIXES: &[&str] = &["hq", "labs", "direct", "hub", "pro", "online"];

const KEYWORD_TERMS: &[&str] = &[
    "pricing",
    "reviews",
    "alternatives",
    "login",
    "coupon code",
    "free trial",
    "vs competitors",
    "software",
    "near me",
    "support",
];

const AD_HOOKS: &[&str] = &[
    "Official Site",
    "Save 20% Today",
    "Free Shipping",
    "Top Rated",
    "Compare Plans",
];

/// Returns the current hour bucket (unix seconds / 3600)
pub fn current_hour() -> i64 {
    Utc::now().timestamp() / 3600
}

/// Builds a sample response for an endpoint
///
/// # Arguments
///
/// * `endpoint` - Which endpoint to imitate
/// * `domain` - Normalized domain being queried
/// * `country` - Optional country code (`US` when absent)
/// * `hour` - Hour bucket the data is pinned to
pub fn sample_response(endpoint: Endpoint, domain: &str, country: Option<&str>, hour: i64) -> Value {
    let rng = SampleRng::new(endpoint, domain, country.unwrap_or(DEFAULT_COUNTRY), hour);
    let stem = domain_stem(domain);

    match endpoint {
        Endpoint::TopCompetitors => sample_competitors(&rng, stem),
        Endpoint::MostValuableKeywords => sample_valuable_keywords(&rng, stem),
        Endpoint::NewlyRankedKeywords => sample_newly_ranked(&rng, stem, hour),
        Endpoint::TopAds => sample_ads(&rng, stem, domain, hour),
        Endpoint::DomainStats => sample_domain_stats(&rng),
    }
}

/// Seeded pseudo-random stream
struct SampleRng {
    seed: u64,
}

impl SampleRng {
    fn new(endpoint: Endpoint, domain: &str, country: &str, hour: i64) -> Self {
        let key = format!("{}|{}|{}|{}", endpoint.path(), domain, country, hour);
        let digest = Sha256::digest(key.as_bytes());
        Self {
            seed: first_u64(&digest),
        }
    }

    /// The n-th value of the stream, in `[0, 1)`
    fn unit(&self, n: u64) -> f64 {
        let mut hasher = Sha256::new();
        hasher.update(self.seed.to_be_bytes());
        hasher.update(n.to_be_bytes());
        let bits = first_u64(&hasher.finalize()) >> 11;
        bits as f64 / (1u64 << 53) as f64
    }

    /// Integer in `[low, high]`
    fn int_between(&self, n: u64, low: u64, high: u64) -> u64 {
        low + (self.unit(n) * (high - low + 1) as f64) as u64
    }

    /// Float in `[low, high)`, rounded to two decimals
    fn money_between(&self, n: u64, low: f64, high: f64) -> f64 {
        round2(low + self.unit(n) * (high - low))
    }

    fn pick<'a>(&self, n: u64, items: &[&'a str]) -> &'a str {
        items[self.int_between(n, 0, items.len() as u64 - 1) as usize]
    }
}

fn first_u64(digest: &[u8]) -> u64 {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// First label of a domain, used to make sample names look related
fn domain_stem(domain: &str) -> &str {
    domain.split('.').find(|label| !label.is_empty()).unwrap_or(domain)
}

/// Date `days_ago` days before the hour bucket, as `YYYY-MM-DD`
fn date_before(hour: i64, days_ago: u64) -> String {
    let base = DateTime::from_timestamp(hour.saturating_mul(3600), 0).unwrap_or_default();
    (base - Duration::days(days_ago as i64))
        .format("%Y-%m-%d")
        .to_string()
}

fn sample_competitors(rng: &SampleRng, stem: &str) -> Value {
    let items = (0..5u64)
        .map(|i| {
            let n = i * 8;
            json!({
                "rank": i + 1,
                "domain": format!("{}{}.com", stem, rng.pick(n, COMPETITOR_SUFFIXES)),
                "common_keywords": rng.int_between(n + 1, 50, 5_000),
                "overlap_score": round2(rng.unit(n + 2)),
            })
        })
        .collect();
    Value::Array(items)
}

fn sample_valuable_keywords(rng: &SampleRng, stem: &str) -> Value {
    let items = (0..8u64)
        .map(|i| {
            let n = i * 8;
            let search_volume = rng.int_between(n + 1, 100, 50_000);
            let cpc = rng.money_between(n + 2, 0.25, 15.0);
            json!({
                "rank": i + 1,
                "keyword": format!("{} {}", stem, rng.pick(n, KEYWORD_TERMS)),
                "search_volume": search_volume,
                "cpc": cpc,
                "estimated_value": round2(search_volume as f64 * cpc * 0.05),
            })
        })
        .collect();
    Value::Array(items)
}

fn sample_newly_ranked(rng: &SampleRng, stem: &str, hour: i64) -> Value {
    let items = (0..6u64)
        .map(|i| {
            let n = i * 8;
            json!({
                "keyword": format!("{} {}", stem, rng.pick(n, KEYWORD_TERMS)),
                "rank": rng.int_between(n + 1, 1, 100),
                "search_volume": rng.int_between(n + 2, 50, 20_000),
                "first_seen": date_before(hour, rng.int_between(n + 3, 0, 30)),
            })
        })
        .collect();
    Value::Array(items)
}

fn sample_ads(rng: &SampleRng, stem: &str, domain: &str, hour: i64) -> Value {
    let items = (0..4u64)
        .map(|i| {
            let n = i * 8;
            let keyword = format!("{} {}", stem, rng.pick(n + 1, KEYWORD_TERMS));
            json!({
                "position": i + 1,
                "headline": format!("{} - {}", stem, rng.pick(n, AD_HOOKS)),
                "description": format!("Looking for {}? Visit {} today.", keyword, domain),
                "display_url": format!("{}/{}", domain, keyword.replace(' ', "-")),
                "keyword": keyword,
                "first_seen": date_before(hour, rng.int_between(n + 2, 0, 90)),
            })
        })
        .collect();
    Value::Array(items)
}

fn sample_domain_stats(rng: &SampleRng) -> Value {
    let mut stats = Map::new();
    stats.insert(
        "estimated_monthly_clicks".into(),
        json!(rng.int_between(0, 1_000, 500_000)),
    );
    stats.insert(
        "estimated_monthly_paid_clicks".into(),
        json!(rng.int_between(1, 100, 50_000)),
    );
    stats.insert("organic_keywords".into(), json!(rng.int_between(2, 50, 20_000)));
    stats.insert("paid_keywords".into(), json!(rng.int_between(3, 10, 5_000)));
    stats.insert(
        "monthly_adwords_budget".into(),
        json!(rng.money_between(4, 100.0, 50_000.0)),
    );
    stats.insert("domain_strength".into(), json!(rng.int_between(5, 1, 100)));
    Value::Object(stats)
}
