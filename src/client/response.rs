//! Response decoding for live API calls
//!
//! This module turns a raw HTTP body into JSON, degrading gracefully:
//! - JSON bodies (labeled or not) are parsed directly
//! - HTML pages are searched for a JSON object inside `<script>` tags
//! - Anything else becomes `{"raw": "<first 1000 characters>"}`

use crate::client::Endpoint;
use crate::{ApiError, ApiResult};
use scraper::{Html, Selector};
use serde_json::{json, Map, Value};

/// Maximum number of characters kept for the raw-text fallback
pub const RAW_SNIPPET_CHARS: usize = 1000;

/// Decodes a response body into JSON
///
/// # Arguments
///
/// * `endpoint` - Endpoint the body came from (for logging)
/// * `content_type` - `Content-Type` header value, empty if absent
/// * `body` - Response body text
///
/// # Returns
///
/// Parsed JSON, JSON embedded in HTML, or a `raw` text snippet. Never fails.
pub fn decode_body(endpoint: Endpoint, content_type: &str, body: &str) -> Value {
    if content_type.contains("application/json") {
        match serde_json::from_str(body) {
            Ok(value) => return value,
            Err(e) => {
                tracing::warn!("Malformed JSON from {} despite JSON content type: {}", endpoint, e)
            }
        }
    } else if let Ok(value) = serde_json::from_str(body) {
        return value;
    }

    if looks_like_html(content_type, body) {
        if let Some(value) = extract_json_from_html(body) {
            tracing::debug!("Extracted embedded JSON from HTML response for {}", endpoint);
            return value;
        }
    }

    tracing::warn!(
        "Non-JSON response from SpyFu for {}. Returning raw text snippet.",
        endpoint
    );
    json!({ "raw": body.chars().take(RAW_SNIPPET_CHARS).collect::<String>() })
}

fn looks_like_html(content_type: &str, body: &str) -> bool {
    content_type.contains("text/html") || body.trim_start().starts_with('<')
}

/// Extracts the first JSON object found inside a `<script>` element
///
/// For each script, the text from its first `{` to its last `}` is tried.
pub fn extract_json_from_html(html: &str) -> Option<Value> {
    let document = Html::parse_document(html);
    let script_selector = Selector::parse("script").ok()?;

    document.select(&script_selector).find_map(|script| {
        let text = script.text().collect::<String>();
        let start = text.find('{')?;
        let end = text.rfind('}')?;
        if end < start {
            return None;
        }
        serde_json::from_str::<Value>(&text[start..=end])
            .ok()
            .filter(Value::is_object)
    })
}

/// Adapts a decoded payload to a list of items
///
/// Arrays are kept, a single object becomes a one-item list and `null` is
/// empty. Other shapes are rejected.
pub fn into_items(endpoint: Endpoint, value: Value) -> ApiResult<Vec<Value>> {
    match value {
        Value::Array(items) => Ok(items),
        Value::Object(_) => Ok(vec![value]),
        Value::Null => Ok(Vec::new()),
        _ => Err(ApiError::UnexpectedShape {
            endpoint: endpoint.to_string(),
            expected: "array or object",
        }),
    }
}

/// Adapts a decoded payload to a stats mapping
pub fn into_stats(endpoint: Endpoint, value: Value) -> ApiResult<Map<String, Value>> {
    match value {
        Value::Object(stats) => Ok(stats),
        _ => Err(ApiError::UnexpectedShape {
            endpoint: endpoint.to_string(),
            expected: "object",
        }),
    }
}
