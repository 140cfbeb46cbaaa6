//! API client module
//!
//! This module contains everything that talks to (or imitates) the SpyFu API:
//! - The client with its sample and live modes
//! - Round-robin proxy rotation
//! - Requests-per-minute throttling
//! - Deterministic sample data
//! - Response decoding and shape adaptation

mod api;
mod endpoint;
mod proxy;
pub mod response;
pub mod sample;
mod throttle;

pub use api::{build_http_client, SpyfuClient, USER_AGENT};
pub use endpoint::Endpoint;
pub use proxy::ProxyRotator;
pub use throttle::RequestThrottler;
