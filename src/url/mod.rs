//! URL handling module
//!
//! Turns user-supplied website URLs into the canonical domain strings sent
//! to the API.

mod normalize;

pub use normalize::normalize_domain;
