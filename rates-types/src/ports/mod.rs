//! Port traits (interfaces for adapters).
//!
//! The harness depends on these traits, not on a concrete HTTP client.

mod rates_api;

pub use rates_api::RatesApi;
