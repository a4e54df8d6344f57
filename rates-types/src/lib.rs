//! # Rates Types
//!
//! Domain types and port traits for the currency-rates contract suite.
//! This crate has ZERO IO dependencies - only data structures and the
//! trait the HTTP adapter implements.
//!
//! ## Architecture
//!
//! - `domain/` - Request-side types (Endpoint, Credential, RatesQuery)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Wire shapes returned by the remote rates API
//! - `error/` - Port-level error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{ApiKey, Credential, Endpoint, RatesQuery};
pub use dto::{ApiErrorDetail, ApiResponse, RatesPayload};
pub use error::ApiError;
pub use ports::RatesApi;
