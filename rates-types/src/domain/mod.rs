//! Request-side domain models.

pub mod credential;
pub mod endpoint;
pub mod query;

pub use credential::{ApiKey, Credential};
pub use endpoint::Endpoint;
pub use query::RatesQuery;
