//! Rates API port.
//!
//! Implementations can be HTTP clients, in-memory fakes, etc.

use crate::domain::RatesQuery;
use crate::dto::ApiResponse;
use crate::error::ApiError;

/// Port trait for the remote rates service.
#[async_trait::async_trait]
pub trait RatesApi: Send + Sync + 'static {
    /// Sends one GET request and returns whatever the service answered.
    ///
    /// Non-2xx statuses are returned as `Ok`; only a failure to complete
    /// the exchange is an `Err`.
    async fn fetch(&self, query: &RatesQuery) -> Result<ApiResponse, ApiError>;
}
