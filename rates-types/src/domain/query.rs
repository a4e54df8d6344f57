//! A single request to the rates API.

use super::{ApiKey, Endpoint};

/// Fully resolved request: which endpoint, which key, which parameters.
///
/// Parameter values are passed through verbatim. Checking them is the
/// remote service's job, and the contract cases exist to observe that check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatesQuery {
    pub endpoint: Endpoint,
    pub api_key: ApiKey,
    pub source: Option<String>,
    pub currencies: Option<String>,
    pub date: Option<String>,
}

impl RatesQuery {
    pub fn new(endpoint: Endpoint, api_key: ApiKey) -> Self {
        Self {
            endpoint,
            api_key,
            source: None,
            currencies: None,
            date: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_currencies(mut self, currencies: impl Into<String>) -> Self {
        self.currencies = Some(currencies.into());
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Query-string pairs in wire order. Absent values are omitted.
    pub fn params(&self) -> Vec<(&'static str, &str)> {
        let mut params = Vec::with_capacity(4);
        if let Some(key) = self.api_key.expose() {
            params.push(("apikey", key));
        }
        if let Some(source) = &self.source {
            params.push(("source", source.as_str()));
        }
        if let Some(currencies) = &self.currencies {
            params.push(("currencies", currencies.as_str()));
        }
        if let Some(date) = &self.date {
            params.push(("date", date.as_str()));
        }
        params
    }
}
