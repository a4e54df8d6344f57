//! Wire shapes returned by the remote rates API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Raw exchange
// ─────────────────────────────────────────────────────────────────────────────

/// One completed HTTP exchange: status plus body.
///
/// Every status code lands here, including 401 and 429; those are outcomes
/// the contract asserts on, not transport failures.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    /// Parsed JSON body, or `Null` when the body was not JSON.
    pub body: serde_json::Value,
    /// Body text as received.
    pub raw: String,
}

impl ApiResponse {
    /// Builds a response from a status and body text.
    pub fn from_text(status: u16, raw: String) -> Self {
        let body = serde_json::from_str(&raw).unwrap_or(serde_json::Value::Null);
        Self { status, body, raw }
    }

    pub fn is_json(&self) -> bool {
        !self.body.is_null()
    }

    /// Looks up a dotted path such as `error.code` or `quotes.USDCAD`.
    pub fn field(&self, path: &str) -> Option<&serde_json::Value> {
        path.split('.')
            .try_fold(&self.body, |value, segment| value.get(segment))
    }

    /// Typed view of the body, when it has the rates shape.
    pub fn payload(&self) -> Option<RatesPayload> {
        serde_json::from_value(self.body.clone()).ok()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Rates body
// ─────────────────────────────────────────────────────────────────────────────

/// Body of a live or historical response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RatesPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    /// Epoch seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Keyed by source code followed by target code, e.g. `USDCAD`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub quotes: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub historical: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiErrorDetail>,
    /// Gateway-level message (401 / 429 bodies).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Business-rule error reported inside a 200 response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub code: i64,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub info: String,
}
