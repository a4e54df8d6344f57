//! The two rate endpoints exposed by the remote API.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which rates endpoint a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endpoint {
    /// Current ("live") rates.
    Live,
    /// Rates as of a past calendar date.
    Historical,
}

impl Endpoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::Live => "live",
            Endpoint::Historical => "historical",
        }
    }

    /// Only the historical endpoint accepts a `date` parameter.
    pub fn accepts_date(&self) -> bool {
        matches!(self, Endpoint::Historical)
    }

    pub fn all() -> &'static [Endpoint] {
        &[Endpoint::Live, Endpoint::Historical]
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Endpoint {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "live" | "current" => Ok(Endpoint::Live),
            "historical" => Ok(Endpoint::Historical),
            _ => Err(format!("Unknown endpoint: {}", s)),
        }
    }
}
