//! API key variants used by contract cases.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The credential a case sends, classified by how the remote service
/// should treat it. The concrete key strings come from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Credential {
    /// A key with remaining quota.
    Valid,
    /// A well-formed key the service does not recognise.
    Invalid,
    /// A key whose daily/monthly quota is used up.
    ExceededQuota,
    /// No `apikey` parameter at all.
    Absent,
}

impl Credential {
    pub fn as_str(&self) -> &'static str {
        match self {
            Credential::Valid => "valid",
            Credential::Invalid => "invalid",
            Credential::ExceededQuota => "exceeded",
            Credential::Absent => "absent",
        }
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Credential {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "valid" => Ok(Credential::Valid),
            "invalid" => Ok(Credential::Invalid),
            "exceeded" | "exceeded_quota" | "exceeded-quota" => Ok(Credential::ExceededQuota),
            "absent" | "none" => Ok(Credential::Absent),
            _ => Err(format!("Unknown credential variant: {}", s)),
        }
    }
}

/// A resolved API key. `None` means the parameter is omitted.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ApiKey(Option<String>);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(Some(key.into()))
    }

    pub fn absent() -> Self {
        Self(None)
    }

    pub fn expose(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Short form safe for logs: first four characters only.
    pub fn redacted(&self) -> String {
        match &self.0 {
            None => "<absent>".to_string(),
            Some(key) if key.is_empty() => "<empty>".to_string(),
            Some(key) => {
                let prefix: String = key.chars().take(4).collect();
                format!("{prefix}***")
            }
        }
    }
}

// Keys never show up in Debug output.
impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey({})", self.redacted())
    }
}
