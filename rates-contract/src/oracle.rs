//! Contract cases and their expected outcomes.
//!
//! A `ContractCase` is plain data: what to send and what must come back.
//! Adding coverage means adding a row to the catalog, not new code.

use std::fmt;

use rates_types::{Credential, Endpoint, RatesQuery};
use serde::Serialize;

use crate::config::Fixtures;

/// Date parameter for historical cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateInput {
    /// The configured historical date fixture.
    Fixture,
    /// A literal string, sent as-is.
    Literal(&'static str),
}

/// What the remote service must answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expectation {
    /// Refused before reaching the rates logic: non-200 status with the
    /// reason in the top-level `message` field.
    Rejected {
        status: u16,
        message: &'static str,
    },
    /// 200 carrying a business-rule error in `error.code` / `error.info`.
    /// `success` is only asserted when set.
    ApiError {
        code: i64,
        info: &'static str,
        success: Option<bool>,
    },
    /// 200 with rates relative to `source`. `present` and `absent` are target
    /// codes; the quote keys checked are `source` followed by each target.
    Rates {
        source: &'static str,
        present: &'static [&'static str],
        absent: &'static [&'static str],
    },
}

impl Expectation {
    /// Status code this expectation requires.
    pub fn status(&self) -> u16 {
        match self {
            Expectation::Rejected { status, .. } => *status,
            Expectation::ApiError { .. } | Expectation::Rates { .. } => 200,
        }
    }
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expectation::Rejected { status, message } => {
                write!(f, "{status}, message contains {message:?}")
            }
            Expectation::ApiError {
                code,
                info,
                success,
            } => {
                write!(f, "200, error.code={code}, error.info contains {info:?}")?;
                if let Some(success) = success {
                    write!(f, ", success={success}")?;
                }
                Ok(())
            }
            Expectation::Rates {
                source,
                present,
                absent,
            } => {
                write!(f, "200, success=true, source={source}")?;
                if !present.is_empty() {
                    let keys: Vec<String> = present.iter().map(|t| quote_key(source, t)).collect();
                    write!(f, ", quotes {}", keys.join("/"))?;
                }
                if !absent.is_empty() {
                    let keys: Vec<String> = absent.iter().map(|t| quote_key(source, t)).collect();
                    write!(f, ", no {}", keys.join("/"))?;
                }
                Ok(())
            }
        }
    }
}

/// Quote key as the service spells it: uppercased source then target.
pub fn quote_key(source: &str, target: &str) -> String {
    format!("{}{}", source.to_uppercase(), target.to_uppercase())
}

/// One contract case: a request and its oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContractCase {
    pub name: &'static str,
    pub endpoint: Endpoint,
    pub credential: Credential,
    pub source: Option<&'static str>,
    pub currencies: Option<&'static str>,
    #[serde(skip)]
    pub date: Option<DateInput>,
    #[serde(skip)]
    pub expect: Expectation,
}

impl ContractCase {
    pub const fn new(
        name: &'static str,
        endpoint: Endpoint,
        credential: Credential,
        expect: Expectation,
    ) -> Self {
        Self {
            name,
            endpoint,
            credential,
            source: None,
            currencies: None,
            date: None,
            expect,
        }
    }

    pub const fn source(mut self, source: &'static str) -> Self {
        self.source = Some(source);
        self
    }

    pub const fn currencies(mut self, currencies: &'static str) -> Self {
        self.currencies = Some(currencies);
        self
    }

    pub const fn date(mut self, date: DateInput) -> Self {
        self.date = Some(date);
        self
    }

    /// The date string this case sends, if any.
    pub fn requested_date(&self, fixtures: &Fixtures) -> Option<String> {
        self.date.map(|date| match date {
            DateInput::Fixture => fixtures.historical_date.clone(),
            DateInput::Literal(literal) => literal.to_string(),
        })
    }

    /// Resolves credential and date fixtures into a concrete request.
    pub fn query(&self, fixtures: &Fixtures) -> RatesQuery {
        let mut query = RatesQuery::new(self.endpoint, fixtures.api_key(self.credential));
        if let Some(source) = self.source {
            query = query.with_source(source);
        }
        if let Some(currencies) = self.currencies {
            query = query.with_currencies(currencies);
        }
        if let Some(date) = self.requested_date(fixtures) {
            query = query.with_date(date);
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixtures() -> Fixtures {
        Fixtures {
            valid_key: "valid".into(),
            exceeded_key: "spent".into(),
            invalid_key: "bogus".into(),
            historical_date: "2023-10-20".into(),
        }
    }

    #[test]
    fn test_query_resolves_fixtures() {
        let case = ContractCase::new(
            "probe",
            Endpoint::Historical,
            Credential::Valid,
            Expectation::Rates {
                source: "EUR",
                present: &["CAD"],
                absent: &[],
            },
        )
        .source("EUR")
        .currencies("CAD")
        .date(DateInput::Fixture);

        let query = case.query(&fixtures());
        assert_eq!(query.api_key.expose(), Some("valid"));
        assert_eq!(query.source.as_deref(), Some("EUR"));
        assert_eq!(query.currencies.as_deref(), Some("CAD"));
        assert_eq!(query.date.as_deref(), Some("2023-10-20"));
    }

    #[test]
    fn test_literal_date_is_sent_verbatim() {
        let case = ContractCase::new(
            "leap",
            Endpoint::Historical,
            Credential::Valid,
            Expectation::ApiError {
                code: 302,
                info: "invalid date",
                success: None,
            },
        )
        .date(DateInput::Literal("1999-02-29"));
        assert_eq!(case.query(&fixtures()).date.as_deref(), Some("1999-02-29"));
    }

    #[test]
    fn test_absent_credential_sends_no_key() {
        let case = ContractCase::new(
            "anon",
            Endpoint::Live,
            Credential::Absent,
            Expectation::Rejected {
                status: 401,
                message: "No API key",
            },
        );
        assert!(case.query(&fixtures()).params().is_empty());
    }

    #[test]
    fn test_quote_key_uppercases() {
        assert_eq!(quote_key("aRs", "cad"), "ARSCAD");
    }

    #[test]
    fn test_expectation_display() {
        let expect = Expectation::Rates {
            source: "USD",
            present: &["CAD", "RUB"],
            absent: &["WER"],
        };
        assert_eq!(
            expect.to_string(),
            "200, success=true, source=USD, quotes USDCAD/USDRUB, no USDWER"
        );
        assert_eq!(expect.status(), 200);
    }
}
