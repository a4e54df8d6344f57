//! The case catalog: every request the suite sends and what must come back.

use rates_types::Credential::{Absent, ExceededQuota, Invalid, Valid};
use rates_types::Endpoint::{self, Historical, Live};

use crate::oracle::{ContractCase, DateInput, Expectation};

// ─────────────────────────────────────────────────────────────────────────────
// Messages the service is expected to return
// ─────────────────────────────────────────────────────────────────────────────

pub const MSG_QUOTA_EXCEEDED: &str = "You have exceeded your daily/monthly API rate limit";
pub const MSG_NO_KEY: &str = "No API key found in request";
pub const MSG_INVALID_KEY: &str = "Invalid authentication credentials";
pub const MSG_INVALID_SOURCE: &str = "invalid Source Currency";
pub const MSG_INVALID_CURRENCIES: &str = "invalid Currency Codes";
pub const MSG_NO_DATE: &str = "You have not specified a date";
pub const MSG_INVALID_DATE: &str = "You have entered an invalid date";

pub const CODE_INVALID_SOURCE: i64 = 201;
pub const CODE_INVALID_CURRENCIES: i64 = 202;
pub const CODE_NO_DATE: i64 = 301;
pub const CODE_INVALID_DATE: i64 = 302;

/// Source the service falls back to when none is given.
pub const DEFAULT_SOURCE: &str = "USD";

/// Targets checked whenever the full quote set is expected.
const MAJOR_TARGETS: &[&str] = &["CAD", "EUR", "RUB"];

/// A well-formed code the service does not know.
const UNKNOWN_TARGET: &[&str] = &["WER"];

const QUOTA_EXCEEDED: Expectation = Expectation::Rejected {
    status: 429,
    message: MSG_QUOTA_EXCEEDED,
};
const NO_KEY: Expectation = Expectation::Rejected {
    status: 401,
    message: MSG_NO_KEY,
};
const INVALID_KEY: Expectation = Expectation::Rejected {
    status: 401,
    message: MSG_INVALID_KEY,
};
const INVALID_SOURCE: Expectation = Expectation::ApiError {
    code: CODE_INVALID_SOURCE,
    info: MSG_INVALID_SOURCE,
    success: Some(false),
};
const INVALID_CURRENCIES: Expectation = Expectation::ApiError {
    code: CODE_INVALID_CURRENCIES,
    info: MSG_INVALID_CURRENCIES,
    success: Some(false),
};
const NO_DATE: Expectation = Expectation::ApiError {
    code: CODE_NO_DATE,
    info: MSG_NO_DATE,
    success: None,
};
const INVALID_DATE: Expectation = Expectation::ApiError {
    code: CODE_INVALID_DATE,
    info: MSG_INVALID_DATE,
    success: None,
};

const fn rates(source: &'static str, present: &'static [&'static str]) -> Expectation {
    Expectation::Rates {
        source,
        present,
        absent: &[],
    }
}

const fn partial_rates(source: &'static str, present: &'static [&'static str]) -> Expectation {
    Expectation::Rates {
        source,
        present,
        absent: UNKNOWN_TARGET,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Live endpoint
// ─────────────────────────────────────────────────────────────────────────────

pub static LIVE_CASES: &[ContractCase] = &[
    ContractCase::new("live_exceeded_quota_key", Live, ExceededQuota, QUOTA_EXCEEDED),
    ContractCase::new("live_without_api_key", Live, Absent, NO_KEY),
    ContractCase::new("live_invalid_api_key", Live, Invalid, INVALID_KEY),
    ContractCase::new("live_invalid_api_key_with_params", Live, Invalid, INVALID_KEY)
        .source("EUR")
        .currencies("CAD,RUB"),
    ContractCase::new(
        "live_default_parameters",
        Live,
        Valid,
        rates(DEFAULT_SOURCE, MAJOR_TARGETS),
    ),
    ContractCase::new("live_source_all", Live, Valid, rates("ALL", MAJOR_TARGETS)).source("all"),
    ContractCase::new("live_source_amd", Live, Valid, rates("AMD", MAJOR_TARGETS)).source("AMD"),
    ContractCase::new(
        "live_source_mixed_case",
        Live,
        Valid,
        rates("ARS", MAJOR_TARGETS),
    )
    .source("aRs"),
    ContractCase::new("live_invalid_source", Live, Valid, INVALID_SOURCE).source("WERW"),
    ContractCase::new(
        "live_single_currency",
        Live,
        Valid,
        partial_rates(DEFAULT_SOURCE, &["CAD"]),
    )
    .currencies("CAD"),
    ContractCase::new(
        "live_mixed_case_currencies",
        Live,
        Valid,
        partial_rates(DEFAULT_SOURCE, &["CAD", "RUB", "EUR"]),
    )
    .currencies("cad,RUB,EuR"),
    ContractCase::new(
        "live_partially_unknown_currencies",
        Live,
        Valid,
        partial_rates(DEFAULT_SOURCE, &["CAD", "RUB"]),
    )
    .currencies("CAD,RUB,WER"),
    ContractCase::new("live_unknown_currency", Live, Valid, INVALID_CURRENCIES).currencies("ASD"),
    ContractCase::new(
        "live_all_currencies_unknown",
        Live,
        Valid,
        INVALID_CURRENCIES,
    )
    .currencies("CADE,RUSB,WER"),
    ContractCase::new(
        "live_source_and_currencies",
        Live,
        Valid,
        rates("EUR", &["CAD", "RUB", "USD"]),
    )
    .source("EUR")
    .currencies("CAD,RUB,USD"),
];

// ─────────────────────────────────────────────────────────────────────────────
// Historical endpoint
// ─────────────────────────────────────────────────────────────────────────────

const FIXTURE: DateInput = DateInput::Fixture;

pub static HISTORICAL_CASES: &[ContractCase] = &[
    ContractCase::new(
        "historical_exceeded_quota_key",
        Historical,
        ExceededQuota,
        QUOTA_EXCEEDED,
    )
    .date(FIXTURE),
    ContractCase::new("historical_without_api_key", Historical, Absent, NO_KEY),
    ContractCase::new("historical_invalid_api_key", Historical, Invalid, INVALID_KEY),
    ContractCase::new(
        "historical_invalid_api_key_with_params",
        Historical,
        Invalid,
        INVALID_KEY,
    )
    .source("EUR")
    .currencies("CAD,RUB")
    .date(FIXTURE),
    ContractCase::new("historical_without_date", Historical, Valid, NO_DATE),
    ContractCase::new(
        "historical_nonexistent_leap_day",
        Historical,
        Valid,
        INVALID_DATE,
    )
    .date(DateInput::Literal("1999-02-29")),
    ContractCase::new(
        "historical_day_31_of_30_day_month",
        Historical,
        Valid,
        INVALID_DATE,
    )
    .date(DateInput::Literal("2023-11-31")),
    ContractCase::new(
        "historical_valid_date",
        Historical,
        Valid,
        rates(DEFAULT_SOURCE, MAJOR_TARGETS),
    )
    .date(FIXTURE),
    ContractCase::new(
        "historical_source_all",
        Historical,
        Valid,
        rates("ALL", MAJOR_TARGETS),
    )
    .source("all")
    .date(FIXTURE),
    ContractCase::new(
        "historical_source_amd",
        Historical,
        Valid,
        rates("AMD", MAJOR_TARGETS),
    )
    .source("AMD")
    .date(FIXTURE),
    ContractCase::new(
        "historical_source_mixed_case",
        Historical,
        Valid,
        rates("ARS", MAJOR_TARGETS),
    )
    .source("aRs")
    .date(FIXTURE),
    ContractCase::new("historical_invalid_source", Historical, Valid, INVALID_SOURCE)
        .source("WERW")
        .date(FIXTURE),
    ContractCase::new(
        "historical_single_currency",
        Historical,
        Valid,
        partial_rates(DEFAULT_SOURCE, &["CAD"]),
    )
    .currencies("CAD")
    .date(FIXTURE),
    ContractCase::new(
        "historical_mixed_case_currencies",
        Historical,
        Valid,
        partial_rates(DEFAULT_SOURCE, &["CAD", "RUB", "EUR"]),
    )
    .currencies("cad,RUB,EuR")
    .date(FIXTURE),
    ContractCase::new(
        "historical_partially_unknown_currencies",
        Historical,
        Valid,
        partial_rates(DEFAULT_SOURCE, &["CAD", "RUB"]),
    )
    .currencies("CAD,RUB,WER")
    .date(FIXTURE),
    ContractCase::new(
        "historical_unknown_currency",
        Historical,
        Valid,
        INVALID_CURRENCIES,
    )
    .currencies("ASD")
    .date(FIXTURE),
    ContractCase::new(
        "historical_all_currencies_unknown",
        Historical,
        Valid,
        INVALID_CURRENCIES,
    )
    .currencies("CADE,RUSB,WER")
    .date(FIXTURE),
    ContractCase::new(
        "historical_source_and_currencies",
        Historical,
        Valid,
        rates("EUR", &["CAD", "RUB", "USD"]),
    )
    .source("EUR")
    .currencies("CAD,RUB,USD")
    .date(FIXTURE),
];

// ─────────────────────────────────────────────────────────────────────────────
// Lookup
// ─────────────────────────────────────────────────────────────────────────────

/// Every case, live first.
pub fn all() -> Vec<ContractCase> {
    LIVE_CASES.iter().chain(HISTORICAL_CASES).copied().collect()
}

pub fn for_endpoint(endpoint: Endpoint) -> &'static [ContractCase] {
    match endpoint {
        Endpoint::Live => LIVE_CASES,
        Endpoint::Historical => HISTORICAL_CASES,
    }
}

pub fn find(name: &str) -> Option<ContractCase> {
    LIVE_CASES
        .iter()
        .chain(HISTORICAL_CASES)
        .find(|case| case.name == name)
        .copied()
}
