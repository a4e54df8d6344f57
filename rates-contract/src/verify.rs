//! Response verification against a case's oracle.
//!
//! `check` is pure: it takes the case, the evaluation context and the
//! response, and lists every field that does not match.

use std::fmt;

use chrono::{DateTime, NaiveDate};
use rates_types::{ApiResponse, Endpoint};
use serde::Serialize;
use serde_json::Value;

use crate::config::Fixtures;
use crate::oracle::{ContractCase, Expectation, quote_key};

/// One field that did not match its oracle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mismatch {
    pub field: String,
    pub expected: String,
    pub actual: String,
}

impl Mismatch {
    fn new(field: impl Into<String>, expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: expected {}, got {}",
            self.field, self.expected, self.actual
        )
    }
}

/// What a response is checked against besides the oracle itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyContext {
    pub endpoint: Endpoint,
    /// Date string the request carried, echoed back by the historical endpoint.
    pub requested_date: Option<String>,
    /// Calendar day (UTC) the response `timestamp` must fall on.
    pub expected_day: Option<NaiveDate>,
}

impl VerifyContext {
    /// Context for `case`. Live timestamps must fall on `today`; historical
    /// ones on the requested date.
    pub fn for_case(case: &ContractCase, fixtures: &Fixtures, today: NaiveDate) -> Self {
        let requested_date = case.requested_date(fixtures);
        let expected_day = match case.endpoint {
            Endpoint::Live => Some(today),
            Endpoint::Historical => requested_date
                .as_deref()
                .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()),
        };
        Self {
            endpoint: case.endpoint,
            requested_date,
            expected_day,
        }
    }
}

/// Compares `response` with the case's oracle.
pub fn check(case: &ContractCase, ctx: &VerifyContext, response: &ApiResponse) -> Vec<Mismatch> {
    let mut out = Vec::new();

    let status = case.expect.status();
    if response.status != status {
        out.push(Mismatch::new(
            "status",
            status.to_string(),
            response.status.to_string(),
        ));
    }
    if !response.is_json() {
        out.push(Mismatch::new("body", "a JSON document", excerpt(&response.raw)));
        return out;
    }

    match case.expect {
        Expectation::Rejected { message, .. } => {
            expect_contains(&mut out, response, "message", message);
        }
        Expectation::ApiError {
            code,
            info,
            success,
        } => {
            if let Some(success) = success {
                expect_eq(&mut out, response, "success", Value::Bool(success));
            }
            expect_present(&mut out, response, "error");
            expect_eq(&mut out, response, "error.code", Value::from(code));
            expect_contains(&mut out, response, "error.info", info);
        }
        Expectation::Rates {
            source,
            present,
            absent,
        } => {
            expect_eq(&mut out, response, "success", Value::Bool(true));
            expect_eq(&mut out, response, "source", Value::from(source));
            for target in present {
                expect_rate(&mut out, response, &quote_key(source, target));
            }
            for target in absent {
                expect_absent(&mut out, response, &format!("quotes.{}", quote_key(source, target)));
            }
            expect_timestamp(&mut out, response, ctx.expected_day);
            if ctx.endpoint == Endpoint::Historical {
                expect_eq(&mut out, response, "historical", Value::Bool(true));
                match &ctx.requested_date {
                    Some(date) => expect_eq(&mut out, response, "date", Value::from(date.as_str())),
                    None => out.push(Mismatch::new("date", "a requested date", "none sent")),
                }
            }
        }
    }
    out
}

/// Two answers to the same request must carry identical quotes.
pub fn compare_quotes(first: &ApiResponse, second: &ApiResponse) -> Vec<Mismatch> {
    let mut out = Vec::new();
    let (Some(a), Some(b)) = (first.payload(), second.payload()) else {
        out.push(Mismatch::new("quotes", "two rates payloads", "unparseable body"));
        return out;
    };
    if a.quotes.is_empty() {
        out.push(Mismatch::new("quotes", "at least one quote", "none"));
        return out;
    }
    for (key, rate) in &a.quotes {
        match b.quotes.get(key) {
            None => out.push(Mismatch::new(
                format!("quotes.{key}"),
                rate.to_string(),
                "<missing on repeat>",
            )),
            Some(again) if again != rate => out.push(Mismatch::new(
                format!("quotes.{key}"),
                rate.to_string(),
                again.to_string(),
            )),
            Some(_) => {}
        }
    }
    for key in b.quotes.keys().filter(|k| !a.quotes.contains_key(*k)) {
        out.push(Mismatch::new(
            format!("quotes.{key}"),
            "<missing>",
            "present on repeat",
        ));
    }
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Field checks
// ─────────────────────────────────────────────────────────────────────────────

fn describe(value: Option<&Value>) -> String {
    match value {
        None => "<missing>".to_string(),
        Some(value) => value.to_string(),
    }
}

fn excerpt(raw: &str) -> String {
    const MAX: usize = 120;
    if raw.trim().is_empty() {
        return "<empty body>".to_string();
    }
    let mut short: String = raw.chars().take(MAX).collect();
    if raw.chars().count() > MAX {
        short.push('…');
    }
    format!("{short:?}")
}

fn expect_eq(out: &mut Vec<Mismatch>, response: &ApiResponse, path: &str, expected: Value) {
    let actual = response.field(path);
    if actual != Some(&expected) {
        out.push(Mismatch::new(path, expected.to_string(), describe(actual)));
    }
}

fn expect_contains(out: &mut Vec<Mismatch>, response: &ApiResponse, path: &str, needle: &str) {
    let actual = response.field(path);
    let found = actual
        .and_then(Value::as_str)
        .is_some_and(|text| text.contains(needle));
    if !found {
        out.push(Mismatch::new(
            path,
            format!("text containing {needle:?}"),
            describe(actual),
        ));
    }
}

fn expect_present(out: &mut Vec<Mismatch>, response: &ApiResponse, path: &str) {
    if response.field(path).is_none_or(Value::is_null) {
        out.push(Mismatch::new(path, "a value", "<missing>"));
    }
}

fn expect_absent(out: &mut Vec<Mismatch>, response: &ApiResponse, path: &str) {
    if let Some(actual) = response.field(path).filter(|v| !v.is_null()) {
        out.push(Mismatch::new(path, "<missing>", actual.to_string()));
    }
}

fn expect_rate(out: &mut Vec<Mismatch>, response: &ApiResponse, key: &str) {
    let path = format!("quotes.{key}");
    let actual = response.field(&path);
    if !actual.is_some_and(Value::is_number) {
        out.push(Mismatch::new(path, "a numeric rate", describe(actual)));
    }
}

fn expect_timestamp(out: &mut Vec<Mismatch>, response: &ApiResponse, day: Option<NaiveDate>) {
    let actual = response.field("timestamp");
    let Some(seconds) = actual.and_then(Value::as_i64) else {
        out.push(Mismatch::new("timestamp", "epoch seconds", describe(actual)));
        return;
    };
    let Some(stamped) = DateTime::from_timestamp(seconds, 0).map(|t| t.date_naive()) else {
        out.push(Mismatch::new("timestamp", "a representable instant", seconds.to_string()));
        return;
    };
    match day {
        Some(day) if day == stamped => {}
        Some(day) => out.push(Mismatch::new(
            "timestamp",
            format!("a time on {day}"),
            format!("{seconds} ({stamped})"),
        )),
        None => out.push(Mismatch::new(
            "timestamp",
            "a requested calendar date to compare with",
            format!("{seconds} ({stamped})"),
        )),
    }
}
