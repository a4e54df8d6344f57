//! In-process stand-in for the remote rates API.
//!
//! Answers the live and historical endpoints the way the real service is
//! documented to, with constant canned rates. A `Flaw` makes it deviate so
//! tests can check the harness notices.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::get,
};
use chrono::{NaiveDate, Utc};
use rates_contract::Fixtures;
use serde_json::{Value, json};
use tokio::net::TcpListener;

pub const VALID_KEY: &str = "sandbox-valid-key";
pub const EXCEEDED_KEY: &str = "sandbox-exhausted-key";
pub const INVALID_KEY: &str = "QuDPaIT8HjOGelzpvDXl0ZCwq87opwR5";
pub const FIXTURE_DATE: &str = "2023-10-20";

/// Codes the sandbox resolves. Everything else is unknown.
pub const KNOWN_CODES: &[&str] = &["USD", "EUR", "CAD", "RUB", "AMD", "ARS", "GBP"];

/// Deliberate deviations from the documented contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flaw {
    /// Unknown currency codes get quotes instead of being dropped.
    LeakUnknownCodes,
    /// `source` is echoed as sent and matched case-sensitively.
    CaseSensitiveSource,
}

#[derive(Debug, Clone, Copy, Default)]
struct Sandbox {
    flaw: Option<Flaw>,
}

#[derive(Debug, Clone, Copy)]
enum Which {
    Live,
    Historical,
}

pub fn fixtures() -> Fixtures {
    Fixtures {
        valid_key: VALID_KEY.into(),
        exceeded_key: EXCEEDED_KEY.into(),
        invalid_key: INVALID_KEY.into(),
        historical_date: FIXTURE_DATE.into(),
    }
}

/// Starts a sandbox on an ephemeral port and returns its base URL.
pub async fn spawn(flaw: Option<Flaw>) -> String {
    let state = Arc::new(Sandbox { flaw });
    let app = Router::new()
        .route("/live", get(live))
        .route("/historical", get(historical))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// A base URL nothing is listening on.
pub async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

async fn live(
    State(sandbox): State<Arc<Sandbox>>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    answer(&sandbox, Which::Live, &params)
}

async fn historical(
    State(sandbox): State<Arc<Sandbox>>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    answer(&sandbox, Which::Historical, &params)
}

fn rejected(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "message": message })))
}

fn api_error(code: i64, kind: &str, info: &str) -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "success": false,
            "error": { "code": code, "type": kind, "info": info }
        })),
    )
}

fn answer(
    sandbox: &Sandbox,
    which: Which,
    params: &HashMap<String, String>,
) -> (StatusCode, Json<Value>) {
    match params.get("apikey").map(String::as_str) {
        None => return rejected(StatusCode::UNAUTHORIZED, "No API key found in request"),
        Some(EXCEEDED_KEY) => {
            return rejected(
                StatusCode::TOO_MANY_REQUESTS,
                "You have exceeded your daily/monthly API rate limit. Please upgrade your plan.",
            );
        }
        Some(VALID_KEY) => {}
        Some(_) => return rejected(StatusCode::UNAUTHORIZED, "Invalid authentication credentials"),
    }

    let (timestamp, date) = match which {
        Which::Live => (Utc::now().timestamp(), None),
        Which::Historical => {
            let Some(raw) = params.get("date") else {
                return api_error(
                    301,
                    "no_date_specified",
                    "You have not specified a date. [Required format: date=YYYY-MM-DD]",
                );
            };
            let Some(end_of_day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|day| day.and_hms_opt(23, 59, 59))
            else {
                return api_error(
                    302,
                    "invalid_date",
                    "You have entered an invalid date. [Required format: date=YYYY-MM-DD]",
                );
            };
            (end_of_day.and_utc().timestamp(), Some(raw.clone()))
        }
    };

    let source = match params.get("source") {
        None => "USD".to_string(),
        Some(raw) if sandbox.flaw == Some(Flaw::CaseSensitiveSource) => raw.clone(),
        Some(raw) => raw.to_uppercase(),
    };
    if source != "ALL" && !KNOWN_CODES.contains(&source.as_str()) {
        return api_error(
            201,
            "invalid_source_currency",
            "You have supplied an invalid Source Currency. [Example: source=EUR]",
        );
    }

    let targets: Vec<String> = match params.get("currencies") {
        None => KNOWN_CODES.iter().map(|c| c.to_string()).collect(),
        Some(list) => {
            let leak = sandbox.flaw == Some(Flaw::LeakUnknownCodes);
            let resolved: Vec<String> = list
                .split(',')
                .map(|code| code.trim().to_uppercase())
                .filter(|code| leak || KNOWN_CODES.contains(&code.as_str()))
                .collect();
            if resolved.is_empty() {
                return api_error(
                    202,
                    "invalid_currency_codes",
                    "You have provided one or more invalid Currency Codes. \
                     [Required format: currencies=EUR,USD,GBP,...]",
                );
            }
            resolved
        }
    };

    let quotes: serde_json::Map<String, Value> = targets
        .iter()
        .enumerate()
        .map(|(i, target)| (format!("{source}{target}"), json!(1.0 + i as f64 / 10.0)))
        .collect();

    let mut body = json!({
        "success": true,
        "timestamp": timestamp,
        "source": source,
        "quotes": quotes,
    });
    if let Some(date) = date {
        body["historical"] = json!(true);
        body["date"] = json!(date);
    }
    (StatusCode::OK, Json(body))
}
