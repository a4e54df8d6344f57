//! Contract Runner
//!
//! Sends each case's request through the `RatesApi` port and judges the
//! answer. Cases share nothing but the read-only fixtures, so they can run
//! one after another or side by side.

use std::sync::Arc;
use std::time::Instant;

use chrono::{NaiveDate, Utc};
use rates_types::{ApiError, ApiResponse, RatesApi};
use tokio::sync::Semaphore;

use crate::config::Fixtures;
use crate::oracle::ContractCase;
use crate::report::{CaseReport, SuiteReport, Verdict};
use crate::verify::{self, Mismatch, VerifyContext};

/// Runs contract cases against a rates API.
///
/// Generic over `A: RatesApi` so the same runner drives the real HTTP client
/// and in-memory fakes.
pub struct ContractRunner<A: RatesApi> {
    api: Arc<A>,
    fixtures: Fixtures,
    today: Option<NaiveDate>,
}

// Manual impl: `A` itself need not be Clone.
impl<A: RatesApi> Clone for ContractRunner<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            fixtures: self.fixtures.clone(),
            today: self.today,
        }
    }
}

impl<A: RatesApi> ContractRunner<A> {
    pub fn new(api: A, fixtures: Fixtures) -> Self {
        Self {
            api: Arc::new(api),
            fixtures,
            today: None,
        }
    }

    /// Pins the date live timestamps are compared with.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn fixtures(&self) -> &Fixtures {
        &self.fixtures
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Utc::now().date_naive())
    }

    /// Sends the case's request and returns the raw exchange.
    pub async fn send(&self, case: &ContractCase) -> Result<ApiResponse, ApiError> {
        self.api.fetch(&case.query(&self.fixtures)).await
    }

    /// Runs one case: one request, one verdict. No retries.
    #[tracing::instrument(skip(self, case), fields(case = case.name, endpoint = %case.endpoint))]
    pub async fn run_case(&self, case: &ContractCase) -> CaseReport {
        let started = Instant::now();
        let verdict = match self.send(case).await {
            Ok(response) => {
                let ctx = VerifyContext::for_case(case, &self.fixtures, self.today());
                Verdict::from_mismatches(verify::check(case, &ctx, &response))
            }
            Err(e) => Verdict::Errored {
                reason: e.to_string(),
            },
        };

        match &verdict {
            Verdict::Passed => tracing::info!("passed"),
            Verdict::Failed { mismatches } => {
                tracing::warn!(mismatches = mismatches.len(), "failed: {}", join(mismatches))
            }
            Verdict::Errored { reason } => tracing::error!("errored: {}", reason),
        }

        CaseReport {
            name: case.name.to_string(),
            endpoint: case.endpoint,
            verdict,
            elapsed_ms: started.elapsed().as_millis() as u64,
        }
    }

    /// Runs cases one after another.
    pub async fn run_all(&self, cases: &[ContractCase]) -> SuiteReport {
        let mut report = SuiteReport::default();
        for case in cases {
            report.cases.push(self.run_case(case).await);
        }
        report
    }

    /// Runs cases with at most `limit` requests in flight. Results keep the
    /// order of `cases`.
    pub async fn run_concurrent(&self, cases: &[ContractCase], limit: usize) -> SuiteReport {
        let permits = Arc::new(Semaphore::new(limit.max(1)));
        let handles: Vec<_> = cases
            .iter()
            .copied()
            .map(|case| {
                let runner = self.clone();
                let permits = Arc::clone(&permits);
                tokio::spawn(async move {
                    let _permit = permits.acquire_owned().await;
                    runner.run_case(&case).await
                })
            })
            .collect();

        let mut report = SuiteReport::default();
        for (case, handle) in cases.iter().zip(handles) {
            let result = match handle.await {
                Ok(result) => result,
                Err(e) => CaseReport {
                    name: case.name.to_string(),
                    endpoint: case.endpoint,
                    verdict: Verdict::Errored {
                        reason: format!("case task aborted: {e}"),
                    },
                    elapsed_ms: 0,
                },
            };
            report.cases.push(result);
        }
        report
    }

    /// Sends the case's request twice and requires identical quotes.
    #[tracing::instrument(skip(self, case), fields(case = case.name))]
    pub async fn check_stability(&self, case: &ContractCase) -> Verdict {
        let first = match self.send(case).await {
            Ok(response) => response,
            Err(e) => {
                return Verdict::Errored {
                    reason: e.to_string(),
                };
            }
        };
        let second = match self.send(case).await {
            Ok(response) => response,
            Err(e) => {
                return Verdict::Errored {
                    reason: e.to_string(),
                };
            }
        };

        let mut mismatches: Vec<Mismatch> = [&first, &second]
            .iter()
            .enumerate()
            .filter(|(_, resp)| resp.status != 200)
            .map(|(i, resp)| Mismatch {
                field: format!("status (request {})", i + 1),
                expected: "200".into(),
                actual: resp.status.to_string(),
            })
            .collect();
        if mismatches.is_empty() {
            mismatches = verify::compare_quotes(&first, &second);
        }
        Verdict::from_mismatches(mismatches)
    }
}

fn join(mismatches: &[Mismatch]) -> String {
    mismatches
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
