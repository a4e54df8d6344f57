//! # Rates Contract
//!
//! Contract-test harness for the remote currency-rates API.
//!
//! ## Architecture
//!
//! - `config` - Suite configuration and credential fixtures
//! - `oracle` - Case descriptors and expected outcomes
//! - `catalog` - The declarative case tables for both endpoints
//! - `verify` - Pure response-vs-oracle comparison
//! - `runner` - Drives cases through the `RatesApi` port
//! - `report` - Per-case verdicts and the suite summary
//!
//! The runner is generic over `A: RatesApi`, so the HTTP client can be
//! swapped for an in-memory fake in tests.

pub mod catalog;
pub mod config;
pub mod oracle;
pub mod report;
pub mod runner;
pub mod verify;


pub use config::{ConfigError, Fixtures, SuiteConfig};
pub use oracle::{ContractCase, DateInput, Expectation};
pub use report::{CaseReport, SuiteReport, Summary, Verdict};
pub use runner::ContractRunner;
pub use verify::Mismatch;
