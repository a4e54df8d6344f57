//! Rates Contract CLI
//!
//! Lists, runs and probes the contract cases for the currency-rates API.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use rates_contract::{ContractCase, ContractRunner, DateInput, SuiteConfig, Verdict, catalog};
use rates_types::{Credential, Endpoint, RatesApi, RatesQuery};

#[derive(Parser)]
#[command(name = "rates-contract")]
#[command(author, version, about = "Contract tests for the currency-rates API", long_about = None)]
struct Cli {
    /// dotenv-format file with suite settings
    #[arg(long, env = "RATES_CONFIG_FILE")]
    config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List contract cases and their expected outcomes
    List {
        /// Only cases for this endpoint (live, historical)
        #[arg(long)]
        endpoint: Option<String>,
    },
    /// Run contract cases against the configured service
    Run {
        /// Only cases for this endpoint (live, historical)
        #[arg(long)]
        endpoint: Option<String>,
        /// Run only the named case (repeatable)
        #[arg(long = "case")]
        cases: Vec<String>,
        /// Maximum number of requests in flight
        #[arg(long, default_value = "1")]
        concurrency: usize,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Send a single request and print the raw answer
    Probe {
        #[arg(long, default_value = "live")]
        endpoint: String,
        /// Credential variant (valid, invalid, exceeded, absent)
        #[arg(long, default_value = "valid")]
        credential: String,
        #[arg(long)]
        source: Option<String>,
        #[arg(long)]
        currencies: Option<String>,
        #[arg(long)]
        date: Option<String>,
    },
    /// Send a case's request twice and require identical quotes
    Stability {
        /// Case name
        #[arg(long = "case", default_value = "live_default_parameters")]
        case: String,
    },
}

fn parse_endpoint(s: &str) -> Result<Endpoint> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("Unknown endpoint: {}. Supported: live, historical", s))
}

fn parse_credential(s: &str) -> Result<Credential> {
    s.parse().map_err(|_| {
        anyhow::anyhow!(
            "Unknown credential: {}. Supported: valid, invalid, exceeded, absent",
            s
        )
    })
}

fn find_case(name: &str) -> Result<ContractCase> {
    catalog::find(name).ok_or_else(|| anyhow::anyhow!("No case named {}", name))
}

fn select_cases(endpoint: Option<&str>, names: &[String]) -> Result<Vec<ContractCase>> {
    let mut cases = if names.is_empty() {
        catalog::all()
    } else {
        names
            .iter()
            .map(|name| find_case(name))
            .collect::<Result<Vec<_>>>()?
    };
    if let Some(endpoint) = endpoint {
        let endpoint = parse_endpoint(endpoint)?;
        cases.retain(|case| case.endpoint == endpoint);
    }
    Ok(cases)
}

fn describe_params(case: &ContractCase) -> String {
    let mut parts = vec![format!("key={}", case.credential)];
    if let Some(source) = case.source {
        parts.push(format!("source={source}"));
    }
    if let Some(currencies) = case.currencies {
        parts.push(format!("currencies={currencies}"));
    }
    match case.date {
        Some(DateInput::Fixture) => parts.push("date=<fixture>".to_string()),
        Some(DateInput::Literal(date)) => parts.push(format!("date={date}")),
        None => {}
    }
    parts.join(" ")
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into());
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    if let Commands::List { endpoint } = &cli.command {
        for case in select_cases(endpoint.as_deref(), &[])? {
            println!("{:<42} {}", case.name, describe_params(&case));
            println!("{:<42} -> {}", "", case.expect);
        }
        return Ok(());
    }

    let config = SuiteConfig::load(cli.config.as_deref())?;
    tracing::info!(
        base_url = %config.base_url,
        timeout_secs = config.timeout.as_secs(),
        "configuration loaded"
    );
    let runner = ContractRunner::new(config.client()?, config.fixtures.clone());

    match cli.command {
        Commands::List { .. } => {}

        Commands::Run {
            endpoint,
            cases,
            concurrency,
            json,
        } => {
            let cases = select_cases(endpoint.as_deref(), &cases)?;
            let report = if concurrency > 1 {
                runner.run_concurrent(&cases, concurrency).await
            } else {
                runner.run_all(&cases).await
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&report.to_json())?);
            } else {
                for case in &report.cases {
                    println!("{case}");
                }
                println!();
                println!("{}", report.summary());
            }
            if !report.is_success() {
                std::process::exit(1);
            }
        }

        Commands::Probe {
            endpoint,
            credential,
            source,
            currencies,
            date,
        } => {
            let endpoint = parse_endpoint(&endpoint)?;
            let credential = parse_credential(&credential)?;
            let mut query = RatesQuery::new(endpoint, config.fixtures.api_key(credential));
            query.source = source;
            query.currencies = currencies;
            query.date = date;

            let response = runner.api().fetch(&query).await?;
            println!("HTTP {}", response.status);
            if response.is_json() {
                println!("{}", serde_json::to_string_pretty(&response.body)?);
            } else {
                println!("{}", response.raw);
            }
        }

        Commands::Stability { case } => {
            let case = find_case(&case)?;
            match runner.check_stability(&case).await {
                Verdict::Passed => println!("✓ {}: quotes identical across two requests", case.name),
                Verdict::Failed { mismatches } => {
                    println!("✗ {}: quotes differ", case.name);
                    for mismatch in mismatches {
                        println!("    - {mismatch}");
                    }
                    std::process::exit(1);
                }
                Verdict::Errored { reason } => {
                    println!("✗ {}: {}", case.name, reason);
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_select_cases_by_endpoint() {
        let cases = select_cases(Some("historical"), &[]).unwrap();
        assert_eq!(cases.len(), catalog::HISTORICAL_CASES.len());
        assert!(select_cases(Some("weekly"), &[]).is_err());
    }

    #[test]
    fn test_select_cases_by_name() {
        let names = vec!["live_invalid_source".to_string()];
        let cases = select_cases(None, &names).unwrap();
        assert_eq!(cases.len(), 1);
        assert!(select_cases(Some("historical"), &names).unwrap().is_empty());
        assert!(select_cases(None, &["nope".to_string()]).is_err());
    }

    #[test]
    fn test_describe_params() {
        let case = find_case("historical_nonexistent_leap_day").unwrap();
        assert_eq!(describe_params(&case), "key=valid date=1999-02-29");
        let case = find_case("live_source_and_currencies").unwrap();
        assert_eq!(
            describe_params(&case),
            "key=valid source=EUR currencies=CAD,RUB,USD"
        );
    }
}
