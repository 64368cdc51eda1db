//! cidlookup
//!
//! Search a C-ID table for equivalent courses across community colleges,
//! or browse the home institution's departments and courses.

use anyhow::Result;
use cidlookup_cli::{commands, AppConfig, Cli};
use clap::Parser;
use std::process::ExitCode;
use tracing::{debug, error};

/// Exit code when the C-ID table cannot be used
const EXIT_DATA_FORMAT: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.log_json);
    init_metrics();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(&e),
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = AppConfig::load(cli)?;
    debug!(
        data_file = %config.data_file.display(),
        home = %config.engine.home_institution,
        "Configuration loaded"
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    commands::run(&cli.command, &config, cli.format, &mut out)
}

/// Print a failure; table problems are shown verbatim with a fix-and-retry hint
fn report(e: &anyhow::Error) -> ExitCode {
    match e.downcast_ref::<cidlookup_core::Error>() {
        Some(err) if err.is_data_format() => {
            eprintln!("{}", err);
            eprintln!();
            eprintln!("Fix the issue above and restart.");
            ExitCode::from(EXIT_DATA_FORMAT)
        }
        _ => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Initialize tracing/logging on stderr
fn init_tracing(verbose: bool, json: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("cidlookup=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cidlookup=info"))
    };

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Describe engine metrics; recording is a no-op until a host installs a recorder
fn init_metrics() {
    metrics::describe_counter!(
        "cidlookup_searches_total",
        "Total number of searches by resolution path"
    );
    metrics::describe_histogram!(
        "cidlookup_search_latency_us",
        metrics::Unit::Microseconds,
        "Search latency in microseconds"
    );
    metrics::describe_counter!(
        "cidlookup_selections_total",
        "Total number of department and course selections by outcome"
    );
    metrics::describe_histogram!(
        "cidlookup_selection_latency_us",
        metrics::Unit::Microseconds,
        "Selection latency in microseconds by kind"
    );
}
