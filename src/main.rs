use clap::Parser;
use clap::error::ErrorKind;
use obit_search::config::{LoggingSettings, Settings};
use obit_search::{batch, IdentityMatcher};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Wrong invocation
const EXIT_USAGE: u8 = 1;
/// Configuration, input table or output failures
const EXIT_FAILURE: u8 = 2;

/// Search an obituary index for every person in a CSV table
#[derive(Debug, Parser)]
#[command(name = "obit-search", version, about)]
struct Cli {
    /// Input CSV with FirstName, MiddleName, LastName, City, State, ZipCode and DOBYear columns
    input: PathBuf,
}

fn init_logging(settings: &LoggingSettings) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.level.as_str()));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match settings.format.as_str() {
        "pretty" => subscriber.pretty().init(),
        "json" => subscriber.json().init(),
        _ => subscriber.compact().init(),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(EXIT_USAGE);
        }
    };

    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    init_logging(&settings.logging);

    info!("Starting obituary search for {}", cli.input.display());

    let matcher = match IdentityMatcher::from_settings(&settings.search) {
        Ok(matcher) => matcher,
        Err(e) => {
            error!("Failed to create search client: {}", e);
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    match batch::run(&cli.input, &settings.output.path, &matcher).await {
        Ok(summary) => {
            println!("\nProcessing complete.\n");
            println!("{}", summary);
            ExitCode::SUCCESS
        }
        Err(batch::BatchError::MissingHeaders { found, missing }) => {
            error!("Headers found: {:?}", found);
            error!("Missing headers: {:?}", missing);
            eprintln!("Input CSV is missing one or more required headers: {}", missing.join(", "));
            ExitCode::from(EXIT_FAILURE)
        }
        Err(e) => {
            error!("Run aborted: {}", e);
            ExitCode::from(EXIT_FAILURE)
        }
    }
}
