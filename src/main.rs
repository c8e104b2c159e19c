//! Docscrape main entry point
//!
//! Command-line interface for the Python documentation / PEP index
//! scraper. Picks one of the four routines, runs it over the cached
//! HTTP session and renders the result.

use clap::Parser;
use docscrape::output::write_results;
use docscrape::{Mode, OutputFormat, Session, Settings};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Docscrape: Python documentation and PEP index scraper
#[derive(Parser, Debug)]
#[command(name = "docscrape")]
#[command(version)]
#[command(about = "Scrapes the Python documentation site and the PEP index", long_about = None)]
struct Cli {
    /// Scraping routine to run
    #[arg(value_enum, value_name = "MODE")]
    mode: Mode,

    /// Clear the response cache before running
    #[arg(short, long)]
    clear_cache: bool,

    /// Render results as an aligned table or a CSV file
    /// (default: plain console output)
    #[arg(short, long, value_enum)]
    output: Option<OutputFormat>,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::from_cwd()?;

    let _log_guard = setup_logging(cli.verbose, &settings)?;
    tracing::info!("scraper started");
    tracing::info!("command line arguments: {:?}", cli);

    let session = Session::new(&settings)?;
    if cli.clear_cache {
        session.clear_cache()?;
    }

    let results = match docscrape::scrape::run(cli.mode, &session, &settings).await {
        Ok(results) => results,
        Err(e) => {
            tracing::error!("{} failed: {}", cli.mode.as_str(), e);
            return Err(e.into());
        }
    };

    if let Some(rows) = results {
        write_results(&rows, cli.mode, cli.output, &settings)?;
    }

    tracing::info!("scraper finished");
    Ok(())
}

/// Sets up console logging plus a rolling log file under the logs
/// directory. The returned guard must stay alive for the process
/// lifetime so buffered log lines are flushed.
fn setup_logging(
    verbose: u8,
    settings: &Settings,
) -> anyhow::Result<tracing_appender::non_blocking::WorkerGuard> {
    let log_dir = settings.logs_dir();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "docscrape.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("docscrape=info,warn"),
        1 => EnvFilter::new("docscrape=debug,info"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking),
        )
        .init();

    Ok(guard)
}
