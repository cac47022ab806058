//! chainwatch - health aggregation and alerting for blockchain dependencies

use chainwatch::utils::logging::{LogFormat, init_logging};
use chainwatch::{Config, HealthReport, MonitoringSystem, server};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

#[derive(Debug, Parser)]
#[command(name = "chainwatch", version, about)]
struct Cli {
    /// YAML configuration file; environment variables override it
    #[arg(short, long, global = true, env = "CHAINWATCH_CONFIG")]
    config: Option<PathBuf>,

    /// Log output format
    #[arg(long, global = true, env = "LOG_FORMAT", default_value = "pretty")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Probe continuously and serve the HTTP API (default)
    Serve,
    /// Run one probe cycle, print the report as JSON and exit.
    ///
    /// Exit code is 0 when healthy, 1 when degraded, 2 when unhealthy.
    Report,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_format, "info");

    let config = match Config::load(cli.config.as_deref()).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => match server::run_server(config).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::FAILURE
            }
        },
        Command::Report => report(&config).await,
    }
}

async fn report(config: &Config) -> ExitCode {
    let monitoring = match MonitoringSystem::new(config) {
        Ok(monitoring) => monitoring,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let report = HealthReport::collect(&monitoring).await;
    match report.to_pretty_json() {
        Ok(json) => println!("{}", json),
        Err(e) => error!("Failed to render report: {}", e),
    }

    // Deliver alerts raised by this cycle before exiting
    monitoring.aggregator().alerts().process_pending().await;

    ExitCode::from(report.exit_code())
}
