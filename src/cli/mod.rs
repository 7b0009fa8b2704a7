mod status_spinner;
mod account;
mod campaign;

use thiserror::Error;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use log::{LevelFilter, SetLoggerError, error};
use indicatif_log_bridge::LogWrapper;
use console::style;
use indicatif::MultiProgress;
use std::{io::{self, stdout, Write}, process::ExitCode};
use crate::{config::Config, http_client::{ApiOutcome, HttpClient, HttpClientError}};

const SEPARATOR: &str = "==================================================";

/// Brevo command-line interface
#[derive(Parser, Debug)]
#[command(version, about, long_about = "Brevo command-line interface: checks API connectivity and prints email campaign details and statistics.", name = "brevo")]
struct Args {
    /// Maximum logging level
    #[arg(short, long)]
    log_level: Option<LevelFilter>,

    /// Brevo API base URL. Overrides BREVO_API_URL
    #[arg(short, long)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check the API key and datastore settings, then test the connection
    Check,
    /// View email campaigns
    Campaigns {
        #[command(subcommand)]
        command: campaign::Command
    },
    /// Preview the latest campaigns, then inspect the sample campaign
    Diagnose,
    /// Generate shell completion files
    Completion {
        shell: Shell
    }
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("API error: {0}")]
    ApiError(#[from] HttpClientError),
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error)
}

type Result<T = ()> = std::result::Result<T, CliError>;

fn setup_logging() -> std::result::Result<(MultiProgress, Args), SetLoggerError> {
    let mut logger = env_logger::Builder::from_default_env();
    let args = Args::parse();

    if let Some(level) = args.log_level {
        logger.filter_level(level);
    }

    let multi = MultiProgress::new();
    let logger = logger.build();
    let log_filter = logger.filter();
    LogWrapper::new(multi.clone(), logger).try_init()?;
    log::set_max_level(log_filter);

    Ok((multi, args))
}

fn write_banner(out: &mut impl Write, title: &str) -> io::Result<()> {
    writeln!(out, "{}", style(title).bold())?;
    writeln!(out, "{}", SEPARATOR)
}

fn write_missing_api_key(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "❌ {}", style("Please set the BREVO_API_KEY environment variable").red().bright())
}

/// status and raw body for HTTP errors, the cause for anything else
fn write_failure<T>(out: &mut impl Write, action: &str, outcome: &ApiOutcome<T>) -> io::Result<()> {
    match outcome {
        ApiOutcome::Success(_) => Ok(()),
        ApiOutcome::HttpError { status, body } => {
            writeln!(
                out,
                "❌ {} {}",
                style(format!("{} failed:", action)).red().bright(),
                style(status.as_u16()).red().bold()
            )?;
            writeln!(out, "{} {}", style("Error message:").dim(), body)
        },
        ApiOutcome::TransportError(e) => {
            writeln!(out, "❌ {} {}", style(format!("{} error:", action)).red().bright(), e)
        }
    }
}

async fn run_internal(multi: MultiProgress, args: Args) -> Result {
    let config = Config::from_env();
    let base_url = args.base_url.as_deref().unwrap_or(&config.api_url);
    let client = HttpClient::init(base_url, config.api_key.clone())?;
    let mut out = stdout();

    match args.command {
        Command::Check => account::handle(&client, &config, &multi, &mut out).await?,
        Command::Campaigns { command } => campaign::handle(command, &client, &config, &multi, &mut out).await?,
        Command::Diagnose => campaign::diagnose(&client, &config, &multi, &mut out).await?,
        Command::Completion { shell } => {
            let mut command = Args::command();
            let name = command.get_name().to_string();
            generate(shell, &mut command, name, &mut out);
        }
    }

    Ok(())
}

/// API failures are only reported. the exit code is non-zero only when the tool itself breaks
pub async fn run() -> ExitCode {
    let (multi, args) = match setup_logging() {
        Ok(setup) => setup,
        Err(err) => {
            eprintln!("Failed to initialize logging: {}", err);
            return ExitCode::from(1);
        }
    };

    if let Err(err) = run_internal(multi, args).await {
        error!("Unexpected error: {}", err);
        return ExitCode::from(1);
    }

    ExitCode::SUCCESS
}
