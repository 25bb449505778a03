use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use ontime_client::{HealthStatus, PredictionClient};
use ontime_core::{AppError, Config};
use ontime_ui::{
    parse_departure, AppState, FileStore, FlightForm, Locale, Orchestrator, TerminalPresenter,
    UnitSystem,
};

#[derive(Parser)]
#[command(name = "ontime", author, version, about = "FlightOnTime punctuality predictions", long_about = None)]
struct Cli {
    /// Path to config.toml
    #[arg(short, long, env = "FLIGHTONTIME_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether the prediction service is reachable
    Health,
    /// Request a punctuality prediction for a flight
    Predict {
        /// Airline identifier
        #[arg(long)]
        airline: String,
        /// Origin airport code
        #[arg(long)]
        origin: String,
        /// Destination airport code
        #[arg(long)]
        destination: String,
        /// Local departure time, e.g. 2025-12-25T14:30
        #[arg(long)]
        departure: Option<String>,
        /// Ask the service for simulated output
        #[arg(long)]
        mock: bool,
    },
    /// Show or change display preferences
    Prefs {
        /// Display language (es, en)
        #[arg(long)]
        locale: Option<String>,
        /// Unit system (km, miles)
        #[arg(long)]
        unit: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = ontime_core::init() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    match run(Cli::parse()).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("{}\n  {}", e.user_message(), e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode, AppError> {
    let (config, _) = Config::resolve(cli.config.as_deref())?;

    let store = Arc::new(FileStore::open(&config.config_dir));
    let mut state = AppState::load(store, &config.preferences);

    match cli.command {
        Commands::Prefs { locale, unit } => Ok(prefs(&mut state, locale, unit)),
        Commands::Health => {
            let mut orchestrator = orchestrator(&config, state)?;
            Ok(match orchestrator.check_health().await {
                HealthStatus::Operational => ExitCode::SUCCESS,
                HealthStatus::Limited => ExitCode::FAILURE,
            })
        }
        Commands::Predict {
            airline,
            origin,
            destination,
            departure,
            mock,
        } => {
            let mut form = FlightForm::new(airline, origin, destination);
            if let Some(departure) = departure {
                let parsed = parse_departure(&departure).with_context(|| {
                    format!("Invalid departure '{}', expected YYYY-MM-DDTHH:MM", departure)
                })?;
                form = form.with_departure(parsed);
            }

            let mut orchestrator = orchestrator(&config, state)?;
            Ok(match orchestrator.submit(&form, mock).await {
                Ok(()) => ExitCode::SUCCESS,
                Err(_) => ExitCode::FAILURE,
            })
        }
    }
}

fn orchestrator(
    config: &Config,
    state: AppState,
) -> Result<Orchestrator<TerminalPresenter<std::io::Stdout>>, AppError> {
    let timeout = config.service.timeout_secs.map(Duration::from_secs);
    let client = PredictionClient::new(&config.service.base_url, timeout)?;
    tracing::debug!("Using prediction service at {}", client.base_url());
    Ok(Orchestrator::new(client, state, TerminalPresenter::stdout()))
}

fn prefs(state: &mut AppState, locale: Option<String>, unit: Option<String>) -> ExitCode {
    let mut rejected = false;

    if let Some(code) = locale {
        rejected |= state.set_locale(&code).is_none();
    }
    if let Some(code) = unit {
        rejected |= state.set_unit(&code).is_none();
    }

    let t = state.localizer();
    println!("{}: {}", t.t("settings.language"), t.locale().code());
    println!(
        "{}: {}",
        t.t("settings.units"),
        t.t(&format!("settings.units.{}", state.units().system().code()))
    );

    if rejected {
        let locales: Vec<_> = Locale::ALL.iter().map(Locale::code).collect();
        let units: Vec<_> = UnitSystem::ALL.iter().map(UnitSystem::code).collect();
        eprintln!(
            "Supported: locale {}, unit {}",
            locales.join("|"),
            units.join("|")
        );
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
