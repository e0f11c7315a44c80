mod catalog;
mod geometry;
mod propagate;
mod proximity;
mod time;
mod web;

#[cfg(test)]
mod tests;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::catalog::{Catalog, MemoryCatalog, ObjectId, OperationalState};
use crate::propagate::{KeplerianPropagator, PositionService};
use crate::proximity::{sort_events, DetectorSettings, LogSink, ProximityDetector};
use crate::time::{format_utc, Iso8601Validator, Precision, TimestampValidator};
use crate::web::api::position::PositionResponse;
use crate::web::api::proximity::{ProximityEntry, ProximityListResponse};

#[derive(Parser)]
#[command(name = "orbit-watch")]
#[command(about = "Circular-orbit propagation and proximity detection")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        #[arg(long, default_value = "config.yaml")]
        config: String,
    },
    /// Validate a catalog file
    Validate { catalog: PathBuf },
    /// Print the position of one object at an instant
    Position {
        #[arg(long)]
        catalog: PathBuf,
        object_id: ObjectId,
        timestamp: String,
    },
    /// Scan a time window for close approaches
    Proximities {
        #[arg(long)]
        catalog: PathBuf,
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
        #[arg(long, default_value = "1m")]
        precision: Precision,
        #[arg(long)]
        threshold_km: Option<f64>,
        #[arg(long)]
        max_steps: Option<u64>,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => serve(&config),
        Commands::Validate { catalog } => validate(&catalog),
        Commands::Position {
            catalog,
            object_id,
            timestamp,
        } => position(&catalog, object_id, &timestamp),
        Commands::Proximities {
            catalog,
            start,
            end,
            precision,
            threshold_km,
            max_steps,
        } => {
            let mut settings = DetectorSettings::default();
            if let Some(threshold_km) = threshold_km {
                settings.threshold_km = threshold_km;
            }
            if max_steps.is_some() {
                settings.max_steps = max_steps;
            }
            proximities(&catalog, &start, &end, precision, settings)
        }
    }
}

fn serve(path: &str) -> ExitCode {
    let config = match web::Config::from_file(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config {}: {}", path, e);
            return ExitCode::FAILURE;
        }
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error starting runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(web::run_server(config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_catalog(path: &Path) -> Option<MemoryCatalog> {
    match MemoryCatalog::from_file(path) {
        Ok(catalog) => Some(catalog),
        Err(e) => {
            eprintln!("Error loading catalog {}: {}", path.display(), e);
            None
        }
    }
}

fn validate(path: &Path) -> ExitCode {
    let Some(catalog) = load_catalog(path) else {
        return ExitCode::FAILURE;
    };

    println!(
        "Catalog is valid ({} orbits, {} objects)",
        catalog.orbits().len(),
        catalog.objects().len()
    );
    for state in [
        OperationalState::Active,
        OperationalState::Inactive,
        OperationalState::Deorbited,
    ] {
        println!("  {}: {}", state, catalog.objects_in_state(state).len());
    }
    for object in catalog.objects() {
        println!(
            "  {}: {} [{}] orbit {} since {}",
            object.id,
            object.name,
            object.state,
            object.orbit_id,
            format_utc(&object.introduced_at)
        );
    }
    ExitCode::SUCCESS
}

fn position(path: &Path, object_id: ObjectId, timestamp: &str) -> ExitCode {
    let at = match Iso8601Validator.validate_timestamp(timestamp) {
        Ok(at) => at,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let Some(catalog) = load_catalog(path) else {
        return ExitCode::FAILURE;
    };

    let service = PositionService::new(KeplerianPropagator::new());
    match service.lookup(&catalog, object_id, at) {
        Ok(Some(position)) => print_json(&PositionResponse::from(position)),
        Ok(None) => {
            eprintln!(
                "Object {} does not exist yet at {}",
                object_id,
                format_utc(&at)
            );
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error calculating position: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn proximities(
    path: &Path,
    start: &str,
    end: &str,
    precision: Precision,
    settings: DetectorSettings,
) -> ExitCode {
    let validator = Iso8601Validator;
    let window = validator
        .validate_timestamp(start)
        .and_then(|start| Ok((start, validator.validate_timestamp(end)?)));
    let (start, end) = match window {
        Ok(window) => window,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = settings.validate() {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }
    let Some(catalog) = load_catalog(path) else {
        return ExitCode::FAILURE;
    };

    log::info!(
        "Scanning every {} (threshold {} km)",
        precision,
        settings.threshold_km
    );
    let detector = ProximityDetector::new(PositionService::new(KeplerianPropagator::new()), settings);
    match detector.scan(&catalog, start, end, precision.step(), &mut LogSink) {
        Ok(mut events) => {
            sort_events(&mut events);
            print_json(&ProximityListResponse {
                proximities: events.into_iter().map(ProximityEntry::from).collect(),
            })
        }
        Err(e) => {
            eprintln!("Scan failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            ExitCode::FAILURE
        }
    }
}
