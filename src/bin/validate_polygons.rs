//! Polygon validity batch driver
//!
//! Validates every polygon of a GeoJSON dataset, prints a PASS/FAIL line per
//! polygon and a summary, and stores the verdicts when a database is
//! configured.
//!
//! Usage:
//!   cargo run --bin validate_polygons -- Wildfires.geojson --database polygons.db

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use parcel_hazard::batch::{persist_outcomes, validate_batch, BatchSummary};
use parcel_hazard::core::{AppConfig, BoundaryTouchCheck};
use parcel_hazard::geometry::Winding;
use parcel_hazard::ingest::load_polygons;
use parcel_hazard::store::SqliteStore;
use parcel_hazard::validation::TopologyValidator;

/// Validate all polygons in a vector dataset
#[derive(Parser, Debug)]
#[command(name = "validate_polygons")]
#[command(about = "Check polygon topology and record which polygons are invalid")]
struct Args {
    /// GeoJSON dataset to validate
    dataset: PathBuf,

    /// TOML configuration file
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// SQLite database for validity flags (overrides the config file)
    #[arg(long)]
    database: Option<PathBuf>,

    /// Exit with failure when more than this many polygons are invalid
    #[arg(long)]
    max_invalid: Option<usize>,

    /// Tolerance for point comparisons
    #[arg(long)]
    epsilon: Option<f64>,

    /// Expected winding of exterior rings
    #[arg(long, value_parser = ["clockwise", "counter-clockwise"])]
    exterior_winding: Option<String>,

    /// Use the narrow vertex-on-line test for holes touching the exterior
    #[arg(long)]
    vertex_touch_check: bool,

    /// Validate on a single thread
    #[arg(long)]
    sequential: bool,
}

fn load_config(args: &Args) -> parcel_hazard::core::Result<AppConfig> {
    let mut config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(database) = &args.database {
        config.store.database = Some(database.clone());
    }
    if let Some(max_invalid) = args.max_invalid {
        config.batch.max_invalid = max_invalid;
    }
    if let Some(epsilon) = args.epsilon {
        config.validator.epsilon = epsilon;
    }
    match args.exterior_winding.as_deref() {
        Some("clockwise") => config.validator.exterior_winding = Winding::Clockwise,
        Some("counter-clockwise") => config.validator.exterior_winding = Winding::CounterClockwise,
        _ => {}
    }
    if args.vertex_touch_check {
        config.validator.boundary_touch = BoundaryTouchCheck::Vertex;
    }
    if args.sequential {
        config.batch.parallel = false;
    }
    config.validate()?;
    Ok(config)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("parcel_hazard=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = match load_config(&args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };

    let mut store = match &config.store.database {
        Some(path) => match SqliteStore::open(path) {
            Ok(store) => Some(store),
            Err(e) => {
                tracing::warn!(error = %e, "database not available, validation results won't be stored");
                None
            }
        },
        None => None,
    };

    println!("Loading dataset: {}", args.dataset.display());
    let polygons = match load_polygons(&args.dataset) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(1);
        }
    };
    if polygons.is_empty() {
        eprintln!("No polygons found in dataset.");
        return ExitCode::from(1);
    }
    println!("Found {} polygons.", polygons.len());
    println!("\nValidating polygons...\n");

    let validator = TopologyValidator::new(config.validator.clone());
    let outcomes = validate_batch(&polygons, &validator, config.batch.parallel);

    for o in &outcomes {
        match o.outcome.reason() {
            None => println!("✓ Polygon {}: VALID", o.index),
            Some(reason) if o.outcome.is_backend_error() => {
                println!("! Polygon {}: ERROR - {}", o.index, reason)
            }
            Some(reason) => println!("✗ Polygon {}: INVALID - {}", o.index, reason),
        }
    }

    if let Some(store) = store.as_mut() {
        let failures = persist_outcomes(&outcomes, store);
        if !failures.is_empty() {
            eprintln!("Warning: failed to store validity for {} polygons", failures.len());
        }
    }

    let summary = BatchSummary::from_outcomes(&outcomes);
    println!("\n========================================");
    println!("Validation Summary:");
    println!("  Total polygons: {}", summary.total);
    println!("  Valid:          {}", summary.valid);
    println!("  Invalid:        {}", summary.invalid);
    if summary.backend_errors > 0 {
        println!("  Backend errors: {}", summary.backend_errors);
    }
    println!("========================================");

    if let Some(store) = store {
        if let Err(e) = store.close() {
            tracing::warn!(error = %e, "failed to close database");
        }
    }

    ExitCode::from(summary.exit_code(config.batch.max_invalid) as u8)
}
