//! Parcel / hazard intersection driver
//!
//! Optionally (re)loads the parcel table from a GeoJSON dataset, then lists
//! the parcels that intersect any hazard polygon.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use parcel_hazard::backend::GeoBackend;
use parcel_hazard::batch::affected_parcels;
use parcel_hazard::core::{HazardError, Result};
use parcel_hazard::geometry::Polygon;
use parcel_hazard::ingest::{load_features, load_polygons};
use parcel_hazard::store::{SqliteStore, ValidityStore};

/// Find land parcels affected by hazard areas
#[derive(Parser, Debug)]
#[command(name = "intersect_hazards")]
#[command(about = "List parcels that intersect wildfire or flood polygons")]
struct Args {
    /// SQLite database holding the parcel table and validity flags
    #[arg(long)]
    database: PathBuf,

    /// GeoJSON dataset of hazard polygons
    #[arg(long)]
    hazards: PathBuf,

    /// Replace the parcel table with the polygons of this GeoJSON dataset
    #[arg(long)]
    load_parcels: Option<PathBuf>,

    /// Feature property holding the parcel owner
    #[arg(long, default_value = "Owner")]
    owner_property: String,

    /// Ignore hazard polygons recorded as invalid by validate_polygons
    #[arg(long)]
    skip_invalid: bool,
}

fn reload_parcels(store: &SqliteStore, path: &Path, owner_property: &str) -> Result<usize> {
    let features = load_features(path)?;
    let cleared = store.clear_parcels()?;
    tracing::info!(cleared, "cleared parcel table");

    let mut inserted = 0;
    for feature in &features {
        if feature.polygon.exterior().map_or(true, |r| r.is_empty()) {
            tracing::warn!("empty parcel geometry, skipping");
            continue;
        }
        let owner = feature.property_str(owner_property).unwrap_or_default();
        store.insert_parcel(owner, &feature.polygon)?;
        inserted += 1;
    }
    Ok(inserted)
}

fn run(args: &Args) -> Result<usize> {
    let store = SqliteStore::open(&args.database)?;

    if let Some(path) = &args.load_parcels {
        let inserted = reload_parcels(&store, path, &args.owner_property)?;
        println!("Loaded {} parcels from {}", inserted, path.display());
    }

    let parcels = store.land_parcels()?;
    if parcels.is_empty() {
        return Err(HazardError::EmptyDataset(format!(
            "no land parcels in {}",
            args.database.display()
        )));
    }

    let mut hazards = load_polygons(&args.hazards)?;
    if args.skip_invalid {
        // Blank out flagged polygons so hazard indices keep matching the dataset
        for (index, polygon) in hazards.iter_mut().enumerate() {
            if store.is_invalid_or_default(index as i64)? {
                tracing::debug!(index, "skipping hazard polygon flagged invalid");
                *polygon = Polygon::empty();
            }
        }
    }

    let affected = affected_parcels(&parcels, &hazards, &GeoBackend::new())?;
    for a in &affected {
        println!(
            "Land Property ID {} owned by {} intersects with hazard area {}.",
            a.parcel_id, a.owner, a.hazard_index
        );
    }
    println!("\n{} of {} parcels affected.", affected.len(), parcels.len());

    store.close()?;
    Ok(affected.len())
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
    match run(&args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
