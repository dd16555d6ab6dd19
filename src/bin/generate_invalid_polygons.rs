//! Writes a GeoJSON dataset with one polygon per invalid-geometry case, plus
//! two valid polygons, for exercising validate_polygons.

use std::path::PathBuf;

use clap::Parser;
use parcel_hazard::fixtures::reference_cases;
use parcel_hazard::ingest::to_feature_collection;

#[derive(Parser, Debug)]
#[command(name = "generate_invalid_polygons")]
#[command(about = "Generate a GeoJSON file of reference invalid polygons")]
struct Args {
    /// Output path
    #[arg(default_value = "invalid_polygons.geojson")]
    output: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let cases = reference_cases();
    let collection = to_feature_collection(cases.iter().map(|(name, polygon)| (*name, polygon)));
    std::fs::write(&args.output, serde_json::to_string_pretty(&collection)?)?;
    println!(
        "Wrote {} polygons to {}",
        cases.len(),
        args.output.display()
    );
    Ok(())
}
