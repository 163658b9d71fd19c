use anyhow::{Context, Result};
use clap::Parser;
use geosort::places;
use geosort::EARTH_RADIUS_KM;
use std::fs::File;
use std::io;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "geosort")]
#[command(about = "Sort the places of a CSV file by great-circle distance from a reference point.", long_about = None)]
struct Cli {
    /// Path to the .csv file, with a header line
    #[arg(short, long)]
    csv: String,

    /// Latitude of the reference point, in degrees
    #[arg(long, allow_hyphen_values = true)]
    lat: f64,

    /// Longitude of the reference point, in degrees
    #[arg(long, allow_hyphen_values = true)]
    lon: f64,

    /// Output CSV (input columns + distance_km). If omitted, writes to stdout.
    #[arg(short, long)]
    out: Option<String>,

    #[arg(long, default_value_t = String::from("lat"))]
    lat_column: String,

    #[arg(long, default_value_t = String::from("lon"))]
    lon_column: String,

    /// Sphere radius in kilometers
    #[arg(long, default_value_t = EARTH_RADIUS_KM)]
    radius_km: f64,

    /// Only keep the nearest N places
    #[arg(short, long)]
    limit: Option<usize>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();
    let cli = Cli::parse();

    let file = File::open(&cli.csv).with_context(|| format!("opening {}", &cli.csv))?;
    let table = places::read_places(file, &cli.lat_column, &cli.lon_column)
        .with_context(|| format!("reading places from {}", &cli.csv))?;
    info!(rows = table.rows.len(), path = %cli.csv, "loaded places");

    let written = if let Some(out_path) = &cli.out {
        let out = File::create(out_path).with_context(|| format!("creating CSV {}", out_path))?;
        places::write_sorted(
            out,
            &table.headers,
            &table.rows,
            cli.lat,
            cli.lon,
            cli.radius_km,
            cli.limit,
        )
        .with_context(|| format!("writing sorted places to {}", out_path))?
    } else {
        places::write_sorted(
            io::stdout().lock(),
            &table.headers,
            &table.rows,
            cli.lat,
            cli.lon,
            cli.radius_km,
            cli.limit,
        )
        .context("writing sorted places to stdout")?
    };

    info!(
        written,
        lat = cli.lat,
        lon = cli.lon,
        "sorted places by distance"
    );
    Ok(())
}
