//! CLI entry point for the KOT ingestion tool.
//!
//! Provides subcommands for running the full yearly pipeline, parsing a
//! single CSV export, and resolving one institution name.

use std::ffi::OsStr;
use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kot_ingest::geocode::{GoogleGeocoder, OverrideTable, resolve_coordinates};
use kot_ingest::parser::parse_institutions;
use kot_ingest::pipeline::run_years;
use kot_ingest::records::InstitutionGroup;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "kot_ingest")]
#[command(about = "Ingests yearly KOT admission reports into map-ready JSON", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline for one or more years
    Ingest {
        /// Years to ingest; each expects <input-dir>/hovedtal-<year>.csv
        #[arg(value_name = "YEAR", num_args = 1.., default_values_t = [2018u16, 2019, 2020, 2021, 2022])]
        years: Vec<u16>,

        /// Directory holding the yearly CSV exports
        #[arg(short, long, default_value = "data")]
        input_dir: String,

        /// Directory the JSON artifacts are written to
        #[arg(short, long, default_value = "data/parsed")]
        output_dir: String,

        /// Optional JSON file with manual coordinate overrides
        #[arg(long)]
        overrides: Option<String>,
    },
    /// Parse a single CSV export and log its structure; no network calls
    Parse {
        /// Path to the CSV file
        #[arg(value_name = "FILE")]
        file: String,
    },
    /// Resolve a single institution name and log the GeoJSON point
    Geocode {
        /// Institution name to look up
        #[arg(value_name = "NAME")]
        name: String,

        /// Optional JSON file with manual coordinate overrides
        #[arg(long)]
        overrides: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/kot_ingest.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("kot_ingest.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Ingest {
            years,
            input_dir,
            output_dir,
            overrides,
        } => {
            let overrides = load_overrides(overrides.as_deref())?;
            let geocoder = geocoder_from_env()?;

            let completed = run_years(
                &geocoder,
                &overrides,
                Path::new(&input_dir),
                Path::new(&output_dir),
                &years,
            )
            .await;

            info!(completed, requested = years.len(), "Ingest finished");
        }
        Commands::Parse { file } => {
            let reader =
                File::open(&file).with_context(|| format!("opening {file}"))?;
            let groups = parse_institutions(reader)?;

            for group in &groups {
                info!(name = %group.name, entries = group.items.len(), "Institution");
            }

            info!(
                institutions = groups.len(),
                entries = groups.iter().map(|g| g.items.len()).sum::<usize>(),
                "Parse summary"
            );
        }
        Commands::Geocode { name, overrides } => {
            let overrides = load_overrides(overrides.as_deref())?;
            let geocoder = geocoder_from_env()?;

            let group = InstitutionGroup {
                name,
                items: Vec::new(),
            };
            let points = resolve_coordinates(&geocoder, &overrides, &[group]).await;

            info!("{}", serde_json::to_string_pretty(&points[0])?);
        }
    }

    Ok(())
}

/// Builds the geocoding client from the environment.
fn geocoder_from_env() -> Result<GoogleGeocoder> {
    let api_key = std::env::var("GOOGLE_API_KEY").expect("GOOGLE_API_KEY must be set");

    match std::env::var("GEOCODE_BASE_URL") {
        Ok(base) => GoogleGeocoder::with_base_url(base, api_key),
        Err(_) => GoogleGeocoder::new(api_key),
    }
}

/// Loads the manual override table, or an empty one if no path was given.
fn load_overrides(path: Option<&str>) -> Result<OverrideTable> {
    match path {
        Some(p) => {
            let table = OverrideTable::load(p)
                .with_context(|| format!("loading override table {p}"))?;
            info!(path = p, overrides = table.len(), "Manual override table loaded");
            Ok(table)
        }
        None => Ok(OverrideTable::empty()),
    }
}
