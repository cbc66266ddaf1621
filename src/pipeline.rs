//! Per-year pipeline runs: parse, resolve, assemble, persist.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{error, info};

use crate::assemble::assemble;
use crate::geocode::{GeocodeApi, OverrideTable, resolve_coordinates};
use crate::output::write_year_artifacts;
use crate::parser::parse_institutions;

/// Counts reported after a successful year run.
#[derive(Debug)]
pub struct RunSummary {
    pub year: u16,
    pub institutions: usize,
    pub entries: usize,
}

/// Input CSV path for `year`.
pub fn input_path(input_dir: &Path, year: u16) -> PathBuf {
    input_dir.join(format!("hovedtal-{year}.csv"))
}

/// Runs the full pipeline for one year: parse the report, resolve
/// coordinates, join, and write both artifacts.
#[tracing::instrument(skip(api, overrides, input_dir, output_dir))]
pub async fn run_year<G: GeocodeApi>(
    api: &G,
    overrides: &OverrideTable,
    input_dir: &Path,
    output_dir: &Path,
    year: u16,
) -> Result<RunSummary> {
    let input = input_path(input_dir, year);
    let file = File::open(&input).with_context(|| format!("opening {}", input.display()))?;

    let groups = parse_institutions(file)?;
    info!(institutions = groups.len(), "Admission report parsed");

    let points = resolve_coordinates(api, overrides, &groups).await;

    let entries = groups.iter().map(|g| g.items.len()).sum();
    let enriched = assemble(groups, points)?;
    write_year_artifacts(output_dir, year, &enriched)?;

    Ok(RunSummary {
        year,
        institutions: enriched.len(),
        entries,
    })
}

/// Runs every year in order, each inside its own failure boundary: a
/// failed year is reported and the loop moves on to the next.
///
/// Returns the number of years that completed.
pub async fn run_years<G: GeocodeApi>(
    api: &G,
    overrides: &OverrideTable,
    input_dir: &Path,
    output_dir: &Path,
    years: &[u16],
) -> usize {
    let mut completed = 0;

    for &year in years {
        match run_year(api, overrides, input_dir, output_dir, year).await {
            Ok(summary) => {
                info!(
                    year,
                    institutions = summary.institutions,
                    entries = summary.entries,
                    "Year ingested"
                );
                completed += 1;
            }
            Err(e) => {
                error!(year, error = %e, "Year ingest failed");
            }
        }
    }

    completed
}
