//! Hierarchy parser for the yearly admission CSV exports.
//!
//! The export is flat: semicolon-delimited rows where an institution is
//! introduced by a header row (no section id) and its program entries
//! follow until the next header. Trailing "i alt" total rows summarize a
//! group and carry no program data.

use std::io::{BufRead, BufReader, Read};

use anyhow::{Result, anyhow};
use tracing::{debug, warn};

use crate::normalize::normalize_row;
use crate::records::{InstitutionGroup, RawRow};

/// Lines before the data: a title line and a column-caption line.
const SKIPPED_LINES: u64 = 2;

/// Columns per data line; rows with any other width are discarded.
const FIELD_COUNT: usize = 8;

/// How one CSV row participates in the hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// A per-group (or grand) total row; carries no program data.
    Aggregate,
    /// Introduces a new institution; the label holds the institution name.
    Header,
    /// A program entry belonging to the currently open institution.
    Data,
}

/// Classifies a row, in priority order: total rows first, then headers,
/// everything else is a program entry.
///
/// The total markers are case-sensitive: the grand total is labelled
/// exactly `"I alt"`, per-group totals end in `"i alt"`.
pub fn classify_row(row: &RawRow) -> RowKind {
    if row.education_and_place == "I alt" || row.education_and_place.ends_with("i alt") {
        RowKind::Aggregate
    } else if row.section_id.is_empty() {
        RowKind::Header
    } else {
        RowKind::Data
    }
}

/// Reads one year's CSV export and folds its rows into institution groups.
///
/// Entries keep their source order inside each group, and groups keep the
/// order their header rows appeared in.
///
/// # Errors
///
/// Returns an error if the input is unreadable, if the CSV itself is
/// malformed, or if a data row appears before any institution header.
pub fn parse_institutions(input: impl Read) -> Result<Vec<InstitutionGroup>> {
    let mut buffered = BufReader::new(input);

    let mut skipped = String::new();
    for _ in 0..SKIPPED_LINES {
        skipped.clear();
        buffered.read_line(&mut skipped)?;
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(buffered);

    let mut groups: Vec<InstitutionGroup> = Vec::new();

    for record in reader.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line() + SKIPPED_LINES);

        if record.len() != FIELD_COUNT {
            warn!(line, fields = record.len(), "Skipping malformed row");
            continue;
        }

        let raw: RawRow = record.deserialize(None)?;

        match classify_row(&raw) {
            RowKind::Aggregate => continue,
            RowKind::Header => {
                debug!(line, name = %raw.education_and_place, "Opening institution group");
                groups.push(InstitutionGroup {
                    name: raw.education_and_place,
                    items: Vec::new(),
                });
            }
            RowKind::Data => {
                let group = groups.last_mut().ok_or_else(|| {
                    anyhow!("line {line}: data row precedes any institution header")
                })?;
                group.items.push(normalize_row(raw));
            }
        }
    }

    debug!(
        institutions = groups.len(),
        entries = groups.iter().map(|g| g.items.len()).sum::<usize>(),
        "CSV parse complete"
    );

    Ok(groups)
}
