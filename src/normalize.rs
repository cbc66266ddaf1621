//! Normalization of locale-formatted numeric fields.
//!
//! The source files use Danish number formatting: `.` as the thousands
//! grouping character and `,` as the decimal separator.

use crate::records::{NormalizedEntry, RawRow};

/// Parses an integer-like field, stripping `.` grouping characters first.
///
/// Blank or unparseable input yields 0.
pub fn normalize_count(raw: &str) -> u32 {
    raw.trim().replace('.', "").parse().unwrap_or(0)
}

/// Parses the grade field, converting a decimal comma to a decimal point.
///
/// Blank, unparseable, non-finite, or negative input yields 0.0.
pub fn normalize_grade(raw: &str) -> f64 {
    raw.trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|g| g.is_finite() && *g >= 0.0)
        .unwrap_or(0.0)
}

/// Converts a raw CSV row into a typed entry.
///
/// Never fails: numeric fields degrade to 0 instead of erroring, and the
/// label fields pass through untouched.
pub fn normalize_row(raw: RawRow) -> NormalizedEntry {
    NormalizedEntry {
        id: raw.id,
        section_id: raw.section_id,
        education_and_place: raw.education_and_place,
        total_accepted: normalize_count(&raw.total_accepted),
        standby: normalize_count(&raw.standby),
        total_applicants: normalize_count(&raw.total_applicants),
        first_prio: normalize_count(&raw.first_prio),
        grade: normalize_grade(&raw.grade),
    }
}
