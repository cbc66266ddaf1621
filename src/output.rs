//! Persistence of the per-year JSON artifacts.
//!
//! Each year produces two files: the full enriched dataset and a plain
//! list of institution names in the same order.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::records::EnrichedInstitution;

/// Path of the full dataset artifact for `year`.
pub fn dataset_path(dir: &Path, year: u16) -> PathBuf {
    dir.join(format!("{year}.json"))
}

/// Path of the name-index artifact for `year`.
pub fn name_index_path(dir: &Path, year: u16) -> PathBuf {
    dir.join(format!("{year}-uni.json"))
}

/// Writes both artifacts for one year, overwriting any previous run.
///
/// Both files are pretty-printed with 2-space indentation so reruns diff
/// cleanly byte-for-byte.
pub fn write_year_artifacts(
    dir: &Path,
    year: u16,
    enriched: &[EnrichedInstitution],
) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let dataset = dataset_path(dir, year);
    let json = serde_json::to_string_pretty(enriched)?;
    fs::write(&dataset, json).with_context(|| format!("writing {}", dataset.display()))?;
    debug!(path = %dataset.display(), institutions = enriched.len(), "Dataset artifact written");

    let names: Vec<&str> = enriched.iter().map(|e| e.name.as_str()).collect();
    let index = name_index_path(dir, year);
    let json = serde_json::to_string_pretty(&names)?;
    fs::write(&index, json).with_context(|| format!("writing {}", index.display()))?;
    debug!(path = %index.display(), "Name index written");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{GeoPoint, NormalizedEntry};
    use std::env;

    fn temp_dir(name: &str) -> PathBuf {
        env::temp_dir().join(name)
    }

    fn sample() -> Vec<EnrichedInstitution> {
        vec![
            EnrichedInstitution {
                name: "Roskilde Universitet".to_string(),
                items: vec![NormalizedEntry {
                    id: "2".to_string(),
                    section_id: "47010".to_string(),
                    education_and_place: "Humanistisk bachelor, Roskilde".to_string(),
                    total_accepted: 240,
                    standby: 0,
                    total_applicants: 551,
                    first_prio: 263,
                    grade: 6.8,
                }],
                location: GeoPoint::new("Roskilde Universitet", 12.14, 55.65),
            },
            EnrichedInstitution {
                name: "Aalborg Universitet".to_string(),
                items: Vec::new(),
                location: GeoPoint::unresolved("Aalborg Universitet"),
            },
        ]
    }

    #[test]
    fn test_writes_both_artifacts() {
        let dir = temp_dir("kot_ingest_test_artifacts");
        let _ = fs::remove_dir_all(&dir);

        write_year_artifacts(&dir, 2022, &sample()).unwrap();

        assert!(dataset_path(&dir, 2022).exists());
        assert!(name_index_path(&dir, 2022).exists());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_dataset_round_trips() {
        let dir = temp_dir("kot_ingest_test_roundtrip");
        let _ = fs::remove_dir_all(&dir);
        let enriched = sample();

        write_year_artifacts(&dir, 2021, &enriched).unwrap();

        let content = fs::read_to_string(dataset_path(&dir, 2021)).unwrap();
        let read_back: Vec<EnrichedInstitution> = serde_json::from_str(&content).unwrap();
        assert_eq!(read_back, enriched);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_name_index_keeps_dataset_order() {
        let dir = temp_dir("kot_ingest_test_names");
        let _ = fs::remove_dir_all(&dir);

        write_year_artifacts(&dir, 2020, &sample()).unwrap();

        let content = fs::read_to_string(name_index_path(&dir, 2020)).unwrap();
        let names: Vec<String> = serde_json::from_str(&content).unwrap();
        assert_eq!(names, ["Roskilde Universitet", "Aalborg Universitet"]);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_artifacts_are_two_space_indented() {
        let dir = temp_dir("kot_ingest_test_indent");
        let _ = fs::remove_dir_all(&dir);

        write_year_artifacts(&dir, 2019, &sample()).unwrap();

        let content = fs::read_to_string(dataset_path(&dir, 2019)).unwrap();
        assert!(content.starts_with("[\n  {\n    \""));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_rerun_overwrites_wholesale() {
        let dir = temp_dir("kot_ingest_test_overwrite");
        let _ = fs::remove_dir_all(&dir);

        write_year_artifacts(&dir, 2018, &sample()).unwrap();
        write_year_artifacts(&dir, 2018, &[]).unwrap();

        let content = fs::read_to_string(dataset_path(&dir, 2018)).unwrap();
        assert_eq!(content, "[]");

        fs::remove_dir_all(&dir).unwrap();
    }
}
