use anyhow::Result;
use std::collections::HashMap;

/// Manual coordinate overrides for institutions the geocoder resolves
/// incorrectly or not at all.
///
/// Stored as a plain JSON object on disk, values are `[longitude,
/// latitude]` pairs:
/// ```json
/// {
///   "Danmarks Tekniske Universitet": [12.5233, 55.7856],
///   "IT-Universitetet i København": [12.5911, 55.6596]
/// }
/// ```
pub struct OverrideTable {
    entries: HashMap<String, [f64; 2]>,
}

impl OverrideTable {
    /// A table with no entries; every institution goes to the provider.
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Loads the table from a JSON file at `path`.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let entries: HashMap<String, [f64; 2]> = serde_json::from_str(&content)?;
        Ok(Self { entries })
    }

    /// Builds a table from in-memory entries.
    pub fn from_entries(entries: impl IntoIterator<Item = (String, [f64; 2])>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Returns the fixed `[lng, lat]` pair for `name`, if one is configured.
    pub fn get(&self, name: &str) -> Option<[f64; 2]> {
        self.entries.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    #[test]
    fn test_load_and_get() {
        let path = temp_path("kot_ingest_test_overrides.json");
        fs::write(
            &path,
            r#"{ "Danmarks Tekniske Universitet": [12.5233, 55.7856] }"#,
        )
        .unwrap();

        let table = OverrideTable::load(&path).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(
            table.get("Danmarks Tekniske Universitet"),
            Some([12.5233, 55.7856])
        );
        assert_eq!(table.get("Aarhus Universitet"), None);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let path = temp_path("kot_ingest_test_overrides_bad.json");
        fs::write(&path, r#"{ "Somewhere": "not a pair" }"#).unwrap();

        assert!(OverrideTable::load(&path).is_err());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_empty_table() {
        let table = OverrideTable::empty();
        assert!(table.is_empty());
        assert_eq!(table.get("Anything"), None);
    }
}
