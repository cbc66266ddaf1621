//! Data types flowing through the ingestion pipeline.

use serde::{Deserialize, Serialize};

/// The eight fields of one CSV line, read positionally, all untyped text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRow {
    pub id: String,
    pub section_id: String,
    pub education_and_place: String,
    pub total_accepted: String,
    pub standby: String,
    pub total_applicants: String,
    pub first_prio: String,
    pub grade: String,
}

/// A program entry with its admission statistics parsed into numbers.
///
/// Numeric fields are always finite and non-negative; values the source
/// file leaves blank or garbled come through as 0. The
/// `education_and_place` label is carried verbatim — consumers parse
/// season and campus info out of its text, so it must not be reformatted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedEntry {
    pub id: String,
    pub section_id: String,
    pub education_and_place: String,
    pub total_accepted: u32,
    pub standby: u32,
    pub total_applicants: u32,
    pub first_prio: u32,
    pub grade: f64,
}

/// One institution and its program entries, in source row order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstitutionGroup {
    pub name: String,
    pub items: Vec<NormalizedEntry>,
}

/// A GeoJSON Feature with Point geometry locating one institution.
///
/// `properties.name` echoes the institution name the coordinate was
/// resolved for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(rename = "type")]
    pub feature_type: String,
    pub geometry: PointGeometry,
    pub properties: GeoProperties,
}

/// The `geometry` member of a [`GeoPoint`]: a `[longitude, latitude]` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointGeometry {
    #[serde(rename = "type")]
    pub geometry_type: String,
    pub coordinates: [f64; 2],
}

/// The `properties` member of a [`GeoPoint`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoProperties {
    pub name: String,
}

impl GeoPoint {
    /// Builds a feature at `[lng, lat]` for the named institution.
    pub fn new(name: &str, lng: f64, lat: f64) -> Self {
        GeoPoint {
            feature_type: "Feature".to_string(),
            geometry: PointGeometry {
                geometry_type: "Point".to_string(),
                coordinates: [lng, lat],
            },
            properties: GeoProperties {
                name: name.to_string(),
            },
        }
    }

    /// The `[0, 0]` feature emitted when no coordinate could be resolved.
    pub fn unresolved(name: &str) -> Self {
        Self::new(name, 0.0, 0.0)
    }
}

/// An institution group joined with its resolved location, ready to write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedInstitution {
    pub name: String,
    pub items: Vec<NormalizedEntry>,
    pub location: GeoPoint,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geopoint_serializes_as_geojson_feature() {
        let point = GeoPoint::new("Roskilde Universitet", 12.08, 55.65);
        let json = serde_json::to_value(&point).unwrap();

        assert_eq!(json["type"], "Feature");
        assert_eq!(json["geometry"]["type"], "Point");
        assert_eq!(json["geometry"]["coordinates"][0], 12.08);
        assert_eq!(json["geometry"]["coordinates"][1], 55.65);
        assert_eq!(json["properties"]["name"], "Roskilde Universitet");
    }

    #[test]
    fn test_unresolved_defaults_to_origin() {
        let point = GeoPoint::unresolved("Ukendt Akademi");
        assert_eq!(point.geometry.coordinates, [0.0, 0.0]);
        assert_eq!(point.properties.name, "Ukendt Akademi");
    }
}
