//! Joins parsed institution groups with their resolved locations.

use anyhow::{Result, ensure};

use crate::records::{EnrichedInstitution, GeoPoint, InstitutionGroup};

/// Zips groups with their resolved points by position.
///
/// The resolver emits exactly one point per group, in group order; the
/// length check turns any violation of that correspondence into an error
/// instead of a silently truncated dataset.
pub fn assemble(
    groups: Vec<InstitutionGroup>,
    points: Vec<GeoPoint>,
) -> Result<Vec<EnrichedInstitution>> {
    ensure!(
        groups.len() == points.len(),
        "group/coordinate count mismatch: {} groups, {} points",
        groups.len(),
        points.len()
    );

    Ok(groups
        .into_iter()
        .zip(points)
        .map(|(group, location)| EnrichedInstitution {
            name: group.name,
            items: group.items,
            location,
        })
        .collect())
}
