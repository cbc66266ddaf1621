//! Institution coordinate resolution.
//!
//! Manual overrides win over the provider; provider failures degrade to a
//! zero-coordinate fallback and never abort the batch.

mod client;
mod google;
mod overrides;

pub use client::{GeocodeApi, LatLng};
pub use google::GoogleGeocoder;
pub use overrides::OverrideTable;

use tracing::{debug, warn};

use crate::records::{GeoPoint, InstitutionGroup};

/// Resolves one [`GeoPoint`] per group, in group order.
///
/// Lookups run one at a time; the provider throttles bursts of concurrent
/// requests. Every failure path degrades to [`GeoPoint::unresolved`] for
/// that institution only, so the output always has the same length and
/// order as the input.
#[tracing::instrument(skip_all, fields(institutions = groups.len()))]
pub async fn resolve_coordinates<G: GeocodeApi>(
    api: &G,
    overrides: &OverrideTable,
    groups: &[InstitutionGroup],
) -> Vec<GeoPoint> {
    let mut points = Vec::with_capacity(groups.len());

    for group in groups {
        let point = resolve_one(api, overrides, &group.name).await;
        debug!(
            name = %group.name,
            coordinates = ?point.geometry.coordinates,
            "Institution resolved"
        );
        points.push(point);
    }

    points
}

async fn resolve_one<G: GeocodeApi>(
    api: &G,
    overrides: &OverrideTable,
    name: &str,
) -> GeoPoint {
    if let Some([lng, lat]) = overrides.get(name) {
        debug!(name, "Using manual coordinate override");
        return GeoPoint::new(name, lng, lat);
    }

    match api.lookup(name).await {
        Ok(Some(hit)) => GeoPoint::new(name, hit.lng, hit.lat),
        Ok(None) => {
            warn!(name, "Geocoder returned no results");
            GeoPoint::unresolved(name)
        }
        Err(e) => {
            warn!(name, error = %e, "Geocode lookup failed");
            GeoPoint::unresolved(name)
        }
    }
}
