//! Trait and types for a place-name geocoding provider.

use anyhow::Result;

/// A resolved coordinate pair, as returned by the provider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// Abstraction over a geocoding provider (e.g., the Google geocode API).
#[async_trait::async_trait]
pub trait GeocodeApi: Send + Sync {
    /// Looks up a free-text place name.
    ///
    /// `Ok(None)` means the provider answered with zero results; an `Err`
    /// means the request itself failed.
    async fn lookup(&self, place: &str) -> Result<Option<LatLng>>;
}
