use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;

use crate::geocode::client::{GeocodeApi, LatLng};

#[derive(Deserialize)]
struct GeocodeResponse {
    results: Vec<GeocodeResult>,
}

#[derive(Deserialize)]
struct GeocodeResult {
    geometry: ResultGeometry,
}

#[derive(Deserialize)]
struct ResultGeometry {
    location: ResultLocation,
}

#[derive(Deserialize)]
struct ResultLocation {
    lat: f64,
    lng: f64,
}

/// Client for the Google Maps geocode endpoint.
pub struct GoogleGeocoder {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl GoogleGeocoder {
    pub fn new(api_key: String) -> Result<Self> {
        Self::with_base_url("https://maps.googleapis.com".to_string(), api_key)
    }

    /// Points the client at an alternate endpoint; used by tests and
    /// self-hosted proxies.
    pub fn with_base_url(base_url: String, api_key: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .connect_timeout(Duration::from_secs(5))
            .build()?;

        Ok(Self {
            base_url,
            api_key,
            client,
        })
    }
}

#[async_trait]
impl GeocodeApi for GoogleGeocoder {
    async fn lookup(&self, place: &str) -> Result<Option<LatLng>> {
        let url = format!("{}/maps/api/geocode/json", self.base_url);

        // reqwest percent-encodes the query pairs, so free-text place
        // names are safe to pass through as-is.
        let response = self
            .client
            .get(&url)
            .query(&[("address", place), ("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to send geocode request: {}", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!(
                "Geocode API returned status {}: {}",
                status,
                body
            ));
        }

        let decoded: GeocodeResponse = response
            .json()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to parse geocode response: {}", e))?;

        let first = match decoded.results.into_iter().next() {
            Some(result) => result,
            None => return Ok(None),
        };

        Ok(Some(LatLng {
            lat: first.geometry.location.lat,
            lng: first.geometry.location.lng,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_decoding_takes_first_result() {
        let body = r#"{
            "results": [
                { "geometry": { "location": { "lat": 55.68, "lng": 12.57 } } },
                { "geometry": { "location": { "lat": 1.0, "lng": 2.0 } } }
            ]
        }"#;

        let decoded: GeocodeResponse = serde_json::from_str(body).unwrap();
        let first = decoded.results.into_iter().next().unwrap();

        assert_eq!(first.geometry.location.lat, 55.68);
        assert_eq!(first.geometry.location.lng, 12.57);
    }

    #[test]
    fn test_response_decoding_tolerates_extra_fields() {
        // Real responses carry address components, viewports, place ids;
        // only the location path is consumed.
        let body = r#"{
            "status": "OK",
            "results": [
                {
                    "formatted_address": "Universitetsparken 1, København",
                    "partial_match": true,
                    "geometry": {
                        "location": { "lat": 55.70, "lng": 12.56 },
                        "location_type": "ROOFTOP"
                    }
                }
            ]
        }"#;

        let decoded: GeocodeResponse = serde_json::from_str(body).unwrap();
        assert_eq!(decoded.results.len(), 1);
    }

    #[test]
    fn test_empty_result_list_decodes() {
        let decoded: GeocodeResponse = serde_json::from_str(r#"{ "results": [] }"#).unwrap();
        assert!(decoded.results.is_empty());
    }
}
