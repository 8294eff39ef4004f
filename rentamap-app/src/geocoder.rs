use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use rentamap_core::{Geometry, LngLat};

use crate::settings::MapSettings;

/// Forward-geocoding endpoint the search box queries.
pub const NOMINATIM_ENDPOINT: &str = "https://nominatim.openstreetmap.org/search";

/// Errors from the geocoding path.
///
/// This is the one part of the system where failures surface as errors: the
/// search widget owns the user-facing handling, the map core stays total.
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("geocoding request failed: {0}")]
    Request(#[from] Box<ureq::Error>),

    #[error("failed to read geocoding response: {0}")]
    Io(#[from] std::io::Error),

    #[error("geocoding response was not valid GeoJSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A geocoding hit, adapted to what the search widget consumes.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub name: String,
    pub center: LngLat,
}

// Nominatim `format=geojson` response shape; only the parts we use.
#[derive(Debug, Deserialize)]
struct GeoJsonCollection {
    #[serde(default)]
    features: Vec<GeoJsonFeature>,
}

#[derive(Debug, Deserialize)]
struct GeoJsonFeature {
    geometry: Geometry,
    #[serde(default)]
    properties: GeoJsonProperties,
}

#[derive(Debug, Default, Deserialize)]
struct GeoJsonProperties {
    #[serde(default)]
    display_name: String,
}

/// Forward geocoder constrained to one country and a fixed result limit.
pub struct Geocoder {
    endpoint: String,
    country_code: String,
    limit: u32,
}

impl Geocoder {
    pub fn new(settings: &MapSettings) -> Self {
        Self {
            endpoint: NOMINATIM_ENDPOINT.to_string(),
            country_code: settings.country_code.clone(),
            limit: settings.search_limit,
        }
    }

    /// Resolve a free-text query into place candidates.
    pub fn forward_geocode(&self, query: &str) -> Result<Vec<Place>, GeocodeError> {
        debug!(query, country = %self.country_code, "forward geocode");
        let body = ureq::get(&self.endpoint)
            .query("q", query)
            .query("format", "geojson")
            .query("countrycodes", &self.country_code)
            .query("limit", &self.limit.to_string())
            .call()
            .map_err(|e| GeocodeError::Request(Box::new(e)))?
            .into_string()?;
        Self::adapt(&body)
    }

    /// Adapt a GeoJSON response body into the widget's place list.
    ///
    /// Split from the HTTP call so the shape conversion is testable offline.
    pub fn adapt(body: &str) -> Result<Vec<Place>, GeocodeError> {
        let collection: GeoJsonCollection = serde_json::from_str(body)?;
        Ok(collection
            .features
            .into_iter()
            .map(|f| Place {
                name: f.properties.display_name,
                center: f.geometry.centroid(),
            })
            .collect())
    }
}
