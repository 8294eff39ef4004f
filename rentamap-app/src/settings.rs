use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use rentamap_core::{LngLat, RentalField};

/// Map shell configuration.
///
/// Every field has a default matching the production deployment, so a
/// missing or partial settings file still yields a working map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapSettings {
    /// Tiled vector source, referenced by name only; its contents are opaque.
    #[serde(default = "default_tiles_url")]
    pub tiles_url: String,
    #[serde(default = "default_source_name")]
    pub source_name: String,
    #[serde(default = "default_source_layer")]
    pub source_layer: String,
    /// Id of the municipality fill layer.
    #[serde(default = "default_layer_id")]
    pub layer_id: String,
    /// Initial view.
    #[serde(default = "default_center")]
    pub center: LngLat,
    #[serde(default = "default_zoom")]
    pub zoom: f64,
    /// Target zoom for the random-jump fly-to.
    #[serde(default = "default_fly_to_zoom")]
    pub fly_to_zoom: f64,
    /// Settle delay between the fly-to and the deferred popup.
    #[serde(default = "default_popup_delay_ms")]
    pub popup_delay_ms: u64,
    #[serde(default)]
    pub initial_field: RentalField,
    /// Geocoder constraints.
    #[serde(default = "default_country_code")]
    pub country_code: String,
    #[serde(default = "default_search_limit")]
    pub search_limit: u32,
    #[serde(default = "default_search_placeholder")]
    pub search_placeholder: String,
}

fn default_tiles_url() -> String {
    "https://newtral-datos.github.io/mapa_vivienda_turistica_temporada/mapa_rua.pmtiles".to_string()
}
fn default_source_name() -> String {
    "datos".to_string()
}
fn default_source_layer() -> String {
    "mapa_rua".to_string()
}
fn default_layer_id() -> String {
    "capa_fill".to_string()
}
fn default_center() -> LngLat {
    LngLat::new(-3.7038, 40.4168)
}
fn default_zoom() -> f64 {
    5.0
}
fn default_fly_to_zoom() -> f64 {
    11.0
}
fn default_popup_delay_ms() -> u64 {
    600
}
fn default_country_code() -> String {
    "es".to_string()
}
fn default_search_limit() -> u32 {
    5
}
fn default_search_placeholder() -> String {
    "Buscar municipio...".to_string()
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            tiles_url: default_tiles_url(),
            source_name: default_source_name(),
            source_layer: default_source_layer(),
            layer_id: default_layer_id(),
            center: default_center(),
            zoom: default_zoom(),
            fly_to_zoom: default_fly_to_zoom(),
            popup_delay_ms: default_popup_delay_ms(),
            initial_field: RentalField::default(),
            country_code: default_country_code(),
            search_limit: default_search_limit(),
            search_placeholder: default_search_placeholder(),
        }
    }
}

impl MapSettings {
    /// Load settings from a JSON file, falling back to defaults.
    pub fn load(path: &Path) -> Self {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(json) => match serde_json::from_str::<MapSettings>(&json) {
                    Ok(settings) => {
                        info!("Loaded settings from {}", path.display());
                        return settings;
                    }
                    Err(e) => {
                        error!("Failed to parse settings: {e}");
                    }
                },
                Err(e) => {
                    error!("Failed to read settings file: {e}");
                }
            }
        } else {
            debug!("No settings file at {}", path.display());
        }
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_deployment() {
        let s = MapSettings::default();
        assert_eq!(s.source_name, "datos");
        assert_eq!(s.source_layer, "mapa_rua");
        assert_eq!(s.layer_id, "capa_fill");
        assert_eq!(s.fly_to_zoom, 11.0);
        assert_eq!(s.popup_delay_ms, 600);
        assert_eq!(s.country_code, "es");
        assert_eq!(s.search_limit, 5);
        assert_eq!(s.initial_field, RentalField::Seasonal);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let s: MapSettings = serde_json::from_str(r#"{ "fly_to_zoom": 9.5 }"#).unwrap();
        assert_eq!(s.fly_to_zoom, 9.5);
        assert_eq!(s.source_layer, "mapa_rua");
        assert_eq!(s.popup_delay_ms, 600);
    }

    #[test]
    fn missing_file_falls_back() {
        let s = MapSettings::load(Path::new("/nonexistent/rentamap-settings.json"));
        assert_eq!(s.layer_id, "capa_fill");
    }

    #[test]
    fn initial_field_parses_snake_case() {
        let s: MapSettings = serde_json::from_str(r#"{ "initial_field": "tourist" }"#).unwrap();
        assert_eq!(s.initial_field, RentalField::Tourist);
    }
}
