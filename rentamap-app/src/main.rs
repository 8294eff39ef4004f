use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use tracing::info;
use tracing_subscriber::EnvFilter;

use rentamap_core::{Feature, Geometry, LngLat, RentalField};

use rentamap_app::{apply_effects, LoggingEngine, MapController, MapEngine, MapEvent, MapSettings};

/// Scripted walkthrough of the interaction layer against a logging engine.
///
/// Stands in for the browser shell: the real deployment wires the same
/// controller to a live map canvas and DOM controls.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = MapSettings::load(Path::new("settings.json"));
    info!(source = %settings.tiles_url, "starting rentamap demo shell");

    let mut engine = LoggingEngine {
        rendered: sample_features(),
    };
    let mut controller = MapController::new(settings);

    let layer_id = controller.settings().layer_id.clone();
    let layer = controller.initial_layer();
    engine.add_fill_layer(&layer);

    // Hover over a municipality, click it, then switch the data field.
    let now = Instant::now();
    for event in [
        MapEvent::HoverEntered,
        MapEvent::FeatureClicked {
            features: engine.query_rendered_features(&layer_id),
            lng_lat: LngLat::new(-3.7038, 40.4168),
        },
        MapEvent::HoverLeft,
        MapEvent::FieldSelected(RentalField::Tourist),
    ] {
        let effects = controller.handle(event, now);
        apply_effects(&mut engine, &effects);
    }

    // Random jump: fly-to now, popup after the settle delay.
    let rendered = engine.query_rendered_features(&layer_id);
    let effects = controller.handle(MapEvent::RandomRequested { rendered }, Instant::now());
    apply_effects(&mut engine, &effects);

    while controller.has_pending_popup() {
        thread::sleep(Duration::from_millis(25));
        if let Some(effect) = controller.poll_deferred(Instant::now()) {
            apply_effects(&mut engine, &[effect]);
        }
    }

    info!("demo complete");
}

fn sample_features() -> Vec<Feature> {
    vec![
        Feature::new(Geometry::Polygon(vec![vec![
            LngLat::new(-3.80, 40.35),
            LngLat::new(-3.60, 40.35),
            LngLat::new(-3.60, 40.50),
            LngLat::new(-3.80, 40.50),
        ]]))
        .with("nombre_municipio", "Madrid")
        .with("POBLACION_MUNI", "3223000")
        .with("turisticas", "450")
        .with("temporada", "1200"),
        Feature::new(Geometry::Polygon(vec![vec![
            LngLat::new(2.05, 41.30),
            LngLat::new(2.25, 41.30),
            LngLat::new(2.25, 41.45),
            LngLat::new(2.05, 41.45),
        ]]))
        .with("nombre_municipio", "Barcelona")
        .with("POBLACION_MUNI", 1620000.0)
        .with("turisticas", 9000.0)
        .with("temporada", 4100.0),
        Feature::new(Geometry::Point(LngLat::new(-13.56, 29.06)))
            .with("POBLACION_MUNI", "22342")
            .with("temporada", "not-a-number"),
    ]
}
