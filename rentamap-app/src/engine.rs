use serde_json::Value;

use rentamap_core::{Feature, LngLat};
use rentamap_render::PopupContent;
use tracing::info;

use crate::effects::{Cursor, Effect};

/// The rendering-engine collaborator contract.
///
/// The controller only ever talks to the map through this trait: adding the
/// fill layer, repainting it, querying what is on screen, moving the camera
/// and managing the single popup. Tile fetching, vector decoding and event
/// plumbing all live behind it.
pub trait MapEngine {
    /// Add the municipality fill layer from its JSON definition.
    fn add_fill_layer(&mut self, layer: &Value);
    /// Set a paint property on a named layer.
    fn set_paint_property(&mut self, layer: &str, property: &str, value: &Value);
    /// Features currently rendered for a named layer (viewport-dependent).
    fn query_rendered_features(&mut self, layer: &str) -> Vec<Feature>;
    /// Pan/zoom to a coordinate with eased motion.
    fn fly_to(&mut self, center: LngLat, zoom: f64);
    /// Open the popup at a coordinate with the given content.
    fn show_popup(&mut self, at: LngLat, content: &PopupContent);
    /// Dismiss the popup if open.
    fn close_popup(&mut self);
    fn set_cursor(&mut self, cursor: Cursor);
}

/// Apply a batch of effect descriptions to an engine, in order.
pub fn apply_effects(engine: &mut dyn MapEngine, effects: &[Effect]) {
    for effect in effects {
        match effect {
            Effect::SetFillColor { layer, expression } => {
                engine.set_paint_property(layer, "fill-color", expression);
            }
            Effect::ClosePopup => engine.close_popup(),
            Effect::FlyTo { center, zoom } => engine.fly_to(*center, *zoom),
            Effect::ShowPopup { at, content } => engine.show_popup(*at, content),
            Effect::SetCursor(cursor) => engine.set_cursor(*cursor),
        }
    }
}

/// A stand-in engine that logs every instruction.
///
/// Used by the demo binary; `rendered` plays the role of the engine's
/// current viewport contents.
#[derive(Default)]
pub struct LoggingEngine {
    pub rendered: Vec<Feature>,
}

impl MapEngine for LoggingEngine {
    fn add_fill_layer(&mut self, layer: &Value) {
        info!(id = %layer["id"], "add fill layer");
    }

    fn set_paint_property(&mut self, layer: &str, property: &str, value: &Value) {
        info!(layer, property, %value, "set paint property");
    }

    fn query_rendered_features(&mut self, _layer: &str) -> Vec<Feature> {
        self.rendered.clone()
    }

    fn fly_to(&mut self, center: LngLat, zoom: f64) {
        info!(lng = center.lng, lat = center.lat, zoom, "fly to");
    }

    fn show_popup(&mut self, at: LngLat, content: &PopupContent) {
        info!(
            lng = at.lng,
            lat = at.lat,
            title = %content.title,
            value = %content.metric_value,
            "show popup"
        );
    }

    fn close_popup(&mut self) {
        info!("close popup");
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        info!(?cursor, "set cursor");
    }
}
