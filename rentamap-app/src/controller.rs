use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::Value;
use tracing::debug;

use rentamap_core::{Feature, LngLat, RentalField};
use rentamap_render::{fill_layer, ColorScale, PopupContent};

use crate::effects::{Cursor, Effect};
use crate::events::MapEvent;
use crate::settings::MapSettings;

/// A scheduled popup for the second phase of a random jump.
///
/// The fly-to has eased motion; showing the popup immediately would pin it
/// to a view still in flight, so it waits out the settle delay. Content is
/// derived when the popup fires, against the field active at that moment.
#[derive(Debug, Clone)]
struct PendingPopup {
    due: Instant,
    at: LngLat,
    feature: Feature,
}

/// Orchestrates the map: holds the active field, dispatches events into
/// effect batches, and times the deferred popup of the random jump.
///
/// This is the only stateful piece of the interaction layer, and all of its
/// state is private: the active field, the RNG, and at most one pending
/// popup. Everything runs on the host's event loop; nothing here blocks.
pub struct MapController {
    settings: MapSettings,
    scale: ColorScale,
    field: RentalField,
    rng: StdRng,
    pending_popup: Option<PendingPopup>,
}

impl MapController {
    pub fn new(settings: MapSettings) -> Self {
        Self::with_rng(settings, StdRng::from_os_rng())
    }

    /// Deterministic variant for tests.
    pub fn with_seed(settings: MapSettings, seed: u64) -> Self {
        Self::with_rng(settings, StdRng::seed_from_u64(seed))
    }

    fn with_rng(settings: MapSettings, rng: StdRng) -> Self {
        let field = settings.initial_field;
        Self {
            settings,
            scale: ColorScale::rental_density(),
            field,
            rng,
            pending_popup: None,
        }
    }

    /// The currently selected data field.
    pub fn field(&self) -> RentalField {
        self.field
    }

    pub fn settings(&self) -> &MapSettings {
        &self.settings
    }

    /// The fill-layer definition the engine adds at startup.
    pub fn initial_layer(&self) -> Value {
        fill_layer(
            &self.settings.layer_id,
            &self.settings.source_name,
            &self.settings.source_layer,
            &self.scale,
            self.field,
        )
    }

    /// Dispatch one event into the effects the engine should apply.
    pub fn handle(&mut self, event: MapEvent, now: Instant) -> Vec<Effect> {
        match event {
            MapEvent::FieldSelected(field) => self.on_field_selected(field),
            MapEvent::FeatureClicked { features, lng_lat } => self.on_click(features, lng_lat),
            MapEvent::HoverEntered => vec![Effect::SetCursor(Cursor::Pointer)],
            MapEvent::HoverLeft => vec![Effect::SetCursor(Cursor::Default)],
            MapEvent::RandomRequested { rendered } => self.on_random(rendered, now),
        }
    }

    /// Fire the deferred popup once its settle delay has elapsed.
    ///
    /// Call this from the host loop; returns at most one effect per elapsed
    /// deadline. Content is built here, not at schedule time, so a field
    /// switch during the flight is reflected in what the user reads.
    pub fn poll_deferred(&mut self, now: Instant) -> Option<Effect> {
        if self.pending_popup.as_ref()?.due > now {
            return None;
        }
        let pending = self.pending_popup.take()?;
        let content = PopupContent::build(&pending.feature, self.field);
        debug!(title = %content.title, "deferred popup fired");
        Some(Effect::ShowPopup {
            at: pending.at,
            content,
        })
    }

    pub fn has_pending_popup(&self) -> bool {
        self.pending_popup.is_some()
    }

    fn on_field_selected(&mut self, field: RentalField) -> Vec<Effect> {
        self.field = field;
        debug!(%field, "field selected");
        // An open popup is keyed to the previous field; leaving it up would
        // mislead, so it goes down with the repaint.
        vec![
            Effect::SetFillColor {
                layer: self.settings.layer_id.clone(),
                expression: self.scale.paint_expression(field),
            },
            Effect::ClosePopup,
        ]
    }

    fn on_click(&mut self, features: Vec<Feature>, lng_lat: LngLat) -> Vec<Effect> {
        let Some(feature) = features.first() else {
            return Vec::new();
        };
        vec![Effect::ShowPopup {
            at: lng_lat,
            content: PopupContent::build(feature, self.field),
        }]
    }

    fn on_random(&mut self, mut rendered: Vec<Feature>, now: Instant) -> Vec<Effect> {
        if rendered.is_empty() {
            debug!("random jump requested with empty viewport");
            return Vec::new();
        }
        let index = self.rng.random_range(0..rendered.len());
        let feature = rendered.swap_remove(index);
        let center = feature.geometry.centroid();
        // Rescheduling replaces any popup still in flight, so rapid clicks
        // produce one popup, not a stray trail.
        self.pending_popup = Some(PendingPopup {
            due: now + Duration::from_millis(self.settings.popup_delay_ms),
            at: center,
            feature,
        });
        vec![Effect::FlyTo {
            center,
            zoom: self.settings.fly_to_zoom,
        }]
    }
}
