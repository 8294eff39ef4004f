use rentamap_core::{Feature, LngLat, RentalField};

/// External events the controller reacts to.
///
/// Payloads carry everything a handler needs, so dispatch stays a pure
/// state-plus-payload → effects function. Feature lists come straight from
/// the rendering engine and are consumed within the handler; for the random
/// jump, `rendered` is whatever the engine currently has on screen, which
/// deliberately biases the pick toward the visible viewport.
#[derive(Debug, Clone)]
pub enum MapEvent {
    /// The field selector changed.
    FieldSelected(RentalField),
    /// A click on the municipality layer, with the hit features and the
    /// clicked coordinate.
    FeatureClicked {
        features: Vec<Feature>,
        lng_lat: LngLat,
    },
    /// Pointer entered the municipality layer.
    HoverEntered,
    /// Pointer left the municipality layer.
    HoverLeft,
    /// The random-jump button was pressed.
    RandomRequested { rendered: Vec<Feature> },
}
