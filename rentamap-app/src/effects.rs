use serde_json::Value;

use rentamap_core::LngLat;
use rentamap_render::PopupContent;

/// Pointer affordance over the municipality layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Default,
    Pointer,
}

/// An instruction for the rendering engine.
///
/// Handlers return effect descriptions instead of driving the engine
/// directly, which keeps them testable without a live map canvas.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Repaint the fill layer with a new color expression.
    SetFillColor { layer: String, expression: Value },
    /// Dismiss any open popup.
    ClosePopup,
    /// Pan/zoom to a coordinate with eased motion.
    FlyTo { center: LngLat, zoom: f64 },
    /// Open a popup at a coordinate.
    ShowPopup { at: LngLat, content: PopupContent },
    /// Toggle the pointer affordance.
    SetCursor(Cursor),
}
