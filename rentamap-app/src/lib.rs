pub mod controller;
pub mod effects;
pub mod engine;
pub mod events;
pub mod geocoder;
pub mod settings;

pub use controller::MapController;
pub use effects::{Cursor, Effect};
pub use engine::{apply_effects, LoggingEngine, MapEngine};
pub use events::MapEvent;
pub use geocoder::{GeocodeError, Geocoder, Place};
pub use settings::MapSettings;
