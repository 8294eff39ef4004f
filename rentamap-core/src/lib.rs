pub mod error;
pub mod feature;
pub mod field;
pub mod format;
pub mod geometry;

// Re-export primary types for convenience.
pub use error::CoreError;
pub use feature::{Feature, PropertyValue};
pub use field::{RentalField, MUNICIPALITY_KEY, POPULATION_KEY};
pub use format::{format_number, format_value, parse_number};
pub use geometry::{Geometry, LngLat};

/// Convenience result type for the core crate.
pub type Result<T> = std::result::Result<T, CoreError>;
