pub mod error;
pub mod popup;
pub mod scale;

pub use error::RenderError;
pub use popup::PopupContent;
pub use scale::{fill_layer, ColorScale, Rgb};

/// Convenience result type for the render crate.
pub type Result<T> = std::result::Result<T, RenderError>;
