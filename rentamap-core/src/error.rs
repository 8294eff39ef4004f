use thiserror::Error;

/// Errors originating from the core data model.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown rental field: {0:?} (expected \"temporada\" or \"turisticas\")")]
    UnknownField(String),
}
