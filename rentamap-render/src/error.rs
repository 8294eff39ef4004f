use thiserror::Error;

/// Errors originating from the visual-encoding layer.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("color scale needs at least one breakpoint")]
    EmptyScale,

    #[error("breakpoint thresholds must be finite and strictly increasing (index {index})")]
    UnorderedBreakpoints { index: usize },
}
