use thiserror::Error;

/// Errors raised before any computation when the arguments are malformed.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ReflError {
    #[error("{name} has {actual} entries, expected {expected}")]
    LengthMismatch {
        name: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{name} has {len} entries, expected 1 or {points}")]
    Broadcast {
        name: &'static str,
        len: usize,
        points: usize,
    },

    #[error("a layer profile needs at least 2 layers, got {layers}")]
    TooFewLayers { layers: usize },

    #[error("layer {layer} has negative thickness {thickness}")]
    NegativeThickness { layer: usize, thickness: f64 },

    #[error("{name} must be non-decreasing (index {index})")]
    Unsorted { name: &'static str, index: usize },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, ReflError>;
