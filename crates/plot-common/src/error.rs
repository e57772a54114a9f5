//! Error types for image plotting.

use thiserror::Error;

/// Result type alias using PlotError.
pub type PlotResult<T> = Result<T, PlotError>;

/// Primary error type for the plotting pipeline.
#[derive(Debug, Error)]
pub enum PlotError {
    // === Data Errors ===
    #[error("Invalid edge grid: {0}")]
    InvalidGrid(String),

    #[error("Shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: String, actual: String },

    #[error("Dataset contains no finite values: {0}")]
    NoFiniteValues(String),

    // === Mapping Errors ===
    #[error("Axis mapping failed: {0}")]
    AxisMapping(String),

    // === Settings Errors ===
    #[error("Invalid setting '{name}': {message}")]
    InvalidSettings { name: String, message: String },

    #[error("Unknown colormap: {0}")]
    UnknownColormap(String),

    // === Output Errors ===
    #[error("Drawing surface error: {0}")]
    Surface(String),

    #[error("Encoding failed: {0}")]
    Encode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PlotError {
    /// Create an InvalidGrid error.
    pub fn invalid_grid(msg: impl Into<String>) -> Self {
        Self::InvalidGrid(msg.into())
    }

    /// Create a ShapeMismatch error for a value count.
    pub fn shape_mismatch(expected: usize, actual: usize) -> Self {
        Self::ShapeMismatch {
            expected: format!("{} values", expected),
            actual: actual.to_string(),
        }
    }

    /// Create a ShapeMismatch error for grid dimensions (width, height).
    pub fn grid_shape_mismatch(expected: (usize, usize), actual: (usize, usize)) -> Self {
        Self::ShapeMismatch {
            expected: format!("{}x{} grid", expected.0, expected.1),
            actual: format!("{}x{}", actual.0, actual.1),
        }
    }

    /// Create an AxisMapping error.
    pub fn axis_mapping(msg: impl Into<String>) -> Self {
        Self::AxisMapping(msg.into())
    }

    /// Create an InvalidSettings error.
    pub fn invalid_settings(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSettings {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Whether the error only affects the current frame and the element
    /// can be skipped instead of failing the whole draw.
    pub fn is_skippable(&self) -> bool {
        matches!(self, PlotError::InvalidGrid(_))
    }
}
