//! Error types for the fieldlines core.

use thiserror::Error;

/// Errors produced while building grids, configs and palettes.
#[derive(Debug, Error)]
pub enum FieldError {
    /// Grid or raster width/height was zero (or their product overflowed).
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// A domain range was empty, reversed or not finite.
    #[error("invalid domain: {axis} range ({min}, {max}) must be finite with min < max")]
    InvalidDomain { axis: char, min: f64, max: f64 },

    /// Two grids had incompatible dimensions for an element-wise operation.
    #[error("dimension mismatch: ({lhs_w}, {lhs_h}) vs ({rhs_w}, {rhs_h})")]
    DimensionMismatch {
        lhs_w: usize,
        lhs_h: usize,
        rhs_w: usize,
        rhs_h: usize,
    },

    /// A configuration value was outside its valid range.
    #[error("invalid config value for '{name}': {reason}")]
    InvalidConfig { name: String, reason: String },

    /// A preset name was not recognized.
    #[error("unknown preset: {0}")]
    UnknownPreset(String),

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A palette could not be constructed or looked up.
    #[error("invalid palette: {0}")]
    InvalidPalette(String),
}

impl FieldError {
    pub(crate) fn config(name: &str, reason: impl Into<String>) -> Self {
        FieldError::InvalidConfig {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}
