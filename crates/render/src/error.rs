//! Error types for drawing assembly and file output.

use fieldlines_core::FieldError;
use thiserror::Error;

/// Errors produced while building drawings or writing them to disk.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A physics-side failure (bad domain, palette, color).
    #[error(transparent)]
    Field(#[from] FieldError),

    /// A render setting was outside its valid range.
    #[error("invalid render setting '{name}': {reason}")]
    InvalidConfig { name: String, reason: String },

    /// The canvas could not be allocated at the requested size.
    #[error("invalid canvas size {width}x{height}")]
    InvalidCanvas { width: usize, height: usize },

    /// Writing an output file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An image encoder rejected the data.
    #[error("encoding error: {0}")]
    Encode(String),
}

impl RenderError {
    pub(crate) fn config(name: &str, reason: impl Into<String>) -> Self {
        RenderError::InvalidConfig {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    /// Whether this error came from the filesystem or an encoder.
    pub fn is_output_failure(&self) -> bool {
        matches!(self, RenderError::Io(_) | RenderError::Encode(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_error_is_transparent() {
        let err = RenderError::from(FieldError::InvalidDimensions);
        assert_eq!(err.to_string(), FieldError::InvalidDimensions.to_string());
        assert!(!err.is_output_failure());
    }

    #[test]
    fn io_error_converts_and_counts_as_output_failure() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err = RenderError::from(io);
        assert!(err.to_string().contains("read-only"));
        assert!(err.is_output_failure());
    }

    #[test]
    fn invalid_canvas_mentions_size() {
        let err = RenderError::InvalidCanvas {
            width: 0,
            height: 600,
        };
        assert!(err.to_string().contains("0x600"));
    }

    #[test]
    fn render_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RenderError>();
    }
}
