//! PNG encoding for RGBA buffers and the field-strength heat map.
//!
//! Feature-gated behind `png` (default on). The buffer conversion itself
//! lives in [`crate::pixel`].

use std::path::Path;

use fieldlines_core::SampledField;

use crate::config::RenderConfig;
use crate::error::RenderError;
use crate::pixel::magnitude_to_rgba;

/// Saves a straight-alpha RGBA8 buffer as PNG.
pub fn save_rgba(
    width: usize,
    height: usize,
    rgba: Vec<u8>,
    path: &Path,
) -> Result<(), RenderError> {
    let invalid = || RenderError::InvalidCanvas { width, height };
    let w = u32::try_from(width).map_err(|_| invalid())?;
    let h = u32::try_from(height).map_err(|_| invalid())?;
    let img = image::RgbaImage::from_raw(w, h, rgba)
        .ok_or_else(|| RenderError::Encode("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| match e {
        image::ImageError::IoError(io) => RenderError::Io(io),
        other => RenderError::Encode(other.to_string()),
    })
}

/// Writes `|E|` on a log scale through the configured palette at the
/// configured canvas size.
pub fn write_heatmap_png(
    sampled: &SampledField,
    config: &RenderConfig,
    path: &Path,
) -> Result<(), RenderError> {
    config.validate()?;
    let palette = config.palette()?;
    let rgba = magnitude_to_rgba(
        sampled,
        &palette,
        config.width,
        config.height,
        config.flip_y,
    );
    save_rgba(config.width, config.height, rgba, path)?;
    log::info!("wrote {}", path.display());
    Ok(())
}
