//! Pure-computation pixel buffers for the field-strength heat map.
//!
//! Always available (no feature gate); the `png` feature only adds the
//! encoder in [`crate::snapshot`].

use fieldlines_core::{Palette, SampledField};
use glam::DVec2;

/// Log-space normalisation of field magnitudes onto [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogScale {
    lo: f64,
    hi: f64,
}

impl LogScale {
    /// Spans the smallest to largest finite non-zero magnitude of the grid.
    /// `None` for a field that is zero everywhere.
    pub fn from_field(sampled: &SampledField) -> Option<Self> {
        let (min, max) = sampled.field().magnitude_extent()?;
        Some(Self {
            lo: min.log10(),
            hi: max.log10(),
        })
    }

    /// Zero and non-finite magnitudes map to 0; a flat field maps to 1.
    pub fn normalize(&self, magnitude: f64) -> f64 {
        if !(magnitude.is_finite() && magnitude > 0.0) {
            return 0.0;
        }
        let span = self.hi - self.lo;
        if span <= 0.0 {
            return 1.0;
        }
        ((magnitude.log10() - self.lo) / span).clamp(0.0, 1.0)
    }
}

/// Renders `|E|` as a `width × height` RGBA8 buffer.
///
/// Each pixel samples the grid at its centre with the same nearest lookup
/// the tracer uses. Row 0 holds the smallest y unless `flip_y` is set,
/// matching the streamline raster.
pub fn magnitude_to_rgba(
    sampled: &SampledField,
    palette: &Palette,
    width: usize,
    height: usize,
    flip_y: bool,
) -> Vec<u8> {
    let scale = LogScale::from_field(sampled);
    let domain = sampled.domain();
    let (x0, y0) = (domain.x_range.0, domain.y_range.0);
    let (dx, dy) = (domain.width() / width as f64, domain.height() / height as f64);

    (0..height)
        .flat_map(|v| {
            let row = if flip_y { height - 1 - v } else { v };
            let y = y0 + (row as f64 + 0.5) * dy;
            (0..width).map(move |u| DVec2::new(x0 + (u as f64 + 0.5) * dx, y))
        })
        .flat_map(|p| {
            let t = scale.map_or(0.0, |s| s.normalize(sampled.sample(p).length()));
            let [r, g, b] = palette.sample(t).to_rgb8();
            [r, g, b, 255u8]
        })
        .collect()
}
