//! Gradient palettes for the field-strength heat map.
//!
//! Stops are stored in linear RGB and sampled by piecewise-linear
//! interpolation; `sample(0.0)` is the first stop and `sample(1.0)` the last.

use crate::color::{linear_to_srgb, srgb_to_linear, LinearRgb, Srgb};
use crate::error::FieldError;

const PALETTE_NAMES: &[&str] = &["inferno", "ocean", "monochrome"];

/// A gradient of evenly spaced color stops.
#[derive(Debug, Clone)]
pub struct Palette {
    stops: Vec<LinearRgb>,
}

impl Palette {
    /// Builds a palette from hex (or named) colors. Requires at least one.
    pub fn from_hex(colors: &[&str]) -> Result<Self, FieldError> {
        if colors.is_empty() {
            return Err(FieldError::InvalidPalette(
                "palette requires at least 1 color".to_string(),
            ));
        }
        let stops = colors
            .iter()
            .map(|c| Srgb::parse(c).map(srgb_to_linear))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { stops })
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Samples the gradient at `t`, clamped to [0, 1]. NaN samples the first stop.
    pub fn sample(&self, t: f64) -> Srgb {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let n = self.stops.len();
        if n == 1 {
            return linear_to_srgb(self.stops[0]);
        }
        let scaled = t * (n - 1) as f64;
        let idx = (scaled as usize).min(n - 2);
        let frac = scaled - idx as f64;
        let (a, b) = (self.stops[idx], self.stops[idx + 1]);
        linear_to_srgb(LinearRgb {
            r: a.r + frac * (b.r - a.r),
            g: a.g + frac * (b.g - a.g),
            b: a.b + frac * (b.b - a.b),
        })
    }

    /// Black through purple and orange to pale yellow.
    pub fn inferno() -> Self {
        Self::builtin(&["#000004", "#420a68", "#932667", "#dd513a", "#fca50a", "#fcffa4"])
    }

    /// Deep navy to aqua to white.
    pub fn ocean() -> Self {
        Self::builtin(&["#03045e", "#0077b6", "#00b4d8", "#90e0ef", "#ffffff"])
    }

    /// Black to white.
    pub fn monochrome() -> Self {
        Self::builtin(&["#000000", "#ffffff"])
    }

    /// Looks up a built-in palette by name (case insensitive).
    pub fn from_name(name: &str) -> Result<Self, FieldError> {
        match name.to_ascii_lowercase().as_str() {
            "inferno" => Ok(Self::inferno()),
            "ocean" => Ok(Self::ocean()),
            "monochrome" => Ok(Self::monochrome()),
            other => Err(FieldError::InvalidPalette(format!(
                "unknown palette '{other}', expected one of: {}",
                PALETTE_NAMES.join(", ")
            ))),
        }
    }

    pub fn list_names() -> &'static [&'static str] {
        PALETTE_NAMES
    }

    fn builtin(hexes: &[&str]) -> Self {
        Self {
            stops: hexes
                .iter()
                .filter_map(|h| Srgb::from_hex(h).ok())
                .map(srgb_to_linear)
                .collect(),
        }
    }
}
