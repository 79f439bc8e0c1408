//! Presentation settings for field-line outputs.

use fieldlines_core::params::{param_bool, param_f64, param_str, param_usize};
use fieldlines_core::{Palette, Srgb};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::RenderError;

/// How consecutive raster points are joined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Smoothing {
    /// Straight segments.
    Linear,
    /// Catmull-Rom curves expressed as cubic Béziers.
    #[default]
    Cubic,
}

/// Canvas size, styling and path assembly options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: usize,
    pub height: usize,
    /// Upper bound on points kept per streamline (at least 2).
    pub max_points: usize,
    pub smoothing: Smoothing,
    pub stroke: Srgb,
    pub stroke_width: f64,
    pub background: Srgb,
    /// Heat-map palette name.
    pub palette: String,
    /// Draw with y pointing up (`v' = height - 1 - v`).
    pub flip_y: bool,
    /// Mark charges on the raster plot.
    pub charge_markers: bool,
    pub marker_radius: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            max_points: 200,
            smoothing: Smoothing::default(),
            stroke: Srgb::BLUE,
            stroke_width: 1.0,
            background: Srgb::WHITE,
            palette: "inferno".to_string(),
            flip_y: false,
            charge_markers: true,
            marker_radius: 5.0,
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidCanvas {
                width: self.width,
                height: self.height,
            });
        }
        if self.max_points < 2 {
            return Err(RenderError::config("max_points", "must be at least 2"));
        }
        if !(self.stroke_width.is_finite() && self.stroke_width > 0.0) {
            return Err(RenderError::config("stroke_width", "must be finite and positive"));
        }
        if !(self.marker_radius.is_finite() && self.marker_radius >= 0.0) {
            return Err(RenderError::config("marker_radius", "must be finite and non-negative"));
        }
        Palette::from_name(&self.palette)?;
        Ok(())
    }

    /// Resolves the configured heat-map palette.
    pub fn palette(&self) -> Result<Palette, RenderError> {
        Ok(Palette::from_name(&self.palette)?)
    }

    /// Applies flat overrides: `width`, `height`, `max_points`, `smoothing`
    /// (`"linear"`/`"cubic"`), `stroke`, `stroke_width`, `background`,
    /// `palette`, `flip_y`, `charge_markers`, `marker_radius`.
    pub fn apply_params(&mut self, params: &Value) -> Result<(), RenderError> {
        if let Some(w) = param_usize(params, "width") {
            self.width = w;
        }
        if let Some(h) = param_usize(params, "height") {
            self.height = h;
        }
        if let Some(n) = param_usize(params, "max_points") {
            self.max_points = n;
        }
        if let Some(s) = param_str(params, "smoothing") {
            self.smoothing = match s {
                "linear" => Smoothing::Linear,
                "cubic" => Smoothing::Cubic,
                other => {
                    return Err(RenderError::config(
                        "smoothing",
                        format!("expected 'linear' or 'cubic', got '{other}'"),
                    ))
                }
            };
        }
        if let Some(c) = param_str(params, "stroke") {
            self.stroke = Srgb::parse(c)?;
        }
        if let Some(w) = param_f64(params, "stroke_width") {
            self.stroke_width = w;
        }
        if let Some(c) = param_str(params, "background") {
            self.background = Srgb::parse(c)?;
        }
        if let Some(p) = param_str(params, "palette") {
            self.palette = p.to_string();
        }
        if let Some(f) = param_bool(params, "flip_y") {
            self.flip_y = f;
        }
        if let Some(m) = param_bool(params, "charge_markers") {
            self.charge_markers = m;
        }
        if let Some(r) = param_f64(params, "marker_radius") {
            self.marker_radius = r;
        }
        self.validate()
    }
}
