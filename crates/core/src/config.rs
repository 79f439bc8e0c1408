//! Complete, reproducible description of a field-line computation.
//!
//! A [`FieldConfig`] captures everything the physics needs: domain, grid
//! resolution, charges, seed layout and integration parameters. Missing JSON
//! keys take the defaults of the two-charge dipole diagram.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::charge::{default_dipole, PointCharge};
use crate::domain::Domain;
use crate::error::FieldError;
use crate::params::{param_f64, param_range, param_usize};
use crate::seeds::{SeedLayout, DEFAULT_RING_RADIUS, DEFAULT_SEEDS_PER_CHARGE};
use crate::tracer::{Directions, StepControl, TraceConfig};

const DEFAULT_GRID_SIZE: usize = 100;

const PRESET_NAMES: &[&str] = &["clamped", "threshold"];

/// Physics configuration for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub domain: Domain,
    /// Number of x samples.
    pub grid_width: usize,
    /// Number of y samples.
    pub grid_height: usize,
    pub charges: Vec<PointCharge>,
    pub seeds: SeedLayout,
    pub directions: Directions,
    pub trace: TraceConfig,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            domain: Domain::default(),
            grid_width: DEFAULT_GRID_SIZE,
            grid_height: DEFAULT_GRID_SIZE,
            charges: default_dipole(),
            seeds: SeedLayout::default(),
            directions: Directions::default(),
            trace: TraceConfig::default(),
        }
    }
}

impl FieldConfig {
    /// Named starting points.
    ///
    /// - `clamped`: per-axis step clamp with charge capture (the default).
    /// - `threshold`: no clamp; lines stop outside a magnitude window derived
    ///   from the grid.
    pub fn preset(name: &str) -> Result<Self, FieldError> {
        match name {
            "clamped" => Ok(Self::default()),
            "threshold" => Ok(Self {
                trace: TraceConfig {
                    step_size: 0.002,
                    step_control: StepControl::Threshold {
                        min_magnitude: 0.1,
                        upper_fraction: 0.75,
                    },
                    capture_radius: None,
                    max_iterations: 20_000,
                },
                ..Self::default()
            }),
            other => Err(FieldError::UnknownPreset(other.to_string())),
        }
    }

    pub fn list_presets() -> &'static [&'static str] {
        PRESET_NAMES
    }

    /// Checks dimensions, domain, charges, seeds and trace parameters.
    pub fn validate(&self) -> Result<(), FieldError> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(FieldError::InvalidDimensions);
        }
        self.grid_width
            .checked_mul(self.grid_height)
            .ok_or(FieldError::InvalidDimensions)?;
        self.domain.validate()?;
        if let Some(c) = self
            .charges
            .iter()
            .find(|c| !(c.magnitude.is_finite() && c.position.iter().all(|v| v.is_finite())))
        {
            return Err(FieldError::config(
                "charges",
                format!("charge {c:?} has a non-finite value"),
            ));
        }
        self.seeds.validate()?;
        self.trace.validate()
    }

    /// Applies flat scalar overrides, then re-validates.
    ///
    /// Recognized keys: `x_range`, `y_range`, `grid_width`, `grid_height`,
    /// `step_size`, `max_step`, `min_magnitude`, `upper_fraction`,
    /// `capture_radius` (0 disables), `max_iterations`, `seeds_per_charge`,
    /// `seed_radius`, `seed_grid`. Setting `max_step` switches to clamped
    /// stepping; setting either threshold key switches to threshold stepping.
    /// Unknown keys are ignored.
    pub fn apply_params(&mut self, params: &Value) -> Result<(), FieldError> {
        if let Some(r) = param_range(params, "x_range") {
            self.domain.x_range = r;
        }
        if let Some(r) = param_range(params, "y_range") {
            self.domain.y_range = r;
        }
        if let Some(w) = param_usize(params, "grid_width") {
            self.grid_width = w;
        }
        if let Some(h) = param_usize(params, "grid_height") {
            self.grid_height = h;
        }
        if let Some(s) = param_f64(params, "step_size") {
            self.trace.step_size = s;
        }
        if let Some(max_step) = param_f64(params, "max_step") {
            self.trace.step_control = StepControl::Clamp { max_step };
        }
        let min = param_f64(params, "min_magnitude");
        let frac = param_f64(params, "upper_fraction");
        if min.is_some() || frac.is_some() {
            let (cur_min, cur_frac) = match self.trace.step_control {
                StepControl::Threshold {
                    min_magnitude,
                    upper_fraction,
                } => (min_magnitude, upper_fraction),
                StepControl::Clamp { .. } => (0.0, 1.0),
            };
            self.trace.step_control = StepControl::Threshold {
                min_magnitude: min.unwrap_or(cur_min),
                upper_fraction: frac.unwrap_or(cur_frac),
            };
        }
        if let Some(r) = param_f64(params, "capture_radius") {
            self.trace.capture_radius = (r > 0.0).then_some(r);
        }
        if let Some(n) = param_usize(params, "max_iterations") {
            self.trace.max_iterations = n;
        }
        if let Some(per_axis) = param_usize(params, "seed_grid") {
            self.seeds = SeedLayout::Grid { per_axis };
        }
        let per_charge = param_usize(params, "seeds_per_charge");
        let radius = param_f64(params, "seed_radius");
        if per_charge.is_some() || radius.is_some() {
            let (cur_n, cur_r) = match self.seeds {
                SeedLayout::Ring { per_charge, radius } => (per_charge, radius),
                _ => (DEFAULT_SEEDS_PER_CHARGE, DEFAULT_RING_RADIUS),
            };
            self.seeds = SeedLayout::Ring {
                per_charge: per_charge.unwrap_or(cur_n),
                radius: radius.unwrap_or(cur_r),
            };
        }
        self.validate()
    }
}
