//! Streamline tracing through a sampled field.
//!
//! Streamlines are integrated with explicit Euler steps: at each position the
//! field vector of the looked-up grid cell is scaled by `step_size` and added
//! (or subtracted, for backward lines). Two step-control variants exist:
//!
//! - [`StepControl::Clamp`] limits each axis of the step to `max_step`,
//!   preserving its sign, so lines cannot overshoot near charges.
//! - [`StepControl::Threshold`] leaves the step alone but stops the line when
//!   `|E|` falls below a floor or rises above a ceiling derived from the
//!   grid's magnitudes in log space.
//!
//! Every line is bounded by `max_iterations`. Hitting the cap, or meeting a
//! non-finite value, ends only that line; both are logged and the points
//! gathered so far are kept.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::charge::PointCharge;
use crate::error::FieldError;
use crate::field::VectorField;
use crate::synth::SampledField;

const DEFAULT_STEP_SIZE: f64 = 0.01;
const DEFAULT_MAX_STEP: f64 = 0.05;
const DEFAULT_CAPTURE_RADIUS: f64 = 0.15;
const DEFAULT_MAX_ITERATIONS: usize = 10_000;

/// Integration direction along the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// `+1.0` for forward, `-1.0` for backward.
    pub fn sign(self) -> f64 {
        match self {
            Direction::Forward => 1.0,
            Direction::Backward => -1.0,
        }
    }
}

/// Which directions to trace from every seed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Directions {
    #[default]
    Both,
    Forward,
    Backward,
}

impl Directions {
    pub fn iter(self) -> impl Iterator<Item = Direction> {
        let dirs: &'static [Direction] = match self {
            Directions::Both => &[Direction::Forward, Direction::Backward],
            Directions::Forward => &[Direction::Forward],
            Directions::Backward => &[Direction::Backward],
        };
        dirs.iter().copied()
    }
}

/// How a single Euler step is limited.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepControl {
    /// Clamp each axis of the step to `[-max_step, max_step]`.
    Clamp { max_step: f64 },
    /// Stop when `|E| < min_magnitude` or `|E|` exceeds the log-space bound
    /// at `upper_fraction` between the grid's smallest and largest magnitude.
    Threshold {
        min_magnitude: f64,
        upper_fraction: f64,
    },
}

impl Default for StepControl {
    fn default() -> Self {
        StepControl::Clamp {
            max_step: DEFAULT_MAX_STEP,
        }
    }
}

/// Integration parameters shared by every streamline of a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceConfig {
    /// Multiplier from field vector to position step.
    pub step_size: f64,
    pub step_control: StepControl,
    /// Stop once a line comes within this distance of any charge.
    pub capture_radius: Option<f64>,
    /// Hard cap on Euler steps per streamline.
    pub max_iterations: usize,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            step_size: DEFAULT_STEP_SIZE,
            step_control: StepControl::default(),
            capture_radius: Some(DEFAULT_CAPTURE_RADIUS),
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl TraceConfig {
    pub fn validate(&self) -> Result<(), FieldError> {
        if !(self.step_size.is_finite() && self.step_size > 0.0) {
            return Err(FieldError::config("step_size", "must be finite and positive"));
        }
        if self.max_iterations == 0 {
            return Err(FieldError::config("max_iterations", "must be at least 1"));
        }
        if let Some(r) = self.capture_radius {
            if !(r.is_finite() && r >= 0.0) {
                return Err(FieldError::config("capture_radius", "must be finite and >= 0"));
            }
        }
        match self.step_control {
            StepControl::Clamp { max_step } => {
                if !(max_step.is_finite() && max_step > 0.0) {
                    return Err(FieldError::config("max_step", "must be finite and positive"));
                }
            }
            StepControl::Threshold {
                min_magnitude,
                upper_fraction,
            } => {
                if !(min_magnitude.is_finite() && min_magnitude >= 0.0) {
                    return Err(FieldError::config("min_magnitude", "must be finite and >= 0"));
                }
                if !(0.0..=1.0).contains(&upper_fraction) {
                    return Err(FieldError::config("upper_fraction", "must lie in [0, 1]"));
                }
            }
        }
        Ok(())
    }
}

/// Why a streamline stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    LeftDomain,
    BelowMinimum,
    AboveMaximum,
    ReachedCharge,
    IterationLimit,
    NonFinite,
}

/// An ordered run of physical points traced from one seed in one direction.
#[derive(Debug, Clone, PartialEq)]
pub struct Streamline {
    pub seed_index: usize,
    pub direction: Direction,
    pub points: Vec<DVec2>,
    pub termination: Termination,
}

impl Streamline {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Magnitude window used by [`StepControl::Threshold`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagnitudeBounds {
    pub min: f64,
    pub max: f64,
}

impl MagnitudeBounds {
    /// Derives the upper bound from the grid: `10^(lo + fraction * (hi - lo))`
    /// where `lo`/`hi` are the log10 of the smallest/largest finite non-zero
    /// magnitudes. A field with no such cell gets an unbounded ceiling.
    pub fn from_field(field: &VectorField, min_magnitude: f64, upper_fraction: f64) -> Self {
        let max = match field.magnitude_extent() {
            Some((lo, hi)) => {
                let (lo, hi) = (lo.log10(), hi.log10());
                10f64.powf(lo + upper_fraction * (hi - lo))
            }
            None => f64::INFINITY,
        };
        Self {
            min: min_magnitude,
            max,
        }
    }
}

/// Traces streamlines through one [`SampledField`].
pub struct Tracer<'a> {
    sampled: &'a SampledField,
    charges: &'a [PointCharge],
    config: TraceConfig,
    bounds: Option<MagnitudeBounds>,
}

impl<'a> Tracer<'a> {
    /// Validates `config` and precomputes threshold bounds if needed.
    ///
    /// `charges` are only consulted for the capture radius.
    pub fn new(
        sampled: &'a SampledField,
        charges: &'a [PointCharge],
        config: TraceConfig,
    ) -> Result<Self, FieldError> {
        config.validate()?;
        let bounds = match config.step_control {
            StepControl::Threshold {
                min_magnitude,
                upper_fraction,
            } => {
                let b = MagnitudeBounds::from_field(sampled.field(), min_magnitude, upper_fraction);
                log::debug!("magnitude window [{:e}, {:e}]", b.min, b.max);
                Some(b)
            }
            StepControl::Clamp { .. } => None,
        };
        Ok(Self {
            sampled,
            charges,
            config,
            bounds,
        })
    }

    pub fn bounds(&self) -> Option<MagnitudeBounds> {
        self.bounds
    }

    /// Integrates one streamline from `seed`.
    ///
    /// The seed itself is the first point if it lies inside the domain; a
    /// seed outside the domain yields an empty line.
    pub fn trace(&self, seed_index: usize, seed: DVec2, direction: Direction) -> Streamline {
        let domain = self.sampled.domain();
        let sign = direction.sign();
        let mut points = Vec::new();
        let mut pos = seed;

        let termination = 'walk: {
            for _ in 0..self.config.max_iterations {
                if !pos.is_finite() {
                    break 'walk Termination::NonFinite;
                }
                if !domain.contains(pos) {
                    break 'walk Termination::LeftDomain;
                }
                points.push(pos);
                if self.captured(pos) {
                    break 'walk Termination::ReachedCharge;
                }

                let e = self.sampled.sample(pos);
                if !e.is_finite() {
                    break 'walk Termination::NonFinite;
                }
                if let Some(bounds) = self.bounds {
                    let m = e.length();
                    if m < bounds.min {
                        break 'walk Termination::BelowMinimum;
                    }
                    if m > bounds.max {
                        break 'walk Termination::AboveMaximum;
                    }
                }

                let mut step = e * self.config.step_size;
                if let StepControl::Clamp { max_step } = self.config.step_control {
                    step = step.clamp(DVec2::splat(-max_step), DVec2::splat(max_step));
                }
                pos += step * sign;
            }
            Termination::IterationLimit
        };

        match termination {
            Termination::IterationLimit => log::warn!(
                "streamline {seed_index} ({direction:?}) truncated at {} iterations",
                self.config.max_iterations
            ),
            Termination::NonFinite => log::warn!(
                "streamline {seed_index} ({direction:?}) went non-finite after {} points",
                points.len()
            ),
            _ => log::trace!(
                "streamline {seed_index} ({direction:?}): {} points, {termination:?}",
                points.len()
            ),
        }

        Streamline {
            seed_index,
            direction,
            points,
            termination,
        }
    }

    /// Traces every seed in each of `directions`, in seed order.
    pub fn trace_all(&self, seeds: &[DVec2], directions: Directions) -> Vec<Streamline> {
        seeds
            .iter()
            .enumerate()
            .flat_map(|(i, &seed)| directions.iter().map(move |d| self.trace(i, seed, d)))
            .collect()
    }

    fn captured(&self, p: DVec2) -> bool {
        match self.config.capture_radius {
            Some(r) if r > 0.0 => self.charges.iter().any(|c| c.pos().distance(p) < r),
            _ => false,
        }
    }
}
