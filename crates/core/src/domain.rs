//! The rectangular physical domain and its regular sampling.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::FieldError;

/// Axis-aligned rectangle `x_range × y_range` in physical units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Domain {
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
}

impl Default for Domain {
    fn default() -> Self {
        Self {
            x_range: (-5.0, 5.0),
            y_range: (-5.0, 5.0),
        }
    }
}

impl Domain {
    /// Creates a domain, rejecting empty, reversed or non-finite ranges.
    pub fn new(x_range: (f64, f64), y_range: (f64, f64)) -> Result<Self, FieldError> {
        let d = Self { x_range, y_range };
        d.validate()?;
        Ok(d)
    }

    pub fn validate(&self) -> Result<(), FieldError> {
        for (axis, (min, max)) in [('x', self.x_range), ('y', self.y_range)] {
            if !(min.is_finite() && max.is_finite() && min < max) {
                return Err(FieldError::InvalidDomain { axis, min, max });
            }
        }
        Ok(())
    }

    pub fn width(&self) -> f64 {
        self.x_range.1 - self.x_range.0
    }

    pub fn height(&self) -> f64 {
        self.y_range.1 - self.y_range.0
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(
            0.5 * (self.x_range.0 + self.x_range.1),
            0.5 * (self.y_range.0 + self.y_range.1),
        )
    }

    /// Inclusive containment test. NaN coordinates are never contained.
    pub fn contains(&self, p: DVec2) -> bool {
        p.x >= self.x_range.0
            && p.x <= self.x_range.1
            && p.y >= self.y_range.0
            && p.y <= self.y_range.1
    }

    /// Sample positions along x (`width` values, endpoints included).
    pub fn xs(&self, width: usize) -> Vec<f64> {
        linspace(self.x_range.0, self.x_range.1, width)
    }

    /// Sample positions along y (`height` values, endpoints included).
    pub fn ys(&self, height: usize) -> Vec<f64> {
        linspace(self.y_range.0, self.y_range.1, height)
    }
}

/// `n` evenly spaced values from `start` to `end` inclusive.
///
/// `n == 1` yields `[start]`; `n == 0` yields an empty vector.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Index of the first element of sorted `axis` that is `>= value`, clamped
/// to the last valid index.
///
/// Returns 0 for an empty axis; callers never pass one.
pub fn nearest_index(axis: &[f64], value: f64) -> usize {
    let i = axis.partition_point(|&a| a < value);
    i.min(axis.len().saturating_sub(1))
}
