//! Seed-point layouts for streamline tracing.

use std::f64::consts::TAU;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::charge::PointCharge;
use crate::domain::Domain;
use crate::error::FieldError;

pub const DEFAULT_SEEDS_PER_CHARGE: usize = 16;
pub const DEFAULT_RING_RADIUS: f64 = 0.2;

/// Where streamlines start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SeedLayout {
    /// `per_charge` seeds evenly spaced on a circle of `radius` around
    /// every charge, starting at angle 0.
    Ring { per_charge: usize, radius: f64 },
    /// A `per_axis × per_axis` lattice of cell centres over the domain.
    Grid { per_axis: usize },
    /// Explicit physical positions.
    Points { points: Vec<[f64; 2]> },
}

impl Default for SeedLayout {
    fn default() -> Self {
        SeedLayout::Ring {
            per_charge: DEFAULT_SEEDS_PER_CHARGE,
            radius: DEFAULT_RING_RADIUS,
        }
    }
}

impl SeedLayout {
    pub fn validate(&self) -> Result<(), FieldError> {
        match self {
            SeedLayout::Ring { radius, .. } if !(radius.is_finite() && *radius > 0.0) => Err(
                FieldError::config("seeds.radius", "must be finite and positive"),
            ),
            SeedLayout::Points { points } if points.iter().flatten().any(|c| !c.is_finite()) => {
                Err(FieldError::config("seeds.points", "coordinates must be finite"))
            }
            _ => Ok(()),
        }
    }

    /// Expands the layout into concrete seed positions.
    ///
    /// Seeds may fall outside `domain`; the tracer turns those into empty lines.
    pub fn generate(&self, charges: &[PointCharge], domain: &Domain) -> Vec<DVec2> {
        match self {
            SeedLayout::Ring { per_charge, radius } => charges
                .iter()
                .flat_map(|c| {
                    let center = c.pos();
                    let n = *per_charge;
                    (0..n).map(move |i| {
                        let angle = TAU * i as f64 / n as f64;
                        center + DVec2::from_angle(angle) * *radius
                    })
                })
                .collect(),
            SeedLayout::Grid { per_axis } => {
                let n = *per_axis;
                let (x0, y0) = (domain.x_range.0, domain.y_range.0);
                let (dx, dy) = (domain.width() / n as f64, domain.height() / n as f64);
                (0..n)
                    .flat_map(|j| {
                        (0..n).map(move |i| {
                            DVec2::new(x0 + (i as f64 + 0.5) * dx, y0 + (j as f64 + 0.5) * dy)
                        })
                    })
                    .collect()
            }
            SeedLayout::Points { points } => {
                points.iter().map(|&p| DVec2::from_array(p)).collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charge::default_dipole;
    use approx::assert_relative_eq;

    #[test]
    fn ring_places_seeds_at_radius_around_each_charge() {
        let charges = default_dipole();
        let layout = SeedLayout::Ring {
            per_charge: 8,
            radius: 0.25,
        };
        let seeds = layout.generate(&charges, &Domain::default());
        assert_eq!(seeds.len(), 16);
        for (i, s) in seeds.iter().enumerate() {
            let c = charges[i / 8].pos();
            assert_relative_eq!(s.distance(c), 0.25, max_relative = 1e-12);
        }
        // First seed sits at angle 0, to the right of the charge.
        assert_relative_eq!(seeds[0].x, 1.25, max_relative = 1e-12);
        assert_relative_eq!(seeds[0].y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn grid_covers_cell_centres() {
        let layout = SeedLayout::Grid { per_axis: 2 };
        let seeds = layout.generate(&[], &Domain::default());
        assert_eq!(
            seeds,
            vec![
                DVec2::new(-2.5, -2.5),
                DVec2::new(2.5, -2.5),
                DVec2::new(-2.5, 2.5),
                DVec2::new(2.5, 2.5),
            ]
        );
    }

    #[test]
    fn explicit_points_pass_through() {
        let layout = SeedLayout::Points {
            points: vec![[0.0, 0.0], [7.0, -1.0]],
        };
        let seeds = layout.generate(&default_dipole(), &Domain::default());
        assert_eq!(seeds, vec![DVec2::ZERO, DVec2::new(7.0, -1.0)]);
    }

    #[test]
    fn empty_layouts_generate_nothing() {
        assert!(SeedLayout::Grid { per_axis: 0 }
            .generate(&[], &Domain::default())
            .is_empty());
        assert!(SeedLayout::default()
            .generate(&[], &Domain::default())
            .is_empty());
    }

    #[test]
    fn validate_rejects_bad_radius_and_points() {
        assert!(SeedLayout::Ring {
            per_charge: 4,
            radius: 0.0
        }
        .validate()
        .is_err());
        assert!(SeedLayout::Points {
            points: vec![[f64::NAN, 0.0]]
        }
        .validate()
        .is_err());
        assert!(SeedLayout::default().validate().is_ok());
    }

    #[test]
    fn layout_deserializes_from_tagged_json() {
        let layout: SeedLayout =
            serde_json::from_str(r#"{"kind": "grid", "per_axis": 5}"#).unwrap();
        assert_eq!(layout, SeedLayout::Grid { per_axis: 5 });
    }
}
