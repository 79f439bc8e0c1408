//! Point charges and the Coulomb field they produce.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Coulomb constant in N·m²/C².
pub const COULOMB_CONSTANT: f64 = 8.99e9;

/// An idealized point source of an inverse-square electric field.
///
/// Serializes as `{ "position": [x, y], "magnitude": q }`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointCharge {
    pub position: [f64; 2],
    pub magnitude: f64,
}

impl PointCharge {
    pub fn new(x: f64, y: f64, magnitude: f64) -> Self {
        Self {
            position: [x, y],
            magnitude,
        }
    }

    /// Position as a vector.
    pub fn pos(&self) -> DVec2 {
        DVec2::from_array(self.position)
    }

    /// Field contribution of this charge at `p`.
    ///
    /// At the charge's own position the distance is treated as infinite, so
    /// the contribution is exactly zero instead of a division by zero.
    pub fn field_at(&self, p: DVec2) -> DVec2 {
        let d = p - self.pos();
        let mut r = d.length();
        if r == 0.0 {
            r = f64::INFINITY;
        }
        let e = COULOMB_CONSTANT * self.magnitude / (r * r);
        DVec2::new(e * d.x / r, e * d.y / r)
    }
}

/// Superposed field of every charge at `p`.
pub fn field_at(charges: &[PointCharge], p: DVec2) -> DVec2 {
    charges.iter().map(|c| c.field_at(p)).sum()
}

/// The two-charge dipole used by the original diagrams:
/// `+1e-9` at `(1, 0)` and `-1e-9` at `(-1, 0)`.
pub fn default_dipole() -> Vec<PointCharge> {
    vec![
        PointCharge::new(1.0, 0.0, 1e-9),
        PointCharge::new(-1.0, 0.0, -1e-9),
    ]
}
