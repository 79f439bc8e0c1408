//! Field synthesis: superposing point-charge contributions over a grid.

use glam::DVec2;

use crate::charge::{PointCharge, COULOMB_CONSTANT};
use crate::domain::{nearest_index, Domain};
use crate::error::FieldError;
use crate::field::VectorField;

/// A synthesized field together with the sampling that produced it.
///
/// Read-only once built; the tracer and the heat map both consume it.
#[derive(Debug, Clone)]
pub struct SampledField {
    domain: Domain,
    xs: Vec<f64>,
    ys: Vec<f64>,
    field: VectorField,
}

impl SampledField {
    /// Samples `domain` at `width × height` points and superposes `charges`.
    pub fn new(
        charges: &[PointCharge],
        domain: Domain,
        width: usize,
        height: usize,
    ) -> Result<Self, FieldError> {
        domain.validate()?;
        let xs = domain.xs(width);
        let ys = domain.ys(height);
        let field = synthesize(charges, &xs, &ys)?;
        Ok(Self {
            domain,
            xs,
            ys,
            field,
        })
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    pub fn field(&self) -> &VectorField {
        &self.field
    }

    /// Field vector of the grid cell found by sorted search of `p` against
    /// the axes (first sample `>= p`, clamped to the last one).
    pub fn sample(&self, p: DVec2) -> DVec2 {
        let col = nearest_index(&self.xs, p.x);
        let row = nearest_index(&self.ys, p.y);
        self.field.get(col, row)
    }
}

/// Coulomb field of a single charge sampled at every `(xs[col], ys[row])`.
///
/// The cell coinciding with the charge gets a zero contribution: its
/// distance is replaced by infinity before dividing.
pub fn point_charge_contribution(
    charge: &PointCharge,
    xs: &[f64],
    ys: &[f64],
) -> Result<VectorField, FieldError> {
    let mut field = VectorField::zeros(xs.len(), ys.len())?;
    accumulate(&mut field, charge, xs, ys);
    Ok(field)
}

/// Total field of all `charges` on the grid spanned by `xs` × `ys`.
///
/// An empty charge list yields a zero field.
pub fn synthesize(
    charges: &[PointCharge],
    xs: &[f64],
    ys: &[f64],
) -> Result<VectorField, FieldError> {
    let mut field = VectorField::zeros(xs.len(), ys.len())?;
    for charge in charges {
        accumulate(&mut field, charge, xs, ys);
    }
    log::debug!(
        "synthesized {}x{} field from {} charge(s)",
        xs.len(),
        ys.len(),
        charges.len()
    );
    Ok(field)
}

fn accumulate(field: &mut VectorField, charge: &PointCharge, xs: &[f64], ys: &[f64]) {
    let [qx, qy] = charge.position;
    let kq = COULOMB_CONSTANT * charge.magnitude;
    let w = xs.len();
    let (ex, ey) = field.components_mut();
    for (row, &y) in ys.iter().enumerate() {
        let dy = y - qy;
        for (col, &x) in xs.iter().enumerate() {
            let dx = x - qx;
            let mut r = (dx * dx + dy * dy).sqrt();
            if r == 0.0 {
                r = f64::INFINITY;
            }
            let e = kq / (r * r);
            let idx = row * w + col;
            ex[idx] += e * dx / r;
            ey[idx] += e * dy / r;
        }
    }
}
