//! Two-dimensional sampled vector field.
//!
//! A `VectorField` stores `Ex` and `Ey` components for `width * height`
//! cells in row-major layout: row `j` is the `j`-th y sample, column `i` the
//! `i`-th x sample. Unlike the raster grids used for drawing, coordinates are
//! never wrapped; out-of-range access is a logic error.

use glam::DVec2;

use crate::error::FieldError;

/// Dense `Ex`/`Ey` grid over a regular sampling of a domain.
#[derive(Debug, Clone)]
pub struct VectorField {
    width: usize,
    height: usize,
    ex: Vec<f64>,
    ey: Vec<f64>,
}

impl VectorField {
    /// Creates a zero field of the given dimensions.
    ///
    /// Returns `FieldError::InvalidDimensions` if either dimension is zero
    /// or if `width * height` overflows `usize`.
    pub fn zeros(width: usize, height: usize) -> Result<Self, FieldError> {
        let len = cell_count(width, height)?;
        Ok(Self {
            width,
            height,
            ex: vec![0.0; len],
            ey: vec![0.0; len],
        })
    }

    /// Creates a field from pre-built component vectors.
    pub fn from_components(
        width: usize,
        height: usize,
        ex: Vec<f64>,
        ey: Vec<f64>,
    ) -> Result<Self, FieldError> {
        let len = cell_count(width, height)?;
        for data in [&ex, &ey] {
            if data.len() != len {
                return Err(FieldError::DimensionMismatch {
                    lhs_w: width,
                    lhs_h: height,
                    rhs_w: data.len(),
                    rhs_h: 1,
                });
            }
        }
        Ok(Self {
            width,
            height,
            ex,
            ey,
        })
    }

    /// Number of x samples (columns).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of y samples (rows).
    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major `Ex` data.
    pub fn ex(&self) -> &[f64] {
        &self.ex
    }

    /// Row-major `Ey` data.
    pub fn ey(&self) -> &[f64] {
        &self.ey
    }

    pub(crate) fn components_mut(&mut self) -> (&mut [f64], &mut [f64]) {
        (&mut self.ex, &mut self.ey)
    }

    /// Field vector at column `col`, row `row`.
    ///
    /// # Panics
    ///
    /// Panics if `col >= width` or `row >= height`.
    pub fn get(&self, col: usize, row: usize) -> DVec2 {
        assert!(
            col < self.width && row < self.height,
            "cell ({col}, {row}) out of bounds for {}x{} field",
            self.width,
            self.height
        );
        let idx = row * self.width + col;
        DVec2::new(self.ex[idx], self.ey[idx])
    }

    /// In-place element-wise addition (superposition).
    ///
    /// Returns `FieldError::DimensionMismatch` if the fields differ in size.
    pub fn add_assign(&mut self, other: &VectorField) -> Result<(), FieldError> {
        if self.width != other.width || self.height != other.height {
            return Err(FieldError::DimensionMismatch {
                lhs_w: self.width,
                lhs_h: self.height,
                rhs_w: other.width,
                rhs_h: other.height,
            });
        }
        self.ex
            .iter_mut()
            .zip(&other.ex)
            .for_each(|(a, b)| *a += b);
        self.ey
            .iter_mut()
            .zip(&other.ey)
            .for_each(|(a, b)| *a += b);
        Ok(())
    }

    /// Row-major field magnitudes `|E|`.
    pub fn magnitudes(&self) -> Vec<f64> {
        self.ex
            .iter()
            .zip(&self.ey)
            .map(|(x, y)| x.hypot(*y))
            .collect()
    }

    /// Smallest and largest finite, non-zero magnitude, or `None` if the
    /// field has no such cell.
    pub fn magnitude_extent(&self) -> Option<(f64, f64)> {
        self.magnitudes()
            .into_iter()
            .filter(|m| m.is_finite() && *m > 0.0)
            .fold(None, |acc, m| match acc {
                None => Some((m, m)),
                Some((lo, hi)) => Some((lo.min(m), hi.max(m))),
            })
    }

    /// Iterates over all cells yielding `(col, row, vector)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, DVec2)> + '_ {
        self.ex
            .iter()
            .zip(&self.ey)
            .enumerate()
            .map(|(i, (&x, &y))| (i % self.width, i / self.width, DVec2::new(x, y)))
    }
}

fn cell_count(width: usize, height: usize) -> Result<usize, FieldError> {
    if width == 0 || height == 0 {
        return Err(FieldError::InvalidDimensions);
    }
    width
        .checked_mul(height)
        .ok_or(FieldError::InvalidDimensions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeros_creates_zero_field() {
        let f = VectorField::zeros(4, 3).unwrap();
        assert_eq!(f.width(), 4);
        assert_eq!(f.height(), 3);
        assert_eq!(f.ex().len(), 12);
        assert!(f.ex().iter().chain(f.ey()).all(|&v| v == 0.0));
    }

    #[test]
    fn zeros_rejects_zero_dimensions() {
        assert!(matches!(
            VectorField::zeros(0, 5),
            Err(FieldError::InvalidDimensions)
        ));
        assert!(VectorField::zeros(5, 0).is_err());
    }

    #[test]
    fn zeros_rejects_overflowing_dimensions() {
        assert!(VectorField::zeros(usize::MAX, 2).is_err());
    }

    #[test]
    fn from_components_rejects_wrong_length() {
        let result = VectorField::from_components(2, 2, vec![0.0; 4], vec![0.0; 3]);
        assert!(matches!(result, Err(FieldError::DimensionMismatch { .. })));
    }

    #[test]
    fn get_reads_row_major() {
        let ex = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let ey = vec![-1.0, -2.0, -3.0, -4.0, -5.0, -6.0];
        let f = VectorField::from_components(3, 2, ex, ey).unwrap();
        assert_eq!(f.get(0, 0), DVec2::new(1.0, -1.0));
        assert_eq!(f.get(2, 0), DVec2::new(3.0, -3.0));
        assert_eq!(f.get(1, 1), DVec2::new(5.0, -5.0));
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn get_out_of_bounds_panics() {
        let f = VectorField::zeros(2, 2).unwrap();
        let _ = f.get(2, 0);
    }

    #[test]
    fn add_assign_sums_components() {
        let mut a = VectorField::from_components(2, 1, vec![1.0, 2.0], vec![0.5, 0.5]).unwrap();
        let b = VectorField::from_components(2, 1, vec![-1.0, 1.0], vec![0.5, -0.5]).unwrap();
        a.add_assign(&b).unwrap();
        assert_eq!(a.ex(), &[0.0, 3.0]);
        assert_eq!(a.ey(), &[1.0, 0.0]);
    }

    #[test]
    fn add_assign_returns_error_on_mismatch() {
        let mut a = VectorField::zeros(2, 2).unwrap();
        let b = VectorField::zeros(3, 3).unwrap();
        assert!(matches!(
            a.add_assign(&b),
            Err(FieldError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn magnitudes_and_extent_skip_zero_cells() {
        let f = VectorField::from_components(3, 1, vec![3.0, 0.0, 0.0], vec![4.0, 0.0, 2.0])
            .unwrap();
        assert_eq!(f.magnitudes(), vec![5.0, 0.0, 2.0]);
        assert_eq!(f.magnitude_extent(), Some((2.0, 5.0)));
    }

    #[test]
    fn magnitude_extent_of_zero_field_is_none() {
        let f = VectorField::zeros(3, 3).unwrap();
        assert_eq!(f.magnitude_extent(), None);
    }

    #[test]
    fn iter_yields_cells_in_row_major_order() {
        let f = VectorField::from_components(2, 2, vec![0.0, 1.0, 2.0, 3.0], vec![0.0; 4])
            .unwrap();
        let cells: Vec<_> = f.iter().map(|(c, r, v)| (c, r, v.x)).collect();
        assert_eq!(cells, vec![(0, 0, 0.0), (1, 0, 1.0), (0, 1, 2.0), (1, 1, 3.0)]);
    }
}
