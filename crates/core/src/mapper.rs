//! Physical-space to raster-space coordinate mapping.

use glam::DVec2;

use crate::domain::Domain;
use crate::error::FieldError;

/// Integer pixel coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RasterPoint {
    pub u: usize,
    pub v: usize,
}

/// Maps points of a [`Domain`] onto a `width × height` raster.
///
/// `u = floor((x - xmin) / (xmax - xmin) * width)` and likewise for `v`,
/// both saturated into `[0, dim - 1]`. Points outside the domain get the
/// nearest edge pixel instead of an error. NaN maps to 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterMapper {
    domain: Domain,
    width: usize,
    height: usize,
}

impl RasterMapper {
    pub fn new(domain: Domain, width: usize, height: usize) -> Result<Self, FieldError> {
        if width == 0 || height == 0 {
            return Err(FieldError::InvalidDimensions);
        }
        domain.validate()?;
        Ok(Self {
            domain,
            width,
            height,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub fn map(&self, p: DVec2) -> RasterPoint {
        let (xmin, xmax) = self.domain.x_range;
        let (ymin, ymax) = self.domain.y_range;
        RasterPoint {
            u: to_pixel((p.x - xmin) / (xmax - xmin), self.width),
            v: to_pixel((p.y - ymin) / (ymax - ymin), self.height),
        }
    }

    /// Continuous (unfloored, unclamped) raster position of `p`.
    ///
    /// Used for curve control points, which may lie between pixels.
    pub fn map_continuous(&self, p: DVec2) -> DVec2 {
        let (xmin, xmax) = self.domain.x_range;
        let (ymin, ymax) = self.domain.y_range;
        DVec2::new(
            (p.x - xmin) / (xmax - xmin) * self.width as f64,
            (p.y - ymin) / (ymax - ymin) * self.height as f64,
        )
    }
}

fn to_pixel(t: f64, dim: usize) -> usize {
    let max = (dim - 1) as f64;
    // `as` saturates and maps NaN to 0.
    (t * dim as f64).floor().clamp(0.0, max) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper() -> RasterMapper {
        RasterMapper::new(Domain::default(), 800, 600).unwrap()
    }

    #[test]
    fn new_rejects_zero_raster() {
        assert!(matches!(
            RasterMapper::new(Domain::default(), 0, 10),
            Err(FieldError::InvalidDimensions)
        ));
    }

    #[test]
    fn domain_corners_map_to_raster_corners() {
        let m = mapper();
        assert_eq!(m.map(DVec2::new(-5.0, -5.0)), RasterPoint { u: 0, v: 0 });
        // xmax lands exactly on `width`, which saturates to the last pixel.
        assert_eq!(m.map(DVec2::new(5.0, 5.0)), RasterPoint { u: 799, v: 599 });
    }

    #[test]
    fn center_maps_to_half_dimensions() {
        assert_eq!(mapper().map(DVec2::ZERO), RasterPoint { u: 400, v: 300 });
    }

    #[test]
    fn far_outside_points_saturate() {
        let m = mapper();
        assert_eq!(m.map(DVec2::new(5.0 + 100.0, 0.0)).u, 799);
        assert_eq!(m.map(DVec2::new(-5.0 - 100.0, 0.0)).u, 0);
        assert_eq!(m.map(DVec2::new(0.0, 1e300)).v, 599);
        assert_eq!(m.map(DVec2::new(0.0, f64::NEG_INFINITY)).v, 0);
    }

    #[test]
    fn nan_maps_to_origin_pixel() {
        assert_eq!(
            mapper().map(DVec2::new(f64::NAN, f64::NAN)),
            RasterPoint { u: 0, v: 0 }
        );
    }

    #[test]
    fn continuous_mapping_agrees_with_floor() {
        let m = mapper();
        let p = DVec2::new(1.234, -3.21);
        let c = m.map_continuous(p);
        let r = m.map(p);
        assert_eq!(c.x.floor() as usize, r.u);
        assert_eq!(c.y.floor() as usize, r.v);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn mapping_is_deterministic(x in -20.0_f64..20.0, y in -20.0_f64..20.0) {
                let m = mapper();
                let p = DVec2::new(x, y);
                prop_assert_eq!(m.map(p), m.map(p));
            }

            #[test]
            fn mapping_stays_in_raster(x in prop::num::f64::ANY, y in prop::num::f64::ANY) {
                let m = mapper();
                let r = m.map(DVec2::new(x, y));
                prop_assert!(r.u < m.width() && r.v < m.height());
            }

            #[test]
            fn mapping_is_monotonic(
                x1 in -5.0_f64..=5.0,
                x2 in -5.0_f64..=5.0,
                y1 in -5.0_f64..=5.0,
                y2 in -5.0_f64..=5.0,
            ) {
                let m = mapper();
                let a = m.map(DVec2::new(x1.min(x2), y1.min(y2)));
                let b = m.map(DVec2::new(x1.max(x2), y1.max(y2)));
                prop_assert!(a.u <= b.u, "u not monotonic: {} > {}", a.u, b.u);
                prop_assert!(a.v <= b.v, "v not monotonic: {} > {}", a.v, b.v);
            }
        }
    }
}
