//! Double-slit diffraction diagram.
//!
//! A horizontal grating with two slits sits at `slit_height` (a fraction of
//! the image height measured from the top). Plane wavefronts arrive from
//! below and semicircular wavefronts spread upward from each slit. All layout
//! is done in normalised `[0, 1]` coordinates and rasterised with
//! `floor(dim * t)`.

use fieldlines_core::params::{param_f64, param_str, param_usize};
use fieldlines_core::Srgb;
use glam::DVec2;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::drawing::{Drawing, Shape, Style};
use crate::error::RenderError;

/// Upper bound on plane wavefronts regardless of spacing.
pub const MAX_PLANE_WAVEFRONTS: usize = 10_000;

/// Geometry and colors of the diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoubleSlitConfig {
    pub width: usize,
    pub height: usize,
    /// Grating position as a fraction of the height.
    pub slit_height: f64,
    /// Wavefront spacing and slit width as a fraction of the width.
    pub spacing: f64,
    /// Wavefront spacings from the image centre to each slit centre.
    pub wavefronts_to_slit: usize,
    /// Arcs drawn per slit, including the skipped zero-radius one.
    pub arc_count: usize,
    pub grating_color: Srgb,
    pub wavefront_color: Srgb,
    pub background: Srgb,
    pub grating_width: f64,
    pub wavefront_width: f64,
}

impl Default for DoubleSlitConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            slit_height: 0.7,
            spacing: 0.05,
            wavefronts_to_slit: 5,
            arc_count: 100,
            grating_color: Srgb::WHITE,
            wavefront_color: Srgb::WHITE,
            background: Srgb::BLUE,
            grating_width: 10.0,
            wavefront_width: 1.0,
        }
    }
}

impl DoubleSlitConfig {
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidCanvas {
                width: self.width,
                height: self.height,
            });
        }
        if !(0.0..=1.0).contains(&self.slit_height) {
            return Err(RenderError::config("slit_height", "must lie in [0, 1]"));
        }
        if !(self.spacing.is_finite() && self.spacing > 0.0 && self.spacing < 1.0) {
            return Err(RenderError::config("spacing", "must lie in (0, 1)"));
        }
        if self.spacing * (self.width.min(self.height) as f64) < 1.0 {
            return Err(RenderError::config("spacing", "must span at least one pixel"));
        }
        if self.slit_offset() + self.spacing / 2.0 > 0.5 {
            return Err(RenderError::config(
                "wavefronts_to_slit",
                "slits would fall outside the image",
            ));
        }
        for (name, w) in [
            ("grating_width", self.grating_width),
            ("wavefront_width", self.wavefront_width),
        ] {
            if !(w.is_finite() && w > 0.0) {
                return Err(RenderError::config(name, "must be finite and positive"));
            }
        }
        Ok(())
    }

    /// Flat overrides for the numeric settings and the three colors.
    pub fn apply_params(&mut self, params: &Value) -> Result<(), RenderError> {
        if let Some(w) = param_usize(params, "width") {
            self.width = w;
        }
        if let Some(h) = param_usize(params, "height") {
            self.height = h;
        }
        if let Some(v) = param_f64(params, "slit_height") {
            self.slit_height = v;
        }
        if let Some(v) = param_f64(params, "spacing") {
            self.spacing = v;
        }
        if let Some(n) = param_usize(params, "wavefronts_to_slit") {
            self.wavefronts_to_slit = n;
        }
        if let Some(n) = param_usize(params, "arc_count") {
            self.arc_count = n;
        }
        if let Some(c) = param_str(params, "grating_color") {
            self.grating_color = Srgb::parse(c)?;
        }
        if let Some(c) = param_str(params, "wavefront_color") {
            self.wavefront_color = Srgb::parse(c)?;
        }
        if let Some(c) = param_str(params, "background") {
            self.background = Srgb::parse(c)?;
        }
        if let Some(w) = param_f64(params, "grating_width") {
            self.grating_width = w;
        }
        if let Some(w) = param_f64(params, "wavefront_width") {
            self.wavefront_width = w;
        }
        self.validate()
    }

    /// Normalised distance from the image centre to a slit centre.
    pub fn slit_offset(&self) -> f64 {
        self.wavefronts_to_slit as f64 * self.spacing
    }

    /// Normalised horizontal slit centres, left then right.
    pub fn slit_centres(&self) -> [f64; 2] {
        let d = self.slit_offset();
        [0.5 - d, 0.5 + d]
    }

    /// Normalised `[start, end]` spans of the three grating bars.
    pub fn grating_bars(&self) -> [(f64, f64); 3] {
        let d = self.slit_offset();
        let half = self.spacing / 2.0;
        [
            (0.0, 0.5 - d - half),
            (0.5 - d + half, 0.5 + d - half),
            (0.5 + d + half, 1.0),
        ]
    }

    /// Normalised heights of the plane wavefronts below the grating.
    ///
    /// Heights accumulate from the grating one spacing at a time, capped at
    /// [`MAX_PLANE_WAVEFRONTS`].
    pub fn plane_wavefront_heights(&self) -> Vec<f64> {
        let steps = ((1.0 - self.slit_height) / self.spacing).ceil() + 1.0;
        let limit = steps.min(MAX_PLANE_WAVEFRONTS as f64) as usize;
        std::iter::successors(Some(self.slit_height + self.spacing), |h| {
            Some(h + self.spacing)
        })
        .take(limit)
        .take_while(|h| *h < 1.0)
        .collect()
    }

    fn raster(&self, u: f64, v: f64) -> DVec2 {
        DVec2::new(
            rasterise(u, self.width) as f64,
            rasterise(v, self.height) as f64,
        )
    }
}

/// `floor(dim * t)` as a pixel coordinate. Negative input saturates to 0.
pub fn rasterise(t: f64, dim: usize) -> usize {
    (dim as f64 * t).floor() as usize
}

/// Lays out the full diagram: plane wavefronts, diffracted arcs, then the
/// grating on top.
pub fn double_slit(config: &DoubleSlitConfig) -> Result<Drawing, RenderError> {
    config.validate()?;
    let wave = Style::stroke(config.wavefront_color, config.wavefront_width);
    let bar = Style::stroke(config.grating_color, config.grating_width);
    let mut shapes = Vec::new();

    for h in config.plane_wavefront_heights() {
        shapes.push(Shape::Line {
            from: config.raster(0.0, h),
            to: config.raster(1.0, h),
            style: wave,
        });
    }

    let arc_spacing = rasterise(config.spacing, config.width) as f64;
    for u in config.slit_centres() {
        let center = config.raster(u, config.slit_height);
        shapes.extend((1..config.arc_count).map(|i| Shape::Semicircle {
            center,
            radius: i as f64 * arc_spacing,
            style: wave,
        }));
    }

    for (start, end) in config.grating_bars() {
        shapes.push(Shape::Line {
            from: config.raster(start, config.slit_height),
            to: config.raster(end, config.slit_height),
            style: bar,
        });
    }

    log::debug!("double-slit layout: {} shapes", shapes.len());
    Drawing::new(config.width, config.height, config.background, shapes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn lines(d: &Drawing) -> Vec<(DVec2, DVec2, f64)> {
        d.shapes()
            .iter()
            .filter_map(|s| match s {
                Shape::Line { from, to, style } => Some((*from, *to, style.stroke_width)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn default_layout_has_expected_shape_counts() {
        let d = double_slit(&DoubleSlitConfig::default()).unwrap();
        let arcs = d
            .shapes()
            .iter()
            .filter(|s| matches!(s, Shape::Semicircle { .. }))
            .count();
        assert_eq!(arcs, 2 * 99);
        // Five plane wavefronts and three grating bars.
        assert_eq!(lines(&d).len(), 8);
        assert_eq!(d.background(), Srgb::BLUE);
    }

    #[test]
    fn plane_wavefronts_sit_below_the_grating() {
        let d = double_slit(&DoubleSlitConfig::default()).unwrap();
        let ys: Vec<f64> = lines(&d)
            .iter()
            .filter(|(_, _, w)| *w == 1.0)
            .map(|(from, _, _)| from.y)
            .collect();
        assert_eq!(ys, vec![450.0, 480.0, 510.0, 540.0, 570.0]);
    }

    #[test]
    fn grating_bars_leave_two_slits() {
        let d = double_slit(&DoubleSlitConfig::default()).unwrap();
        let bars: Vec<(f64, f64)> = lines(&d)
            .iter()
            .filter(|(_, _, w)| *w == 10.0)
            .map(|(from, to, _)| {
                assert_eq!(from.y, 420.0);
                (from.x, to.x)
            })
            .collect();
        assert_eq!(bars, vec![(0.0, 180.0), (220.0, 580.0), (620.0, 800.0)]);
    }

    #[test]
    fn arcs_are_centred_on_slits_with_raster_spacing() {
        let d = double_slit(&DoubleSlitConfig::default()).unwrap();
        let arcs: Vec<(DVec2, f64)> = d
            .shapes()
            .iter()
            .filter_map(|s| match s {
                Shape::Semicircle { center, radius, .. } => Some((*center, *radius)),
                _ => None,
            })
            .collect();
        assert_eq!(arcs[0], (DVec2::new(200.0, 420.0), 40.0));
        assert_eq!(arcs[98].1, 99.0 * 40.0);
        assert_eq!(arcs[99].0, DVec2::new(600.0, 420.0));
        assert!(arcs.iter().all(|(_, r)| *r > 0.0));
    }

    #[test]
    fn rasterise_floors() {
        assert_eq!(rasterise(0.7, 600), 420);
        assert_eq!(rasterise(0.225, 800), 180);
        assert_eq!(rasterise(1.0, 800), 800);
        assert_eq!(rasterise(-0.5, 800), 0);
    }

    #[test]
    fn validate_rejects_slits_outside_the_image() {
        let c = DoubleSlitConfig {
            wavefronts_to_slit: 20,
            ..DoubleSlitConfig::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn sub_pixel_spacing_is_rejected() {
        for spacing in [1e-17, 1e-9, 0.001] {
            let c = DoubleSlitConfig {
                spacing,
                ..DoubleSlitConfig::default()
            };
            assert!(c.validate().is_err(), "spacing {spacing} accepted");
        }
        let mut c = DoubleSlitConfig::default();
        assert!(c.apply_params(&json!({"spacing": 1e-17})).is_err());
    }

    #[test]
    fn plane_wavefronts_are_bounded_for_degenerate_spacing() {
        // The sum never advances past the grating at this spacing.
        let c = DoubleSlitConfig {
            spacing: 1e-17,
            ..DoubleSlitConfig::default()
        };
        let heights = c.plane_wavefront_heights();
        assert!(heights.len() <= MAX_PLANE_WAVEFRONTS);
        assert!(heights.iter().all(|h| *h < 1.0));
    }

    #[test]
    fn plane_wavefront_heights_accumulate_from_the_grating() {
        let heights = DoubleSlitConfig::default().plane_wavefront_heights();
        assert_eq!(heights.len(), 5);
        assert!((heights[0] - 0.75).abs() < 1e-12);
        assert!(heights.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn apply_params_recolors_and_resizes() {
        let mut c = DoubleSlitConfig::default();
        c.apply_params(&json!({"background": "black", "arc_count": 3, "width": 400}))
            .unwrap();
        let d = double_slit(&c).unwrap();
        assert_eq!(d.background(), Srgb::BLACK);
        assert_eq!(d.width(), 400);
        let arcs = d
            .shapes()
            .iter()
            .filter(|s| matches!(s, Shape::Semicircle { .. }))
            .count();
        assert_eq!(arcs, 4);
    }
}
