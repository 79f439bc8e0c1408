//! Immutable drawing model handed to output writers.

use fieldlines_core::{RasterMapper, Simulation, Srgb};
use glam::DVec2;

use crate::config::RenderConfig;
use crate::error::RenderError;
use crate::path::{build_paths, Projection, RenderPath};

/// Stroke and fill for one shape. `None` means not painted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    pub stroke: Option<Srgb>,
    pub stroke_width: f64,
    pub fill: Option<Srgb>,
}

impl Style {
    pub fn stroke(color: Srgb, width: f64) -> Self {
        Self {
            stroke: Some(color),
            stroke_width: width,
            fill: None,
        }
    }

    pub fn fill(color: Srgb) -> Self {
        Self {
            stroke: None,
            stroke_width: 0.0,
            fill: Some(color),
        }
    }
}

/// A primitive in drawing coordinates (origin top left, y down).
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Path(RenderPath, Style),
    Line {
        from: DVec2,
        to: DVec2,
        style: Style,
    },
    /// The half of a circle above its centre, from `(cx + r, cy)` over the
    /// top to `(cx - r, cy)`.
    Semicircle {
        center: DVec2,
        radius: f64,
        style: Style,
    },
    Circle {
        center: DVec2,
        radius: f64,
        style: Style,
    },
}

/// A finished picture: canvas size, background and shapes in paint order.
#[derive(Debug, Clone, PartialEq)]
pub struct Drawing {
    width: usize,
    height: usize,
    background: Srgb,
    shapes: Vec<Shape>,
}

impl Drawing {
    pub fn new(
        width: usize,
        height: usize,
        background: Srgb,
        shapes: Vec<Shape>,
    ) -> Result<Self, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidCanvas { width, height });
        }
        Ok(Self {
            width,
            height,
            background,
            shapes,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn background(&self) -> Srgb {
        self.background
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// A copy of this drawing with `extra` painted on top.
    pub fn with_shapes(&self, extra: impl IntoIterator<Item = Shape>) -> Self {
        let mut shapes = self.shapes.clone();
        shapes.extend(extra);
        Self {
            shapes,
            ..*self
        }
    }

    pub fn paths(&self) -> impl Iterator<Item = &RenderPath> {
        self.shapes.iter().filter_map(|s| match s {
            Shape::Path(p, _) => Some(p),
            _ => None,
        })
    }
}

/// Projection for the configured canvas over the simulation's domain.
pub fn projection(sim: &Simulation, config: &RenderConfig) -> Result<Projection, RenderError> {
    let mapper = RasterMapper::new(sim.config().domain, config.width, config.height)?;
    Ok(Projection::new(mapper, config.flip_y))
}

/// One stroked path per traced streamline.
pub fn field_line_drawing(
    sim: &Simulation,
    config: &RenderConfig,
) -> Result<Drawing, RenderError> {
    config.validate()?;
    let projection = projection(sim, config)?;
    let style = Style::stroke(config.stroke, config.stroke_width);
    let shapes = build_paths(sim.streamlines(), &projection, config)
        .into_iter()
        .map(|p| Shape::Path(p, style))
        .collect();
    Drawing::new(config.width, config.height, config.background, shapes)
}

/// Filled discs at each charge: red for positive, black for negative.
/// Neutral charges are skipped.
pub fn charge_markers(
    sim: &Simulation,
    config: &RenderConfig,
) -> Result<Vec<Shape>, RenderError> {
    let projection = projection(sim, config)?;
    Ok(sim
        .config()
        .charges
        .iter()
        .filter(|c| c.magnitude != 0.0)
        .map(|c| {
            let color = if c.magnitude > 0.0 {
                Srgb::RED
            } else {
                Srgb::BLACK
            };
            Shape::Circle {
                center: projection.project(c.pos()),
                radius: config.marker_radius,
                style: Style::fill(color),
            }
        })
        .collect())
}
