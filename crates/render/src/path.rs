//! Streamline to raster path assembly.
//!
//! Each traced [`Streamline`] becomes one [`RenderPath`]: the physical points
//! are down-sampled, mapped through the [`RasterMapper`] and joined by either
//! straight segments or Catmull-Rom curves written as cubic Béziers.

use fieldlines_core::{Direction, RasterMapper, Streamline};
use glam::DVec2;

use crate::config::{RenderConfig, Smoothing};

/// One piece of a path, ending at its target point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    Line(DVec2),
    Cubic { c1: DVec2, c2: DVec2, to: DVec2 },
}

impl Segment {
    pub fn end(&self) -> DVec2 {
        match *self {
            Segment::Line(to) | Segment::Cubic { to, .. } => to,
        }
    }
}

/// A raster-space path traced from one seed in one direction.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPath {
    pub seed_index: usize,
    pub direction: Direction,
    pub start: DVec2,
    pub segments: Vec<Segment>,
}

impl RenderPath {
    /// Start point followed by every segment end point.
    pub fn vertices(&self) -> impl Iterator<Item = DVec2> + '_ {
        std::iter::once(self.start).chain(self.segments.iter().map(Segment::end))
    }
}

/// Physical to drawing coordinates: the mapper plus the optional y flip.
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    mapper: RasterMapper,
    flip_y: bool,
}

impl Projection {
    pub fn new(mapper: RasterMapper, flip_y: bool) -> Self {
        Self { mapper, flip_y }
    }

    pub fn mapper(&self) -> &RasterMapper {
        &self.mapper
    }

    /// Integer pixel position of `p`, as drawing coordinates.
    pub fn project(&self, p: DVec2) -> DVec2 {
        let r = self.mapper.map(p);
        let v = if self.flip_y {
            self.mapper.height() - 1 - r.v
        } else {
            r.v
        };
        DVec2::new(r.u as f64, v as f64)
    }
}

/// Keeps at most `max_points` points, evenly spaced by index, always
/// including the first and last. Shorter inputs are returned unchanged.
pub fn downsample(points: &[DVec2], max_points: usize) -> Vec<DVec2> {
    let n = points.len();
    if n <= max_points || max_points < 2 {
        return points.to_vec();
    }
    let last = n - 1;
    let slots = max_points - 1;
    (0..max_points)
        .map(|i| points[(i * last + slots / 2) / slots])
        .collect()
}

/// Straight segments through `points[1..]`.
pub fn linear_segments(points: &[DVec2]) -> Vec<Segment> {
    points.iter().skip(1).map(|&p| Segment::Line(p)).collect()
}

/// Catmull-Rom spline through `points`, one cubic per consecutive pair.
///
/// For the span `p1 -> p2` with neighbours `p0`, `p3` the control points are
/// `p1 + (p2 - p0) / 6` and `p2 - (p3 - p1) / 6`. End spans reuse the end
/// point as its own neighbour.
pub fn catmull_rom_segments(points: &[DVec2]) -> Vec<Segment> {
    let n = points.len();
    (0..n.saturating_sub(1))
        .map(|i| {
            let p0 = points[i.saturating_sub(1)];
            let p1 = points[i];
            let p2 = points[i + 1];
            let p3 = points[(i + 2).min(n - 1)];
            Segment::Cubic {
                c1: p1 + (p2 - p0) / 6.0,
                c2: p2 - (p3 - p1) / 6.0,
                to: p2,
            }
        })
        .collect()
}

/// Builds the path for one streamline, or `None` if it has no points.
pub fn build_path(
    line: &Streamline,
    projection: &Projection,
    config: &RenderConfig,
) -> Option<RenderPath> {
    let kept = downsample(&line.points, config.max_points);
    let raster: Vec<DVec2> = kept.iter().map(|&p| projection.project(p)).collect();
    let (&start, _) = raster.split_first()?;
    let segments = match config.smoothing {
        Smoothing::Linear => linear_segments(&raster),
        Smoothing::Cubic => catmull_rom_segments(&raster),
    };
    Some(RenderPath {
        seed_index: line.seed_index,
        direction: line.direction,
        start,
        segments,
    })
}

/// One path per non-empty streamline, in input order.
pub fn build_paths(
    lines: &[Streamline],
    projection: &Projection,
    config: &RenderConfig,
) -> Vec<RenderPath> {
    let paths: Vec<RenderPath> = lines
        .iter()
        .filter_map(|l| build_path(l, projection, config))
        .collect();
    log::debug!(
        "assembled {} paths from {} streamlines",
        paths.len(),
        lines.len()
    );
    paths
}
