//! Anti-aliased PNG rendering of a [`Drawing`] with tiny-skia.

use std::path::Path as FsPath;

use fieldlines_core::Srgb;
use glam::DVec2;
use tiny_skia::{Color, FillRule, Paint, Path, PathBuilder, Pixmap, Stroke, Transform};

use crate::drawing::{Drawing, Shape, Style};
use crate::error::RenderError;
use crate::path::{RenderPath, Segment};
use crate::snapshot::save_rgba;
use crate::writer::DrawingWriter;

/// Control-point distance for a quarter circle drawn as one cubic.
const QUARTER_ARC_KAPPA: f64 = 0.552_284_749_831;

/// Writes drawings as opaque RGBA PNGs.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngWriter;

impl PngWriter {
    /// Paints the drawing into a new pixmap.
    pub fn rasterize(&self, drawing: &Drawing) -> Result<Pixmap, RenderError> {
        let invalid = || RenderError::InvalidCanvas {
            width: drawing.width(),
            height: drawing.height(),
        };
        let w = u32::try_from(drawing.width()).map_err(|_| invalid())?;
        let h = u32::try_from(drawing.height()).map_err(|_| invalid())?;
        let mut pixmap = Pixmap::new(w, h).ok_or_else(invalid)?;
        pixmap.fill(color(drawing.background()));

        for shape in drawing.shapes() {
            let (outline, style) = match shape {
                Shape::Path(path, style) => (path_outline(path), style),
                Shape::Line { from, to, style } => {
                    let mut pb = PathBuilder::new();
                    pb.move_to(from.x as f32, from.y as f32);
                    pb.line_to(to.x as f32, to.y as f32);
                    (pb.finish(), style)
                }
                Shape::Semicircle {
                    center,
                    radius,
                    style,
                } => (semicircle(*center, *radius), style),
                Shape::Circle {
                    center,
                    radius,
                    style,
                } => (
                    PathBuilder::from_circle(center.x as f32, center.y as f32, *radius as f32),
                    style,
                ),
            };
            // Degenerate outlines (a single point, zero radius) draw nothing.
            if let Some(outline) = outline {
                paint(&mut pixmap, &outline, style);
            }
        }
        Ok(pixmap)
    }
}

impl DrawingWriter for PngWriter {
    fn extension(&self) -> &'static str {
        "png"
    }

    fn write(&self, drawing: &Drawing, path: &FsPath) -> Result<(), RenderError> {
        let pixmap = self.rasterize(drawing)?;
        // The background is opaque, so premultiplied and straight alpha agree.
        save_rgba(drawing.width(), drawing.height(), pixmap.take(), path)?;
        log::info!("wrote {}", path.display());
        Ok(())
    }
}

fn color(c: Srgb) -> Color {
    let [r, g, b] = c.to_rgb8();
    Color::from_rgba8(r, g, b, 255)
}

fn paint(pixmap: &mut Pixmap, outline: &Path, style: &Style) {
    let mut paint = Paint {
        anti_alias: true,
        ..Paint::default()
    };
    if let Some(fill) = style.fill {
        paint.set_color(color(fill));
        pixmap.fill_path(
            outline,
            &paint,
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }
    if let Some(stroke_color) = style.stroke {
        paint.set_color(color(stroke_color));
        let stroke = Stroke {
            width: style.stroke_width as f32,
            ..Stroke::default()
        };
        pixmap.stroke_path(outline, &paint, &stroke, Transform::identity(), None);
    }
}

fn path_outline(path: &RenderPath) -> Option<Path> {
    let mut pb = PathBuilder::new();
    pb.move_to(path.start.x as f32, path.start.y as f32);
    for seg in &path.segments {
        match *seg {
            Segment::Line(to) => pb.line_to(to.x as f32, to.y as f32),
            Segment::Cubic { c1, c2, to } => pb.cubic_to(
                c1.x as f32,
                c1.y as f32,
                c2.x as f32,
                c2.y as f32,
                to.x as f32,
                to.y as f32,
            ),
        }
    }
    pb.finish()
}

/// Upper half circle as two quarter-circle cubics, right end to left end.
fn semicircle(c: DVec2, r: f64) -> Option<Path> {
    let k = QUARTER_ARC_KAPPA * r;
    let pts = [
        (c.x + r, c.y - k),
        (c.x + k, c.y - r),
        (c.x, c.y - r),
        (c.x - k, c.y - r),
        (c.x - r, c.y - k),
        (c.x - r, c.y),
    ]
    .map(|(x, y)| (x as f32, y as f32));
    let mut pb = PathBuilder::new();
    pb.move_to((c.x + r) as f32, c.y as f32);
    pb.cubic_to(pts[0].0, pts[0].1, pts[1].0, pts[1].1, pts[2].0, pts[2].1);
    pb.cubic_to(pts[3].0, pts[3].1, pts[4].0, pts[4].1, pts[5].0, pts[5].1);
    pb.finish()
}
