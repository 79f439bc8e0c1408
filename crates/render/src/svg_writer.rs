//! SVG serialization of a [`Drawing`].

use std::path::Path as FsPath;

use glam::DVec2;
use svg::node::element::path::Data;
use svg::node::element::{Circle, Line, Path, Rectangle};
use svg::Document;

use crate::drawing::{Drawing, Shape, Style};
use crate::error::RenderError;
use crate::path::{RenderPath, Segment};
use crate::writer::DrawingWriter;

/// Writes drawings as standalone SVG documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgWriter;

impl SvgWriter {
    /// Builds the document without touching the filesystem.
    pub fn document(&self, drawing: &Drawing) -> Document {
        let (w, h) = (drawing.width(), drawing.height());
        let background = Rectangle::new()
            .set("x", 0)
            .set("y", 0)
            .set("width", w)
            .set("height", h)
            .set("fill", drawing.background().to_hex());

        drawing.shapes().iter().fold(
            Document::new()
                .set("width", w)
                .set("height", h)
                .set("viewBox", format!("0 0 {w} {h}"))
                .add(background),
            |doc, shape| match shape {
                Shape::Path(path, style) => doc.add(
                    Path::new()
                        .set("d", path_data(path))
                        .set("style", style_attribute(style)),
                ),
                Shape::Line { from, to, style } => doc.add(
                    Line::new()
                        .set("x1", from.x)
                        .set("y1", from.y)
                        .set("x2", to.x)
                        .set("y2", to.y)
                        .set("style", style_attribute(style)),
                ),
                Shape::Semicircle {
                    center,
                    radius,
                    style,
                } => doc.add(
                    Path::new()
                        .set("d", arc_data(*center, *radius))
                        .set("style", style_attribute(style)),
                ),
                Shape::Circle {
                    center,
                    radius,
                    style,
                } => doc.add(
                    Circle::new()
                        .set("cx", center.x)
                        .set("cy", center.y)
                        .set("r", *radius)
                        .set("style", style_attribute(style)),
                ),
            },
        )
    }
}

impl DrawingWriter for SvgWriter {
    fn extension(&self) -> &'static str {
        "svg"
    }

    fn write(&self, drawing: &Drawing, path: &FsPath) -> Result<(), RenderError> {
        svg::save(path, &self.document(drawing))?;
        log::info!("wrote {}", path.display());
        Ok(())
    }
}

fn path_data(path: &RenderPath) -> Data {
    path.segments.iter().fold(
        Data::new().move_to((path.start.x, path.start.y)),
        |data, seg| match *seg {
            Segment::Line(to) => data.line_to((to.x, to.y)),
            Segment::Cubic { c1, c2, to } => {
                data.cubic_curve_to((c1.x, c1.y, c2.x, c2.y, to.x, to.y))
            }
        },
    )
}

/// Upper half circle: counter-clockwise on screen from the right end.
fn arc_data(center: DVec2, r: f64) -> Data {
    Data::new()
        .move_to((center.x + r, center.y))
        .elliptical_arc_to((r, r, 0.0, 0, 0, center.x - r, center.y))
}

/// Inline CSS for a shape; unpainted parts are `none`.
fn style_attribute(style: &Style) -> String {
    let fill = style.fill.map_or_else(|| "none".to_string(), |c| c.to_hex());
    match style.stroke {
        Some(c) => format!(
            "fill:{fill};stroke:{c};stroke-width:{}",
            style.stroke_width
        ),
        None => format!("fill:{fill};stroke:none"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slit::{double_slit, DoubleSlitConfig};
    use fieldlines_core::{Direction, Srgb};

    fn one_path_drawing() -> Drawing {
        let path = RenderPath {
            seed_index: 0,
            direction: Direction::Forward,
            start: DVec2::new(1.0, 2.0),
            segments: vec![
                Segment::Line(DVec2::new(3.0, 4.0)),
                Segment::Cubic {
                    c1: DVec2::new(4.0, 4.0),
                    c2: DVec2::new(5.0, 5.0),
                    to: DVec2::new(6.0, 6.0),
                },
            ],
        };
        Drawing::new(
            20,
            10,
            Srgb::WHITE,
            vec![Shape::Path(path, Style::stroke(Srgb::BLUE, 1.5))],
        )
        .unwrap()
    }

    #[test]
    fn document_contains_background_and_path() {
        let text = SvgWriter.document(&one_path_drawing()).to_string();
        assert!(text.contains("<svg"));
        assert!(text.contains("viewBox=\"0 0 20 10\""));
        assert!(text.contains("fill=\"#ffffff\""));
        assert!(text.contains("fill:none;stroke:#0000ff;stroke-width:1.5"));
        assert!(text.contains("M1,2 L3,4 C4,4,5,5,6,6"), "{text}");
    }

    #[test]
    fn semicircles_become_upper_arcs() {
        let config = DoubleSlitConfig {
            arc_count: 2,
            ..DoubleSlitConfig::default()
        };
        let text = SvgWriter
            .document(&double_slit(&config).unwrap())
            .to_string();
        // First slit at (200, 420), radius 40: from (240, 420) to (160, 420).
        assert!(text.contains("M240,420 A40,40,0,0,0,160,420"), "{text}");
    }

    #[test]
    fn write_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lines.svg");
        SvgWriter.write(&one_path_drawing(), &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("<path"));
        assert_eq!(SvgWriter.extension(), "svg");
    }

    #[test]
    fn write_into_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("lines.svg");
        let err = SvgWriter.write(&one_path_drawing(), &path).unwrap_err();
        assert!(matches!(err, RenderError::Io(_)));
    }
}
