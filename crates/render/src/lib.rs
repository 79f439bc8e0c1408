#![deny(unsafe_code)]
//! Drawing assembly and file output for the field-line generator.
//!
//! Turns a finished [`Simulation`] into an immutable [`Drawing`] and hands it
//! to swappable [`DrawingWriter`]s. The double-slit diagram goes through the
//! same writers. No physics happens here.

pub mod config;
pub mod drawing;
pub mod error;
pub mod path;
pub mod pixel;
pub mod slit;
pub mod svg_writer;
pub mod writer;

#[cfg(feature = "png")]
pub mod raster;
#[cfg(feature = "png")]
pub mod snapshot;

use std::path::{Path, PathBuf};

use fieldlines_core::Simulation;

pub use config::{RenderConfig, Smoothing};
pub use drawing::{Drawing, Shape, Style};
pub use error::RenderError;
pub use path::{RenderPath, Segment};
pub use slit::DoubleSlitConfig;
pub use svg_writer::SvgWriter;
pub use writer::DrawingWriter;

#[cfg(feature = "png")]
pub use raster::PngWriter;

/// Output file stems.
pub const FIELD_LINES_STEM: &str = "field_lines";
pub const STREAMLINES_STEM: &str = "streamlines";
pub const FIELD_STRENGTH_STEM: &str = "field_strength";
pub const DOUBLE_SLIT_STEM: &str = "double-slit";

/// Writes the field-line outputs into `out_dir` and returns their paths.
///
/// Always writes `field_lines.svg`. With the `png` feature also writes
/// `streamlines.png` (the same paths plus charge markers) and
/// `field_strength.png` (log-scaled heat map).
pub fn write_field_lines(
    sim: &Simulation,
    config: &RenderConfig,
    out_dir: &Path,
) -> Result<Vec<PathBuf>, RenderError> {
    let lines = drawing::field_line_drawing(sim, config)?;
    let mut written = vec![SvgWriter.write_named(&lines, out_dir, FIELD_LINES_STEM)?];

    #[cfg(feature = "png")]
    {
        let with_markers = if config.charge_markers {
            lines.with_shapes(drawing::charge_markers(sim, config)?)
        } else {
            lines
        };
        written.push(PngWriter.write_named(&with_markers, out_dir, STREAMLINES_STEM)?);

        let heatmap = out_dir.join(format!("{FIELD_STRENGTH_STEM}.png"));
        snapshot::write_heatmap_png(sim.sampled(), config, &heatmap)?;
        written.push(heatmap);
    }

    Ok(written)
}

/// Writes `double-slit.svg` (and `double-slit.png` with the `png` feature).
pub fn write_double_slit(
    config: &DoubleSlitConfig,
    out_dir: &Path,
) -> Result<Vec<PathBuf>, RenderError> {
    let drawing = slit::double_slit(config)?;
    let mut writers: Vec<Box<dyn DrawingWriter>> = vec![Box::new(SvgWriter)];
    #[cfg(feature = "png")]
    writers.push(Box::new(PngWriter));
    writers
        .iter()
        .map(|w| w.write_named(&drawing, out_dir, DOUBLE_SLIT_STEM))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldlines_core::{FieldConfig, SeedLayout};

    fn small_sim() -> Simulation {
        Simulation::run(&FieldConfig {
            grid_width: 30,
            grid_height: 30,
            seeds: SeedLayout::Ring {
                per_charge: 6,
                radius: 0.3,
            },
            ..FieldConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn field_line_outputs_land_in_out_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = RenderConfig {
            width: 200,
            height: 150,
            ..RenderConfig::default()
        };
        let written = write_field_lines(&small_sim(), &config, dir.path()).unwrap();
        let names: Vec<String> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names[0], "field_lines.svg");
        #[cfg(feature = "png")]
        assert_eq!(
            names[1..],
            ["streamlines.png".to_string(), "field_strength.png".to_string()]
        );
        assert!(written.iter().all(|p| p.exists()));
    }

    #[test]
    fn double_slit_outputs_land_in_out_dir() {
        let dir = tempfile::tempdir().unwrap();
        let written = write_double_slit(&DoubleSlitConfig::default(), dir.path()).unwrap();
        assert_eq!(written[0], dir.path().join("double-slit.svg"));
        #[cfg(feature = "png")]
        assert_eq!(written[1], dir.path().join("double-slit.png"));
    }

    #[test]
    fn invalid_render_config_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = RenderConfig {
            max_points: 0,
            ..RenderConfig::default()
        };
        assert!(write_field_lines(&small_sim(), &config, dir.path()).is_err());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
