#![deny(unsafe_code)]
//! Core physics for the field-line generator.
//!
//! Synthesizes the electrostatic field of point charges on a sampled grid
//! (`synth`), traces streamlines through it (`tracer`) and maps physical
//! coordinates to raster space (`mapper`). Everything here is pure; file
//! output lives in `fieldlines-render`.

pub mod charge;
pub mod color;
pub mod config;
pub mod domain;
pub mod error;
pub mod field;
pub mod mapper;
pub mod palette;
pub mod params;
pub mod seeds;
pub mod simulation;
pub mod synth;
pub mod tracer;

pub use charge::PointCharge;
pub use color::{LinearRgb, Srgb};
pub use config::FieldConfig;
pub use domain::Domain;
pub use error::FieldError;
pub use field::VectorField;
pub use mapper::{RasterMapper, RasterPoint};
pub use palette::Palette;
pub use seeds::SeedLayout;
pub use simulation::Simulation;
pub use synth::SampledField;
pub use tracer::{Direction, Directions, StepControl, Streamline, Termination, TraceConfig, Tracer};
