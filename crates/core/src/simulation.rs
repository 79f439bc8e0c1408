//! One complete field-line computation: synthesize, seed, trace.

use glam::DVec2;

use crate::config::FieldConfig;
use crate::error::FieldError;
use crate::synth::SampledField;
use crate::tracer::{Streamline, Termination, Tracer};

/// The result of running a [`FieldConfig`]. Read-only once built.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: FieldConfig,
    sampled: SampledField,
    seeds: Vec<DVec2>,
    streamlines: Vec<Streamline>,
}

impl Simulation {
    /// Validates `config`, samples the field on its grid and traces every
    /// seed in the configured directions.
    ///
    /// Per-streamline numeric failures never abort the run; they surface as
    /// [`Termination::NonFinite`] on the affected line.
    pub fn run(config: &FieldConfig) -> Result<Self, FieldError> {
        config.validate()?;
        let sampled = SampledField::new(
            &config.charges,
            config.domain,
            config.grid_width,
            config.grid_height,
        )?;
        let seeds = config.seeds.generate(&config.charges, &config.domain);
        log::info!(
            "tracing {} seeds ({:?}) through a {}x{} grid",
            seeds.len(),
            config.directions,
            config.grid_width,
            config.grid_height
        );

        let tracer = Tracer::new(&sampled, &config.charges, config.trace)?;
        let streamlines = tracer.trace_all(&seeds, config.directions);

        let truncated = streamlines
            .iter()
            .filter(|s| s.termination == Termination::IterationLimit)
            .count();
        if truncated > 0 {
            log::warn!(
                "{truncated} of {} streamlines hit the iteration cap",
                streamlines.len()
            );
        }

        Ok(Self {
            config: config.clone(),
            sampled,
            seeds,
            streamlines,
        })
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn sampled(&self) -> &SampledField {
        &self.sampled
    }

    pub fn seeds(&self) -> &[DVec2] {
        &self.seeds
    }

    pub fn streamlines(&self) -> &[Streamline] {
        &self.streamlines
    }

    /// Total number of traced points across all streamlines.
    pub fn point_count(&self) -> usize {
        self.streamlines.iter().map(Streamline::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seeds::SeedLayout;
    use crate::tracer::Directions;

    fn small_config() -> FieldConfig {
        FieldConfig {
            grid_width: 40,
            grid_height: 40,
            seeds: SeedLayout::Ring {
                per_charge: 4,
                radius: 0.3,
            },
            ..FieldConfig::default()
        }
    }

    #[test]
    fn one_streamline_per_seed_and_direction() {
        let sim = Simulation::run(&small_config()).unwrap();
        assert_eq!(sim.seeds().len(), 8);
        assert_eq!(sim.streamlines().len(), 16);
        assert!(sim.point_count() > 0);
    }

    #[test]
    fn single_direction_halves_the_line_count() {
        let config = FieldConfig {
            directions: Directions::Forward,
            ..small_config()
        };
        let sim = Simulation::run(&config).unwrap();
        assert_eq!(sim.streamlines().len(), 8);
    }

    #[test]
    fn run_rejects_invalid_config() {
        let config = FieldConfig {
            grid_height: 0,
            ..small_config()
        };
        assert!(matches!(
            Simulation::run(&config),
            Err(FieldError::InvalidDimensions)
        ));
    }

    #[test]
    fn every_point_stays_in_the_domain() {
        let sim = Simulation::run(&small_config()).unwrap();
        let domain = sim.config().domain;
        assert!(sim
            .streamlines()
            .iter()
            .flat_map(|s| s.points.iter())
            .all(|&p| domain.contains(p)));
    }

    #[test]
    fn run_is_deterministic() {
        let a = Simulation::run(&small_config()).unwrap();
        let b = Simulation::run(&small_config()).unwrap();
        assert_eq!(a.streamlines(), b.streamlines());
    }
}
