//! Construction-time configuration of a [`Simulation`](crate::simulation::Simulation).
//!
//! A [`SimulationConfig`] is immutable once the simulation is built. Every parameter has a builder
//! method, and [`SimulationConfig::validate`] is run on construction.
//!
//! ```
//! # use coulomb::prelude::*;
//! let config = SimulationConfig::new(1280.0, 720.0, 4096)
//!     .with_method(ForceMethod::BarnesHut { theta: 0.8 })
//!     .with_boundary(BoundaryPolicy::Reflect)
//!     .with_seed(7);
//!
//! assert!(config.validate().is_ok());
//! ```

use crate::{
    error::{Error, Result},
    integrator::BoundaryPolicy,
};

/// Rendering surface the simulation is drawn on.
///
/// The engine only ever asks for its size; everything else about the surface belongs to the host.
pub trait Surface {
    /// Width of the surface in pixels.
    fn width(&self) -> u32;

    /// Height of the surface in pixels.
    fn height(&self) -> u32;
}

/// Algorithm used to compute the forces between particles.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ForceMethod {
    /// Exact pairwise summation, O(N²).
    #[default]
    BruteForce,
    /// Quadtree approximation, O(N log N). `theta = 0` is exact.
    BarnesHut {
        /// Opening angle: larger values are faster and less accurate.
        theta: f64,
    },
}

/// Simulation configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimulationConfig {
    /// Width of the simulated area.
    pub width: f64,
    /// Height of the simulated area.
    pub height: f64,
    /// Number of particles, constant for the lifetime of the simulation.
    pub particle_count: usize,
    /// Interaction strength coefficient `k`.
    pub strength: f64,
    /// Softening length keeping the force finite at small separations.
    pub softening: f64,
    /// Velocity magnitude clamp.
    pub max_speed: f64,
    /// Optional force magnitude clamp.
    pub max_force: Option<f64>,
    /// Fixed time step `Δt`.
    pub time_step: f64,
    /// Range of charge magnitudes; the sign is drawn separately.
    pub charge_range: (f64, f64),
    /// Range of particle masses.
    pub mass_range: (f64, f64),
    /// Maximum magnitude of the random initial velocity.
    pub initial_speed: f64,
    /// Policy applied to particles leaving the area.
    pub boundary: BoundaryPolicy,
    /// Force computation algorithm.
    pub method: ForceMethod,
    /// Spread the force computation and the integration over rayon's thread pool. Requires the
    /// `parallel` feature.
    pub parallel: bool,
    /// Seed of the initial state. `None` draws one at construction.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            particle_count: 2048,
            strength: 1.0,
            softening: 2.0,
            max_speed: 200.0,
            max_force: None,
            time_step: 1.0 / 60.0,
            charge_range: (0.1, 1.0),
            mass_range: (1.0, 1.0),
            initial_speed: 0.0,
            boundary: BoundaryPolicy::default(),
            method: ForceMethod::default(),
            parallel: false,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Creates the default configuration for an area and a particle count.
    pub fn new(width: f64, height: f64, particle_count: usize) -> Self {
        Self {
            width,
            height,
            particle_count,
            ..Default::default()
        }
    }

    /// Creates the default configuration sized after a rendering surface.
    pub fn for_surface(surface: &impl Surface, particle_count: usize) -> Self {
        Self::new(
            surface.width() as f64,
            surface.height() as f64,
            particle_count,
        )
    }

    /// Sets the interaction strength coefficient.
    pub fn with_strength(mut self, strength: f64) -> Self {
        self.strength = strength;
        self
    }

    /// Sets the softening length.
    pub fn with_softening(mut self, softening: f64) -> Self {
        self.softening = softening;
        self
    }

    /// Sets the velocity clamp.
    pub fn with_max_speed(mut self, max_speed: f64) -> Self {
        self.max_speed = max_speed;
        self
    }

    /// Sets the force clamp.
    pub fn with_max_force(mut self, max_force: Option<f64>) -> Self {
        self.max_force = max_force;
        self
    }

    /// Sets the time step.
    pub fn with_time_step(mut self, time_step: f64) -> Self {
        self.time_step = time_step;
        self
    }

    /// Sets the range of charge magnitudes.
    pub fn with_charge_range(mut self, min: f64, max: f64) -> Self {
        self.charge_range = (min, max);
        self
    }

    /// Sets the range of masses.
    pub fn with_mass_range(mut self, min: f64, max: f64) -> Self {
        self.mass_range = (min, max);
        self
    }

    /// Sets the maximum initial speed.
    pub fn with_initial_speed(mut self, initial_speed: f64) -> Self {
        self.initial_speed = initial_speed;
        self
    }

    /// Sets the boundary policy.
    pub fn with_boundary(mut self, boundary: BoundaryPolicy) -> Self {
        self.boundary = boundary;
        self
    }

    /// Sets the force computation algorithm.
    pub fn with_method(mut self, method: ForceMethod) -> Self {
        self.method = method;
        self
    }

    /// Enables or disables the parallel computation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the seed of the initial state.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks that the configuration can drive a simulation.
    pub fn validate(&self) -> Result<()> {
        fn positive(parameter: &'static str, value: f64) -> Result<()> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(Error::invalid(parameter, "must be finite and positive"))
            }
        }

        fn range(parameter: &'static str, (min, max): (f64, f64)) -> Result<()> {
            if !(min.is_finite() && max.is_finite()) {
                Err(Error::invalid(parameter, "must have finite bounds"))
            } else if min > max {
                Err(Error::invalid(parameter, "must have min <= max"))
            } else {
                Ok(())
            }
        }

        if self.particle_count == 0 {
            return Err(Error::invalid("particle_count", "must be at least 1"));
        }

        positive("width", self.width)?;
        positive("height", self.height)?;

        if !self.strength.is_finite() {
            return Err(Error::invalid("strength", "must be finite"));
        }

        positive("softening", self.softening)?;
        positive("max_speed", self.max_speed)?;
        if let Some(max_force) = self.max_force {
            positive("max_force", max_force)?;
        }
        positive("time_step", self.time_step)?;

        range("charge_range", self.charge_range)?;
        if self.charge_range.0 < 0.0 {
            return Err(Error::invalid("charge_range", "must hold magnitudes >= 0"));
        }

        range("mass_range", self.mass_range)?;
        positive("mass_range", self.mass_range.0)?;

        if !(self.initial_speed.is_finite() && self.initial_speed >= 0.0) {
            return Err(Error::invalid("initial_speed", "must be finite and >= 0"));
        }

        if let ForceMethod::BarnesHut { theta } = self.method {
            if !(theta.is_finite() && theta >= 0.0) {
                return Err(Error::invalid("theta", "must be finite and >= 0"));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Canvas;

    impl Surface for Canvas {
        fn width(&self) -> u32 {
            1024
        }

        fn height(&self) -> u32 {
            768
        }
    }

    fn rejected(config: SimulationConfig) -> &'static str {
        match config.validate() {
            Err(Error::InvalidConfiguration { parameter, .. }) => parameter,
            Ok(()) => panic!("configuration accepted: {config:?}"),
        }
    }

    #[test]
    fn default_is_valid() {
        assert_eq!(SimulationConfig::default().validate(), Ok(()));
    }

    #[test]
    fn sized_after_surface() {
        let config = SimulationConfig::for_surface(&Canvas, 10);

        assert_eq!((config.width, config.height), (1024.0, 768.0));
        assert_eq!(config.particle_count, 10);
    }

    #[test]
    fn invalid_parameters_are_named() {
        let base = SimulationConfig::new(100.0, 100.0, 16);

        assert_eq!(rejected(SimulationConfig::new(100.0, 100.0, 0)), "particle_count");
        assert_eq!(rejected(SimulationConfig::new(f64::INFINITY, 1.0, 1)), "width");
        assert_eq!(rejected(SimulationConfig::new(1.0, -1.0, 1)), "height");
        assert_eq!(rejected(SimulationConfig::new(1.0, f64::NAN, 1)), "height");
        assert_eq!(rejected(base.clone().with_strength(f64::NAN)), "strength");
        assert_eq!(rejected(base.clone().with_softening(0.0)), "softening");
        assert_eq!(rejected(base.clone().with_max_speed(0.0)), "max_speed");
        assert_eq!(rejected(base.clone().with_max_force(Some(-1.0))), "max_force");
        assert_eq!(rejected(base.clone().with_time_step(f64::INFINITY)), "time_step");
        assert_eq!(rejected(base.clone().with_charge_range(1.0, 0.5)), "charge_range");
        assert_eq!(rejected(base.clone().with_charge_range(-1.0, 1.0)), "charge_range");
        assert_eq!(rejected(base.clone().with_mass_range(0.0, 1.0)), "mass_range");
        assert_eq!(rejected(base.clone().with_initial_speed(-1.0)), "initial_speed");
        assert_eq!(
            rejected(base.with_method(ForceMethod::BarnesHut { theta: -0.5 })),
            "theta"
        );
    }

    #[test]
    fn negative_strength_is_allowed() {
        let config = SimulationConfig::new(10.0, 10.0, 2).with_strength(-3.0);

        assert_eq!(config.validate(), Ok(()));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_partial_configuration() {
        let config: SimulationConfig = serde_json::from_str(
            r#"{ "width": 320.0, "height": 200.0, "method": { "BarnesHut": { "theta": 0.5 } } }"#,
        )
        .unwrap();

        assert_eq!(config.width, 320.0);
        assert_eq!(config.particle_count, 2048);
        assert_eq!(config.method, ForceMethod::BarnesHut { theta: 0.5 });
    }
}
