//! The [`Simulation`] façade driven by the host once per frame.
//!
//! Every [`step`](Simulation::step) runs in two phases: the net force on every particle is computed
//! from a frozen snapshot of positions and charges, then the integrator applies those forces. No
//! particle is read in its new state before all forces are known, so the result does not depend on
//! iteration order or on how the work is split across threads.

use std::fmt;

use glam::DVec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[cfg(feature = "parallel")]
use crate::compute_method::parallel;
use crate::{
    compute_method::{sequential, ComputeMethod, Coulomb},
    config::{ForceMethod, SimulationConfig},
    draw::DrawPoint,
    error::Result,
    integrator::Integrator,
    particle::Particle,
    store::ParticleStore,
};

/// Lifecycle of a [`Simulation`]. There is no terminal phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// No step has run yet.
    Constructed,
    /// At least one step has run.
    Running,
}

/// Aggregate quantities of the particle population, for overlays and sanity checks.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Diagnostics {
    /// Number of steps run so far.
    pub step: u64,
    /// Total kinetic energy.
    pub kinetic_energy: f64,
    /// Total momentum.
    pub momentum: DVec2,
    /// Largest particle speed.
    pub max_speed: f64,
    /// Sum of all charges, constant over the lifetime of the simulation.
    pub total_charge: f64,
}

/// A fixed population of charged particles advanced one time step at a time.
///
/// ```
/// # use coulomb::prelude::*;
/// let mut simulation = Simulation::new(SimulationConfig::new(640.0, 480.0, 256).with_seed(1))?;
/// assert_eq!(simulation.phase(), Phase::Constructed);
///
/// simulation.step();
///
/// assert_eq!(simulation.phase(), Phase::Running);
/// assert_eq!(simulation.positions().count(), 256);
/// # Ok::<(), coulomb::error::Error>(())
/// ```
pub struct Simulation {
    config: SimulationConfig,
    store: ParticleStore,
    method: Box<dyn ComputeMethod + Send>,
    integrator: Integrator,
    parallel: bool,
    max_charge: f64,
    mass_range: (f64, f64),
    steps: u64,
}

impl Simulation {
    /// Creates a simulation with a random initial state drawn from the configuration.
    ///
    /// The same seed always produces the same initial state. Without a seed one is drawn and
    /// logged at debug level.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(rand::random);
        let store = ParticleStore::random(&config, &mut ChaCha8Rng::seed_from_u64(seed));

        log::debug!(
            "created {} particles in {}x{} with seed {}",
            store.len(),
            config.width,
            config.height,
            seed
        );

        Ok(Self::from_parts(config, store))
    }

    /// Creates a simulation from explicit initial particles.
    ///
    /// The particle count of the configuration is replaced by the number of particles, which must
    /// be finite, inside the area and have a positive mass.
    pub fn with_particles(mut config: SimulationConfig, particles: Vec<Particle>) -> Result<Self> {
        config.particle_count = particles.len();
        config.validate()?;

        let store = ParticleStore::from_particles(particles, &config)?;

        log::debug!(
            "created {} explicit particles in {}x{}",
            store.len(),
            config.width,
            config.height
        );

        Ok(Self::from_parts(config, store))
    }

    fn from_parts(config: SimulationConfig, store: ParticleStore) -> Self {
        let parallel = if config.parallel && !cfg!(feature = "parallel") {
            log::warn!("`parallel` feature disabled, computing sequentially");
            false
        } else {
            config.parallel
        };

        let method = compute_method(&config, parallel);
        log::debug!("computing forces with {:?} (parallel: {})", config.method, parallel);

        let integrator = Integrator {
            time_step: config.time_step,
            max_speed: config.max_speed,
            max_force: config.max_force,
            bounds: DVec2::new(config.width, config.height),
            boundary: config.boundary,
        };

        let max_charge = store.charges().fold(0.0_f64, |max, q| max.max(q.abs()));
        let mass_range = store.iter().fold((f64::INFINITY, 0.0), |(min, max), p| {
            (p.mass.min(min), p.mass.max(max))
        });

        Self {
            config,
            store,
            method,
            integrator,
            parallel,
            max_charge,
            mass_range,
            steps: 0,
        }
    }

    /// Advances every particle by one time step.
    pub fn step(&mut self) {
        let snapshot = self.store.point_charges();
        let forces = self.method.compute(&snapshot);

        self.integrate(&forces);
        self.steps += 1;

        if log::log_enabled!(log::Level::Trace) {
            let kinetic_energy: f64 = self.store.iter().map(Particle::kinetic_energy).sum();
            log::trace!("step {}: kinetic energy {}", self.steps, kinetic_energy);
        }
    }

    fn integrate(&mut self, forces: &[DVec2]) {
        #[cfg(feature = "parallel")]
        if self.parallel {
            self.integrator
                .integrate_parallel(self.store.particles_mut(), forces);
            return;
        }

        self.integrator.integrate(self.store.particles_mut(), forces);
    }

    /// Runs `steps` steps.
    pub fn advance(&mut self, steps: usize) {
        for _ in 0..steps {
            self.step();
        }
    }

    /// Current [`Phase`].
    #[inline]
    pub fn phase(&self) -> Phase {
        if self.steps == 0 {
            Phase::Constructed
        } else {
            Phase::Running
        }
    }

    /// Number of steps run so far.
    #[inline]
    pub fn step_count(&self) -> u64 {
        self.steps
    }

    /// Whether the forces and the integration run on rayon's thread pool.
    #[inline]
    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// The configuration the simulation was built with.
    #[inline]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// The particle store.
    #[inline]
    pub fn store(&self) -> &ParticleStore {
        &self.store
    }

    /// All the particles, in index order.
    #[inline]
    pub fn particles(&self) -> &[Particle] {
        self.store.particles()
    }

    /// Current positions, in index order.
    #[inline]
    pub fn positions(&self) -> impl ExactSizeIterator<Item = DVec2> + '_ {
        self.store.positions()
    }

    /// Charges, in index order.
    #[inline]
    pub fn charges(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        self.store.charges()
    }

    /// Draw records of the particles, in index order.
    pub fn draw_points(&self) -> impl ExactSizeIterator<Item = DrawPoint> + '_ {
        self.store
            .iter()
            .map(|particle| DrawPoint::new(particle, self.max_charge, self.mass_range))
    }

    /// Computes the aggregate quantities of the current state.
    pub fn diagnostics(&self) -> Diagnostics {
        self.store.iter().fold(
            Diagnostics {
                step: self.steps,
                ..Default::default()
            },
            |mut diagnostics, particle| {
                diagnostics.kinetic_energy += particle.kinetic_energy();
                diagnostics.momentum += particle.velocity * particle.mass;
                diagnostics.max_speed = diagnostics.max_speed.max(particle.velocity.length());
                diagnostics.total_charge += particle.charge;
                diagnostics
            },
        )
    }
}

impl fmt::Debug for Simulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulation")
            .field("config", &self.config)
            .field("particles", &self.store.len())
            .field("parallel", &self.parallel)
            .field("steps", &self.steps)
            .finish_non_exhaustive()
    }
}

fn compute_method(config: &SimulationConfig, threaded: bool) -> Box<dyn ComputeMethod + Send> {
    let law = Coulomb::new(config.strength, config.softening);

    match (config.method, threaded) {
        #[cfg(feature = "parallel")]
        (ForceMethod::BruteForce, true) => Box::new(parallel::BruteForce(law)),
        #[cfg(feature = "parallel")]
        (ForceMethod::BarnesHut { theta }, true) => {
            Box::new(parallel::BarnesHut::new(theta, law))
        }
        (ForceMethod::BruteForce, _) => Box::new(sequential::BruteForce(law)),
        (ForceMethod::BarnesHut { theta }, _) => Box::new(sequential::BarnesHut::new(theta, law)),
    }
}
