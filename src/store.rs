use glam::DVec2;
use rand::{
    distributions::{Distribution, Uniform},
    Rng,
};

use crate::{
    config::SimulationConfig,
    error::{Error, Result},
    particle::{IntoPointCharge, Particle, PointCharge},
};

/// The structure owning the state of all the particles of a simulation.
///
/// The number of particles is fixed when the store is created and particles are never reordered,
/// so the index of a particle is its identity. Only the integrator mutates the particles.
///
/// ```
/// # use coulomb::prelude::*;
/// # use glam::DVec2;
/// let config = SimulationConfig::new(100.0, 100.0, 2);
/// let store = ParticleStore::from_particles(
///     vec![
///         Particle::new(DVec2::new(10.0, 10.0), 1.0),
///         Particle::new(DVec2::new(20.0, 10.0), -1.0),
///     ],
///     &config,
/// )
/// .unwrap();
///
/// assert_eq!(store.len(), 2);
/// assert_eq!(store.charges().collect::<Vec<_>>(), vec![1.0, -1.0]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleStore {
    particles: Vec<Particle>,
}

impl ParticleStore {
    /// Creates `config.particle_count` particles with random initial state.
    ///
    /// Positions are uniform in `[0, width) × [0, height)`, velocities have a uniform direction and
    /// a magnitude up to `initial_speed`, charges a random sign and a magnitude in `charge_range`,
    /// and masses are uniform in `mass_range`. The configuration is expected to be valid.
    pub fn random<R: Rng>(config: &SimulationConfig, rng: &mut R) -> Self {
        let (charge_min, charge_max) = config.charge_range;
        let (mass_min, mass_max) = config.mass_range;

        let x = Uniform::new(0.0, config.width);
        let y = Uniform::new(0.0, config.height);
        let direction = Uniform::new(0.0, std::f64::consts::TAU);
        let speed = Uniform::new_inclusive(0.0, config.initial_speed);
        let magnitude = Uniform::new_inclusive(charge_min, charge_max);
        let mass = Uniform::new_inclusive(mass_min, mass_max);

        let particles = (0..config.particle_count)
            .map(|_| {
                let position = DVec2::new(x.sample(rng), y.sample(rng));
                let velocity = DVec2::from_angle(direction.sample(rng)) * speed.sample(rng);
                let sign = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };

                Particle::new(position, sign * magnitude.sample(rng))
                    .with_velocity(velocity)
                    .with_mass(mass.sample(rng))
            })
            .collect();

        Self { particles }
    }

    /// Creates a store from explicit particles, checking them against the configured area.
    pub fn from_particles(particles: Vec<Particle>, config: &SimulationConfig) -> Result<Self> {
        if particles.is_empty() {
            return Err(Error::invalid("particles", "must not be empty"));
        }

        let bounds = DVec2::new(config.width, config.height);

        for particle in &particles {
            if !particle.is_finite() {
                return Err(Error::invalid("particles", "must have finite state"));
            }

            if particle.position.cmplt(DVec2::ZERO).any() || particle.position.cmpge(bounds).any()
            {
                return Err(Error::invalid("particles", "must lie inside the area"));
            }

            if particle.mass <= 0.0 {
                return Err(Error::invalid("particles", "must have a positive mass"));
            }
        }

        Ok(Self { particles })
    }

    /// Returns the number of particles.
    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Returns `true` if the store holds no particle, which a store built by this crate never does.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Returns the particle at the given index.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Particle> {
        self.particles.get(index)
    }

    /// Returns all the particles, in index order.
    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[inline]
    pub(crate) fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    /// Iterates over the particles.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }

    /// Iterates over the positions of the particles.
    #[inline]
    pub fn positions(&self) -> impl ExactSizeIterator<Item = DVec2> + '_ {
        self.particles.iter().map(|p| p.position)
    }

    /// Iterates over the charges of the particles.
    #[inline]
    pub fn charges(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        self.particles.iter().map(|p| p.charge)
    }

    /// Copies positions and charges into a snapshot the forces are computed from.
    #[inline]
    pub fn point_charges(&self) -> Vec<PointCharge> {
        self.particles.iter().map(Particle::point_charge).collect()
    }
}

impl<'a> IntoIterator for &'a ParticleStore {
    type Item = &'a Particle;
    type IntoIter = std::slice::Iter<'a, Particle>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
