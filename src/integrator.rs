//! Fixed-step time integration and boundary handling.
//!
//! Forces are computed beforehand from a frozen snapshot; the integrator only ever touches one
//! particle at a time, which is what allows the parallel variant to split the particles freely.

use glam::DVec2;

use crate::particle::Particle;

/// Rule applied to a particle leaving the simulated area `[0, width) × [0, height)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoundaryPolicy {
    /// Toroidal area: leaving through one edge re-enters through the opposite one.
    #[default]
    Wrap,
    /// The velocity component across the edge is negated and the coordinate clamped to the edge.
    Reflect,
}

impl BoundaryPolicy {
    /// Maps a coordinate and its velocity component back into `[0, bound)`.
    #[inline]
    pub fn apply(self, coordinate: f64, velocity: f64, bound: f64) -> (f64, f64) {
        debug_assert!(coordinate.is_finite(), "non-finite coordinate {coordinate}");

        if (0.0..bound).contains(&coordinate) {
            return (coordinate, velocity);
        }

        match self {
            BoundaryPolicy::Wrap => {
                let wrapped = coordinate.rem_euclid(bound);
                // `rem_euclid` rounds tiny negative inputs up to `bound` itself.
                (if wrapped < bound { wrapped } else { 0.0 }, velocity)
            }
            BoundaryPolicy::Reflect => {
                let clamped = if coordinate < 0.0 {
                    0.0
                } else {
                    below(bound)
                };
                (clamped, -velocity)
            }
        }
    }
}

/// Largest representable value strictly below a positive `bound`.
#[inline]
fn below(bound: f64) -> f64 {
    f64::from_bits(bound.to_bits() - 1)
}

/// Semi-implicit Euler integrator with a stability guard and a boundary policy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Integrator {
    /// Time step `Δt`.
    pub time_step: f64,
    /// Velocity magnitude clamp.
    pub max_speed: f64,
    /// Optional force magnitude clamp applied before the velocity update.
    pub max_force: Option<f64>,
    /// Size of the simulated area.
    pub bounds: DVec2,
    /// What happens to particles leaving the area.
    pub boundary: BoundaryPolicy,
}

impl Integrator {
    /// Advances one particle by one time step under the given net force.
    ///
    /// `v += F / m · Δt`, then `x += v · Δt`, then the boundary policy. A velocity change or a
    /// displacement that overflows is logged and skipped, so the particle state stays finite.
    #[inline]
    pub fn advance(&self, particle: &mut Particle, force: DVec2) {
        let force = match self.max_force {
            Some(max) => force.clamp_length_max(max),
            None => force,
        };

        let dv = force / particle.mass * self.time_step;
        if dv.is_finite() {
            particle.velocity += dv;
        } else {
            log::warn!("discarding non-finite velocity change {dv} from force {force}");
        }
        particle.velocity = particle.velocity.clamp_length_max(self.max_speed);

        let position = particle.position + particle.velocity * self.time_step;
        if position.is_finite() {
            particle.position = position;
        } else {
            log::warn!("discarding non-finite displacement at {}", particle.position);
        }

        let (x, vx) = self
            .boundary
            .apply(particle.position.x, particle.velocity.x, self.bounds.x);
        let (y, vy) = self
            .boundary
            .apply(particle.position.y, particle.velocity.y, self.bounds.y);

        particle.position = DVec2::new(x, y);
        particle.velocity = DVec2::new(vx, vy);
    }

    /// Advances every particle by one time step, `forces[i]` acting on `particles[i]`.
    pub fn integrate(&self, particles: &mut [Particle], forces: &[DVec2]) {
        debug_assert_eq!(particles.len(), forces.len());

        for (particle, &force) in particles.iter_mut().zip(forces) {
            self.advance(particle, force);
        }
    }

    /// Same as [`Integrator::integrate`], with the particles split across rayon's thread pool.
    #[cfg(feature = "parallel")]
    pub fn integrate_parallel(&self, particles: &mut [Particle], forces: &[DVec2]) {
        use rayon::iter::{IndexedParallelIterator, IntoParallelRefMutIterator, ParallelIterator};

        debug_assert_eq!(particles.len(), forces.len());

        particles
            .par_iter_mut()
            .zip(forces)
            .for_each(|(particle, &force)| self.advance(particle, force));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn integrator(boundary: BoundaryPolicy) -> Integrator {
        Integrator {
            time_step: 0.5,
            max_speed: 10.0,
            max_force: None,
            bounds: DVec2::new(100.0, 50.0),
            boundary,
        }
    }

    #[test]
    fn velocity_is_updated_before_position() {
        let mut particle = Particle::new(DVec2::new(10.0, 10.0), 1.0).with_mass(2.0);
        integrator(BoundaryPolicy::Wrap).advance(&mut particle, DVec2::new(4.0, 0.0));

        assert_eq!(particle.velocity, DVec2::new(1.0, 0.0));
        assert_eq!(particle.position, DVec2::new(10.5, 10.0));
    }

    #[test]
    fn speed_is_clamped() {
        let mut particle = Particle::new(DVec2::new(10.0, 10.0), 1.0);
        integrator(BoundaryPolicy::Wrap).advance(&mut particle, DVec2::new(0.0, 1e9));

        assert!((particle.velocity.length() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn force_is_clamped() {
        let mut clamped = integrator(BoundaryPolicy::Wrap);
        clamped.max_force = Some(2.0);

        let mut particle = Particle::new(DVec2::new(10.0, 10.0), 1.0);
        clamped.advance(&mut particle, DVec2::new(-8.0, 0.0));

        assert_eq!(particle.velocity, DVec2::new(-1.0, 0.0));
    }

    #[test]
    fn non_finite_force_is_ignored() {
        let mut particle = Particle::new(DVec2::new(10.0, 10.0), 1.0);
        integrator(BoundaryPolicy::Wrap).advance(&mut particle, DVec2::new(f64::NAN, 1.0));

        assert_eq!(particle.velocity, DVec2::ZERO);
        assert!(particle.is_finite());
    }

    #[test]
    fn overflowing_velocity_change_is_ignored() {
        let mut slow = integrator(BoundaryPolicy::Wrap);
        slow.time_step = 10.0;

        let mut particle = Particle::new(DVec2::new(10.0, 10.0), 1.0).with_mass(1e-308);
        slow.advance(&mut particle, DVec2::new(9e6, 0.0));

        assert!(particle.is_finite());
        assert_eq!(particle.velocity, DVec2::ZERO);
        assert_eq!(particle.position, DVec2::new(10.0, 10.0));
    }

    #[test]
    fn overflowing_displacement_is_ignored() {
        let mut fast = integrator(BoundaryPolicy::Wrap);
        fast.time_step = 1e10;
        fast.max_speed = f64::MAX;

        let mut particle =
            Particle::new(DVec2::new(10.0, 10.0), 1.0).with_velocity(DVec2::new(1e300, 0.0));
        fast.advance(&mut particle, DVec2::ZERO);

        assert!(particle.is_finite());
        assert_eq!(particle.position, DVec2::new(10.0, 10.0));
    }

    #[test]
    fn wrap_keeps_coordinates_in_range() {
        let wrap = BoundaryPolicy::Wrap;

        assert_eq!(wrap.apply(105.0, 3.0, 100.0), (5.0, 3.0));
        assert_eq!(wrap.apply(-5.0, -3.0, 100.0), (95.0, -3.0));
        assert_eq!(wrap.apply(100.0, 1.0, 100.0), (0.0, 1.0));
        assert_eq!(wrap.apply(-1e-20, -1.0, 100.0), (0.0, -1.0));
        assert_eq!(wrap.apply(250.0, 1.0, 100.0), (50.0, 1.0));
    }

    #[test]
    fn reflect_negates_and_clamps() {
        let reflect = BoundaryPolicy::Reflect;

        assert_eq!(reflect.apply(-5.0, -3.0, 100.0), (0.0, 3.0));

        let (x, vx) = reflect.apply(104.0, 3.0, 100.0);
        assert!(x < 100.0 && x > 99.999);
        assert_eq!(vx, -3.0);

        assert_eq!(reflect.apply(40.0, 3.0, 100.0), (40.0, 3.0));
    }

    #[test]
    fn boundary_handling_is_deterministic() {
        for boundary in [BoundaryPolicy::Wrap, BoundaryPolicy::Reflect] {
            let start = Particle::new(DVec2::new(99.0, 49.0), 1.0)
                .with_velocity(DVec2::new(8.0, 9.0));

            let mut first = start;
            let mut second = start;
            integrator(boundary).advance(&mut first, DVec2::ZERO);
            integrator(boundary).advance(&mut second, DVec2::ZERO);

            assert_eq!(first, second);
            assert!(first.position.cmpge(DVec2::ZERO).all());
            assert!(first.position.cmplt(DVec2::new(100.0, 50.0)).all());
        }
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_integration_matches_sequential() {
        let mut sequential: Vec<_> = (0..100)
            .map(|i| Particle::new(DVec2::new(i as f64, 25.0), 1.0))
            .collect();
        let mut parallel = sequential.clone();
        let forces: Vec<_> = (0..100).map(|i| DVec2::new(i as f64, -1.0)).collect();

        integrator(BoundaryPolicy::Reflect).integrate(&mut sequential, &forces);
        integrator(BoundaryPolicy::Reflect).integrate_parallel(&mut parallel, &forces);

        assert_eq!(sequential, parallel);
    }
}
