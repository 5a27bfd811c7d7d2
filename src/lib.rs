//! # Coulomb
//!
//! Coulomb is a crate simulating a fixed population of charged particles in a 2D area, fast enough
//! to be drawn live at interactive frame rates with thousands of particles.
//!
//! ## Goals
//!
//! The crate owns the physics and nothing else: the host keeps its window, its drawing surface and
//! its frame loop, calls [`Simulation::step`](simulation::Simulation::step) once per frame and draws
//! the particles it reads back.
//!
//! Forces follow a softened Coulomb law so that close encounters never blow up. They can be summed
//! exactly or approximated with [Barnes-Hut](https://en.wikipedia.org/wiki/Barnes%E2%80%93Hut_simulation),
//! on one thread or, with the "parallel" feature, on [rayon](https://github.com/rayon-rs/rayon)'s
//! thread pool.
//!
//! # Using Coulomb
//!
//! ## Running a simulation
//!
//! Describe the simulation with a [`SimulationConfig`](config::SimulationConfig), build it and step
//! it from the frame loop:
//!
//! ```
//! # use coulomb::prelude::*;
//! let config = SimulationConfig::new(800.0, 600.0, 512)
//!     .with_method(ForceMethod::BarnesHut { theta: 0.8 })
//!     .with_seed(3);
//!
//! let mut simulation = Simulation::new(config)?;
//!
//! for _frame in 0..10 {
//!     simulation.step();
//!
//!     for point in simulation.draw_points() {
//!         let [_x, _y] = point.position;
//!         // Draw a dot at (x, y) coloured after `point.color`.
//!     }
//! }
//! # Ok::<(), coulomb::error::Error>(())
//! ```
//!
//! An unusable configuration is rejected when the simulation is built:
//!
//! ```
//! # use coulomb::prelude::*;
//! let error = Simulation::new(SimulationConfig::new(800.0, 600.0, 0)).unwrap_err();
//!
//! assert!(matches!(
//!     error,
//!     Error::InvalidConfiguration { parameter: "particle_count", .. }
//! ));
//! ```
//!
//! ## Computing forces on your own types
//!
//! The force computation is usable without the rest of the engine. Implement or derive the
//! [`Charged`](particle::Charged) trait and compute the net forces with any
//! [`ComputeMethod`](compute_method::ComputeMethod):
//!
//! ```
//! # use coulomb::prelude::*;
//! # use glam::DVec2;
//! #[derive(Charged)]
//! struct Ion {
//!     position: DVec2,
//!     velocity: DVec2,
//!     charge: f64,
//! }
//!
//! let mut ions = vec![
//!     Ion { position: DVec2::ZERO, velocity: DVec2::ZERO, charge: 1.0 },
//!     Ion { position: DVec2::X, velocity: DVec2::ZERO, charge: 1.0 },
//! ];
//!
//! let cm = &mut sequential::BruteForce(Coulomb::new(1.0, 0.1));
//!
//! for (ion, force) in ions.iter_mut().forces(cm) {
//!     ion.velocity += force / 60.0;
//! }
//!
//! assert!(ions[0].velocity.x < 0.0 && ions[1].velocity.x > 0.0);
//! ```

#![warn(missing_docs)]

/// Force law, trait for computing forces and types implementing it for the user to choose from.
pub mod compute_method;

pub mod config;

/// Per-particle records for the rendering collaborator.
pub mod draw;

pub mod error;

pub mod integrator;

/// Extension traits computing forces over iterators.
pub mod iterator;

/// Trait to implement on types carrying a charge, and the particle of the simulation.
pub mod particle;

pub mod simulation;

/// Storage for the particles.
pub mod store;

/// Internal representation of vectors used for expensive computations.
pub mod vector;

/// Derive macro for types carrying a charge.
pub mod coulomb_derive {
    pub use coulomb_derive::Charged;
}

/// Everything needed to use the crate.
pub mod prelude {
    #[cfg(feature = "parallel")]
    pub use crate::compute_method::parallel;
    pub use crate::compute_method::{sequential, ComputeMethod, Coulomb};
    pub use crate::config::{ForceMethod, SimulationConfig, Surface};
    pub use crate::coulomb_derive::*;
    pub use crate::draw::DrawPoint;
    pub use crate::error::Error;
    pub use crate::integrator::{BoundaryPolicy, Integrator};
    pub use crate::iterator::{Compute, MapCompute};
    pub use crate::particle::{Charged, Particle, PointCharge};
    pub use crate::simulation::{Diagnostics, Phase, Simulation};
    pub use crate::store::ParticleStore;
}
