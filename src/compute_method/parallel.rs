use glam::DVec2;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

use super::{
    tree::force::{self, TreeForce},
    Coulomb,
};
use crate::particle::PointCharge;

/// A brute-force [`ComputeMethod`](super::ComputeMethod) using the CPU with [rayon](https://github.com/rayon-rs/rayon).
///
/// Each affected particle sums the forces of all charged particles of the snapshot on its own
/// task, so the result does not depend on how rayon splits the work.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BruteForce(pub Coulomb);

impl super::ComputeMethod for BruteForce {
    fn compute(&mut self, charges: &[PointCharge]) -> Vec<DVec2> {
        let law = self.0;
        let sources: Vec<_> = charges.iter().copied().filter(|c| c.1 != 0.0).collect();

        charges
            .par_iter()
            .map(|&affected| {
                if affected.1 == 0.0 {
                    return DVec2::ZERO;
                }

                sources.iter().fold(DVec2::ZERO, |force, &affecting| {
                    force + law.force(affected, affecting)
                })
            })
            .collect()
    }
}

/// [Barnes-Hut](https://en.wikipedia.org/wiki/Barnes%E2%80%93Hut_simulation) [`ComputeMethod`](super::ComputeMethod) using the CPU with [rayon](https://github.com/rayon-rs/rayon) for the force computation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarnesHut {
    /// Parameter ruling the accuracy and speed of the algorithm. If 0, behaves the same as [`BruteForce`].
    pub theta: f64,
    /// Force law between two charges.
    pub law: Coulomb,
}

impl BarnesHut {
    /// Creates a new [`BarnesHut`] instance.
    #[inline]
    pub const fn new(theta: f64, law: Coulomb) -> Self {
        Self { theta, law }
    }
}

impl super::ComputeMethod for BarnesHut {
    fn compute(&mut self, charges: &[PointCharge]) -> Vec<DVec2> {
        let (tree, root) = force::build(charges);

        charges
            .par_iter()
            .map(|&affected| tree.force_on(affected, root, self.theta, &self.law))
            .collect()
    }
}
