use glam::DVec2;

use super::{
    tree::force::{self, TreeForce},
    Coulomb,
};
use crate::particle::PointCharge;

/// A brute-force [`ComputeMethod`](super::ComputeMethod) using the CPU.
///
/// Evaluates every unordered pair of charged particles once and applies the force to both sides,
/// which halves the work of the naive double loop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BruteForce(pub Coulomb);

impl super::ComputeMethod for BruteForce {
    fn compute(&mut self, charges: &[PointCharge]) -> Vec<DVec2> {
        let charged: Vec<usize> = (0..charges.len())
            .filter(|&i| charges[i].1 != 0.0)
            .collect();

        let mut forces = vec![DVec2::ZERO; charges.len()];

        for (k, &i) in charged.iter().enumerate() {
            let mut force = DVec2::ZERO;

            for &j in &charged[k + 1..] {
                let (on_i, on_j) = self.0.pair(charges[i], charges[j]);

                force += on_i;
                forces[j] += on_j;
            }

            forces[i] += force;
        }

        forces
    }
}

/// [Barnes-Hut](https://en.wikipedia.org/wiki/Barnes%E2%80%93Hut_simulation) [`ComputeMethod`](super::ComputeMethod) using the CPU.
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
            .iter()
            .map(|&affected| tree.force_on(affected, root, self.theta, &self.law))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::super::{tests, ComputeMethod};
    use super::*;

    #[test]
    fn brute_force() {
        tests::force_computation(BruteForce(tests::LAW));
    }

    #[test]
    fn barnes_hut() {
        tests::force_computation(BarnesHut::new(0.0, tests::LAW));
    }

    #[test]
    fn brute_force_conserves_momentum() {
        let forces = BruteForce(tests::LAW).compute(&tests::charges());
        let net = forces.iter().fold(DVec2::ZERO, |net, &f| net + f);

        assert!(net.length() < 1e-12, "net force not zero: {net}");
    }

    #[test]
    fn barnes_hut_approximates_brute_force() {
        let charges: Vec<_> = (0..200)
            .map(|i| {
                let i = i as f64;
                let position = DVec2::new((i * 37.0) % 101.0, (i * 53.0) % 89.0);
                let charge = 0.5 + (i * 0.01) % 0.5;
                (position, charge)
            })
            .collect();

        let exact = BruteForce(tests::LAW).compute(&charges);
        let approximate = BarnesHut::new(0.5, tests::LAW).compute(&charges);

        let error: f64 = exact
            .iter()
            .zip(&approximate)
            .map(|(e, a)| (*e - *a).length())
            .sum();
        let total: f64 = exact.iter().map(|e| e.length()).sum();

        assert!(error / total < 0.05, "relative error {}", error / total);
    }

    #[test]
    fn barnes_hut_has_no_self_force_at_large_theta() {
        let charges: Vec<_> = (0..64)
            .map(|i| {
                let i = i as f64;
                (DVec2::new((i * 13.0) % 17.0, (i * 7.0) % 11.0), 1.0 - (i % 3.0))
            })
            .collect();
        let pair = [(DVec2::ZERO, 1.0), (DVec2::new(3.0, 0.0), 1.0)];

        assert_eq!(
            BarnesHut::new(2.0, tests::LAW).compute(&pair),
            BruteForce(tests::LAW).compute(&pair)
        );

        for theta in [0.8, 2.0, 10.0] {
            let forces = BarnesHut::new(theta, tests::LAW).compute(&charges);
            assert!(forces.iter().all(|f| f.is_finite()));
        }
    }

    #[test]
    fn empty_and_neutral_inputs() {
        assert!(BruteForce(tests::LAW).compute(&[]).is_empty());
        assert!(BarnesHut::new(0.5, tests::LAW).compute(&[]).is_empty());

        let neutral = [(DVec2::ZERO, 0.0), (DVec2::X, 0.0)];
        assert_eq!(
            BarnesHut::new(0.5, tests::LAW).compute(&neutral),
            vec![DVec2::ZERO; 2]
        );
    }
}
