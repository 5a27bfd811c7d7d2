use glam::DVec2;

use crate::particle::PointCharge;

#[cfg(feature = "parallel")]
/// Compute methods that use multiple CPU threads.
pub mod parallel;

/// Compute methods that use one CPU thread.
pub mod sequential;

pub(crate) mod tree;

/// Softened Coulomb interaction between two point charges.
///
/// For an affected charge `q1` at `x1` and an affecting charge `q2` at `x2`, with `d = x1 - x2`,
/// the force on the affected charge is `strength * q1 * q2 * d / (|d|² + softening²)^(3/2)`.
/// Like charges repel, opposite charges attract.
///
/// The softening length bounds the force as the separation goes to zero: the pair force never
/// exceeds `2 * strength * |q1 * q2| / (3√3 * softening²)` and two coincident charges exert no
/// force on each other.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coulomb {
    /// Interaction strength coefficient `k`.
    pub strength: f64,
    /// Softening length `ε`.
    pub softening: f64,
}

impl Coulomb {
    /// Creates a new [`Coulomb`] law.
    #[inline]
    pub const fn new(strength: f64, softening: f64) -> Self {
        Self {
            strength,
            softening,
        }
    }

    /// Returns the force the `affecting` charge exerts on the `affected` one.
    ///
    /// The result is the exact negation of `self.force(affecting, affected)`.
    #[inline]
    pub fn force(&self, affected: PointCharge, affecting: PointCharge) -> DVec2 {
        let (position1, charge1) = affected;
        let (position2, charge2) = affecting;

        let dir = position1 - position2;
        let softened_2 = dir.length_squared() + self.softening * self.softening;

        if softened_2 == 0.0 {
            return DVec2::ZERO;
        }

        dir * (self.strength * (charge1 * charge2) / (softened_2 * softened_2.sqrt()))
    }

    /// Returns the forces two charges exert on each other, the first on `p1` and the second on
    /// `p2`.
    #[inline]
    pub fn pair(&self, p1: PointCharge, p2: PointCharge) -> (DVec2, DVec2) {
        let force = self.force(p1, p2);
        (force, -force)
    }
}

/// Trait for algorithms computing the net Coulomb force on every point charge of a snapshot.
///
/// Implementations are pure: they read the snapshot and return one force per input, in the same
/// order, without retaining anything between calls.
///
/// # Example
///
/// ```
/// # use coulomb::prelude::*;
/// # use glam::DVec2;
/// struct NoForce;
///
/// impl ComputeMethod for NoForce {
///     fn compute(&mut self, charges: &[PointCharge]) -> Vec<DVec2> {
///         vec![DVec2::ZERO; charges.len()]
///     }
/// }
/// ```
pub trait ComputeMethod {
    /// Computes the net force the charges exert on each other.
    fn compute(&mut self, charges: &[PointCharge]) -> Vec<DVec2>;
}

impl<C> ComputeMethod for &mut C
where
    C: ComputeMethod + ?Sized,
{
    #[inline]
    fn compute(&mut self, charges: &[PointCharge]) -> Vec<DVec2> {
        (**self).compute(charges)
    }
}

impl<C> ComputeMethod for Box<C>
where
    C: ComputeMethod + ?Sized,
{
    #[inline]
    fn compute(&mut self, charges: &[PointCharge]) -> Vec<DVec2> {
        (**self).compute(charges)
    }
}
