use glam::DVec2;

use crate::vector::Vector;

/// A position and a signed charge, the only data the force computation reads.
pub type PointCharge = (DVec2, f64);

/// Trait to describe an object carrying a [position](Charged::position) and a signed
/// [charge](Charged::charge).
///
/// #### Deriving:
///
/// Used when the type has fields named `position` and `charge`:
///
/// ```
/// # use coulomb::prelude::*;
/// # use glam::DVec2;
/// #
/// #[derive(Charged)]
/// struct Ion {
///     position: DVec2,
///     charge: f64,
/// //  ...
/// }
/// ```
/// #### Manual implementation:
///
/// ```
/// # use coulomb::prelude::*;
/// # const ELEMENTARY: f64 = 1.0;
/// #
/// struct Ion {
///     position: [f64; 2],
///     electrons_missing: i32,
/// }
///
/// impl Charged for Ion {
///     type Vector = [f64; 2];
///
///     fn position(&self) -> [f64; 2] {
///         self.position
///     }
///
///     fn charge(&self) -> f64 {
///         self.electrons_missing as f64 * ELEMENTARY
///     }
/// }
/// ```
///
/// It is also implemented for tuples of a vector and a charge:
///
/// ```
/// # use coulomb::prelude::*;
/// let ion = ([1.0, 2.0], -0.5);
///
/// assert_eq!(ion.position(), [1.0, 2.0]);
/// assert_eq!(ion.charge(), -0.5);
/// ```
pub trait Charged {
    /// Type of the [position](Charged::position).
    type Vector;

    /// The position of the object in the plane.
    fn position(&self) -> Self::Vector;

    /// The signed charge of the object. Its sign decides attraction or repulsion and its magnitude
    /// scales the force.
    fn charge(&self) -> f64;
}

/// Conversion to a [`PointCharge`].
pub(crate) trait IntoPointCharge: Charged
where
    Self::Vector: Vector,
{
    #[inline]
    fn point_charge(&self) -> PointCharge {
        (self.position().into_internal(), self.charge())
    }
}

impl<P> IntoPointCharge for P
where
    P: Charged,
    P::Vector: Vector,
{
}

impl<V: Clone> Charged for (V, f64) {
    type Vector = V;

    #[inline]
    fn position(&self) -> V {
        self.0.clone()
    }

    #[inline]
    fn charge(&self) -> f64 {
        self.1
    }
}

impl<P: Charged> Charged for &P {
    type Vector = P::Vector;

    #[inline]
    fn position(&self) -> Self::Vector {
        (**self).position()
    }

    #[inline]
    fn charge(&self) -> f64 {
        (**self).charge()
    }
}

impl<P: Charged> Charged for &mut P {
    type Vector = P::Vector;

    #[inline]
    fn position(&self) -> Self::Vector {
        (**self).position()
    }

    #[inline]
    fn charge(&self) -> f64 {
        (**self).charge()
    }
}

/// A charged point particle of the simulation.
///
/// Its identity is its index in the [`ParticleStore`](crate::store::ParticleStore); the charge and
/// the mass never change once the particle is created.
#[derive(coulomb_derive::Charged, Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Particle {
    /// Position in the simulated area.
    pub position: DVec2,
    /// Velocity in units of the area per unit of time.
    pub velocity: DVec2,
    /// Signed charge.
    pub charge: f64,
    /// Inertial mass, strictly positive.
    pub mass: f64,
}

impl Particle {
    /// Creates a particle at rest with unit mass.
    #[inline]
    pub const fn new(position: DVec2, charge: f64) -> Self {
        Self {
            position,
            velocity: DVec2::ZERO,
            charge,
            mass: 1.0,
        }
    }

    /// Returns this particle with the given velocity.
    #[inline]
    pub fn with_velocity(mut self, velocity: DVec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Returns this particle with the given mass.
    #[inline]
    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    /// Whether the particle carries no charge and therefore takes no part in the interaction.
    #[inline]
    pub fn is_neutral(&self) -> bool {
        self.charge == 0.0
    }

    /// Kinetic energy `m v² / 2`.
    #[inline]
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.length_squared()
    }

    /// Whether position, velocity, charge and mass are all finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.position.is_finite()
            && self.velocity.is_finite()
            && self.charge.is_finite()
            && self.mass.is_finite()
    }
}
