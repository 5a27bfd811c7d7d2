use std::vec::IntoIter;

use glam::DVec2;

use crate::{
    compute_method::ComputeMethod,
    particle::{Charged, IntoPointCharge, PointCharge},
    vector::Vector,
};

/// An iterator of items of type `U` and the net force computed on them.
///
/// It is returned by both [`forces`](Compute::forces) and [`map_forces`](MapCompute::map_forces).
#[derive(Debug)]
pub struct Forces<U, V> {
    iter: IntoIter<U>,
    forces: IntoIter<DVec2>,
    vector: std::marker::PhantomData<V>,
}

impl<U, V: Vector> Iterator for Forces<U, V> {
    type Item = (U, V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.iter
            .next()
            .zip(self.forces.next().map(V::from_internal))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<U, V: Vector> ExactSizeIterator for Forces<U, V> {}

impl<U, V> Forces<U, V> {
    fn new<C: ComputeMethod>(items: Vec<U>, charges: Vec<PointCharge>, cm: &mut C) -> Self {
        Self {
            forces: cm.compute(&charges).into_iter(),
            iter: items.into_iter(),
            vector: std::marker::PhantomData,
        }
    }
}

/// Blanket implementation for iterators of [`Charged`] items to compute the net force on them.
pub trait Compute<P>: Iterator<Item = P> + Sized
where
    P: Charged,
    P::Vector: Vector,
{
    /// Computes the net force on the iterated [`Charged`] items using the provided
    /// [`ComputeMethod`].
    ///
    /// The items are returned zipped with their force. The computation is eager: all the
    /// forces are known before the first item is yielded.
    ///
    /// # Example
    /// ```
    /// # use coulomb::prelude::*;
    /// # use glam::DVec2;
    /// let charges = vec![(DVec2::ZERO, 1.0), (DVec2::X, 1.0)];
    /// let mut cm = sequential::BruteForce(Coulomb::new(1.0, 0.0));
    ///
    /// let mut forces = charges.iter().forces(&mut cm);
    ///
    /// assert_eq!(forces.next().unwrap(), (&(DVec2::ZERO, 1.0), DVec2::NEG_X));
    /// assert_eq!(forces.next().unwrap(), (&(DVec2::X, 1.0), DVec2::X));
    /// ```
    #[inline]
    fn forces<C>(self, cm: &mut C) -> Forces<P, P::Vector>
    where
        C: ComputeMethod,
    {
        let items: Vec<_> = self.collect();
        let charges = items.iter().map(|i| i.point_charge()).collect();

        Forces::new(items, charges, cm)
    }
}

/// Blanket implementation for iterators of any type to compute the net force on them.
pub trait MapCompute<P>: Iterator + Sized
where
    P: Charged,
    P::Vector: Vector,
{
    /// Computes the net force on the iterated items using the provided [`ComputeMethod`] after
    /// mapping them to a [`Charged`] value with the closure. Tuples of a vector and a charge
    /// implement [`Charged`].
    ///
    /// # Example
    /// ```
    /// # use coulomb::prelude::*;
    /// // Items are arrays of x, y and charge.
    /// let ions = vec![[0.0, 0.0, 1.0], [0.0, 2.0, -1.0]];
    /// let mut cm = sequential::BruteForce(Coulomb::new(4.0, 0.0));
    ///
    /// let mut forces = ions
    ///     .iter()
    ///     .map_forces(|ion| ([ion[0], ion[1]], ion[2]), &mut cm);
    ///
    /// assert_eq!(forces.next().unwrap(), (&[0.0, 0.0, 1.0], [0.0, 1.0]));
    /// assert_eq!(forces.next().unwrap(), (&[0.0, 2.0, -1.0], [0.0, -1.0]));
    /// ```
    #[inline]
    fn map_forces<F, C>(self, mut f: F, cm: &mut C) -> Forces<Self::Item, P::Vector>
    where
        F: FnMut(&Self::Item) -> P,
        C: ComputeMethod,
    {
        let items: Vec<_> = self.collect();
        let charges = items.iter().map(|i| f(i).point_charge()).collect();

        Forces::new(items, charges, cm)
    }
}

impl<P, I> Compute<P> for I
where
    P: Charged,
    P::Vector: Vector,
    I: Iterator<Item = P>,
{
}

impl<P, I> MapCompute<P> for I
where
    P: Charged,
    P::Vector: Vector,
    I: Iterator,
{
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute_method::{sequential, Coulomb};
    use crate::particle::Particle;

    #[test]
    fn forces_keep_item_order() {
        let mut particles = vec![
            Particle::new(DVec2::new(0.0, 0.0), 1.0),
            Particle::new(DVec2::new(5.0, 0.0), 0.0),
            Particle::new(DVec2::new(0.0, 5.0), -2.0),
        ];
        let mut cm = sequential::BruteForce(Coulomb::new(1.0, 1.0));

        let results: Vec<_> = particles.iter_mut().forces(&mut cm).collect();

        assert_eq!(results.len(), 3);
        assert_eq!(results[1].1, DVec2::ZERO);
        assert!(results[0].1.y > 0.0);
        assert!(results[2].1.y < 0.0);
        assert_eq!(results[0].1, -results[2].1);
    }
}
