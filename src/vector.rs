use glam::DVec2;

/// Arbitrary 2D vectors that can be converted from and into an array of two `f64`.
///
/// Any such type can be used as the position of a [`Charged`](crate::particle::Charged) item; the
/// force computation itself always runs on [`DVec2`].
pub trait Vector: Into<[f64; 2]> + From<[f64; 2]> {
    /// Convert the arbitrary vector into its internal representation.
    fn into_internal(self) -> DVec2;

    /// Convert the internal representation back into the arbitrary vector.
    fn from_internal(vector: DVec2) -> Self;
}

impl<V> Vector for V
where
    V: Into<[f64; 2]> + From<[f64; 2]>,
{
    #[inline]
    fn into_internal(self) -> DVec2 {
        DVec2::from(self.into())
    }

    #[inline]
    fn from_internal(vector: DVec2) -> Self {
        Self::from(vector.to_array())
    }
}
