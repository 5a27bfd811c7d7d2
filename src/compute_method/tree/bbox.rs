use glam::DVec2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct BoundingBox {
    pub(crate) min: DVec2,
    pub(crate) max: DVec2,
}

impl BoundingBox {
    pub(crate) const IDENTITY: Self = Self {
        min: DVec2::splat(f64::INFINITY),
        max: DVec2::splat(f64::NEG_INFINITY),
    };

    #[inline]
    pub(crate) const fn new(min: DVec2, max: DVec2) -> Self {
        Self { min, max }
    }

    pub(crate) fn containing(positions: impl Iterator<Item = DVec2>) -> Self {
        let mut result = Self::IDENTITY;
        for position in positions {
            result.extend(position);
        }
        result
    }

    /// Smallest square box centred on the box containing the positions.
    pub(crate) fn square_containing(positions: impl Iterator<Item = DVec2>) -> Self {
        let result = Self::containing(positions);

        let center = result.center();
        let half_length = DVec2::splat(result.size().max_element() / 2.0);

        Self::new(center - half_length, center + half_length)
    }

    #[inline]
    pub(crate) fn extend(&mut self, with: DVec2) {
        self.min = self.min.min(with);
        self.max = self.max.max(with);
    }

    #[inline]
    pub(crate) fn center(&self) -> DVec2 {
        (self.min + self.max) / 2.0
    }

    #[inline]
    pub(crate) fn size(&self) -> DVec2 {
        self.max - self.min
    }

    #[inline]
    pub(crate) fn width(&self) -> f64 {
        self.size().x
    }

    #[inline]
    pub(crate) fn contains(&self, position: DVec2) -> bool {
        position.cmpge(self.min).all() && position.cmple(self.max).all()
    }

    /// Whether the centre lies strictly inside the box on both axes, so that subdividing makes
    /// every quadrant smaller than this box.
    #[inline]
    pub(crate) fn is_divisible(&self) -> bool {
        let center = self.center();
        center.cmpgt(self.min).all() && center.cmplt(self.max).all()
    }

    /// Index of the quadrant a position belongs to, in the order of [`BoundingBox::subdivide`].
    #[inline]
    pub(crate) fn quadrant_of(&self, position: DVec2) -> usize {
        let center = self.center();
        let right = position.x > center.x;
        let top = position.y > center.y;

        match (right, top) {
            (true, true) => 0,
            (false, true) => 1,
            (true, false) => 2,
            (false, false) => 3,
        }
    }

    /// North-east, north-west, south-east and south-west quadrants.
    pub(crate) fn subdivide(&self) -> [Self; 4] {
        let center = self.center();
        let (min, max) = (self.min, self.max);

        [
            Self::new(center, max),
            Self::new(DVec2::new(min.x, center.y), DVec2::new(center.x, max.y)),
            Self::new(DVec2::new(center.x, min.y), DVec2::new(max.x, center.y)),
            Self::new(min, center),
        ]
    }
}
