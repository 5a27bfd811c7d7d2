use crate::particle::Particle;

/// What the rendering collaborator needs to draw one particle.
///
/// The layout is `#[repr(C)]` and [`Pod`](bytemuck::Pod), so a slice of points can be handed to a
/// vertex buffer as is with [`bytemuck::cast_slice`].
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DrawPoint {
    /// Position in the simulated area.
    pub position: [f32; 2],
    /// Signed charge.
    pub charge: f32,
    /// Colour interpolation factor in `[0, 1]`: 0 for the most negative charge, 0.5 for a neutral
    /// particle and 1 for the most positive charge.
    pub color: f32,
    /// Relative size in `[0, 1]` following the mass of the particle.
    pub size: f32,
}

impl DrawPoint {
    /// Creates the draw record of a particle.
    ///
    /// `max_charge` is the largest charge magnitude of the population and `mass_range` its mass
    /// range; values outside of them are clamped.
    pub fn new(particle: &Particle, max_charge: f64, mass_range: (f64, f64)) -> Self {
        let color = if max_charge > 0.0 {
            (particle.charge / max_charge + 1.0) / 2.0
        } else {
            0.5
        };

        let (min_mass, max_mass) = mass_range;
        let size = if max_mass > min_mass {
            (particle.mass - min_mass) / (max_mass - min_mass)
        } else {
            1.0
        };

        Self {
            position: particle.position.as_vec2().to_array(),
            charge: particle.charge as f32,
            color: color.clamp(0.0, 1.0) as f32,
            size: size.clamp(0.0, 1.0) as f32,
        }
    }
}
