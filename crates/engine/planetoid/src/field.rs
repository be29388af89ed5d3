//! Planet scalar field
//!
//! A sphere of `radius` around the origin, hollowed out by cave noise and
//! roughened by mountain noise. Each noise term is replaced by the sphere
//! distance on the side of the surface where it must not act:
//!
//! ```text
//! sdf            = radius - |p|
//! cave_value     = sdf < 0 ? caves(p / divisor)     : sdf
//! mountain_value = sdf > 0 ? mountains(p / divisor) : sdf
//! value          = sdf - cave_value + mountain_value
//! ```
//!
//! with `divisor = resolution / radius`.

use crate::noise::NoiseSource;
use glam::Vec3;

/// Anything that assigns a scalar to a point in space.
pub trait ScalarField {
    fn value(&self, position: Vec3) -> f32;
}

impl<F> ScalarField for F
where
    F: Fn(Vec3) -> f32,
{
    fn value(&self, position: Vec3) -> f32 {
        self(position)
    }
}

/// Signed distance to a sphere centred at the origin, positive inside.
#[inline]
pub fn sphere_sdf(radius: f32, position: Vec3) -> f32 {
    radius - Vec3::ZERO.distance(position)
}

/// Sphere blended with cave and mountain noise.
#[derive(Debug, Clone)]
pub struct PlanetField<N> {
    radius: f32,
    divisor: f32,
    caves: N,
    mountains: N,
}

impl<N: NoiseSource> PlanetField<N> {
    /// Build the field for a lattice of `resolution` points per axis.
    ///
    /// `resolution` only scales the noise lookup; it does not bound where the
    /// field can be evaluated.
    pub fn new(resolution: usize, radius: f32, caves: N, mountains: N) -> Self {
        Self {
            radius,
            divisor: resolution as f32 / radius,
            caves,
            mountains,
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Scale applied to positions before sampling noise
    pub fn divisor(&self) -> f32 {
        self.divisor
    }
}

impl<N: NoiseSource> ScalarField for PlanetField<N> {
    fn value(&self, position: Vec3) -> f32 {
        let sdf = sphere_sdf(self.radius, position);
        let noise_position = position / self.divisor;

        let cave_value = if sdf < 0.0 {
            self.caves.sample(noise_position)
        } else {
            sdf
        };
        let mountain_value = if sdf > 0.0 {
            self.mountains.sample(noise_position)
        } else {
            sdf
        };

        sdf - cave_value + mountain_value
    }
}
