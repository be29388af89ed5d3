//! Regular sampling lattice
//!
//! Points are stored flat, addressed as `x + resolution * y + resolution² * z`.

use crate::error::{PlanetError, Result};
use crate::field::ScalarField;
use glam::Vec3;

/// A sampled position and the field value there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticePoint {
    pub position: Vec3,
    pub value: f32,
}

/// `resolution³` field samples evenly spanning `[-radius, radius]³`.
#[derive(Debug, Clone)]
pub struct Lattice {
    resolution: usize,
    radius: f32,
    points: Vec<LatticePoint>,
}

/// Check the lattice parameters without sampling anything.
pub fn validate_dimensions(resolution: usize, radius: f32) -> Result<()> {
    if resolution < 2 {
        return Err(PlanetError::InvalidConfig(format!(
            "resolution must be at least 2, got {}",
            resolution
        )));
    }
    if point_count(resolution).is_none() {
        return Err(PlanetError::InvalidConfig(format!(
            "resolution {} needs more lattice points than fit in memory",
            resolution
        )));
    }
    if radius <= 0.0 || !radius.is_finite() {
        return Err(PlanetError::InvalidConfig(format!(
            "radius must be a positive finite number, got {}",
            radius
        )));
    }
    Ok(())
}

/// `resolution³`, or `None` if it overflows `usize`
fn point_count(resolution: usize) -> Option<usize> {
    resolution
        .checked_mul(resolution)?
        .checked_mul(resolution)
}

/// Position of lattice coordinate `i` along one axis
#[inline]
fn axis_position(i: usize, resolution: usize, radius: f32) -> f32 {
    let axis_min = -radius;
    let axis_range = 2.0 * radius;
    axis_min + axis_range * i as f32 / (resolution - 1) as f32
}

impl Lattice {
    /// Evaluate `field` at every lattice point.
    ///
    /// With `parallel` set (and the `parallel` feature enabled) points are
    /// sampled concurrently; the result is identical either way.
    pub fn sample<F>(resolution: usize, radius: f32, field: &F, parallel: bool) -> Result<Self>
    where
        F: ScalarField + Sync,
    {
        validate_dimensions(resolution, radius)?;

        let sample_point = |index: usize| {
            let x = index % resolution;
            let y = (index / resolution) % resolution;
            let z = index / (resolution * resolution);
            let position = Vec3::new(
                axis_position(x, resolution, radius),
                axis_position(y, resolution, radius),
                axis_position(z, resolution, radius),
            );
            LatticePoint {
                position,
                value: field.value(position),
            }
        };

        let count = resolution * resolution * resolution;
        let points = if parallel {
            sample_parallel(count, sample_point)
        } else {
            (0..count).map(sample_point).collect()
        };

        tracing::debug!(
            "Sampled {} lattice points ({}³, radius {})",
            count,
            resolution,
            radius
        );

        Ok(Self {
            resolution,
            radius,
            points,
        })
    }

    /// Wrap already sampled points.
    ///
    /// # Panics
    /// If `points.len() != resolution³` or `resolution < 2`.
    pub fn from_points(resolution: usize, radius: f32, points: Vec<LatticePoint>) -> Self {
        assert!(resolution >= 2, "lattice needs at least 2 points per axis");
        assert_eq!(
            points.len(),
            resolution * resolution * resolution,
            "lattice of resolution {} needs resolution³ points",
            resolution
        );
        Self {
            resolution,
            radius,
            points,
        }
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Distance between neighbouring points along an axis
    pub fn step(&self) -> f32 {
        2.0 * self.radius / (self.resolution - 1) as f32
    }

    pub fn points(&self) -> &[LatticePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Flat index of lattice coordinate `(x, y, z)`
    #[inline]
    pub fn index(&self, x: usize, y: usize, z: usize) -> usize {
        x + self.resolution * y + self.resolution * self.resolution * z
    }

    #[inline]
    pub fn point(&self, x: usize, y: usize, z: usize) -> &LatticePoint {
        &self.points[self.index(x, y, z)]
    }

    /// Number of cells along one axis
    pub fn cells_per_axis(&self) -> usize {
        self.resolution - 1
    }

    pub fn cell_count(&self) -> usize {
        self.cells_per_axis().pow(3)
    }

    /// Flat indices of the 8 corners of the cell whose minimum corner is
    /// `(x, y, z)`, in corner order `p, +x, +y, +xy, +z, +xz, +yz, +xyz`.
    #[inline]
    pub fn cell_corners(&self, x: usize, y: usize, z: usize) -> [usize; 8] {
        let res = self.resolution;
        let res2 = res * res;
        let p = self.index(x, y, z);
        [
            p,
            p + 1,
            p + res,
            p + res + 1,
            p + res2,
            p + res2 + 1,
            p + res + res2,
            p + res + res2 + 1,
        ]
    }
}

#[cfg(feature = "parallel")]
fn sample_parallel<S>(count: usize, sample_point: S) -> Vec<LatticePoint>
where
    S: Fn(usize) -> LatticePoint + Sync + Send,
{
    use rayon::prelude::*;
    (0..count).into_par_iter().map(sample_point).collect()
}

#[cfg(not(feature = "parallel"))]
fn sample_parallel<S>(count: usize, sample_point: S) -> Vec<LatticePoint>
where
    S: Fn(usize) -> LatticePoint,
{
    (0..count).map(sample_point).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn distance_field(p: Vec3) -> f32 {
        p.length()
    }

    #[test]
    fn test_rejects_small_resolution() {
        let err = Lattice::sample(1, 1.0, &distance_field, false).unwrap_err();
        assert!(matches!(err, PlanetError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_bad_radius() {
        for radius in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let err = Lattice::sample(4, radius, &distance_field, false).unwrap_err();
            assert!(matches!(err, PlanetError::InvalidConfig(_)), "radius {}", radius);
        }
    }

    #[test]
    fn test_rejects_resolution_whose_cube_overflows() {
        // resolution³ exceeds usize::MAX on 32 and 64 bit targets alike
        let resolution = 1usize << (usize::BITS / 3 + 1);
        let err = validate_dimensions(resolution, 1.0).unwrap_err();
        assert!(matches!(err, PlanetError::InvalidConfig(_)));

        let fits = 1usize << (usize::BITS / 3 - 1);
        assert!(validate_dimensions(fits, 1.0).is_ok());
    }

    #[test]
    fn test_point_count_and_extremes() {
        let lattice = Lattice::sample(5, 2.0, &distance_field, false).unwrap();
        assert_eq!(lattice.len(), 125);
        assert_eq!(lattice.point(0, 0, 0).position, Vec3::splat(-2.0));
        assert_eq!(lattice.point(4, 4, 4).position, Vec3::splat(2.0));
        assert_eq!(lattice.point(2, 2, 2).position, Vec3::ZERO);
        assert_eq!(lattice.step(), 1.0);
    }

    #[test]
    fn test_index_is_x_fastest() {
        let lattice = Lattice::sample(3, 1.0, &distance_field, false).unwrap();
        assert_eq!(lattice.index(1, 0, 0), 1);
        assert_eq!(lattice.index(0, 1, 0), 3);
        assert_eq!(lattice.index(0, 0, 1), 9);
        assert_eq!(lattice.points()[1].position, Vec3::new(0.0, -1.0, -1.0));
        assert_eq!(lattice.points()[3].position, Vec3::new(-1.0, 0.0, -1.0));
        assert_eq!(lattice.points()[9].position, Vec3::new(-1.0, -1.0, 0.0));
    }

    #[test]
    fn test_values_come_from_field() {
        let lattice = Lattice::sample(3, 1.0, &distance_field, false).unwrap();
        for point in lattice.points() {
            assert_eq!(point.value, point.position.length());
        }
    }

    #[test]
    fn test_cell_corners_offsets() {
        let lattice = Lattice::sample(4, 1.0, &distance_field, false).unwrap();
        assert_eq!(lattice.cell_count(), 27);
        let corners = lattice.cell_corners(1, 1, 1);
        let p = lattice.index(1, 1, 1);
        assert_eq!(corners, [p, p + 1, p + 4, p + 5, p + 16, p + 17, p + 20, p + 21]);
    }

    #[test]
    fn test_parallel_sampling_matches_serial() {
        let serial = Lattice::sample(7, 3.0, &distance_field, false).unwrap();
        let parallel = Lattice::sample(7, 3.0, &distance_field, true).unwrap();
        assert_eq!(serial.points(), parallel.points());
    }

    #[test]
    #[should_panic]
    fn test_from_points_checks_length() {
        Lattice::from_points(3, 1.0, Vec::new());
    }
}
