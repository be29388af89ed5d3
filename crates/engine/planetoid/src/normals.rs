//! Per-vertex normal reconstruction
//!
//! Normals follow the right-handed convention: triangle `(a, b, c)` faces
//! along `(b - a) × (c - a)`.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Which vertices count as shared when averaging face normals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalMode {
    /// Only vertices shared through the index buffer
    #[default]
    Faceted,
    /// Also vertices at bit-identical positions
    Smooth,
}

/// Unnormalised face normal of triangle `(a, b, c)`.
#[inline]
pub fn face_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (b - a).cross(c - a)
}

/// Compute one normal per vertex according to `mode`.
pub fn compute_normals(positions: &[Vec3], indices: &[u32], mode: NormalMode) -> Vec<Vec3> {
    match mode {
        NormalMode::Faceted => vertex_normals(positions, indices),
        NormalMode::Smooth => smooth_normals(positions, indices),
    }
}

/// Each vertex gets the normalised sum of the unit normals of the faces that
/// index it. Degenerate faces add nothing; unreferenced vertices get zero.
///
/// # Panics
/// If `indices.len()` is not a multiple of 3 or an index is out of range.
pub fn vertex_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    assert_eq!(indices.len() % 3, 0, "index buffer is not made of triangles");

    let mut normals = vec![Vec3::ZERO; positions.len()];
    for triangle in indices.chunks_exact(3) {
        let [a, b, c] = [triangle[0], triangle[1], triangle[2]].map(|i| i as usize);
        let normal = face_normal(positions[a], positions[b], positions[c]).normalize_or_zero();
        normals[a] += normal;
        normals[b] += normal;
        normals[c] += normal;
    }

    for normal in &mut normals {
        *normal = normal.normalize_or_zero();
    }
    normals
}

/// Like [`vertex_normals`], but vertices with the same position share their
/// accumulated normal even when the index buffer keeps them apart.
pub fn smooth_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    assert_eq!(indices.len() % 3, 0, "index buffer is not made of triangles");

    // Map every vertex onto the first vertex at its position
    let mut first_at: HashMap<[u32; 3], usize> = HashMap::with_capacity(positions.len() / 3);
    let welded: Vec<usize> = positions
        .iter()
        .enumerate()
        .map(|(i, p)| *first_at.entry(position_key(*p)).or_insert(i))
        .collect();

    let mut sums = vec![Vec3::ZERO; positions.len()];
    for triangle in indices.chunks_exact(3) {
        let [a, b, c] = [triangle[0], triangle[1], triangle[2]].map(|i| i as usize);
        let normal = face_normal(positions[a], positions[b], positions[c]).normalize_or_zero();
        for vertex in [a, b, c] {
            sums[welded[vertex]] += normal;
        }
    }

    tracing::debug!(
        "Welded {} vertices into {} positions for smooth normals",
        positions.len(),
        first_at.len()
    );

    welded
        .iter()
        .map(|&slot| sums[slot].normalize_or_zero())
        .collect()
}

/// Hash key for a position; `-0.0` and `0.0` share a key.
fn position_key(p: Vec3) -> [u32; 3] {
    [p.x, p.y, p.z].map(|c| (c + 0.0).to_bits())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    #[test]
    fn test_counter_clockwise_faces_up() {
        let n = face_normal(Vec3::ZERO, Vec3::X, Vec3::Y);
        assert_eq!(n, Vec3::Z);
    }

    #[test]
    fn test_one_normal_per_vertex() {
        let positions = vec![Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::new(5.0, 5.0, 5.0)];
        let normals = vertex_normals(&positions, &[0, 1, 2]);
        assert_eq!(normals.len(), 4);
        assert!((normals[0] - Vec3::Z).length() < EPS);
        assert_eq!(normals[3], Vec3::ZERO);
    }

    #[test]
    fn test_shared_index_is_averaged() {
        // Two faces of a right-angled roof sharing the edge 0-1
        let positions = vec![
            Vec3::ZERO,
            Vec3::X,
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 0.0, -1.0),
        ];
        let indices = [0, 1, 2, 0, 1, 3];
        let normals = vertex_normals(&positions, &indices);
        let expected = (Vec3::Z + Vec3::Y).normalize();
        assert!((normals[0] - expected).length() < EPS);
        assert!((normals[1] - expected).length() < EPS);
        assert!((normals[2] - Vec3::Z).length() < EPS);
        assert!((normals[3] - Vec3::Y).length() < EPS);
    }

    #[test]
    fn test_degenerate_triangle_gives_zero() {
        let positions = vec![Vec3::ONE, Vec3::ONE, Vec3::ONE];
        let normals = vertex_normals(&positions, &[0, 1, 2]);
        assert!(normals.iter().all(|n| *n == Vec3::ZERO));
    }

    #[test]
    fn test_smooth_welds_equal_positions() {
        // Same roof, but every triangle owns its vertices
        let positions = vec![
            Vec3::ZERO,
            Vec3::X,
            Vec3::Y,
            Vec3::ZERO,
            Vec3::X,
            Vec3::new(0.0, 0.0, -1.0),
        ];
        let indices = [0, 1, 2, 3, 4, 5];

        let faceted = compute_normals(&positions, &indices, NormalMode::Faceted);
        assert!((faceted[0] - Vec3::Z).length() < EPS);
        assert!((faceted[3] - Vec3::Y).length() < EPS);

        let smooth = compute_normals(&positions, &indices, NormalMode::Smooth);
        let expected = (Vec3::Z + Vec3::Y).normalize();
        assert!((smooth[0] - expected).length() < EPS);
        assert!((smooth[3] - expected).length() < EPS);
        assert!((smooth[1] - expected).length() < EPS);
        assert!((smooth[4] - expected).length() < EPS);
        assert!((smooth[2] - Vec3::Z).length() < EPS);
        assert!((smooth[5] - Vec3::Y).length() < EPS);
    }

    #[test]
    fn test_negative_zero_shares_key() {
        assert_eq!(
            position_key(Vec3::new(-0.0, 1.0, 0.0)),
            position_key(Vec3::new(0.0, 1.0, -0.0))
        );
    }
}
