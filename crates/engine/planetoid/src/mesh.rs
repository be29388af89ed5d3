//! Assembled planet mesh and the flat buffers handed to a renderer

use crate::march::SurfaceChunk;
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Diffuse colour of the planet surface (sandy brown)
pub const SURFACE_COLOR: [f32; 3] = [0.773, 0.647, 0.486];

/// Triangle mesh with one position, uv and normal per vertex.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanetMesh {
    pub positions: Vec<Vec3>,
    pub indices: Vec<u32>,
    pub uvs: Vec<Vec2>,
    pub normals: Vec<Vec3>,
}

impl PlanetMesh {
    /// Package a triangulated surface with its normals.
    ///
    /// The buffer invariants are checked in debug builds only; breaking them
    /// is a bug upstream, not an input error.
    pub fn assemble(surface: SurfaceChunk, normals: Vec<Vec3>) -> Self {
        let mesh = Self {
            positions: surface.positions,
            indices: surface.indices,
            uvs: surface.uvs,
            normals,
        };
        debug_assert!(mesh.check_invariants().is_ok(), "{:?}", mesh.check_invariants());
        mesh
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Corner positions of every triangle
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).map(move |t| {
            [
                self.positions[t[0] as usize],
                self.positions[t[1] as usize],
                self.positions[t[2] as usize],
            ]
        })
    }

    /// Describe the first broken buffer invariant, if any.
    pub fn check_invariants(&self) -> Result<(), String> {
        let vertices = self.positions.len();
        if self.uvs.len() != vertices {
            return Err(format!("{} uvs for {} vertices", self.uvs.len(), vertices));
        }
        if self.normals.len() != vertices {
            return Err(format!(
                "{} normals for {} vertices",
                self.normals.len(),
                vertices
            ));
        }
        if self.indices.len() % 3 != 0 {
            return Err(format!("{} indices is not whole triangles", self.indices.len()));
        }
        if let Some(index) = self.indices.iter().find(|&&i| i as usize >= vertices) {
            return Err(format!("index {} out of range for {} vertices", index, vertices));
        }
        Ok(())
    }

    pub fn stats(&self) -> MeshStats {
        let (bounds_min, bounds_max) = if self.positions.is_empty() {
            (Vec3::ZERO, Vec3::ZERO)
        } else {
            self.positions.iter().fold(
                (Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)),
                |(min, max), p| (min.min(*p), max.max(*p)),
            )
        };

        let degenerate_triangles = self
            .triangles()
            .filter(|[a, b, c]| (*b - *a).cross(*c - *a) == Vec3::ZERO)
            .count();

        MeshStats {
            vertices: self.vertex_count(),
            triangles: self.triangle_count(),
            degenerate_triangles,
            bounds_min,
            bounds_max,
        }
    }

    /// Flatten into the parallel arrays a renderer consumes.
    pub fn to_buffers(&self) -> MeshBuffers {
        MeshBuffers {
            positions: self.positions.iter().flat_map(|p| p.to_array()).collect(),
            indices: self.indices.clone(),
            uvs: self.uvs.iter().flat_map(|uv| uv.to_array()).collect(),
            normals: self.normals.iter().flat_map(|n| n.to_array()).collect(),
            color: SURFACE_COLOR,
        }
    }
}

/// Flat mesh buffers: `positions[3N]`, `indices[3T]`, `uvs[2N]`, `normals[3N]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshBuffers {
    pub positions: Vec<f32>,
    pub indices: Vec<u32>,
    pub uvs: Vec<f32>,
    pub normals: Vec<f32>,
    pub color: [f32; 3],
}

impl MeshBuffers {
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Summary numbers for logging and the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MeshStats {
    pub vertices: usize,
    pub triangles: usize,
    pub degenerate_triangles: usize,
    pub bounds_min: Vec3,
    pub bounds_max: Vec3,
}

impl std::fmt::Display for MeshStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} vertices, {} triangles ({} degenerate), bounds [{:.3}, {:.3}, {:.3}] - [{:.3}, {:.3}, {:.3}]",
            self.vertices,
            self.triangles,
            self.degenerate_triangles,
            self.bounds_min.x,
            self.bounds_min.y,
            self.bounds_min.z,
            self.bounds_max.x,
            self.bounds_max.y,
            self.bounds_max.z,
        )
    }
}
