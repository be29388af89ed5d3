//! Marching cubes over a sampled lattice
//!
//! Every cell is handled on its own: classify the 8 corners against
//! [`ISOLEVEL`], look up the crossed edges, place one vertex per crossed
//! edge, then emit the triangles listed in the triangulation table. Cells
//! share nothing, so a lattice can be split into z-slabs and triangulated
//! concurrently; slabs are concatenated in order, which keeps the output
//! identical to a serial pass.

use crate::lattice::Lattice;
use crate::tables::{
    CORNER_BITS, EDGE_CORNERS, EDGE_TABLE, MAX_CELL_TRIANGLES, TRI_SENTINEL, TRI_TABLE,
};
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Surface threshold. Corners strictly below it are classified as set.
pub const ISOLEVEL: f32 = 0.0;

/// Texture coordinates given to the three corners of every emitted triangle.
pub const TRIANGLE_UVS: [Vec2; 3] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(0.0, 1.0),
    Vec2::new(1.0, 1.0),
];

/// Where a vertex is placed along a crossed edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpolationMode {
    /// Edge midpoint regardless of the corner values
    #[default]
    Midpoint,
    /// `mu = (isolevel - a) / (b - a)`, the textbook placement
    Weighted,
}

/// The 8 corner samples of one cell, in lattice corner order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub positions: [Vec3; 8],
    pub values: [f32; 8],
}

impl Cell {
    /// Read the cell whose minimum corner is lattice coordinate `(x, y, z)`.
    pub fn gather(lattice: &Lattice, x: usize, y: usize, z: usize) -> Self {
        let corners = lattice.cell_corners(x, y, z);
        let points = lattice.points();
        let mut positions = [Vec3::ZERO; 8];
        let mut values = [0.0; 8];
        for (corner, &index) in corners.iter().enumerate() {
            positions[corner] = points[index].position;
            values[corner] = points[index].value;
        }
        Self { positions, values }
    }

    pub fn mask(&self) -> u8 {
        classify(&self.values)
    }
}

/// 8-bit classification mask of a cell's corner values.
pub fn classify(values: &[f32; 8]) -> u8 {
    values
        .iter()
        .zip(CORNER_BITS)
        .filter(|(value, _)| **value < ISOLEVEL)
        .fold(0, |mask, (_, bit)| mask | bit)
}

/// 12-bit mask of the edges crossed for a classification mask.
#[inline]
pub fn edge_mask(mask: u8) -> u16 {
    EDGE_TABLE[mask as usize]
}

/// Vertices on the crossed edges of one cell, indexed by edge number.
pub type EdgeVertices = [Option<Vec3>; 12];

/// Place a vertex on the edge from `a` to `b`.
#[inline]
pub fn interpolate_edge(
    a: Vec3,
    b: Vec3,
    value_a: f32,
    value_b: f32,
    mode: InterpolationMode,
) -> Vec3 {
    match mode {
        InterpolationMode::Midpoint => (a + b) * 0.5,
        InterpolationMode::Weighted => {
            let delta = value_b - value_a;
            if delta == 0.0 {
                return (a + b) * 0.5;
            }
            let mu = (ISOLEVEL - value_a) / delta;
            a + (b - a) * mu
        }
    }
}

/// Compute a vertex for every edge set in `edges`.
pub fn interpolate_edges(cell: &Cell, edges: u16, mode: InterpolationMode) -> EdgeVertices {
    let mut vertices = [None; 12];
    for (edge, [a, b]) in EDGE_CORNERS.iter().copied().enumerate() {
        if edges & (1 << edge) != 0 {
            vertices[edge] = Some(interpolate_edge(
                cell.positions[a],
                cell.positions[b],
                cell.values[a],
                cell.values[b],
                mode,
            ));
        }
    }
    vertices
}

/// Triangles emitted by a run of cells, not yet indexed across runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfaceChunk {
    pub positions: Vec<Vec3>,
    pub indices: Vec<u32>,
    pub uvs: Vec<Vec2>,
}

impl SurfaceChunk {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Append one unshared triangle.
    pub fn push_triangle(&mut self, corners: [Vec3; 3]) {
        let base = u32::try_from(self.positions.len())
            .ok()
            .filter(|base| base.checked_add(2).is_some())
            .unwrap_or_else(|| panic!("vertex count exceeds the u32 index range"));

        self.positions.extend_from_slice(&corners);
        self.indices.extend_from_slice(&[base, base + 1, base + 2]);
        self.uvs.extend_from_slice(&TRIANGLE_UVS);
    }

    /// Append `other`, rebasing its indices past the vertices already here.
    pub fn append(&mut self, other: SurfaceChunk) {
        let offset = u32::try_from(self.positions.len())
            .unwrap_or_else(|_| panic!("vertex count exceeds the u32 index range"));

        self.positions.extend(other.positions);
        self.uvs.extend(other.uvs);
        self.indices.extend(other.indices.into_iter().map(|index| {
            index
                .checked_add(offset)
                .unwrap_or_else(|| panic!("vertex count exceeds the u32 index range"))
        }));
    }
}

/// Emit the triangles of classification `mask` using the edge vertices of
/// the same cell. Returns the number of triangles emitted.
///
/// # Panics
/// If the table row names an edge that has no vertex. That can only happen
/// when `edges` was not computed from `mask`.
pub fn emit_triangles(mask: u8, edges: &EdgeVertices, out: &mut SurfaceChunk) -> usize {
    let row = &TRI_TABLE[mask as usize];
    let vertex = |entry: i8| -> Vec3 {
        let edge = usize::try_from(entry)
            .unwrap_or_else(|_| panic!("malformed triangle table row {}", mask));
        edges[edge].unwrap_or_else(|| {
            panic!(
                "triangle table row {} uses edge {} which has no vertex",
                mask, edge
            )
        })
    };

    let mut emitted = 0;
    for triple in row.chunks_exact(3) {
        if triple[0] == TRI_SENTINEL {
            break;
        }
        out.push_triangle([vertex(triple[0]), vertex(triple[1]), vertex(triple[2])]);
        emitted += 1;
    }
    debug_assert!(emitted <= MAX_CELL_TRIANGLES);
    emitted
}

/// Classify, interpolate and emit one cell. Returns the triangle count.
pub fn polygonise(cell: &Cell, mode: InterpolationMode, out: &mut SurfaceChunk) -> usize {
    let mask = cell.mask();
    let edges = edge_mask(mask);
    if edges == 0 {
        return 0;
    }
    let vertices = interpolate_edges(cell, edges, mode);
    emit_triangles(mask, &vertices, out)
}

/// Runs marching cubes over a whole lattice.
#[derive(Debug, Clone, Copy, Default)]
pub struct Triangulator {
    interpolation: InterpolationMode,
    parallel: bool,
}

impl Triangulator {
    pub fn new(interpolation: InterpolationMode) -> Self {
        Self {
            interpolation,
            parallel: false,
        }
    }

    /// Process z-slabs concurrently (needs the `parallel` feature)
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn interpolation(&self) -> InterpolationMode {
        self.interpolation
    }

    /// Triangulate every cell, z-major then y then x.
    pub fn triangulate(&self, lattice: &Lattice) -> SurfaceChunk {
        let slabs = lattice.cells_per_axis();

        let surface = if self.parallel {
            self.triangulate_parallel(lattice, slabs)
        } else {
            let mut surface = SurfaceChunk::new();
            for z in 0..slabs {
                self.slab_into(lattice, z, &mut surface);
            }
            surface
        };

        tracing::debug!(
            "Triangulated {} cells into {} triangles",
            lattice.cell_count(),
            surface.triangle_count()
        );
        surface
    }

    /// Triangulate the cells of one z-slab into `out`.
    fn slab_into(&self, lattice: &Lattice, z: usize, out: &mut SurfaceChunk) {
        let cells = lattice.cells_per_axis();
        for y in 0..cells {
            for x in 0..cells {
                let cell = Cell::gather(lattice, x, y, z);
                polygonise(&cell, self.interpolation, out);
            }
        }
    }

    #[cfg(feature = "parallel")]
    fn triangulate_parallel(&self, lattice: &Lattice, slabs: usize) -> SurfaceChunk {
        use rayon::prelude::*;

        let chunks: Vec<SurfaceChunk> = (0..slabs)
            .into_par_iter()
            .map(|z| {
                let mut chunk = SurfaceChunk::new();
                self.slab_into(lattice, z, &mut chunk);
                chunk
            })
            .collect();

        let mut surface = SurfaceChunk::new();
        for chunk in chunks {
            surface.append(chunk);
        }
        surface
    }

    #[cfg(not(feature = "parallel"))]
    fn triangulate_parallel(&self, lattice: &Lattice, slabs: usize) -> SurfaceChunk {
        tracing::debug!("Built without the parallel feature, triangulating serially");
        let mut surface = SurfaceChunk::new();
        for z in 0..slabs {
            self.slab_into(lattice, z, &mut surface);
        }
        surface
    }
}
