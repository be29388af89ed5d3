//! # planetoid
//!
//! Procedural planetoid meshes: a sphere carved by cave noise and roughened by
//! mountain noise, sampled on a regular lattice and triangulated with
//! table-driven marching cubes.
//!
//! ## Pipeline
//!
//! ```text
//! NoiseSource ×2 ─▶ PlanetField ─▶ Lattice ─▶ Triangulator ─▶ normals ─▶ PlanetMesh
//!                                              (classify, interpolate, emit)
//! ```
//!
//! ## Quick Start
//!
//! ```no_run
//! use planetoid::{generate, PlanetConfig};
//!
//! let config = PlanetConfig::new(64, 20.0).with_seeds("caves", "mountains");
//! let mesh = generate(&config)?;
//! println!("{}", mesh.stats());
//!
//! let buffers = mesh.to_buffers();
//! assert_eq!(buffers.positions.len(), 3 * mesh.vertex_count());
//! # Ok::<(), planetoid::PlanetError>(())
//! ```
//!
//! ## Modules
//!
//! - [`config`]: generation parameters and TOML loading
//! - [`error`]: the crate error type
//! - [`noise`](crate::noise): seeded coherent noise behind the [`NoiseSource`] trait
//! - [`field`]: the planet scalar field
//! - [`lattice`]: regular sampling grid
//! - [`tables`]: marching-cubes edge and triangulation tables
//! - [`march`]: cell classification, edge interpolation, triangle emission
//! - [`normals`]: per-vertex normals
//! - [`mesh`]: assembled mesh and flat buffers
//! - [`export`]: OBJ and JSON output
//! - [`generator`]: the end-to-end pass

pub mod config;
pub mod error;
pub mod export;
pub mod field;
pub mod generator;
pub mod lattice;
pub mod march;
pub mod mesh;
pub mod noise;
pub mod normals;
pub mod tables;

#[cfg(feature = "wasm")]
mod wasm;

pub use config::PlanetConfig;
pub use error::{PlanetError, Result};
pub use export::{save_json, save_obj, write_json, write_obj};
pub use field::{sphere_sdf, PlanetField, ScalarField};
pub use generator::{generate, PlanetGenerator, Stage};
pub use lattice::{Lattice, LatticePoint};
pub use march::{
    classify, edge_mask, emit_triangles, interpolate_edge, interpolate_edges, polygonise, Cell,
    EdgeVertices, InterpolationMode, SurfaceChunk, Triangulator, ISOLEVEL, TRIANGLE_UVS,
};
pub use mesh::{MeshBuffers, MeshStats, PlanetMesh, SURFACE_COLOR};
pub use crate::noise::{ConstantNoise, NoiseKind, NoiseSource, SeededNoise};
pub use normals::{compute_normals, face_normal, NormalMode};

// Re-export glam for convenience
pub use glam;
