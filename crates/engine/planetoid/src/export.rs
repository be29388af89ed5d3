//! Writing meshes to disk
//!
//! Wavefront OBJ for inspection in modelling tools, JSON [`MeshBuffers`] for
//! renderers that want the raw arrays.

use crate::error::Result;
use crate::mesh::{MeshBuffers, PlanetMesh, SURFACE_COLOR};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write `mesh` as Wavefront OBJ.
pub fn write_obj<W: Write>(mesh: &PlanetMesh, mut out: W) -> Result<()> {
    writeln!(out, "# planetoid mesh")?;
    writeln!(
        out,
        "# {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    )?;
    writeln!(
        out,
        "# diffuse {} {} {}",
        SURFACE_COLOR[0], SURFACE_COLOR[1], SURFACE_COLOR[2]
    )?;
    writeln!(out, "o planetoid")?;

    for p in &mesh.positions {
        writeln!(out, "v {} {} {}", p.x, p.y, p.z)?;
    }
    for uv in &mesh.uvs {
        writeln!(out, "vt {} {}", uv.x, uv.y)?;
    }
    for n in &mesh.normals {
        writeln!(out, "vn {} {} {}", n.x, n.y, n.z)?;
    }

    // OBJ indices are 1-based and we keep v/vt/vn aligned
    for t in mesh.indices.chunks_exact(3) {
        let [a, b, c] = [t[0] + 1, t[1] + 1, t[2] + 1];
        writeln!(out, "f {a}/{a}/{a} {b}/{b}/{b} {c}/{c}/{c}")?;
    }

    out.flush()?;
    Ok(())
}

/// Write `mesh` to an OBJ file at `path`.
pub fn save_obj(mesh: &PlanetMesh, path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(path.as_ref())?;
    write_obj(mesh, BufWriter::new(file))?;
    tracing::info!("Wrote OBJ to {}", path.as_ref().display());
    Ok(())
}

/// Write the flat buffers of `mesh` as JSON.
pub fn write_json<W: Write>(mesh: &PlanetMesh, out: W) -> Result<()> {
    let buffers: MeshBuffers = mesh.to_buffers();
    serde_json::to_writer(out, &buffers)?;
    Ok(())
}

/// Write the flat buffers of `mesh` to a JSON file at `path`.
pub fn save_json(mesh: &PlanetMesh, path: impl AsRef<Path>) -> Result<()> {
    let mut out = BufWriter::new(File::create(path.as_ref())?);
    write_json(mesh, &mut out)?;
    out.flush()?;
    tracing::info!("Wrote mesh buffers to {}", path.as_ref().display());
    Ok(())
}
