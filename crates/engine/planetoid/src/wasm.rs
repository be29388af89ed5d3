//! JavaScript bindings
//!
//! Mirrors what a browser host needs: build a planet from the four inputs and
//! read the flat buffers back as typed arrays.

use crate::config::PlanetConfig;
use crate::generator::PlanetGenerator;
use crate::mesh::MeshBuffers;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
}

/// Generated planet buffers.
#[wasm_bindgen]
pub struct PlanetMeshData {
    buffers: MeshBuffers,
}

#[wasm_bindgen]
impl PlanetMeshData {
    #[wasm_bindgen(getter)]
    pub fn positions(&self) -> Vec<f32> {
        self.buffers.positions.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn indices(&self) -> Vec<u32> {
        self.buffers.indices.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn uvs(&self) -> Vec<f32> {
        self.buffers.uvs.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn normals(&self) -> Vec<f32> {
        self.buffers.normals.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn color(&self) -> Vec<f32> {
        self.buffers.color.to_vec()
    }

    #[wasm_bindgen(getter, js_name = vertexCount)]
    pub fn vertex_count(&self) -> usize {
        self.buffers.vertex_count()
    }

    #[wasm_bindgen(getter, js_name = triangleCount)]
    pub fn triangle_count(&self) -> usize {
        self.buffers.triangle_count()
    }
}

/// Generate a planet. Runs on the calling thread.
#[wasm_bindgen(js_name = generatePlanet)]
pub fn generate_planet(
    resolution: usize,
    radius: f32,
    cave_seed: String,
    mountain_seed: String,
) -> Result<PlanetMeshData, JsError> {
    build_planet(resolution, radius, cave_seed, mountain_seed)
        .map_err(|e| JsError::new(&e.to_string()))
}

fn build_planet(
    resolution: usize,
    radius: f32,
    cave_seed: String,
    mountain_seed: String,
) -> crate::Result<PlanetMeshData> {
    let config = PlanetConfig::new(resolution, radius)
        .with_seeds(cave_seed, mountain_seed)
        .with_parallel(false);

    let mesh = PlanetGenerator::new(config)?.generate()?;
    Ok(PlanetMeshData {
        buffers: mesh.to_buffers(),
    })
}
