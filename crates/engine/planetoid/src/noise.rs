//! Coherent noise sources
//!
//! The field generator only needs a deterministic `sample(position) -> f32`.
//! [`SeededNoise`] backs that with the `noise` crate and derives the numeric
//! seed from a text seed, so the same string always produces the same field.

use crate::error::{PlanetError, Result};
use glam::Vec3;
use ::noise::{NoiseFn, OpenSimplex, Perlin, Simplex, SuperSimplex, Value};
use serde::{Deserialize, Serialize};

/// Deterministic 3D coherent noise.
pub trait NoiseSource: Send + Sync {
    /// Sample the noise at `position`. Output is roughly in [-1, 1].
    fn sample(&self, position: Vec3) -> f32;
}

/// Noise algorithm backing a [`SeededNoise`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseKind {
    #[default]
    Simplex,
    Perlin,
    OpenSimplex,
    SuperSimplex,
    Value,
    /// Always zero; reduces the planet to its sphere
    Disabled,
}

impl NoiseKind {
    pub fn name(self) -> &'static str {
        match self {
            NoiseKind::Simplex => "simplex",
            NoiseKind::Perlin => "perlin",
            NoiseKind::OpenSimplex => "open_simplex",
            NoiseKind::SuperSimplex => "super_simplex",
            NoiseKind::Value => "value",
            NoiseKind::Disabled => "disabled",
        }
    }
}

enum Generator {
    Simplex(Simplex),
    Perlin(Perlin),
    OpenSimplex(OpenSimplex),
    SuperSimplex(SuperSimplex),
    Value(Value),
    Disabled,
}

/// Noise source keyed by a text seed.
pub struct SeededNoise {
    kind: NoiseKind,
    seed: u32,
    generator: Generator,
}

impl SeededNoise {
    /// Create a noise source of `kind` from a text seed.
    ///
    /// `source_name` only labels the error when the seed is rejected.
    pub fn new(source_name: &str, kind: NoiseKind, seed: &str) -> Result<Self> {
        if seed.is_empty() {
            return Err(PlanetError::noise(source_name, "seed is empty"));
        }

        let seed = hash_seed(seed);
        let generator = match kind {
            NoiseKind::Simplex => Generator::Simplex(Simplex::new(seed)),
            NoiseKind::Perlin => Generator::Perlin(Perlin::new(seed)),
            NoiseKind::OpenSimplex => Generator::OpenSimplex(OpenSimplex::new(seed)),
            NoiseKind::SuperSimplex => Generator::SuperSimplex(SuperSimplex::new(seed)),
            NoiseKind::Value => Generator::Value(Value::new(seed)),
            NoiseKind::Disabled => Generator::Disabled,
        };

        tracing::debug!(
            "Initialised {} noise '{}' with seed {:#010x}",
            kind.name(),
            source_name,
            seed
        );

        Ok(Self {
            kind,
            seed,
            generator,
        })
    }

    pub fn kind(&self) -> NoiseKind {
        self.kind
    }

    /// Numeric seed derived from the text seed
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl NoiseSource for SeededNoise {
    fn sample(&self, position: Vec3) -> f32 {
        let point = position.as_dvec3().to_array();
        let value = match &self.generator {
            Generator::Simplex(n) => n.get(point),
            Generator::Perlin(n) => n.get(point),
            Generator::OpenSimplex(n) => n.get(point),
            Generator::SuperSimplex(n) => n.get(point),
            Generator::Value(n) => n.get(point),
            Generator::Disabled => 0.0,
        };
        value as f32
    }
}

impl std::fmt::Debug for SeededNoise {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeededNoise")
            .field("kind", &self.kind)
            .field("seed", &self.seed)
            .finish()
    }
}

/// Noise source returning the same value everywhere.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ConstantNoise(pub f32);

impl NoiseSource for ConstantNoise {
    fn sample(&self, _position: Vec3) -> f32 {
        self.0
    }
}

/// FNV-1a hash of a text seed
pub fn hash_seed(seed: &str) -> u32 {
    const OFFSET_BASIS: u32 = 0x811c_9dc5;
    const PRIME: u32 = 0x0100_0193;

    seed.bytes().fold(OFFSET_BASIS, |hash, byte| {
        (hash ^ byte as u32).wrapping_mul(PRIME)
    })
}
