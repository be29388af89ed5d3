//! End-to-end planet generation
//!
//! One pass, no intermediate state kept between calls:
//!
//! ```text
//! Sampling ─▶ Triangulating ─▶ Normals ─▶ Assembled
//! ```
//!
//! Changing any parameter means building a new generator and running the
//! whole pass again; the previous mesh is simply dropped by its owner.

use crate::config::PlanetConfig;
use crate::error::Result;
use crate::field::PlanetField;
use crate::lattice::Lattice;
use crate::march::Triangulator;
use crate::mesh::PlanetMesh;
use crate::noise::{NoiseSource, SeededNoise};
use crate::normals::compute_normals;

/// Pipeline stage, used to label log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Sampling,
    Triangulating,
    Normals,
    Assembled,
}

impl Stage {
    pub fn name(self) -> &'static str {
        match self {
            Stage::Sampling => "sampling",
            Stage::Triangulating => "triangulating",
            Stage::Normals => "normals",
            Stage::Assembled => "assembled",
        }
    }
}

/// Validated configuration plus its field, ready to produce meshes.
#[derive(Debug)]
pub struct PlanetGenerator<N = SeededNoise> {
    config: PlanetConfig,
    field: PlanetField<N>,
}

impl PlanetGenerator<SeededNoise> {
    /// Validate `config` and initialise both noise sources from its seeds.
    pub fn new(config: PlanetConfig) -> Result<Self> {
        config.validate()?;
        let caves = SeededNoise::new("caves", config.noise, &config.cave_seed)?;
        let mountains = SeededNoise::new("mountains", config.noise, &config.mountain_seed)?;
        let field = PlanetField::new(config.resolution, config.radius, caves, mountains);
        Ok(Self { config, field })
    }
}

impl<N: NoiseSource> PlanetGenerator<N> {
    /// Use caller-supplied noise sources instead of seeded ones.
    ///
    /// The seed and noise-kind settings of `config` are ignored, so empty
    /// seeds are accepted here.
    pub fn with_noise(config: PlanetConfig, caves: N, mountains: N) -> Result<Self> {
        config.validate_lattice()?;
        let field = PlanetField::new(config.resolution, config.radius, caves, mountains);
        Ok(Self { config, field })
    }

    pub fn config(&self) -> &PlanetConfig {
        &self.config
    }

    pub fn field(&self) -> &PlanetField<N> {
        &self.field
    }

    /// Sample the field over the configured lattice.
    pub fn sample(&self) -> Result<Lattice> {
        Lattice::sample(
            self.config.resolution,
            self.config.radius,
            &self.field,
            self.config.parallel,
        )
    }

    /// Run the full pass and hand back the mesh.
    pub fn generate(&self) -> Result<PlanetMesh> {
        let config = &self.config;
        tracing::info!(
            "Generating planet: resolution {}, radius {}, {} noise, {:?} interpolation",
            config.resolution,
            config.radius,
            config.noise.name(),
            config.interpolation
        );

        tracing::debug!("Stage: {}", Stage::Sampling.name());
        let lattice = self.sample()?;

        tracing::debug!("Stage: {}", Stage::Triangulating.name());
        let surface = Triangulator::new(config.interpolation)
            .with_parallel(config.parallel)
            .triangulate(&lattice);
        drop(lattice);

        tracing::debug!("Stage: {}", Stage::Normals.name());
        let normals = compute_normals(&surface.positions, &surface.indices, config.normals);

        let mesh = PlanetMesh::assemble(surface, normals);
        tracing::info!(
            "Stage: {}, {} vertices, {} triangles",
            Stage::Assembled.name(),
            mesh.vertex_count(),
            mesh.triangle_count()
        );
        Ok(mesh)
    }
}

/// Build a generator for `config` and run it once.
pub fn generate(config: &PlanetConfig) -> Result<PlanetMesh> {
    PlanetGenerator::new(config.clone())?.generate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlanetError;
    use crate::noise::{ConstantNoise, NoiseKind};

    #[test]
    fn test_invalid_config_fails_before_sampling() {
        let err = PlanetGenerator::new(PlanetConfig::new(1, 1.0)).unwrap_err();
        assert!(matches!(err, PlanetError::InvalidConfig(_)));

        let err = PlanetGenerator::new(PlanetConfig::new(4, -2.0)).unwrap_err();
        assert!(matches!(err, PlanetError::InvalidConfig(_)));
    }

    #[test]
    fn test_empty_seed_fails() {
        let config = PlanetConfig::new(4, 1.0).with_seeds("", "mountains");
        let err = PlanetGenerator::new(config).unwrap_err();
        assert!(matches!(err, PlanetError::NoiseInitialization { .. }));
    }

    #[test]
    fn test_custom_noise_matches_disabled_noise() {
        let config = PlanetConfig::new(6, 2.0).with_noise(NoiseKind::Disabled);
        let seeded = generate(&config).unwrap();
        let constant = PlanetGenerator::with_noise(config, ConstantNoise(0.0), ConstantNoise(0.0))
            .unwrap()
            .generate()
            .unwrap();
        assert_eq!(seeded, constant);
        assert!(!seeded.is_empty());
    }

    #[test]
    fn test_custom_noise_does_not_need_seeds() {
        let config = PlanetConfig::new(4, 1.0).with_seeds("", "");
        let generator =
            PlanetGenerator::with_noise(config, ConstantNoise(0.0), ConstantNoise(0.0)).unwrap();
        assert!(generator.generate().is_ok());

        let bad = PlanetConfig::new(1, 1.0).with_seeds("", "");
        let err = PlanetGenerator::with_noise(bad, ConstantNoise(0.0), ConstantNoise(0.0)).unwrap_err();
        assert!(matches!(err, PlanetError::InvalidConfig(_)));
    }

    #[test]
    fn test_sample_covers_the_lattice() {
        let generator = PlanetGenerator::new(PlanetConfig::new(5, 1.0)).unwrap();
        let lattice = generator.sample().unwrap();
        assert_eq!(lattice.len(), 125);
        assert_eq!(generator.field().radius(), 1.0);
    }
}
