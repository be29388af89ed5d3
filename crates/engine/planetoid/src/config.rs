//! Generation parameters
//!
//! Loaded from TOML; every field has a default so a config file only needs
//! to name what it changes:
//!
//! ```toml
//! resolution = 64
//! radius = 20.0
//! cave_seed = "testseed-caves"
//! mountain_seed = "testseed-mountains"
//! noise = "simplex"
//! interpolation = "midpoint"
//! normals = "faceted"
//! parallel = true
//! ```

use crate::error::{PlanetError, Result};
use crate::lattice::validate_dimensions;
use crate::march::InterpolationMode;
use crate::noise::NoiseKind;
use crate::normals::NormalMode;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Lattice sizes above this are accepted but logged as expensive.
pub const LARGE_RESOLUTION: usize = 256;

/// Everything that determines a generated planet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetConfig {
    /// Lattice points per axis
    #[serde(default = "default_resolution")]
    pub resolution: usize,
    /// Sphere radius; the lattice spans `[-radius, radius]³`
    #[serde(default = "default_radius")]
    pub radius: f32,
    #[serde(default = "default_cave_seed")]
    pub cave_seed: String,
    #[serde(default = "default_mountain_seed")]
    pub mountain_seed: String,
    #[serde(default)]
    pub noise: NoiseKind,
    #[serde(default)]
    pub interpolation: InterpolationMode,
    #[serde(default)]
    pub normals: NormalMode,
    /// Sample and triangulate on the rayon thread pool
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

fn default_resolution() -> usize {
    100
}

fn default_radius() -> f32 {
    20.0
}

fn default_cave_seed() -> String {
    "testseed-caves".to_string()
}

fn default_mountain_seed() -> String {
    "testseed-mountains".to_string()
}

fn default_parallel() -> bool {
    true
}

impl Default for PlanetConfig {
    fn default() -> Self {
        Self {
            resolution: default_resolution(),
            radius: default_radius(),
            cave_seed: default_cave_seed(),
            mountain_seed: default_mountain_seed(),
            noise: NoiseKind::default(),
            interpolation: InterpolationMode::default(),
            normals: NormalMode::default(),
            parallel: default_parallel(),
        }
    }
}

impl PlanetConfig {
    pub fn new(resolution: usize, radius: f32) -> Self {
        Self {
            resolution,
            radius,
            ..Self::default()
        }
    }

    pub fn with_seeds(mut self, cave_seed: impl Into<String>, mountain_seed: impl Into<String>) -> Self {
        self.cave_seed = cave_seed.into();
        self.mountain_seed = mountain_seed.into();
        self
    }

    pub fn with_noise(mut self, noise: NoiseKind) -> Self {
        self.noise = noise;
        self
    }

    pub fn with_interpolation(mut self, interpolation: InterpolationMode) -> Self {
        self.interpolation = interpolation;
        self
    }

    pub fn with_normals(mut self, normals: NormalMode) -> Self {
        self.normals = normals;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Distance between neighbouring lattice points
    pub fn step(&self) -> f32 {
        2.0 * self.radius / (self.resolution.max(2) - 1) as f32
    }

    /// Reject configurations that cannot produce a lattice or noise.
    pub fn validate(&self) -> Result<()> {
        self.validate_lattice()?;
        if self.cave_seed.is_empty() {
            return Err(PlanetError::noise("caves", "seed is empty"));
        }
        if self.mountain_seed.is_empty() {
            return Err(PlanetError::noise("mountains", "seed is empty"));
        }
        Ok(())
    }

    /// Check resolution and radius only; the seeds are left alone.
    pub fn validate_lattice(&self) -> Result<()> {
        validate_dimensions(self.resolution, self.radius)?;
        if self.resolution > LARGE_RESOLUTION {
            tracing::warn!(
                "Resolution {} samples {} lattice points",
                self.resolution,
                self.resolution.pow(3)
            );
        }
        Ok(())
    }

    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&source)?;
        tracing::info!("Loaded planet config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PlanetConfig::default();
        assert_eq!(config.resolution, 100);
        assert_eq!(config.radius, 20.0);
        assert_eq!(config.cave_seed, "testseed-caves");
        assert_eq!(config.mountain_seed, "testseed-mountains");
        assert_eq!(config.noise, NoiseKind::Simplex);
        assert_eq!(config.interpolation, InterpolationMode::Midpoint);
        assert_eq!(config.normals, NormalMode::Faceted);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = PlanetConfig::from_toml_str(
            r#"
            resolution = 32
            noise = "open_simplex"
            interpolation = "weighted"
            "#,
        )
        .unwrap();
        assert_eq!(config.resolution, 32);
        assert_eq!(config.radius, 20.0);
        assert_eq!(config.noise, NoiseKind::OpenSimplex);
        assert_eq!(config.interpolation, InterpolationMode::Weighted);
        assert!(config.parallel);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = PlanetConfig::new(12, 3.5)
            .with_seeds("a", "b")
            .with_noise(NoiseKind::Disabled)
            .with_normals(NormalMode::Smooth)
            .with_parallel(false);
        let text = config.to_toml_string().unwrap();
        assert_eq!(PlanetConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_unknown_noise_is_a_parse_error() {
        let err = PlanetConfig::from_toml_str(r#"noise = "worley""#).unwrap_err();
        assert!(matches!(err, PlanetError::ConfigParse(_)));
    }

    #[test]
    fn test_validation() {
        assert!(matches!(
            PlanetConfig::new(1, 1.0).validate(),
            Err(PlanetError::InvalidConfig(_))
        ));
        assert!(matches!(
            PlanetConfig::new(4, 0.0).validate(),
            Err(PlanetError::InvalidConfig(_))
        ));
        assert!(matches!(
            PlanetConfig::new(4, 1.0).with_seeds("", "b").validate(),
            Err(PlanetError::NoiseInitialization { .. })
        ));
        assert!(matches!(
            PlanetConfig::new(4, 1.0).with_seeds("a", "").validate(),
            Err(PlanetError::NoiseInitialization { .. })
        ));
    }

    #[test]
    fn test_lattice_validation_ignores_seeds() {
        let config = PlanetConfig::new(4, 1.0).with_seeds("", "");
        assert!(config.validate_lattice().is_ok());
        assert!(matches!(
            PlanetConfig::new(1, 1.0).with_seeds("", "").validate_lattice(),
            Err(PlanetError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_step() {
        assert_eq!(PlanetConfig::new(4, 1.0).step(), 2.0 / 3.0);
        assert_eq!(PlanetConfig::new(5, 2.0).step(), 1.0);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("planet.toml");
        std::fs::write(&path, "resolution = 8\nradius = 2.0\n").unwrap();

        let config = PlanetConfig::load(&path).unwrap();
        assert_eq!(config.resolution, 8);
        assert_eq!(config.radius, 2.0);

        let missing = PlanetConfig::load(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(missing, PlanetError::Io(_)));
    }
}
