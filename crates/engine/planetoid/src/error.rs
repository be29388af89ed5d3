//! Error types for planet generation

use thiserror::Error;

/// Result type for planet generation
pub type Result<T> = std::result::Result<T, PlanetError>;

/// Errors that can occur before or around a generation pass.
///
/// Nothing in here is raised by classification, interpolation or emission:
/// inconsistencies in those stages are programming defects and panic.
#[derive(Error, Debug)]
pub enum PlanetError {
    /// Resolution or radius outside their valid ranges
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// A seed could not initialise a noise source
    #[error("Noise source '{source_name}' failed to initialise: {reason}")]
    NoiseInitialization {
        source_name: String,
        reason: String,
    },

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML config could not be parsed
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// TOML config could not be written
    #[error("Config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// JSON mesh export failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PlanetError {
    pub(crate) fn noise(source_name: &str, reason: impl Into<String>) -> Self {
        PlanetError::NoiseInitialization {
            source_name: source_name.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PlanetError::InvalidConfig("resolution must be at least 2, got 1".into());
        assert_eq!(
            err.to_string(),
            "Invalid config: resolution must be at least 2, got 1"
        );

        let err = PlanetError::noise("caves", "seed is empty");
        assert_eq!(
            err.to_string(),
            "Noise source 'caves' failed to initialise: seed is empty"
        );
    }
}
