//! Engine builder for flexible configuration
//!
//! Start from defaults, a config file, or a full [`EngineConfig`], then
//! override individual settings before building.

use crate::config::EngineConfig;
use crate::engine::CoverageEngine;
use crate::error::Result;
use std::path::PathBuf;

/// Builder for [`CoverageEngine`].
#[derive(Debug, Default)]
pub struct EngineBuilder {
    config: EngineConfig,
    config_path: Option<PathBuf>,
    jitter_radius_m: Option<f64>,
    grid_resolution: Option<u8>,
    max_rings: Option<u32>,
}

impl EngineBuilder {
    /// Create a new builder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a complete configuration.
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Load the configuration from a `.json` (or, with the `toml` feature,
    /// `.toml`) file when building. Replaces any config set with
    /// [`config`](Self::config).
    pub fn config_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Override the display-location jitter radius in meters.
    pub fn jitter_radius(mut self, meters: f64) -> Self {
        self.jitter_radius_m = Some(meters);
        self
    }

    /// Override the H3 resolution of the hexagon grid.
    pub fn grid_resolution(mut self, resolution: u8) -> Self {
        self.grid_resolution = Some(resolution);
        self
    }

    /// Override the cap on rings enumerated around a grid center.
    pub fn max_rings(mut self, max_rings: u32) -> Self {
        self.max_rings = Some(max_rings);
        self
    }

    /// Build the engine. Loads the config file if one was given, applies
    /// overrides, and validates the result.
    pub fn build(self) -> Result<CoverageEngine> {
        let mut config = match &self.config_path {
            Some(path) => EngineConfig::load(path)?,
            None => self.config,
        };

        if let Some(meters) = self.jitter_radius_m {
            config.obfuscation.max_jitter_radius_m = meters;
        }
        if let Some(resolution) = self.grid_resolution {
            config.grid.resolution = resolution;
        }
        if let Some(max_rings) = self.max_rings {
            config.grid.max_rings = max_rings;
        }

        CoverageEngine::new(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CovermapError;
    use std::io::Write;

    #[test]
    fn test_builder_default() {
        let engine = EngineBuilder::new().build().unwrap();
        assert_eq!(engine.config(), &EngineConfig::default());
    }

    #[test]
    fn test_builder_overrides() {
        let engine = EngineBuilder::new()
            .jitter_radius(20.0)
            .grid_resolution(10)
            .max_rings(50)
            .build()
            .unwrap();

        assert_eq!(engine.obfuscator().max_jitter_radius_m(), 20.0);
        assert_eq!(engine.config().grid.resolution, 10);
        assert_eq!(engine.config().grid.max_rings, 50);
    }

    #[test]
    fn test_builder_rejects_bad_override() {
        let err = EngineBuilder::new().grid_resolution(16).build().unwrap_err();
        assert!(matches!(err, CovermapError::InvalidConfig(_)));

        let err = EngineBuilder::new().jitter_radius(-5.0).build().unwrap_err();
        assert!(matches!(err, CovermapError::InvalidConfig(_)));
    }

    #[test]
    fn test_builder_with_config_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{ "samples": {{ "max_offset_m": 250.0 }} }}"#).unwrap();

        let engine = EngineBuilder::new()
            .config_file(file.path())
            .max_rings(30)
            .build()
            .unwrap();
        assert_eq!(engine.config().samples.max_offset_m, 250.0);
        assert_eq!(engine.config().grid.max_rings, 30);
    }

    #[test]
    fn test_builder_missing_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = EngineBuilder::new()
            .config_file(dir.path().join("missing.json"))
            .build()
            .unwrap_err();
        assert!(matches!(err, CovermapError::Io(_)));
    }
}
