//! Engine configuration.
//!
//! Every tunable has a serde default equal to the value the engine was
//! designed around, so an empty JSON object (or TOML file) is a complete
//! configuration.
use crate::error::{CovermapError, Result};
use serde::de::Error;
use std::path::Path;

/// Top-level configuration for [`CoverageEngine`](crate::CoverageEngine).
///
/// # Example
///
/// ```rust
/// use covermap::EngineConfig;
///
/// let config = EngineConfig::default();
/// assert_eq!(config.clustering.cluster_radius_m, 300.0);
///
/// let json = r#"{ "grid": { "max_rings": 120 } }"#;
/// let config = EngineConfig::from_json(json).unwrap();
/// assert_eq!(config.grid.max_rings, 120);
/// assert_eq!(config.grid.resolution, 11);
/// ```
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    #[serde(default)]
    pub obfuscation: ObfuscationConfig,

    #[serde(default)]
    pub clustering: ClusteringConfig,

    #[serde(default)]
    pub grid: GridConfig,

    #[serde(default)]
    pub heatmap: HeatmapConfig,

    #[serde(default)]
    pub samples: SampleConfig,
}

/// Display-location jitter applied at camera registration.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObfuscationConfig {
    /// Maximum distance between true and display location
    #[serde(default = "ObfuscationConfig::default_max_jitter_radius_m")]
    pub max_jitter_radius_m: f64,
}

impl ObfuscationConfig {
    const fn default_max_jitter_radius_m() -> f64 {
        30.0
    }
}

impl Default for ObfuscationConfig {
    fn default() -> Self {
        Self {
            max_jitter_radius_m: Self::default_max_jitter_radius_m(),
        }
    }
}

/// Greedy density clustering parameters.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClusteringConfig {
    /// Cameras within this distance of a seed join its cluster
    #[serde(default = "ClusteringConfig::default_cluster_radius_m")]
    pub cluster_radius_m: f64,

    /// Member count at which density saturates at 1.0
    #[serde(default = "ClusteringConfig::default_saturation_count")]
    pub saturation_count: usize,

    /// Added to the largest member range to size an area
    #[serde(default = "ClusteringConfig::default_radius_buffer_m")]
    pub radius_buffer_m: f64,

    #[serde(default = "ClusteringConfig::default_min_radius_m")]
    pub min_radius_m: f64,

    #[serde(default = "ClusteringConfig::default_max_radius_m")]
    pub max_radius_m: f64,

    /// Below this many real areas, synthetic areas are blended in
    #[serde(default = "ClusteringConfig::default_min_area_count")]
    pub min_area_count: usize,
}

impl ClusteringConfig {
    const fn default_cluster_radius_m() -> f64 {
        300.0
    }

    const fn default_saturation_count() -> usize {
        8
    }

    const fn default_radius_buffer_m() -> f64 {
        100.0
    }

    const fn default_min_radius_m() -> f64 {
        200.0
    }

    const fn default_max_radius_m() -> f64 {
        500.0
    }

    const fn default_min_area_count() -> usize {
        3
    }
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            cluster_radius_m: Self::default_cluster_radius_m(),
            saturation_count: Self::default_saturation_count(),
            radius_buffer_m: Self::default_radius_buffer_m(),
            min_radius_m: Self::default_min_radius_m(),
            max_radius_m: Self::default_max_radius_m(),
            min_area_count: Self::default_min_area_count(),
        }
    }
}

/// Hexagonal grid parameters.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GridConfig {
    /// H3 resolution (0-15). Resolution 11 cells have edges of about 29 m.
    #[serde(default = "GridConfig::default_resolution")]
    pub resolution: u8,

    /// Radius used when the caller does not pass one
    #[serde(default = "GridConfig::default_radius_km")]
    pub default_radius_km: f64,

    /// Approximate distance covered by each ring of cells
    #[serde(default = "GridConfig::default_ring_spacing_m")]
    pub ring_spacing_m: f64,

    /// Upper bound on rings enumerated around the center
    #[serde(default = "GridConfig::default_max_rings")]
    pub max_rings: u32,
}

impl GridConfig {
    const fn default_resolution() -> u8 {
        11
    }

    const fn default_radius_km() -> f64 {
        5.0
    }

    const fn default_ring_spacing_m() -> f64 {
        50.0
    }

    const fn default_max_rings() -> u32 {
        200
    }

    /// Rings needed to cover `radius_km`, capped at `max_rings`.
    ///
    /// Non-finite or negative radii collapse to the center cell only.
    pub fn rings_for(&self, radius_km: f64) -> u32 {
        if !radius_km.is_finite() || radius_km <= 0.0 {
            return 0;
        }
        let rings = (radius_km * 1000.0 / self.ring_spacing_m).ceil();
        if rings >= f64::from(self.max_rings) {
            self.max_rings
        } else {
            rings as u32
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            resolution: Self::default_resolution(),
            default_radius_km: Self::default_radius_km(),
            ring_spacing_m: Self::default_ring_spacing_m(),
            max_rings: Self::default_max_rings(),
        }
    }
}

/// Heatmap point synthesis parameters.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeatmapConfig {
    /// Fraction of an area's radius used when scattering area-mode points
    #[serde(default = "HeatmapConfig::default_area_fill")]
    pub area_fill: f64,

    #[serde(default = "HeatmapConfig::default_splat_offset_min_m")]
    pub splat_offset_min_m: f64,

    #[serde(default = "HeatmapConfig::default_splat_offset_max_m")]
    pub splat_offset_max_m: f64,

    #[serde(default = "HeatmapConfig::default_scatter_min_m")]
    pub scatter_min_m: f64,

    #[serde(default = "HeatmapConfig::default_scatter_max_m")]
    pub scatter_max_m: f64,
}

impl HeatmapConfig {
    const fn default_area_fill() -> f64 {
        0.9
    }

    const fn default_splat_offset_min_m() -> f64 {
        20.0
    }

    const fn default_splat_offset_max_m() -> f64 {
        30.0
    }

    const fn default_scatter_min_m() -> f64 {
        5.0
    }

    const fn default_scatter_max_m() -> f64 {
        8.0
    }

    /// Furthest a splat point can land from its camera's display location.
    pub fn max_splat_reach_m(&self) -> f64 {
        self.splat_offset_max_m + self.scatter_max_m
    }
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            area_fill: Self::default_area_fill(),
            splat_offset_min_m: Self::default_splat_offset_min_m(),
            splat_offset_max_m: Self::default_splat_offset_max_m(),
            scatter_min_m: Self::default_scatter_min_m(),
            scatter_max_m: Self::default_scatter_max_m(),
        }
    }
}

/// Synthetic fallback area parameters.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SampleConfig {
    /// Maximum distance of a synthetic center from the requested center
    #[serde(default = "SampleConfig::default_max_offset_m")]
    pub max_offset_m: f64,
}

impl SampleConfig {
    const fn default_max_offset_m() -> f64 {
        600.0
    }
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            max_offset_m: Self::default_max_offset_m(),
        }
    }
}

fn check_positive(name: &str, value: f64) -> std::result::Result<(), String> {
    if !value.is_finite() || value <= 0.0 {
        return Err(format!("{} must be a positive finite number, got {}", name, value));
    }
    Ok(())
}

fn check_range(name: &str, min: f64, max: f64) -> std::result::Result<(), String> {
    check_positive(&format!("{} minimum", name), min)?;
    check_positive(&format!("{} maximum", name), max)?;
    if min > max {
        return Err(format!("{} minimum ({}) exceeds maximum ({})", name, min, max));
    }
    Ok(())
}

impl EngineConfig {
    pub fn with_jitter_radius(mut self, meters: f64) -> Self {
        self.obfuscation.max_jitter_radius_m = meters;
        self
    }

    pub fn with_cluster_radius(mut self, meters: f64) -> Self {
        self.clustering.cluster_radius_m = meters;
        self
    }

    pub fn with_grid_resolution(mut self, resolution: u8) -> Self {
        assert!(resolution <= 15, "H3 resolution must be between 0 and 15");
        self.grid.resolution = resolution;
        self
    }

    pub fn with_max_rings(mut self, max_rings: u32) -> Self {
        assert!(max_rings > 0, "Max rings must be greater than zero");

        if max_rings > 500 {
            log::warn!(
                "Max rings of {} enumerates over {} cells per grid request",
                max_rings,
                3 * u64::from(max_rings) * (u64::from(max_rings) + 1) + 1
            );
        }

        self.grid.max_rings = max_rings;
        self
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        check_positive("max_jitter_radius_m", self.obfuscation.max_jitter_radius_m)?;

        let c = &self.clustering;
        check_positive("cluster_radius_m", c.cluster_radius_m)?;
        if c.saturation_count == 0 {
            return Err("saturation_count must be greater than zero".to_string());
        }
        if !c.radius_buffer_m.is_finite() || c.radius_buffer_m < 0.0 {
            return Err(format!(
                "radius_buffer_m must be a non-negative finite number, got {}",
                c.radius_buffer_m
            ));
        }
        check_range("area radius", c.min_radius_m, c.max_radius_m)?;

        let g = &self.grid;
        if g.resolution > 15 {
            return Err(format!("grid resolution must be between 0 and 15, got {}", g.resolution));
        }
        check_positive("default_radius_km", g.default_radius_km)?;
        check_positive("ring_spacing_m", g.ring_spacing_m)?;
        if g.max_rings == 0 {
            return Err("max_rings must be greater than zero".to_string());
        }

        let h = &self.heatmap;
        if !h.area_fill.is_finite() || h.area_fill <= 0.0 || h.area_fill > 1.0 {
            return Err(format!("area_fill must be in (0, 1], got {}", h.area_fill));
        }
        check_range("splat offset", h.splat_offset_min_m, h.splat_offset_max_m)?;
        check_range("splat scatter", h.scatter_min_m, h.scatter_max_m)?;

        check_positive("max_offset_m", self.samples.max_offset_m)?;

        Ok(())
    }

    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        let config: EngineConfig = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(serde_json::Error::custom(e));
        }
        Ok(config)
    }

    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> std::result::Result<Self, toml::de::Error> {
        let config: EngineConfig = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Load a configuration file, choosing the format from its extension.
    ///
    /// `.json` is always supported; `.toml` requires the `toml` feature.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json(&contents).map_err(|e| {
                CovermapError::InvalidConfig(format!("{}: {}", path.display(), e))
            }),
            #[cfg(feature = "toml")]
            Some("toml") => Self::from_toml(&contents).map_err(|e| {
                CovermapError::InvalidConfig(format!("{}: {}", path.display(), e))
            }),
            other => Err(CovermapError::InvalidConfig(format!(
                "Unsupported config format {:?} for {}",
                other,
                path.display()
            ))),
        }
    }
}
