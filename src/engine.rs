//! The coverage engine: one entry point over the derivation components.

use crate::builder::EngineBuilder;
use crate::clustering::DensityClusterer;
use crate::compute::geojson::hexagons_to_geojson;
use crate::config::EngineConfig;
use crate::entropy::{self, EntropySource};
use crate::error::{CovermapError, Result};
use crate::heatmap::HeatmapSynthesizer;
use crate::hexgrid::{H3Index, HexGridIndexer};
use crate::obfuscation::{CameraRegistration, LocationObfuscator};
use crate::samples::SampleDensityGenerator;
use covermap_types::camera::Camera;
use covermap_types::density::DensityArea;
use covermap_types::geo::Point;
use covermap_types::heatmap::HeatmapPoint;
use covermap_types::hexagon::HexagonCell;
use rand::Rng;

/// Stateless coverage engine.
///
/// Holds only configuration, so one instance can serve concurrent
/// requests. Each randomized call draws from its own fresh
/// [`EntropySource`].
///
/// # Examples
///
/// ```rust
/// use covermap::{CameraRegistration, CameraType, CoverageEngine, FieldOfView, Point};
///
/// let engine = CoverageEngine::builder().build()?;
/// let camera = engine.register_camera(CameraRegistration {
///     id: "cam-1".into(),
///     location: Point::new(-0.1278, 51.5074),
///     field_of_view: FieldOfView::new(180.0, 110.0, 30.0),
///     camera_type: CameraType::Doorbell,
///     share_with_community: true,
/// })?;
///
/// let center = Point::new(-0.1278, 51.5074);
/// let cameras = vec![camera];
/// let grid = engine.hexagon_grid(&cameras, &center, Some(1.0));
/// assert_eq!(grid.len(), 1);
/// assert_eq!(grid[0].density_score, 1.0);
///
/// let heat = engine.heatmap(&cameras, &center);
/// assert!(!heat.is_empty());
/// # Ok::<(), covermap::CovermapError>(())
/// ```
#[derive(Debug, Clone)]
pub struct CoverageEngine {
    config: EngineConfig,
    obfuscator: LocationObfuscator,
    clusterer: DensityClusterer,
    grid: HexGridIndexer<H3Index>,
    heatmap: HeatmapSynthesizer,
    samples: SampleDensityGenerator,
    secure_entropy: bool,
}

impl CoverageEngine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate().map_err(CovermapError::InvalidConfig)?;

        let index = H3Index::new(config.grid.resolution)?;
        let samples = SampleDensityGenerator::new(config.samples.clone());
        let secure_entropy = entropy::probe();

        Ok(Self {
            obfuscator: LocationObfuscator::new(config.obfuscation.max_jitter_radius_m)?,
            clusterer: DensityClusterer::new(config.clustering.clone(), samples.clone()),
            grid: HexGridIndexer::new(index, config.grid.clone()),
            heatmap: HeatmapSynthesizer::new(config.heatmap.clone()),
            samples,
            secure_entropy,
            config,
        })
    }

    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn obfuscator(&self) -> &LocationObfuscator {
        &self.obfuscator
    }

    /// Whether randomness comes from the OS entropy source rather than the
    /// clock-seeded fallback.
    pub fn is_entropy_secure(&self) -> bool {
        self.secure_entropy
    }

    /// Create the stored record for a new camera, drawing its display
    /// location. Call once per camera.
    pub fn register_camera(&self, registration: CameraRegistration) -> Result<Camera> {
        self.obfuscator
            .register(registration, &mut EntropySource::new())
    }

    /// Density areas from real cameras only, without sample fallback.
    pub fn cluster(&self, cameras: &[Camera]) -> Vec<DensityArea> {
        self.clusterer.cluster(cameras)
    }

    /// Density areas for display: real clusters, topped up with
    /// non-overlapping sample areas when there are too few.
    pub fn density_areas(&self, cameras: &[Camera], center: &Point) -> Vec<DensityArea> {
        self.clusterer
            .density_areas(cameras, center, &mut EntropySource::new())
    }

    pub fn density_areas_with_rng<R: Rng + ?Sized>(
        &self,
        cameras: &[Camera],
        center: &Point,
        rng: &mut R,
    ) -> Vec<DensityArea> {
        self.clusterer.density_areas(cameras, center, rng)
    }

    /// Occupied hexagon cells within `radius_km` of `center`
    /// (`grid.default_radius_km` when `None`).
    pub fn hexagon_grid(
        &self,
        cameras: &[Camera],
        center: &Point,
        radius_km: Option<f64>,
    ) -> Vec<HexagonCell> {
        self.grid.build(cameras, center, radius_km)
    }

    /// [`hexagon_grid`](Self::hexagon_grid) as a GeoJSON FeatureCollection.
    pub fn hexagon_geojson(
        &self,
        cameras: &[Camera],
        center: &Point,
        radius_km: Option<f64>,
    ) -> Result<String> {
        hexagons_to_geojson(&self.hexagon_grid(cameras, center, radius_km))
    }

    /// Heatmap points around `center`.
    ///
    /// With cameras, each one is rendered as splats around its display
    /// location. Without any, the sample density areas are rendered instead.
    pub fn heatmap(&self, cameras: &[Camera], center: &Point) -> Vec<HeatmapPoint> {
        self.heatmap_with_rng(cameras, center, &mut EntropySource::new())
    }

    pub fn heatmap_with_rng<R: Rng + ?Sized>(
        &self,
        cameras: &[Camera],
        center: &Point,
        rng: &mut R,
    ) -> Vec<HeatmapPoint> {
        if cameras.is_empty() {
            let areas = self.clusterer.density_areas(cameras, center, rng);
            self.heatmap.points_from_areas(&areas, rng)
        } else {
            self.heatmap.points_from_cameras(cameras, rng)
        }
    }

    /// Heatmap points from density areas the caller already holds.
    pub fn area_heatmap(&self, areas: &[DensityArea]) -> Vec<HeatmapPoint> {
        self.heatmap
            .points_from_areas(areas, &mut EntropySource::new())
    }

    /// Low-weight points along each camera's field of view.
    pub fn coverage_points(&self, cameras: &[Camera]) -> Vec<HeatmapPoint> {
        self.heatmap
            .points_from_fields_of_view(cameras, &mut EntropySource::new())
    }

    /// Synthetic density areas around `center`.
    pub fn sample_areas(&self, center: &Point) -> Vec<DensityArea> {
        self.samples.generate(center, &mut EntropySource::new())
    }
}
