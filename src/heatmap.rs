//! Weighted point clouds for heat-layer rendering.
//!
//! Every call draws fresh randomness. Point sets are never cached: a stable
//! render of the same input could be averaged across requests to recover
//! display locations.

use crate::compute::sampling::{offset, sample_in_annulus, sample_in_disk};
use crate::compute::validation::usable_cameras;
use crate::config::HeatmapConfig;
use covermap_types::camera::Camera;
use covermap_types::density::DensityArea;
use covermap_types::heatmap::HeatmapPoint;
use rand::Rng;

const AREA_POINTS_PER_UNIT_DENSITY: f64 = 8.0;
const MIN_AREA_POINTS: usize = 2;

const MIN_SPLATS: usize = 4;
const MAX_SPLATS: usize = 7;
const MIN_POINTS_PER_SPLAT: usize = 4;
const MAX_POINTS_PER_SPLAT: usize = 8;
const SHARED_SPLAT_WEIGHT: f64 = 1.0;
const PRIVATE_SPLAT_WEIGHT: f64 = 0.8;

const FOV_METERS_PER_POINT: f64 = 15.0;
const FOV_MIN_POINTS: usize = 2;
const FOV_MAX_POINTS: usize = 4;
const FOV_SPREAD: f64 = 1.2;
const FOV_SCATTER_DEG: f64 = 60.0;
const SHARED_FOV_WEIGHT: f64 = 0.5;
const PRIVATE_FOV_WEIGHT: f64 = 0.25;

/// `base * (1 - spread + spread * u)`: a random weight in
/// `[base * (1 - spread), base]`.
#[inline]
fn varied<R: Rng + ?Sized>(base: f64, spread: f64, rng: &mut R) -> f64 {
    base * (1.0 - spread + spread * rng.random::<f64>())
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeatmapSynthesizer {
    config: HeatmapConfig,
}

impl HeatmapSynthesizer {
    pub fn new(config: HeatmapConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HeatmapConfig {
        &self.config
    }

    /// Area mode: scatter `max(2, floor(density * 8))` points over each
    /// area's disk, plus one point on its center.
    ///
    /// Areas with an invalid center are skipped with a warning.
    pub fn points_from_areas<R: Rng + ?Sized>(
        &self,
        areas: &[DensityArea],
        rng: &mut R,
    ) -> Vec<HeatmapPoint> {
        let mut points = Vec::new();

        for area in areas {
            if !area.center.is_valid_geographic() {
                log::warn!("Skipping density area {} with invalid center", area.id);
                continue;
            }

            let density = area.density.clamp(0.0, 1.0);
            let count = ((density * AREA_POINTS_PER_UNIT_DENSITY).floor() as usize)
                .max(MIN_AREA_POINTS);
            let reach = area.radius.max(0.0) * self.config.area_fill;

            for _ in 0..count {
                points.push(HeatmapPoint::new(
                    sample_in_disk(&area.center, reach, rng),
                    varied(density, 0.4, rng),
                ));
            }
            points.push(HeatmapPoint::new(area.center, varied(density, 0.2, rng)));
        }

        log::debug!(
            "Generated {} heatmap points from {} density areas",
            points.len(),
            areas.len()
        );
        points
    }

    /// Camera-splat mode: each camera becomes 4 to 7 splats placed 20-30 m
    /// from its display location, each splat 4 to 8 points scattered 5-8 m
    /// around it.
    ///
    /// Every point lies within [`HeatmapConfig::max_splat_reach_m`] of its
    /// camera's display location.
    ///
    /// # Examples
    ///
    /// ```
    /// use covermap::heatmap::HeatmapSynthesizer;
    /// use covermap::{Camera, CameraType, FieldOfView, Point};
    /// use rand::SeedableRng;
    /// use rand::rngs::StdRng;
    ///
    /// let at = Point::new(-0.1278, 51.5074);
    /// let camera = Camera::new("cam-1", at, at, FieldOfView::new(0.0, 90.0, 30.0), CameraType::Doorbell, true);
    ///
    /// let synthesizer = HeatmapSynthesizer::default();
    /// let points = synthesizer.points_from_cameras(&[camera], &mut StdRng::seed_from_u64(1));
    /// assert!((16..=56).contains(&points.len()));
    /// assert!(points.iter().all(|p| at.haversine_distance(&p.location) <= 38.0 + 1e-6));
    /// ```
    pub fn points_from_cameras<R: Rng + ?Sized>(
        &self,
        cameras: &[Camera],
        rng: &mut R,
    ) -> Vec<HeatmapPoint> {
        let usable = usable_cameras(cameras);
        let mut points = Vec::new();

        for camera in &usable {
            let base_weight = if camera.shares_with_community() {
                SHARED_SPLAT_WEIGHT
            } else {
                PRIVATE_SPLAT_WEIGHT
            };

            for _ in 0..rng.random_range(MIN_SPLATS..=MAX_SPLATS) {
                let anchor = sample_in_annulus(
                    camera.display_location(),
                    self.config.splat_offset_min_m,
                    self.config.splat_offset_max_m,
                    rng,
                );
                let splat_weight = varied(base_weight, 0.2, rng);

                for _ in 0..rng.random_range(MIN_POINTS_PER_SPLAT..=MAX_POINTS_PER_SPLAT) {
                    let location = sample_in_annulus(
                        &anchor,
                        self.config.scatter_min_m,
                        self.config.scatter_max_m,
                        rng,
                    );
                    let weight = varied(splat_weight, 0.2, rng).min(1.0);
                    points.push(HeatmapPoint::new(location, weight));
                }
            }
        }

        log::debug!(
            "Generated {} heatmap points from {} cameras",
            points.len(),
            usable.len()
        );
        points
    }

    /// Field-of-view mode: `clamp(floor(range / 15), 2, 4)` points per
    /// camera at 30-100% of its range, spread around the viewing direction.
    ///
    /// Shared cameras weigh 0.5, others 0.25, each varied down by up to 40%.
    pub fn points_from_fields_of_view<R: Rng + ?Sized>(
        &self,
        cameras: &[Camera],
        rng: &mut R,
    ) -> Vec<HeatmapPoint> {
        let mut points = Vec::new();

        for camera in usable_cameras(cameras) {
            let fov = camera.field_of_view();
            let count = ((fov.range / FOV_METERS_PER_POINT).floor() as usize)
                .clamp(FOV_MIN_POINTS, FOV_MAX_POINTS);
            let base_weight = if camera.shares_with_community() {
                SHARED_FOV_WEIGHT
            } else {
                PRIVATE_FOV_WEIGHT
            };

            for _ in 0..count {
                let distance = fov.range * (0.3 + 0.7 * rng.random::<f64>());
                let spread = (rng.random::<f64>() - 0.5) * fov.angle * FOV_SPREAD;
                let scatter = (rng.random::<f64>() - 0.5) * FOV_SCATTER_DEG;
                let bearing = fov.direction + spread + scatter;

                points.push(HeatmapPoint::new(
                    offset(camera.display_location(), bearing.to_radians(), distance),
                    varied(base_weight, 0.4, rng),
                ));
            }
        }

        points
    }
}
