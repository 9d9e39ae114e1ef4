//! Synthetic density areas for sparse or empty regions.
//!
//! An empty map is itself a precise signal ("nobody here has a camera"), so
//! the clusterer blends these in when real data is too thin.

use crate::compute::sampling::sample_in_disk;
use crate::config::SampleConfig;
use covermap_types::density::{AreaType, DensityArea};
use covermap_types::geo::Point;
use rand::Rng;

const MIN_AREAS: usize = 4;
const MAX_AREAS: usize = 6;
const MIN_RADIUS_M: f64 = 120.0;
const RADIUS_SPREAD_M: f64 = 180.0;
const MIN_DENSITY: f64 = 0.2;
const DENSITY_SPREAD: f64 = 0.6;
const CAMERAS_PER_UNIT_DENSITY: f64 = 12.0;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleDensityGenerator {
    config: SampleConfig,
}

impl SampleDensityGenerator {
    pub fn new(config: SampleConfig) -> Self {
        Self { config }
    }

    /// Produce 4 to 6 plausible areas with centers within
    /// `max_offset_m` of `center`.
    ///
    /// Returns nothing, with a warning, when `center` is not a valid
    /// coordinate.
    ///
    /// # Examples
    ///
    /// ```
    /// use covermap::samples::SampleDensityGenerator;
    /// use covermap::Point;
    /// use rand::SeedableRng;
    /// use rand::rngs::StdRng;
    ///
    /// let generator = SampleDensityGenerator::default();
    /// let center = Point::new(-122.4194, 37.7749);
    /// let areas = generator.generate(&center, &mut StdRng::seed_from_u64(3));
    /// assert!((4..=6).contains(&areas.len()));
    /// ```
    pub fn generate<R: Rng + ?Sized>(&self, center: &Point, rng: &mut R) -> Vec<DensityArea> {
        if !center.is_valid_geographic() {
            log::warn!(
                "Cannot place sample areas around invalid center (lat {}, lng {})",
                center.lat(),
                center.lng()
            );
            return Vec::new();
        }

        let count = rng.random_range(MIN_AREAS..=MAX_AREAS);
        let batch = uuid::Builder::from_random_bytes(rng.random()).into_uuid();

        (0..count)
            .map(|i| {
                let density = MIN_DENSITY + rng.random::<f64>() * DENSITY_SPREAD;
                let radius = MIN_RADIUS_M + (rng.random::<f64>() * RADIUS_SPREAD_M).floor();
                let area_type = AreaType::ALL[rng.random_range(0..AreaType::ALL.len())];

                DensityArea {
                    id: format!("dynamic-density-{}-{}", i, batch.simple()),
                    center: sample_in_disk(center, self.config.max_offset_m, rng),
                    radius,
                    density,
                    camera_count: sample_camera_count(density),
                    area_type,
                    member_ids: Vec::new(),
                }
            })
            .collect()
    }
}

fn sample_camera_count(density: f64) -> usize {
    ((density * CAMERAS_PER_UNIT_DENSITY).floor() as usize).max(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_sample_areas_within_bounds() {
        let generator = SampleDensityGenerator::default();
        let center = Point::new(2.3522, 48.8566);

        for seed in 0..50 {
            let areas = generator.generate(&center, &mut StdRng::seed_from_u64(seed));
            assert!((MIN_AREAS..=MAX_AREAS).contains(&areas.len()));

            for area in &areas {
                assert!(center.haversine_distance(&area.center) <= 600.0 + 1e-6);
                assert!((120.0..=300.0).contains(&area.radius));
                assert!((0.2..=0.8).contains(&area.density));
                assert_eq!(area.camera_count, sample_camera_count(area.density));
                assert!(area.camera_count >= 2);
                assert!(area.member_ids.is_empty());
            }
        }
    }

    #[test]
    fn test_sample_ids_unique_within_batch() {
        let generator = SampleDensityGenerator::default();
        let areas = generator.generate(&Point::new(0.0, 0.0), &mut StdRng::seed_from_u64(1));
        let mut ids: Vec<&str> = areas.iter().map(|a| a.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), areas.len());
    }

    #[test]
    fn test_camera_count_rule() {
        assert_eq!(sample_camera_count(0.2), 2);
        assert_eq!(sample_camera_count(0.5), 6);
        assert_eq!(sample_camera_count(0.8), 9);
    }

    #[test]
    fn test_invalid_center_yields_nothing() {
        let generator = SampleDensityGenerator::default();
        let areas = generator.generate(&Point::new(0.0, 120.0), &mut StdRng::seed_from_u64(2));
        assert!(areas.is_empty());
    }

    #[test]
    fn test_custom_offset() {
        let generator = SampleDensityGenerator::new(SampleConfig { max_offset_m: 50.0 });
        let center = Point::new(151.2093, -33.8688);
        for area in generator.generate(&center, &mut StdRng::seed_from_u64(4)) {
            assert!(center.haversine_distance(&area.center) <= 50.0 + 1e-6);
        }
    }
}
