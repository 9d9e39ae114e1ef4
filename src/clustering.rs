//! Greedy density clustering of camera display locations.
//!
//! Cameras are visited in input order. Each camera not yet clustered seeds
//! a cluster that takes every other unclustered camera within
//! `cluster_radius_m` of it (haversine distance). The clusters therefore
//! partition the usable cameras.
//!
//! Candidate lookup uses an R-tree over unit-sphere vectors: straight-line
//! (chord) distance grows with great-circle distance, so a chord query is an
//! exact prefilter that also behaves at the poles and across the antimeridian.

use crate::compute::validation::usable_cameras;
use crate::config::ClusteringConfig;
use crate::samples::SampleDensityGenerator;
use covermap_types::camera::{Camera, CameraType};
use covermap_types::density::{AreaType, DensityArea};
use covermap_types::geo::Point;
use rand::Rng;
use rstar::RTree;
use rstar::primitives::GeomWithData;

const EARTH_RADIUS_METERS: f64 = 6_371_008.8;

type SphereEntry = GeomWithData<[f64; 3], usize>;

/// Classify an area from the camera types of its members.
///
/// | members                                | area        |
/// |----------------------------------------|-------------|
/// | security and doorbell both present     | mixed       |
/// | only doorbell / indoor (or none)       | residential |
/// | dash present, or security without doorbell | commercial |
/// | anything else                          | residential |
///
/// # Examples
///
/// ```
/// use covermap::clustering::classify_area;
/// use covermap::{AreaType, CameraType};
///
/// assert_eq!(classify_area([CameraType::Security, CameraType::Doorbell]), AreaType::Mixed);
/// assert_eq!(classify_area([CameraType::Doorbell, CameraType::Indoor]), AreaType::Residential);
/// assert_eq!(classify_area([CameraType::Dash, CameraType::Indoor]), AreaType::Commercial);
/// ```
pub fn classify_area<I>(types: I) -> AreaType
where
    I: IntoIterator<Item = CameraType>,
{
    let mut security = false;
    let mut doorbell = false;
    let mut dash = false;
    let mut all_residential = true;

    for camera_type in types {
        match camera_type {
            CameraType::Security => security = true,
            CameraType::Doorbell => doorbell = true,
            CameraType::Dash => dash = true,
            CameraType::Indoor | CameraType::Other => {}
        }
        if !matches!(camera_type, CameraType::Doorbell | CameraType::Indoor) {
            all_residential = false;
        }
    }

    if security && doorbell {
        AreaType::Mixed
    } else if all_residential {
        AreaType::Residential
    } else if dash || security {
        AreaType::Commercial
    } else {
        AreaType::Residential
    }
}

fn to_unit_vector(point: &Point) -> [f64; 3] {
    let (lat, lng) = (point.lat().to_radians(), point.lng().to_radians());
    [lat.cos() * lng.cos(), lat.cos() * lng.sin(), lat.sin()]
}

fn from_unit_vector(v: [f64; 3]) -> Option<Point> {
    let norm = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if !norm.is_finite() || norm < 1e-12 {
        return None;
    }
    let lat = (v[2] / norm).clamp(-1.0, 1.0).asin().to_degrees();
    let lng = v[1].atan2(v[0]).to_degrees();
    Some(Point::new(lng, lat))
}

/// Squared chord length on the unit sphere for an arc of `meters`, padded
/// so the exact haversine check makes the final call.
fn chord_query_radius_sq(meters: f64) -> f64 {
    let half_angle = (meters / EARTH_RADIUS_METERS / 2.0).min(std::f64::consts::FRAC_PI_2);
    let chord = 2.0 * half_angle.sin() * 1.001 + 1e-9;
    chord * chord
}

/// Range-weighted centroid of member display locations.
///
/// Members with zero total range fall back to an unweighted mean.
fn weighted_center(members: &[&Camera], vectors: &[[f64; 3]]) -> Point {
    let total_range: f64 = members.iter().map(|c| c.field_of_view().range).sum();
    let mut sum = [0.0; 3];

    for (camera, v) in members.iter().zip(vectors) {
        let weight = if total_range > 0.0 {
            camera.field_of_view().range
        } else {
            1.0
        };
        for (acc, component) in sum.iter_mut().zip(v) {
            *acc += component * weight;
        }
    }

    from_unit_vector(sum).unwrap_or(*members[0].display_location())
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DensityClusterer {
    config: ClusteringConfig,
    samples: SampleDensityGenerator,
}

impl DensityClusterer {
    pub fn new(config: ClusteringConfig, samples: SampleDensityGenerator) -> Self {
        Self { config, samples }
    }

    pub fn config(&self) -> &ClusteringConfig {
        &self.config
    }

    /// Group cameras into density areas.
    ///
    /// Cameras with unusable display locations or ranges are skipped with a
    /// warning. Every remaining camera lands in exactly one area.
    pub fn cluster(&self, cameras: &[Camera]) -> Vec<DensityArea> {
        let usable = usable_cameras(cameras);
        if usable.is_empty() {
            return Vec::new();
        }

        let vectors: Vec<[f64; 3]> = usable
            .iter()
            .map(|c| to_unit_vector(c.display_location()))
            .collect();
        let tree = RTree::bulk_load(
            vectors
                .iter()
                .enumerate()
                .map(|(i, v)| SphereEntry::new(*v, i))
                .collect(),
        );
        let query_radius_sq = chord_query_radius_sq(self.config.cluster_radius_m);

        let mut processed = vec![false; usable.len()];
        let mut areas = Vec::new();

        for seed in 0..usable.len() {
            if processed[seed] {
                continue;
            }
            let seed_location = usable[seed].display_location();

            let mut member_indices: Vec<usize> = tree
                .locate_within_distance(vectors[seed], query_radius_sq)
                .map(|entry| entry.data)
                .filter(|&i| {
                    i != seed
                        && !processed[i]
                        && seed_location.haversine_distance(usable[i].display_location())
                            <= self.config.cluster_radius_m
                })
                .collect();
            member_indices.sort_unstable();
            member_indices.insert(0, seed);

            for &i in &member_indices {
                processed[i] = true;
            }

            let members: Vec<&Camera> = member_indices.iter().map(|&i| usable[i]).collect();
            let member_vectors: Vec<[f64; 3]> =
                member_indices.iter().map(|&i| vectors[i]).collect();
            areas.push(self.build_area(seed, &members, &member_vectors));
        }

        log::debug!(
            "Clustered {} cameras into {} density areas",
            usable.len(),
            areas.len()
        );
        areas
    }

    fn build_area(&self, seed: usize, members: &[&Camera], vectors: &[[f64; 3]]) -> DensityArea {
        let max_range = members
            .iter()
            .map(|c| c.field_of_view().range)
            .fold(0.0_f64, f64::max);
        let radius = (max_range + self.config.radius_buffer_m)
            .clamp(self.config.min_radius_m, self.config.max_radius_m);
        let density = (members.len() as f64 / self.config.saturation_count as f64).min(1.0);

        DensityArea {
            id: format!("real-density-{}", seed),
            center: weighted_center(members, vectors),
            radius,
            density,
            camera_count: members.len(),
            area_type: classify_area(members.iter().map(|c| c.camera_type())),
            member_ids: members.iter().map(|c| c.id().to_string()).collect(),
        }
    }

    /// Density areas for display around `center`.
    ///
    /// With no cameras at all this is sample data. When clustering yields
    /// fewer than `min_area_count` areas, sample areas that do not overlap
    /// any real area are appended with a `-supplemental` id suffix.
    pub fn density_areas<R: Rng + ?Sized>(
        &self,
        cameras: &[Camera],
        center: &Point,
        rng: &mut R,
    ) -> Vec<DensityArea> {
        if cameras.is_empty() {
            return self.samples.generate(center, rng);
        }

        let mut areas = self.cluster(cameras);
        if areas.len() >= self.config.min_area_count {
            return areas;
        }

        let real_count = areas.len();
        let supplemental: Vec<DensityArea> = self
            .samples
            .generate(center, rng)
            .into_iter()
            .filter(|sample| !areas[..real_count].iter().any(|real| real.overlaps(sample)))
            .map(|sample| DensityArea {
                id: format!("{}-supplemental", sample.id),
                ..sample
            })
            .collect();

        log::debug!(
            "Supplemented {} real density areas with {} sample areas",
            real_count,
            supplemental.len()
        );
        areas.extend(supplemental);
        areas
    }
}
