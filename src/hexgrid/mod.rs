//! Hexagonal density grid around a center point.
//!
//! The tessellation is pluggable through [`HexIndex`]; [`H3Index`] is the
//! production implementation. Any index that can map a point to a cell,
//! describe a cell's outline, and list the cells within N rings works.

pub mod h3;

pub use h3::H3Index;

use crate::config::GridConfig;
use covermap_types::camera::Camera;
use covermap_types::geo::Point;
use covermap_types::hexagon::{HexColor, HexagonCell};
use rustc_hash::{FxHashMap, FxHashSet};
use std::cmp::Reverse;
use std::fmt::Display;
use std::hash::Hash;

/// A hierarchical hexagonal (or any tiling) spatial index.
pub trait HexIndex {
    /// Cell identifier. `Display` gives the id handed to renderers.
    type Cell: Copy + Eq + Hash + Display;

    /// Cell containing `point`, or `None` if the index cannot place it.
    fn cell_at(&self, point: &Point) -> Option<Self::Cell>;

    /// Outline vertices of `cell`, in order, without repeating the first.
    fn boundary(&self, cell: Self::Cell) -> Vec<Point>;

    /// All cells within `rings` steps of `cell`, including `cell` itself.
    fn disk(&self, cell: Self::Cell, rings: u32) -> Vec<Self::Cell>;

    /// Representative center of `cell`; the mean of its outline by default.
    fn center(&self, cell: Self::Cell) -> Point {
        let vertices = self.boundary(cell);
        if vertices.is_empty() {
            return Point::new(f64::NAN, f64::NAN);
        }
        let n = vertices.len() as f64;
        let (lng, lat) = vertices
            .iter()
            .fold((0.0, 0.0), |(lng, lat), p| (lng + p.lng(), lat + p.lat()));
        Point::new(lng / n, lat / n)
    }
}

/// Buckets display locations into cells around a center and normalizes the
/// counts against the busiest cell.
#[derive(Debug, Clone)]
pub struct HexGridIndexer<I: HexIndex = H3Index> {
    index: I,
    config: GridConfig,
}

impl<I: HexIndex> HexGridIndexer<I> {
    pub fn new(index: I, config: GridConfig) -> Self {
        Self { index, config }
    }

    pub fn index(&self) -> &I {
        &self.index
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Occupied cells within `radius_km` (default from config) of `center`.
    ///
    /// Only cells holding at least one camera are returned, busiest first.
    /// Cameras with invalid display locations and cameras outside the
    /// enumerated rings are not counted. An invalid center yields an empty
    /// grid.
    pub fn build(&self, cameras: &[Camera], center: &Point, radius_km: Option<f64>) -> Vec<HexagonCell> {
        if cameras.is_empty() {
            return Vec::new();
        }

        if !center.is_valid_geographic() {
            log::warn!(
                "Invalid center coordinates for hexagonal grid (lat {}, lng {})",
                center.lat(),
                center.lng()
            );
            return Vec::new();
        }

        let Some(center_cell) = self.index.cell_at(center) else {
            log::warn!("No grid cell for center (lat {}, lng {})", center.lat(), center.lng());
            return Vec::new();
        };

        let rings = self
            .config
            .rings_for(radius_km.unwrap_or(self.config.default_radius_km));
        let grid: FxHashSet<I::Cell> = self.index.disk(center_cell, rings).into_iter().collect();

        let mut counts: FxHashMap<I::Cell, usize> = FxHashMap::default();
        for camera in cameras {
            let location = camera.display_location();
            if !location.is_valid_geographic() {
                log::warn!(
                    "Skipping camera {} with invalid coordinates (lat {}, lng {})",
                    camera.id(),
                    location.lat(),
                    location.lng()
                );
                continue;
            }

            if let Some(cell) = self.index.cell_at(location)
                && grid.contains(&cell)
            {
                *counts.entry(cell).or_insert(0) += 1;
            }
        }

        let max_count = counts.values().copied().max().unwrap_or(1);
        let mut cells: Vec<HexagonCell> = counts
            .into_iter()
            .map(|(cell, count)| {
                let density_score = count as f64 / max_count as f64;
                HexagonCell {
                    id: cell.to_string(),
                    center: self.index.center(cell),
                    boundary: closed_ring(self.index.boundary(cell)),
                    camera_count: count,
                    density_score,
                    color: HexColor::for_score(density_score),
                }
            })
            .collect();
        cells.sort_by(|a, b| {
            Reverse(a.camera_count)
                .cmp(&Reverse(b.camera_count))
                .then_with(|| a.id.cmp(&b.id))
        });

        log::debug!(
            "Generated {} hexagons with cameras out of {} cells ({} rings, max count {})",
            cells.len(),
            grid.len(),
            rings,
            max_count
        );
        cells
    }
}

/// Repeat the first vertex at the end unless the ring is already closed.
fn closed_ring(mut vertices: Vec<Point>) -> Vec<Point> {
    if let Some(first) = vertices.first().copied()
        && vertices.last() != Some(&first)
    {
        vertices.push(first);
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use covermap_types::camera::{CameraType, FieldOfView};
    use std::fmt;

    /// Square tiling with `step` degree cells; rings are Chebyshev distance.
    struct SquareIndex {
        step: f64,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    struct Square(i64, i64);

    impl fmt::Display for Square {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "sq:{}:{}", self.0, self.1)
        }
    }

    impl HexIndex for SquareIndex {
        type Cell = Square;

        fn cell_at(&self, point: &Point) -> Option<Square> {
            Some(Square(
                (point.lng() / self.step).floor() as i64,
                (point.lat() / self.step).floor() as i64,
            ))
        }

        fn boundary(&self, cell: Square) -> Vec<Point> {
            let (x, y) = (cell.0 as f64 * self.step, cell.1 as f64 * self.step);
            vec![
                Point::new(x, y),
                Point::new(x + self.step, y),
                Point::new(x + self.step, y + self.step),
                Point::new(x, y + self.step),
            ]
        }

        fn disk(&self, cell: Square, rings: u32) -> Vec<Square> {
            let r = i64::from(rings);
            (-r..=r)
                .flat_map(|dx| (-r..=r).map(move |dy| Square(cell.0 + dx, cell.1 + dy)))
                .collect()
        }
    }

    fn camera(id: &str, lng: f64, lat: f64) -> Camera {
        let at = Point::new(lng, lat);
        Camera::new(id, at, at, FieldOfView::new(0.0, 90.0, 20.0), CameraType::Doorbell, true)
    }

    fn indexer(max_rings: u32) -> HexGridIndexer<SquareIndex> {
        let config = GridConfig {
            ring_spacing_m: 1000.0,
            max_rings,
            ..GridConfig::default()
        };
        HexGridIndexer::new(SquareIndex { step: 0.01 }, config)
    }

    #[test]
    fn test_counts_and_normalization() {
        let cameras = vec![
            camera("a", 0.001, 0.001),
            camera("b", 0.002, 0.002),
            camera("c", 0.003, 0.004),
            camera("d", 0.011, 0.001),
        ];

        let cells = indexer(10).build(&cameras, &Point::new(0.005, 0.005), Some(5.0));
        assert_eq!(cells.len(), 2);

        assert_eq!(cells[0].id, "sq:0:0");
        assert_eq!(cells[0].camera_count, 3);
        assert_eq!(cells[0].density_score, 1.0);
        assert_eq!(cells[0].color, HexColor::Red);

        assert_eq!(cells[1].camera_count, 1);
        assert!((cells[1].density_score - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(cells[1].color, HexColor::Green);
    }

    #[test]
    fn test_boundaries_are_closed() {
        let cameras = vec![camera("a", 0.001, 0.001)];
        let cells = indexer(10).build(&cameras, &Point::new(0.0, 0.0), None);
        assert_eq!(cells.len(), 1);
        assert!(cells[0].is_closed());
        assert_eq!(cells[0].boundary.len(), 5);
        assert!((cells[0].center.lng() - 0.005).abs() < 1e-12);
    }

    #[test]
    fn test_cameras_outside_rings_excluded() {
        let cameras = vec![camera("near", 0.001, 0.001), camera("far", 0.5, 0.5)];
        // 1 km radius at 1 km spacing is a single ring.
        let cells = indexer(10).build(&cameras, &Point::new(0.0, 0.0), Some(1.0));
        let total: usize = cells.iter().map(|c| c.camera_count).sum();
        assert_eq!(total, 1);
    }

    #[test]
    fn test_ring_cap_bounds_enumeration() {
        let cameras = vec![camera("a", 0.001, 0.001), camera("b", 0.025, 0.001)];
        let cells = indexer(1).build(&cameras, &Point::new(0.0, 0.0), Some(10_000.0));
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].id, "sq:0:0");
    }

    #[test]
    fn test_invalid_inputs_degrade_to_empty() {
        let cameras = vec![camera("a", 0.001, 0.001)];
        assert!(indexer(10).build(&[], &Point::new(0.0, 0.0), None).is_empty());
        assert!(indexer(10).build(&cameras, &Point::new(0.0, 95.0), None).is_empty());

        let bad = vec![camera("bad", 200.0, 0.0), camera("nan", f64::NAN, 0.0)];
        assert!(indexer(10).build(&bad, &Point::new(0.0, 0.0), None).is_empty());
    }

    #[test]
    fn test_closed_ring_is_idempotent() {
        let ring = closed_ring(vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(0.0, 1.0)]);
        assert_eq!(ring.len(), 4);
        assert_eq!(closed_ring(ring.clone()), ring);
        assert!(closed_ring(Vec::new()).is_empty());
    }
}
