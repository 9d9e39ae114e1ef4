//! H3 implementation of [`HexIndex`](super::HexIndex) on top of `h3o`.

use super::HexIndex;
use crate::error::{CovermapError, Result};
use covermap_types::geo::Point;
use h3o::{CellIndex, LatLng, Resolution};

/// Uber H3 cells at a fixed resolution.
///
/// Average edge lengths: resolution 10 about 76 m, resolution 11 about
/// 29 m, resolution 12 about 11 m.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct H3Index {
    resolution: Resolution,
}

impl H3Index {
    pub fn new(resolution: u8) -> Result<Self> {
        let resolution = Resolution::try_from(resolution).map_err(|e| {
            CovermapError::InvalidConfig(format!("Invalid H3 resolution {}: {}", resolution, e))
        })?;
        Ok(Self { resolution })
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }
}

fn to_point(latlng: LatLng) -> Point {
    Point::new(latlng.lng(), latlng.lat())
}

impl HexIndex for H3Index {
    type Cell = CellIndex;

    fn cell_at(&self, point: &Point) -> Option<CellIndex> {
        match LatLng::new(point.lat(), point.lng()) {
            Ok(latlng) => Some(latlng.to_cell(self.resolution)),
            Err(e) => {
                log::debug!("Cannot index point (lat {}, lng {}): {}", point.lat(), point.lng(), e);
                None
            }
        }
    }

    fn boundary(&self, cell: CellIndex) -> Vec<Point> {
        cell.boundary().iter().copied().map(to_point).collect()
    }

    fn disk(&self, cell: CellIndex, rings: u32) -> Vec<CellIndex> {
        cell.grid_disk::<Vec<_>>(rings)
    }

    fn center(&self, cell: CellIndex) -> Point {
        to_point(LatLng::from(cell))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_bounds() {
        assert!(H3Index::new(10).is_ok());
        assert!(H3Index::new(15).is_ok());
        assert!(matches!(H3Index::new(16), Err(CovermapError::InvalidConfig(_))));
    }

    #[test]
    fn test_point_maps_to_containing_cell() {
        let index = H3Index::new(11).unwrap();
        let point = Point::new(-122.4194, 37.7749);
        let cell = index.cell_at(&point).unwrap();

        assert_eq!(cell.resolution(), Resolution::Eleven);
        assert!(index.center(cell).haversine_distance(&point) < 50.0);
    }

    #[test]
    fn test_boundary_is_open_hexagon() {
        let index = H3Index::new(10).unwrap();
        let cell = index.cell_at(&Point::new(-0.1278, 51.5074)).unwrap();
        let boundary = index.boundary(cell);

        assert!(boundary.len() >= 6);
        assert_ne!(boundary.first(), boundary.last());
    }

    #[test]
    fn test_disk_size() {
        let index = H3Index::new(10).unwrap();
        let cell = index.cell_at(&Point::new(2.3522, 48.8566)).unwrap();

        assert_eq!(index.disk(cell, 0), vec![cell]);
        // 3k(k+1) + 1 cells for a disk without pentagons.
        assert_eq!(index.disk(cell, 2).len(), 19);
    }

    #[test]
    fn test_rejects_non_finite_points() {
        let index = H3Index::new(10).unwrap();
        assert!(index.cell_at(&Point::new(f64::NAN, 0.0)).is_none());
    }
}
