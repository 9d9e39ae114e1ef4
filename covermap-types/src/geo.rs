//! Longitude/latitude point built on the `geo` crate.
//!
//! The engine works in meters on a spherical Earth. Distances and
//! destinations both go through `geo::Haversine`, so a point produced by
//! [`Point::destination`] measures back to the requested distance.

use serde::{Deserialize, Serialize};

/// Wire shape of a point, matching the camera registry's `{lat, lng}` records.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct LatLngRepr {
    lat: f64,
    lng: f64,
}

/// A geographic point with longitude/latitude coordinates.
///
/// Wraps `geo::Point` with x = longitude and y = latitude.
///
/// # Examples
///
/// ```
/// use covermap_types::geo::Point;
///
/// let london = Point::new(-0.1278, 51.5074);
/// assert_eq!(london.lng(), -0.1278);
/// assert_eq!(london.lat(), 51.5074);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "LatLngRepr", into = "LatLngRepr")]
pub struct Point {
    inner: geo::Point<f64>,
}

impl Point {
    /// Create a new point from longitude and latitude in degrees.
    #[inline]
    pub fn new(lng: f64, lat: f64) -> Self {
        Self {
            inner: geo::Point::new(lng, lat),
        }
    }

    /// Create a point from latitude first, the order most map APIs use.
    #[inline]
    pub fn from_lat_lng(lat: f64, lng: f64) -> Self {
        Self::new(lng, lat)
    }

    /// Get the x coordinate (longitude).
    #[inline]
    pub fn x(&self) -> f64 {
        self.inner.x()
    }

    /// Get the y coordinate (latitude).
    #[inline]
    pub fn y(&self) -> f64 {
        self.inner.y()
    }

    #[inline]
    pub fn lng(&self) -> f64 {
        self.x()
    }

    #[inline]
    pub fn lat(&self) -> f64 {
        self.y()
    }

    /// Both coordinates are finite and inside [-180, 180] x [-90, 90].
    #[inline]
    pub fn is_valid_geographic(&self) -> bool {
        let (lng, lat) = (self.lng(), self.lat());
        lng.is_finite()
            && lat.is_finite()
            && (-180.0..=180.0).contains(&lng)
            && (-90.0..=90.0).contains(&lat)
    }

    /// Great-circle distance to another point in meters.
    ///
    /// # Examples
    ///
    /// ```
    /// use covermap_types::geo::Point;
    ///
    /// let a = Point::new(-0.1278, 51.5074);
    /// let b = Point::new(-0.1278, 51.5084);
    /// let d = a.haversine_distance(&b);
    /// assert!((d - 111.2).abs() < 1.0);
    /// ```
    #[inline]
    pub fn haversine_distance(&self, other: &Point) -> f64 {
        use geo::Distance;
        geo::Haversine.distance(self.inner, other.inner)
    }

    /// Point reached by travelling `meters` along `bearing_deg`
    /// (clockwise from north) on the haversine sphere.
    ///
    /// # Examples
    ///
    /// ```
    /// use covermap_types::geo::Point;
    ///
    /// let origin = Point::new(-0.1278, 51.5074);
    /// let moved = origin.destination(45.0, 30.0);
    /// assert!((origin.haversine_distance(&moved) - 30.0).abs() < 1e-6);
    /// ```
    #[inline]
    pub fn destination(&self, bearing_deg: f64, meters: f64) -> Point {
        use geo::Destination;
        Point {
            inner: geo::Haversine.destination(self.inner, bearing_deg, meters),
        }
    }

    /// `[lng, lat]` position as used by GeoJSON.
    #[inline]
    pub fn to_position(&self) -> Vec<f64> {
        vec![self.lng(), self.lat()]
    }
}

impl From<LatLngRepr> for Point {
    fn from(repr: LatLngRepr) -> Self {
        Self::from_lat_lng(repr.lat, repr.lng)
    }
}

impl From<Point> for LatLngRepr {
    fn from(point: Point) -> Self {
        Self {
            lat: point.lat(),
            lng: point.lng(),
        }
    }
}

impl From<geo::Point<f64>> for Point {
    fn from(point: geo::Point<f64>) -> Self {
        Self { inner: point }
    }
}

impl From<Point> for geo::Point<f64> {
    fn from(point: Point) -> Self {
        point.inner
    }
}

impl From<Point> for geo::Coord<f64> {
    fn from(point: Point) -> Self {
        point.inner.0
    }
}

impl From<(f64, f64)> for Point {
    fn from((lng, lat): (f64, f64)) -> Self {
        Self::new(lng, lat)
    }
}
