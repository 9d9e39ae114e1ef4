//! Random placement of points around a center, in meters.

use covermap_types::geo::Point;
use rand::Rng;
use std::f64::consts::TAU;

/// Move `meters` from `origin` in the direction `angle_rad` (radians,
/// clockwise from north). Longitudes crossing the antimeridian are wrapped
/// back into [-180, 180].
#[inline]
pub fn offset(origin: &Point, angle_rad: f64, meters: f64) -> Point {
    let moved = origin.destination(angle_rad.to_degrees(), meters);
    if (-180.0..=180.0).contains(&moved.lng()) {
        moved
    } else {
        Point::new((moved.lng() + 180.0).rem_euclid(360.0) - 180.0, moved.lat())
    }
}

/// Uniform random angle in [0, 2π).
#[inline]
pub fn random_angle<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.random::<f64>() * TAU
}

/// Sample a point uniformly over the disk of `radius_m` around `center`.
///
/// The radial draw is `radius * sqrt(u)`: area grows with the square of the
/// radius, so a linear draw would crowd samples toward the center.
///
/// # Examples
///
/// ```
/// use covermap::compute::sampling::sample_in_disk;
/// use covermap::Point;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let center = Point::new(-0.1278, 51.5074);
/// let p = sample_in_disk(&center, 30.0, &mut rng);
/// assert!(center.haversine_distance(&p) <= 30.0 + 1e-6);
/// ```
pub fn sample_in_disk<R: Rng + ?Sized>(center: &Point, radius_m: f64, rng: &mut R) -> Point {
    let angle = random_angle(rng);
    let distance = radius_m * rng.random::<f64>().sqrt();
    offset(center, angle, distance)
}

/// Sample a point at a uniformly random angle and a distance drawn
/// uniformly from `[min_m, max_m]`.
pub fn sample_in_annulus<R: Rng + ?Sized>(
    center: &Point,
    min_m: f64,
    max_m: f64,
    rng: &mut R,
) -> Point {
    let angle = random_angle(rng);
    let distance = min_m + rng.random::<f64>() * (max_m - min_m);
    offset(center, angle, distance)
}
