//! Display-location obfuscation.
//!
//! A camera's public position is drawn once, at registration, uniformly from
//! the disk of `max_jitter_radius` around its true position. It is stored
//! on the [`Camera`] and never regenerated: re-drawing would hand an
//! observer independent samples to average back toward the true location.

use crate::compute::sampling::sample_in_disk;
use crate::compute::validation::{for_camera, validate_field_of_view, validate_geographic_point};
use crate::error::{CovermapError, Result};
use covermap_types::camera::{Camera, CameraType, FieldOfView};
use covermap_types::geo::Point;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Draw a display location uniformly from the disk of `max_jitter_radius_m`
/// around `true_location`.
///
/// Fails fast on a malformed location or radius.
///
/// # Examples
///
/// ```
/// use covermap::obfuscation::obfuscate_location;
/// use covermap::Point;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let mut rng = StdRng::seed_from_u64(11);
/// let home = Point::new(-0.1278, 51.5074);
/// let shown = obfuscate_location(&home, 30.0, &mut rng)?;
/// assert!(home.haversine_distance(&shown) <= 30.0 + 1e-6);
/// # Ok::<(), covermap::CovermapError>(())
/// ```
pub fn obfuscate_location<R: Rng + ?Sized>(
    true_location: &Point,
    max_jitter_radius_m: f64,
    rng: &mut R,
) -> Result<Point> {
    validate_geographic_point(true_location)?;
    validate_jitter_radius(max_jitter_radius_m)?;
    Ok(sample_in_disk(true_location, max_jitter_radius_m, rng))
}

fn validate_jitter_radius(radius_m: f64) -> Result<()> {
    if !radius_m.is_finite() || radius_m < 0.0 {
        return Err(CovermapError::InvalidInput(format!(
            "Jitter radius must be finite and non-negative, got: {}",
            radius_m
        )));
    }
    Ok(())
}

/// Owner-supplied data for a new camera, before it has a display location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraRegistration {
    pub id: String,
    pub location: Point,
    pub field_of_view: FieldOfView,
    #[serde(rename = "type")]
    pub camera_type: CameraType,
    pub share_with_community: bool,
}

/// Produces display locations with a fixed jitter bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationObfuscator {
    max_jitter_radius_m: f64,
}

impl LocationObfuscator {
    pub fn new(max_jitter_radius_m: f64) -> Result<Self> {
        validate_jitter_radius(max_jitter_radius_m)?;
        Ok(Self {
            max_jitter_radius_m,
        })
    }

    pub fn max_jitter_radius_m(&self) -> f64 {
        self.max_jitter_radius_m
    }

    pub fn obfuscate<R: Rng + ?Sized>(&self, true_location: &Point, rng: &mut R) -> Result<Point> {
        obfuscate_location(true_location, self.max_jitter_radius_m, rng)
    }

    /// Build the stored camera record, drawing its display location.
    ///
    /// This is the only place a display location is produced. Callers must
    /// persist the returned camera as-is and must not call this again for an
    /// existing camera.
    pub fn register<R: Rng + ?Sized>(
        &self,
        registration: CameraRegistration,
        rng: &mut R,
    ) -> Result<Camera> {
        validate_field_of_view(&registration.field_of_view)
            .map_err(|e| for_camera(&registration.id, e))?;

        let display_location = self.obfuscate(&registration.location, rng)?;
        log::debug!("Registered camera {} with obfuscated display location", registration.id);

        Ok(Camera::new(
            registration.id,
            registration.location,
            display_location,
            registration.field_of_view,
            registration.camera_type,
            registration.share_with_community,
        ))
    }
}

/// Outcome of checking a display location against its true location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivacyCheck {
    /// The display location lies within the expected jitter radius
    pub is_privacy_maintained: bool,
    pub actual_distance_m: f64,
    /// `min(distance / radius, 1)`; values near 0 mean the display location
    /// gives the true location away
    pub privacy_score: f64,
}

/// Audit a stored display location.
pub fn verify_location_privacy(
    exact_location: &Point,
    display_location: &Point,
    expected_radius_m: f64,
) -> PrivacyCheck {
    let distance = exact_location.haversine_distance(display_location);
    let privacy_score = if expected_radius_m > 0.0 {
        (distance / expected_radius_m).min(1.0)
    } else {
        0.0
    };

    PrivacyCheck {
        is_privacy_maintained: distance <= expected_radius_m,
        actual_distance_m: distance,
        privacy_score,
    }
}
