//! Validation for coordinates and camera records.
//!
//! Two policies live here. `validate_*` functions fail fast and are used
//! where bad input is a programmer error (registration, ingestion).
//! [`usable_cameras`] is lenient: it drops unusable records with a warning so
//! the derivation components can keep serving the rest.

use crate::error::{CovermapError, Result};
use covermap_types::camera::{Camera, FieldOfView};
use covermap_types::geo::Point;

/// Validates a point has finite, in-range longitude and latitude.
///
/// Longitude: [-180.0, 180.0], Latitude: [-90.0, 90.0]
///
/// # Examples
///
/// ```
/// use covermap::compute::validation::validate_geographic_point;
/// use covermap::Point;
///
/// assert!(validate_geographic_point(&Point::new(-0.1278, 51.5074)).is_ok());
/// assert!(validate_geographic_point(&Point::new(200.0, 40.0)).is_err());
/// assert!(validate_geographic_point(&Point::new(-74.0, 95.0)).is_err());
/// ```
pub fn validate_geographic_point(point: &Point) -> Result<()> {
    let (lng, lat) = (point.lng(), point.lat());

    if !lng.is_finite() {
        return Err(CovermapError::InvalidCoordinates(format!(
            "Longitude must be finite, got: {}",
            lng
        )));
    }

    if !lat.is_finite() {
        return Err(CovermapError::InvalidCoordinates(format!(
            "Latitude must be finite, got: {}",
            lat
        )));
    }

    if !(-180.0..=180.0).contains(&lng) {
        return Err(CovermapError::InvalidCoordinates(format!(
            "Longitude out of range [-180.0, 180.0]: {}",
            lng
        )));
    }

    if !(-90.0..=90.0).contains(&lat) {
        return Err(CovermapError::InvalidCoordinates(format!(
            "Latitude out of range [-90.0, 90.0]: {}",
            lat
        )));
    }

    Ok(())
}

/// Validates a field of view: direction in [0, 360], angle in (0, 360],
/// range finite and non-negative.
pub fn validate_field_of_view(fov: &FieldOfView) -> Result<()> {
    if !fov.direction.is_finite() || !(0.0..=360.0).contains(&fov.direction) {
        return Err(CovermapError::InvalidInput(format!(
            "Field of view direction out of range [0, 360]: {}",
            fov.direction
        )));
    }

    if !fov.angle.is_finite() || fov.angle <= 0.0 || fov.angle > 360.0 {
        return Err(CovermapError::InvalidInput(format!(
            "Field of view angle out of range (0, 360]: {}",
            fov.angle
        )));
    }

    if !fov.range.is_finite() || fov.range < 0.0 {
        return Err(CovermapError::InvalidInput(format!(
            "Field of view range must be finite and non-negative: {}",
            fov.range
        )));
    }

    Ok(())
}

/// Validates everything the density engine reads from a camera.
pub fn validate_camera(camera: &Camera) -> Result<()> {
    validate_geographic_point(camera.display_location())
        .map_err(|e| for_camera(camera.id(), e))?;
    validate_field_of_view(camera.field_of_view()).map_err(|e| for_camera(camera.id(), e))
}

/// Prefixes a validation error's message with the offending camera id.
pub(crate) fn for_camera(id: &str, err: CovermapError) -> CovermapError {
    match err {
        CovermapError::InvalidCoordinates(msg) => {
            CovermapError::InvalidCoordinates(format!("Camera {}: {}", id, msg))
        }
        CovermapError::InvalidInput(msg) => {
            CovermapError::InvalidInput(format!("Camera {}: {}", id, msg))
        }
        other => other,
    }
}

/// Cameras the derivation components can safely use.
///
/// Records with an out-of-range display location or an unusable range are
/// skipped with a warning; this never fails.
pub fn usable_cameras(cameras: &[Camera]) -> Vec<&Camera> {
    cameras
        .iter()
        .filter(|camera| {
            let location = camera.display_location();
            if !location.is_valid_geographic() {
                log::warn!(
                    "Skipping camera {} with invalid display location (lat {}, lng {})",
                    camera.id(),
                    location.lat(),
                    location.lng()
                );
                return false;
            }

            let range = camera.field_of_view().range;
            if !range.is_finite() || range < 0.0 {
                log::warn!(
                    "Skipping camera {} with invalid field of view range {}",
                    camera.id(),
                    range
                );
                return false;
            }

            true
        })
        .collect()
}

/// Parse a camera registry export (a JSON array of camera records).
///
/// Fails fast when a record is missing required fields. Coordinate problems
/// are not checked here; the engine skips those records at query time.
///
/// # Examples
///
/// ```
/// use covermap::compute::validation::cameras_from_json;
///
/// let json = r#"[{
///     "id": "cam-1",
///     "location": {"lat": 51.5074, "lng": -0.1278},
///     "displayLocation": {"lat": 51.5076, "lng": -0.1275},
///     "fieldOfView": {"direction": 90, "angle": 110, "range": 30},
///     "type": "doorbell",
///     "shareWithCommunity": true
/// }]"#;
/// let cameras = cameras_from_json(json).unwrap();
/// assert_eq!(cameras.len(), 1);
///
/// assert!(cameras_from_json(r#"[{"id": "cam-2"}]"#).is_err());
/// ```
pub fn cameras_from_json(json: &str) -> Result<Vec<Camera>> {
    serde_json::from_str(json)
        .map_err(|e| CovermapError::InvalidInput(format!("Malformed camera records: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use covermap_types::camera::CameraType;

    fn camera(id: &str, display: Point, range: f64) -> Camera {
        Camera::new(
            id,
            display,
            display,
            FieldOfView::new(0.0, 90.0, range),
            CameraType::Doorbell,
            true,
        )
    }

    #[test]
    fn test_valid_geographic_point() {
        assert!(validate_geographic_point(&Point::new(-74.0060, 40.7128)).is_ok());
        assert!(validate_geographic_point(&Point::new(139.6917, 35.6895)).is_ok());

        // Edge cases
        assert!(validate_geographic_point(&Point::new(180.0, 0.0)).is_ok());
        assert!(validate_geographic_point(&Point::new(-180.0, 0.0)).is_ok());
        assert!(validate_geographic_point(&Point::new(0.0, 90.0)).is_ok());
        assert!(validate_geographic_point(&Point::new(0.0, -90.0)).is_ok());
    }

    #[test]
    fn test_invalid_coordinates() {
        assert!(validate_geographic_point(&Point::new(180.1, 40.0)).is_err());
        assert!(validate_geographic_point(&Point::new(-200.0, 40.0)).is_err());
        assert!(validate_geographic_point(&Point::new(-74.0, 90.1)).is_err());
        assert!(validate_geographic_point(&Point::new(-74.0, -95.0)).is_err());
        assert!(validate_geographic_point(&Point::new(f64::NAN, 40.0)).is_err());
        assert!(validate_geographic_point(&Point::new(-74.0, f64::INFINITY)).is_err());
    }

    #[test]
    fn test_field_of_view_validation() {
        assert!(validate_field_of_view(&FieldOfView::new(0.0, 110.0, 30.0)).is_ok());
        assert!(validate_field_of_view(&FieldOfView::new(360.0, 360.0, 0.0)).is_ok());

        assert!(validate_field_of_view(&FieldOfView::new(-1.0, 110.0, 30.0)).is_err());
        assert!(validate_field_of_view(&FieldOfView::new(0.0, 0.0, 30.0)).is_err());
        assert!(validate_field_of_view(&FieldOfView::new(0.0, 90.0, -5.0)).is_err());
        assert!(validate_field_of_view(&FieldOfView::new(0.0, 90.0, f64::NAN)).is_err());
    }

    #[test]
    fn test_validate_camera_names_the_camera() {
        let bad = camera("cam-bad", Point::new(0.0, 91.0), 20.0);
        let err = validate_camera(&bad).unwrap_err();
        assert!(err.to_string().contains("cam-bad"));

        assert!(validate_camera(&camera("cam-ok", Point::new(0.0, 45.0), 20.0)).is_ok());
    }

    #[test]
    fn test_usable_cameras_skips_invalid_records() {
        let cameras = vec![
            camera("ok-1", Point::new(-0.12, 51.5), 30.0),
            camera("bad-lat", Point::new(-0.12, 95.0), 30.0),
            camera("bad-lng", Point::new(-190.0, 51.5), 30.0),
            camera("bad-range", Point::new(-0.12, 51.5), f64::NAN),
            camera("ok-2", Point::new(-0.13, 51.5), 0.0),
        ];

        let ids: Vec<&str> = usable_cameras(&cameras).iter().map(|c| c.id()).collect();
        assert_eq!(ids, ["ok-1", "ok-2"]);
    }

    #[test]
    fn test_cameras_from_json_rejects_unknown_type() {
        let json = r#"[{
            "id": "cam-1",
            "location": {"lat": 1.0, "lng": 1.0},
            "displayLocation": {"lat": 1.0, "lng": 1.0},
            "fieldOfView": {"direction": 0, "angle": 90, "range": 10},
            "type": "satellite",
            "shareWithCommunity": false
        }]"#;
        let err = cameras_from_json(json).unwrap_err();
        assert!(matches!(err, CovermapError::InvalidInput(_)));
    }
}
