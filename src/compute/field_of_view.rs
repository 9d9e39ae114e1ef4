//! Field-of-view cones.
//!
//! A cone starts at the camera, sweeps an arc of `range` meters across the
//! view angle centered on `direction` (compass bearing), and returns to the
//! camera.

use crate::compute::sampling::offset;
use covermap_types::camera::FieldOfView;
use covermap_types::geo::Point;
use geojson::{Feature, Geometry, JsonObject, Value};

const DEGREES_PER_STEP: f64 = 8.0;
const MIN_STEPS: usize = 6;
const MAX_STEPS: usize = 16;

/// Arc segments used for a view angle: wider angles get more.
pub fn cone_steps(angle_deg: f64) -> usize {
    let steps = (angle_deg / DEGREES_PER_STEP).floor();
    if !steps.is_finite() || steps < MIN_STEPS as f64 {
        MIN_STEPS
    } else {
        (steps as usize).min(MAX_STEPS)
    }
}

/// Closed outline of the cone: origin, `steps + 1` arc vertices, origin.
///
/// # Examples
///
/// ```
/// use covermap::compute::field_of_view::cone_polygon;
/// use covermap::{FieldOfView, Point};
///
/// let origin = Point::new(-0.1278, 51.5074);
/// let ring = cone_polygon(&origin, &FieldOfView::new(90.0, 80.0, 25.0));
/// assert_eq!(ring.len(), 10 + 3);
/// assert_eq!(ring.first(), ring.last());
/// ```
pub fn cone_polygon(origin: &Point, fov: &FieldOfView) -> Vec<Point> {
    let steps = cone_steps(fov.angle);
    let start = fov.direction - fov.angle / 2.0;
    let step = fov.angle / steps as f64;

    let mut ring = Vec::with_capacity(steps + 3);
    ring.push(*origin);
    ring.extend((0..=steps).map(|i| {
        let bearing = start + step * i as f64;
        offset(origin, bearing.to_radians(), fov.range)
    }));
    ring.push(*origin);
    ring
}

/// GeoJSON polygon feature for a cone, carrying the view parameters.
pub fn cone_feature(origin: &Point, fov: &FieldOfView) -> Feature {
    let ring: Vec<Vec<f64>> = cone_polygon(origin, fov)
        .iter()
        .map(Point::to_position)
        .collect();

    let mut properties = JsonObject::new();
    properties.insert(
        "direction".to_string(),
        serde_json::json!((fov.direction * 10.0).round() / 10.0),
    );
    properties.insert("angle".to_string(), serde_json::json!(fov.angle));
    properties.insert("range".to_string(), serde_json::json!(fov.range));

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Polygon(vec![ring]))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cone_steps() {
        assert_eq!(cone_steps(10.0), 6);
        assert_eq!(cone_steps(80.0), 10);
        assert_eq!(cone_steps(110.0), 13);
        assert_eq!(cone_steps(360.0), 16);
        assert_eq!(cone_steps(f64::NAN), 6);
    }

    #[test]
    fn test_cone_arc_at_range() {
        let origin = Point::new(13.4050, 52.5200);
        let fov = FieldOfView::new(0.0, 90.0, 40.0);
        let ring = cone_polygon(&origin, &fov);

        assert_eq!(ring.len(), cone_steps(90.0) + 3);
        for vertex in &ring[1..ring.len() - 1] {
            assert!((origin.haversine_distance(vertex) - 40.0).abs() < 1e-6);
            // Facing north, the whole arc sits north of the camera.
            assert!(vertex.lat() > origin.lat());
        }
    }

    #[test]
    fn test_cone_feature_properties() {
        let origin = Point::new(13.4050, 52.5200);
        let feature = cone_feature(&origin, &FieldOfView::new(123.456, 70.0, 25.0));
        let props = feature.properties.unwrap();

        assert_eq!(props["direction"], serde_json::json!(123.5));
        assert_eq!(props["angle"], serde_json::json!(70.0));
        assert_eq!(props["range"], serde_json::json!(25.0));

        match feature.geometry.unwrap().value {
            Value::Polygon(rings) => {
                assert_eq!(rings.len(), 1);
                assert_eq!(rings[0].first(), rings[0].last());
            }
            other => panic!("expected polygon, got {:?}", other),
        }
    }
}
