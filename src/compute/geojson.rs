//! GeoJSON transforms for map renderers.

use crate::compute::field_of_view::cone_feature;
use crate::error::{CovermapError, Result};
use covermap_types::camera::Camera;
use covermap_types::density::DensityArea;
use covermap_types::geo::Point;
use covermap_types::heatmap::HeatmapPoint;
use covermap_types::hexagon::HexagonCell;
use geojson::feature::Id;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use serde_json::json;

fn feature(geometry: Value, id: Option<&str>, properties: JsonObject) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(geometry)),
        id: id.map(|id| Id::String(id.to_string())),
        properties: Some(properties),
        foreign_members: None,
    }
}

fn collection(features: Vec<Feature>) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

fn serialize_collection(collection: &FeatureCollection, what: &str) -> Result<String> {
    serde_json::to_string(collection).map_err(|e| {
        CovermapError::SerializationErrorWithContext(format!(
            "Failed to serialize {} feature collection: {}",
            what, e
        ))
    })
}

/// `[lng, lat]` ring, closed even if the cell's boundary is not.
fn closed_positions(boundary: &[Point]) -> Vec<Vec<f64>> {
    let mut ring: Vec<Vec<f64>> = boundary.iter().map(Point::to_position).collect();
    if let (Some(first), Some(last)) = (boundary.first(), boundary.last())
        && first != last
    {
        ring.push(first.to_position());
    }
    ring
}

/// Polygon features with `cameraCount`, `densityScore` and `color`.
///
/// # Examples
///
/// ```
/// use covermap::compute::geojson::hexagons_to_feature_collection;
/// use covermap::{HexColor, HexagonCell, Point};
///
/// let ring = vec![
///     Point::new(0.0, 0.0),
///     Point::new(0.001, 0.0),
///     Point::new(0.001, 0.001),
///     Point::new(0.0, 0.0),
/// ];
/// let cell = HexagonCell {
///     id: "8b1fb46622dcfff".into(),
///     center: Point::new(0.0006, 0.0003),
///     boundary: ring,
///     camera_count: 2,
///     density_score: 1.0,
///     color: HexColor::Red,
/// };
///
/// let fc = hexagons_to_feature_collection(&[cell]);
/// assert_eq!(fc.features.len(), 1);
/// ```
pub fn hexagons_to_feature_collection(hexagons: &[HexagonCell]) -> FeatureCollection {
    collection(
        hexagons
            .iter()
            .map(|hex| {
                let mut properties = JsonObject::new();
                properties.insert("cameraCount".to_string(), json!(hex.camera_count));
                properties.insert("densityScore".to_string(), json!(hex.density_score));
                properties.insert("color".to_string(), json!(hex.color.css()));

                feature(
                    Value::Polygon(vec![closed_positions(&hex.boundary)]),
                    Some(&hex.id),
                    properties,
                )
            })
            .collect(),
    )
}

pub fn hexagons_to_geojson(hexagons: &[HexagonCell]) -> Result<String> {
    serialize_collection(&hexagons_to_feature_collection(hexagons), "hexagon")
}

/// Point features at area centers with `radius`, `density`, `cameraCount`,
/// `areaType` and the coverage legend `color`.
pub fn density_areas_to_feature_collection(areas: &[DensityArea]) -> FeatureCollection {
    collection(
        areas
            .iter()
            .map(|area| {
                let mut properties = JsonObject::new();
                properties.insert("radius".to_string(), json!(area.radius));
                properties.insert("density".to_string(), json!(area.density));
                properties.insert("cameraCount".to_string(), json!(area.camera_count));
                properties.insert("areaType".to_string(), json!(area.area_type.as_str()));
                properties.insert("color".to_string(), json!(area.coverage_level().color()));

                feature(
                    Value::Point(area.center.to_position()),
                    Some(&area.id),
                    properties,
                )
            })
            .collect(),
    )
}

pub fn density_areas_to_geojson(areas: &[DensityArea]) -> Result<String> {
    serialize_collection(&density_areas_to_feature_collection(areas), "density area")
}

/// Point features carrying `weight`, the shape heat layers consume.
pub fn heatmap_to_feature_collection(points: &[HeatmapPoint]) -> FeatureCollection {
    collection(
        points
            .iter()
            .map(|point| {
                let mut properties = JsonObject::new();
                properties.insert("weight".to_string(), json!(point.weight));
                feature(Value::Point(point.location.to_position()), None, properties)
            })
            .collect(),
    )
}

pub fn heatmap_to_geojson(points: &[HeatmapPoint]) -> Result<String> {
    serialize_collection(&heatmap_to_feature_collection(points), "heatmap")
}

/// Field-of-view cones drawn from each camera's display location.
///
/// Cameras with an invalid display location are left out.
pub fn fields_of_view_to_feature_collection(cameras: &[Camera]) -> FeatureCollection {
    collection(
        cameras
            .iter()
            .filter(|camera| camera.display_location().is_valid_geographic())
            .map(|camera| cone_feature(camera.display_location(), camera.field_of_view()))
            .collect(),
    )
}
