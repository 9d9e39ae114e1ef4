use crate::geo::Point;
use serde::{Deserialize, Serialize};

/// Kind of camera as declared by its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraType {
    Doorbell,
    Security,
    Dash,
    Indoor,
    Other,
}

impl CameraType {
    pub const ALL: [CameraType; 5] = [
        CameraType::Doorbell,
        CameraType::Security,
        CameraType::Dash,
        CameraType::Indoor,
        CameraType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CameraType::Doorbell => "doorbell",
            CameraType::Security => "security",
            CameraType::Dash => "dash",
            CameraType::Indoor => "indoor",
            CameraType::Other => "other",
        }
    }
}

impl std::fmt::Display for CameraType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Viewing cone of a camera.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldOfView {
    /// Compass direction in degrees, 0 = north, 90 = east
    pub direction: f64,
    /// Opening angle in degrees
    pub angle: f64,
    /// Effective range in meters
    pub range: f64,
}

impl FieldOfView {
    pub fn new(direction: f64, angle: f64, range: f64) -> Self {
        Self {
            direction,
            angle,
            range,
        }
    }
}

/// A registered camera as read from the camera registry.
///
/// `location` is the exact position and is only ever shown to the owner.
/// `display_location` is the randomized public position. It is computed once
/// when the camera is registered; this type exposes no way to replace it, so
/// a record can never be re-fuzzed after the fact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Camera {
    id: String,
    location: Point,
    display_location: Point,
    field_of_view: FieldOfView,
    #[serde(rename = "type")]
    camera_type: CameraType,
    share_with_community: bool,
}

impl Camera {
    pub fn new(
        id: impl Into<String>,
        location: Point,
        display_location: Point,
        field_of_view: FieldOfView,
        camera_type: CameraType,
        share_with_community: bool,
    ) -> Self {
        Self {
            id: id.into(),
            location,
            display_location,
            field_of_view,
            camera_type,
            share_with_community,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Exact location. Owner-only; the density engine never reads it.
    pub fn location(&self) -> &Point {
        &self.location
    }

    /// Public, randomized location.
    pub fn display_location(&self) -> &Point {
        &self.display_location
    }

    pub fn field_of_view(&self) -> &FieldOfView {
        &self.field_of_view
    }

    pub fn camera_type(&self) -> CameraType {
        self.camera_type
    }

    pub fn shares_with_community(&self) -> bool {
        self.share_with_community
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_camera() -> Camera {
        Camera::new(
            "cam-42",
            Point::new(-0.1278, 51.5074),
            Point::new(-0.1275, 51.5076),
            FieldOfView::new(180.0, 90.0, 25.0),
            CameraType::Security,
            false,
        )
    }

    #[test]
    fn test_camera_accessors() {
        let camera = sample_camera();
        assert_eq!(camera.id(), "cam-42");
        assert_eq!(camera.camera_type(), CameraType::Security);
        assert_eq!(camera.field_of_view().range, 25.0);
        assert!(!camera.shares_with_community());
        assert_ne!(camera.location(), camera.display_location());
    }

    #[test]
    fn test_camera_json_shape() {
        let camera = sample_camera();
        let json = serde_json::to_value(&camera).unwrap();

        assert_eq!(json["type"], "security");
        assert_eq!(json["shareWithCommunity"], false);
        assert_eq!(json["displayLocation"]["lat"], 51.5076);
        assert_eq!(json["fieldOfView"]["range"], 25.0);

        let back: Camera = serde_json::from_value(json).unwrap();
        assert_eq!(back, camera);
    }

    #[test]
    fn test_camera_missing_display_location_is_rejected() {
        let json = r#"{
            "id": "cam-1",
            "location": {"lat": 51.5, "lng": -0.12},
            "fieldOfView": {"direction": 0, "angle": 90, "range": 20},
            "type": "doorbell",
            "shareWithCommunity": true
        }"#;
        assert!(serde_json::from_str::<Camera>(json).is_err());
    }

    #[test]
    fn test_camera_type_display() {
        let names: Vec<String> = CameraType::ALL.iter().map(|t| t.to_string()).collect();
        assert_eq!(names, ["doorbell", "security", "dash", "indoor", "other"]);
    }
}
