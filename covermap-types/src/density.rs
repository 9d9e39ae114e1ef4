use crate::geo::Point;
use serde::{Deserialize, Serialize};

/// Land-use flavour of a density area, inferred from the camera mix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaType {
    Residential,
    Commercial,
    Mixed,
}

impl AreaType {
    pub const ALL: [AreaType; 3] = [AreaType::Residential, AreaType::Mixed, AreaType::Commercial];

    pub fn as_str(&self) -> &'static str {
        match self {
            AreaType::Residential => "residential",
            AreaType::Commercial => "commercial",
            AreaType::Mixed => "mixed",
        }
    }
}

impl std::fmt::Display for AreaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A circular aggregate of nearby cameras with a normalized coverage score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DensityArea {
    pub id: String,
    pub center: Point,
    /// Radius in meters
    pub radius: f64,
    /// Coverage score in [0, 1]
    pub density: f64,
    pub camera_count: usize,
    pub area_type: AreaType,
    /// Ids of the cameras that formed this area. Empty for synthetic areas.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub member_ids: Vec<String>,
}

impl DensityArea {
    /// Coverage legend bucket for this area's density.
    pub fn coverage_level(&self) -> CoverageLevel {
        CoverageLevel::from_density(self.density)
    }

    /// Whether two areas visibly overlap: centers closer than the mean of
    /// their radii.
    pub fn overlaps(&self, other: &DensityArea) -> bool {
        self.center.haversine_distance(&other.center) < (self.radius + other.radius) / 2.0
    }
}

/// Legend bucket used when rendering density areas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverageLevel {
    Minimal,
    Limited,
    Good,
    Excellent,
}

impl CoverageLevel {
    pub fn from_density(density: f64) -> Self {
        if density >= 0.7 {
            CoverageLevel::Excellent
        } else if density >= 0.4 {
            CoverageLevel::Good
        } else if density >= 0.2 {
            CoverageLevel::Limited
        } else {
            CoverageLevel::Minimal
        }
    }

    /// CSS color code for the legend.
    pub fn color(&self) -> &'static str {
        match self {
            CoverageLevel::Excellent => "#22c55e",
            CoverageLevel::Good => "#f59e0b",
            CoverageLevel::Limited => "#f97316",
            CoverageLevel::Minimal => "#ef4444",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CoverageLevel::Excellent => "Excellent camera coverage",
            CoverageLevel::Good => "Good camera coverage",
            CoverageLevel::Limited => "Limited camera coverage",
            CoverageLevel::Minimal => "Minimal camera coverage",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area(center: Point, radius: f64, density: f64) -> DensityArea {
        DensityArea {
            id: "a".into(),
            center,
            radius,
            density,
            camera_count: 2,
            area_type: AreaType::Residential,
            member_ids: Vec::new(),
        }
    }

    #[test]
    fn test_coverage_level_thresholds() {
        assert_eq!(CoverageLevel::from_density(0.0), CoverageLevel::Minimal);
        assert_eq!(CoverageLevel::from_density(0.19), CoverageLevel::Minimal);
        assert_eq!(CoverageLevel::from_density(0.2), CoverageLevel::Limited);
        assert_eq!(CoverageLevel::from_density(0.4), CoverageLevel::Good);
        assert_eq!(CoverageLevel::from_density(0.69), CoverageLevel::Good);
        assert_eq!(CoverageLevel::from_density(0.7), CoverageLevel::Excellent);
        assert_eq!(CoverageLevel::from_density(1.0), CoverageLevel::Excellent);
    }

    #[test]
    fn test_coverage_level_legend() {
        assert_eq!(CoverageLevel::Excellent.color(), "#22c55e");
        assert_eq!(CoverageLevel::Minimal.description(), "Minimal camera coverage");
    }

    #[test]
    fn test_overlap_uses_mean_radius() {
        let origin = Point::new(0.0, 0.0);
        let a = area(origin, 200.0, 0.5);

        // Mean radius is 250 m
        let near = area(origin.destination(90.0, 240.0), 300.0, 0.5);
        let far = area(origin.destination(90.0, 260.0), 300.0, 0.5);
        assert!(a.overlaps(&near));
        assert!(!a.overlaps(&far));
    }

    #[test]
    fn test_synthetic_area_omits_member_ids() {
        let json = serde_json::to_value(area(Point::new(1.0, 2.0), 150.0, 0.3)).unwrap();
        assert!(json.get("memberIds").is_none());
        assert_eq!(json["areaType"], "residential");
        assert_eq!(json["cameraCount"], 2);
    }
}
