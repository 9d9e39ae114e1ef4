use crate::geo::Point;
use serde::{Deserialize, Serialize};

/// A weighted sample for heat-layer rendering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatmapPoint {
    pub location: Point,
    /// Intensity in [0, 1]
    pub weight: f64,
}

impl HeatmapPoint {
    pub fn new(location: Point, weight: f64) -> Self {
        Self { location, weight }
    }
}
