use crate::geo::Point;
use serde::{Deserialize, Serialize};

/// Four-bucket palette for hexagon density, low (blue) to high (red).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HexColor {
    Blue,
    Green,
    Amber,
    Red,
}

impl HexColor {
    /// Bucket a normalized density score.
    ///
    /// # Examples
    ///
    /// ```
    /// use covermap_types::hexagon::HexColor;
    ///
    /// assert_eq!(HexColor::for_score(0.1), HexColor::Blue);
    /// assert_eq!(HexColor::for_score(1.0), HexColor::Red);
    /// ```
    pub fn for_score(score: f64) -> Self {
        if score < 0.25 {
            HexColor::Blue
        } else if score < 0.5 {
            HexColor::Green
        } else if score < 0.75 {
            HexColor::Amber
        } else {
            HexColor::Red
        }
    }

    /// CSS color code handed to renderers.
    pub fn css(&self) -> &'static str {
        match self {
            HexColor::Blue => "#3b82f6",
            HexColor::Green => "#10b981",
            HexColor::Amber => "#f59e0b",
            HexColor::Red => "#ef4444",
        }
    }
}

/// One occupied cell of the hexagonal density grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HexagonCell {
    /// Spatial index id of the cell
    pub id: String,
    pub center: Point,
    /// Closed ring: the first vertex is repeated at the end
    pub boundary: Vec<Point>,
    pub camera_count: usize,
    /// Count normalized against the busiest cell of the grid, in [0, 1]
    pub density_score: f64,
    pub color: HexColor,
}

impl HexagonCell {
    pub fn is_closed(&self) -> bool {
        self.boundary.len() >= 4 && self.boundary.first() == self.boundary.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_thresholds() {
        assert_eq!(HexColor::for_score(0.0), HexColor::Blue);
        assert_eq!(HexColor::for_score(0.249), HexColor::Blue);
        assert_eq!(HexColor::for_score(0.25), HexColor::Green);
        assert_eq!(HexColor::for_score(0.5), HexColor::Amber);
        assert_eq!(HexColor::for_score(0.749), HexColor::Amber);
        assert_eq!(HexColor::for_score(0.75), HexColor::Red);
    }

    #[test]
    fn test_css_codes() {
        assert_eq!(HexColor::Blue.css(), "#3b82f6");
        assert_eq!(HexColor::Green.css(), "#10b981");
        assert_eq!(HexColor::Amber.css(), "#f59e0b");
        assert_eq!(HexColor::Red.css(), "#ef4444");
    }

    #[test]
    fn test_is_closed() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(0.001, 0.0);
        let c = Point::new(0.0, 0.001);
        let mut cell = HexagonCell {
            id: "x".into(),
            center: a,
            boundary: vec![a, b, c, a],
            camera_count: 1,
            density_score: 1.0,
            color: HexColor::Red,
        };
        assert!(cell.is_closed());

        cell.boundary.pop();
        assert!(!cell.is_closed());
    }
}
