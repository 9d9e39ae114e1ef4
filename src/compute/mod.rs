//! Geometry and data-shaping helpers shared by the engine components.
//!
//! - `validation`: coordinate and camera-record checks
//! - `sampling`: random placement in meters around a point
//! - `field_of_view`: camera view cones
//! - `geojson`: FeatureCollections for map renderers

pub mod field_of_view;
pub mod geojson;
pub mod sampling;
pub mod validation;
