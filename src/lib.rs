//! Privacy-preserving camera coverage maps: obfuscated display locations,
//! density clustering, hexagonal density grids, and heatmap point clouds.
//!
//! ```rust
//! use covermap::{Camera, CameraType, CoverageEngine, FieldOfView, Point};
//!
//! let engine = CoverageEngine::builder().build()?;
//!
//! let at = Point::new(-0.1278, 51.5074);
//! let cameras = vec![Camera::new(
//!     "cam-1",
//!     at,
//!     at.destination(30.0, 12.0),
//!     FieldOfView::new(90.0, 110.0, 30.0),
//!     CameraType::Doorbell,
//!     true,
//! )];
//!
//! let areas = engine.cluster(&cameras);
//! assert_eq!(areas.len(), 1);
//! assert_eq!(areas[0].radius, 200.0);
//!
//! let geojson = engine.hexagon_geojson(&cameras, &at, Some(1.0))?;
//! assert!(geojson.contains("FeatureCollection"));
//! # Ok::<(), covermap::CovermapError>(())
//! ```

pub mod builder;
pub mod clustering;
pub mod compute;
pub mod config;
pub mod engine;
pub mod entropy;
pub mod error;
pub mod heatmap;
pub mod hexgrid;
pub mod obfuscation;
pub mod samples;

pub use builder::EngineBuilder;
pub use config::EngineConfig;
pub use engine::CoverageEngine;
pub use entropy::EntropySource;
pub use error::{CovermapError, Result};

pub use covermap_types::camera::{Camera, CameraType, FieldOfView};
pub use covermap_types::density::{AreaType, CoverageLevel, DensityArea};
pub use covermap_types::geo::Point;
pub use covermap_types::heatmap::HeatmapPoint;
pub use covermap_types::hexagon::{HexColor, HexagonCell};

pub use clustering::{DensityClusterer, classify_area};
pub use heatmap::HeatmapSynthesizer;
pub use hexgrid::{H3Index, HexGridIndexer, HexIndex};
pub use obfuscation::{
    CameraRegistration, LocationObfuscator, PrivacyCheck, obfuscate_location,
    verify_location_privacy,
};
pub use samples::SampleDensityGenerator;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{CoverageEngine, CovermapError, EngineBuilder, EngineConfig, Result};

    pub use crate::{Camera, CameraRegistration, CameraType, FieldOfView, Point};

    pub use crate::{AreaType, DensityArea, HeatmapPoint, HexColor, HexagonCell};

    pub use crate::compute::validation::cameras_from_json;
}
