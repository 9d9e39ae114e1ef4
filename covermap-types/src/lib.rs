//! # covermap-types
//!
//! Core data types shared by the covermap density engine and its callers.
//!
//! - **Geometry**: `Point` (longitude/latitude on top of `geo::Point`)
//! - **Registry records**: `Camera`, `CameraType`, `FieldOfView`
//! - **Derived views**: `DensityArea`, `AreaType`, `CoverageLevel`,
//!   `HexagonCell`, `HexColor`, `HeatmapPoint`
//!
//! All types are serializable with Serde. Derived views are ephemeral: the
//! engine recomputes them on every request and never persists them.
//!
//! ## Examples
//!
//! ```rust
//! use covermap_types::camera::{Camera, CameraType, FieldOfView};
//! use covermap_types::geo::Point;
//!
//! let camera = Camera::new(
//!     "cam-1",
//!     Point::new(-0.1278, 51.5074),
//!     Point::new(-0.1276, 51.5075),
//!     FieldOfView::new(90.0, 110.0, 30.0),
//!     CameraType::Doorbell,
//!     true,
//! );
//! assert_eq!(camera.camera_type(), CameraType::Doorbell);
//! ```

pub mod camera;
pub mod density;
pub mod geo;
pub mod heatmap;
pub mod hexagon;
