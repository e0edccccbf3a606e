//! Canonical geometry and attribute model used for spatial indexing.
//!
//! Every ingested feature becomes a [`GeoData`]: one [`Geometry`] (point, polygon or
//! multipolygon) and a map of typed [`AttributeValue`]s. With the `geojson` feature (enabled by
//! default) the [`geojson`](crate::geojson) module converts GeoJSON documents to and from this
//! model.
//!
//! ```
//! use geodata_types::{AttributeValue, GeoData, Geometry, GeometryKind};
//!
//! let data = GeoData::new(Geometry::point(2.3522, 48.8566)).with_property("name", "Paris");
//! assert_eq!(data.kind(), GeometryKind::Point);
//! assert_eq!(data.properties["name"], AttributeValue::String("Paris".into()));
//! ```

pub mod attribute;
pub mod error;
mod geo_data;
#[cfg(feature = "geojson")]
pub mod geojson;
pub mod geometry;

pub use attribute::{AttributeValue, Properties};
pub use error::GeoDataError;
pub use geo_data::GeoData;
pub use geometry::{Geometry, GeometryKind, Ring};
