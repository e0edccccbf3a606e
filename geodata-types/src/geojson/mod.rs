//! Conversions between GeoJSON documents and the canonical model.
//!
//! Ingestion goes through [`normalize_feature`] and friends, output through
//! [`denormalize_collection`] and [`denormalize_points_to_polyline`]. Feature properties are
//! mapped according to a [`PropertyPolicy`].

mod collection;
mod feature;
mod properties;

pub use collection::{
    denormalize_collection, denormalize_collection_with, denormalize_feature,
    denormalize_geometry, denormalize_points_to_polyline, denormalize_points_to_polyline_with,
};
pub use feature::{
    normalize_collection, normalize_document, normalize_feature, normalize_feature_with,
    normalize_geometry,
};
pub use properties::{to_attribute_map, to_external_map, PropertyPolicy, UnsupportedValue};
