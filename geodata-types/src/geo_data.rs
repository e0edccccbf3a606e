use serde::{Deserialize, Serialize};

use crate::attribute::{AttributeValue, Properties};
use crate::geometry::{Geometry, GeometryKind};

/// A geometry together with its attributes.
///
/// Built fresh for every ingested feature and owned by the caller afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoData {
    /// Geometry of the feature.
    pub geometry: Geometry,
    /// Attributes of the feature.
    #[serde(default)]
    pub properties: Properties,
}

impl GeoData {
    /// Creates a value without attributes.
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            properties: Properties::new(),
        }
    }

    /// Creates a value with the given attributes.
    pub fn with_properties(geometry: Geometry, properties: Properties) -> Self {
        Self {
            geometry,
            properties,
        }
    }

    /// Adds or replaces one attribute.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Storage tag of the geometry.
    pub fn kind(&self) -> GeometryKind {
        self.geometry.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder() {
        let data = GeoData::new(Geometry::point(2.35, 48.85))
            .with_property("name", "Paris")
            .with_property("capital", true)
            .with_property("name", "Paris, FR");

        assert_eq!(data.kind(), GeometryKind::Point);
        assert_eq!(data.properties.len(), 2);
        assert_eq!(data.properties["name"].as_str(), Some("Paris, FR"));
    }

    #[test]
    fn properties_default_when_missing() {
        let data: GeoData = serde_json::from_value(serde_json::json!({
            "geometry": {"kind": "POINT", "coordinates": {"lon": 1.0, "lat": 2.0}}
        }))
        .unwrap();

        assert_eq!(data.geometry, Geometry::point(1.0, 2.0));
        assert!(data.properties.is_empty());
    }
}
