//! Canonical geometry model.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GeoDataError;

/// Storage tag of a [`Geometry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GeometryKind {
    /// `POINT`
    Point,
    /// `POLYGON`
    Polygon,
    /// `MULTIPOLYGON`
    MultiPolygon,
}

impl GeometryKind {
    /// All supported kinds.
    pub const ALL: [GeometryKind; 3] = [Self::Point, Self::Polygon, Self::MultiPolygon];

    /// Wire tag of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            GeometryKind::Point => "POINT",
            GeometryKind::Polygon => "POLYGON",
            GeometryKind::MultiPolygon => "MULTIPOLYGON",
        }
    }
}

impl Display for GeometryKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GeometryKind {
    type Err = GeoDataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| GeoDataError::UnsupportedGeometryType(s.to_string()))
    }
}

/// One polygon ring stored as a flat `[lon0, lat0, lon1, lat1, ...]` sequence.
///
/// A ring that can be covered holds an even number of values and at least three vertices.
/// The ring is closed implicitly, a repeated first vertex at the end is allowed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ring(Vec<f64>);

impl Ring {
    /// Creates a ring from flat coordinates.
    pub fn new(coordinates: Vec<f64>) -> Self {
        Self(coordinates)
    }

    /// Creates a ring from `(lon, lat)` pairs.
    pub fn from_positions(positions: impl IntoIterator<Item = (f64, f64)>) -> Self {
        Self(
            positions
                .into_iter()
                .flat_map(|(lon, lat)| [lon, lat])
                .collect(),
        )
    }

    /// Flat coordinate values.
    pub fn coordinates(&self) -> &[f64] {
        &self.0
    }

    /// Number of coordinate values (twice the number of vertices for a valid ring).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the ring holds no coordinates.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of complete `(lon, lat)` pairs.
    pub fn vertex_count(&self) -> usize {
        self.0.len() / 2
    }

    /// Iterates over complete `(lon, lat)` pairs. A trailing unpaired value is ignored.
    pub fn positions(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.0.chunks_exact(2).map(|pair| (pair[0], pair[1]))
    }

    /// Consumes the ring returning flat coordinates.
    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

impl From<Vec<f64>> for Ring {
    fn from(value: Vec<f64>) -> Self {
        Self(value)
    }
}

/// Canonical geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "coordinates", rename_all = "UPPERCASE")]
pub enum Geometry {
    /// Single position.
    Point {
        /// Longitude in degrees.
        lon: f64,
        /// Latitude in degrees.
        lat: f64,
    },
    /// Polygon described by its outer ring.
    Polygon(Ring),
    /// Several polygons, one ring each.
    MultiPolygon(Vec<Ring>),
}

impl Geometry {
    /// Creates a point from longitude and latitude in degrees.
    pub fn point(lon: f64, lat: f64) -> Self {
        Self::Point { lon, lat }
    }

    /// Storage tag of the geometry.
    pub fn kind(&self) -> GeometryKind {
        match self {
            Geometry::Point { .. } => GeometryKind::Point,
            Geometry::Polygon(_) => GeometryKind::Polygon,
            Geometry::MultiPolygon(_) => GeometryKind::MultiPolygon,
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn kind_tags() {
        for kind in GeometryKind::ALL {
            assert_eq!(kind.to_string().parse::<GeometryKind>().ok(), Some(kind));
        }

        assert_matches!(
            "LINESTRING".parse::<GeometryKind>(),
            Err(GeoDataError::UnsupportedGeometryType(tag)) if tag == "LINESTRING"
        );
        assert!("point".parse::<GeometryKind>().is_err());
        assert_eq!(
            serde_json::to_value(GeometryKind::MultiPolygon).unwrap(),
            serde_json::json!("MULTIPOLYGON")
        );
    }

    #[test]
    fn ring_positions() {
        let ring = Ring::from_positions([(1.0, 2.0), (3.0, 4.0), (5.0, 6.0)]);
        assert_eq!(ring.coordinates(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(ring.vertex_count(), 3);
        assert_eq!(ring.clone().into_inner(), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);

        let odd = Ring::new(vec![1.0, 2.0, 3.0]);
        assert_eq!(odd.positions().collect::<Vec<_>>(), vec![(1.0, 2.0)]);
        assert_eq!(odd.len(), 3);
    }

    #[test]
    fn storage_form() {
        let geometry = Geometry::Polygon(Ring::new(vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0]));
        let value = serde_json::to_value(&geometry).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"kind": "POLYGON", "coordinates": [0.0, 0.0, 1.0, 0.0, 0.0, 1.0]})
        );

        let restored: Geometry = serde_json::from_value(value).unwrap();
        assert_eq!(restored.kind(), GeometryKind::Polygon);
        assert_eq!(restored, geometry);
    }
}
