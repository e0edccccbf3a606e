use geojson::{Feature, FeatureCollection, Position, Value};

use crate::error::GeoDataError;
use crate::geo_data::GeoData;
use crate::geojson::properties::PropertyPolicy;
use crate::geometry::{Geometry, Ring};

/// Converts a canonical geometry into a GeoJSON geometry.
///
/// A polygon becomes a single-ring polygon holding every stored vertex. A multipolygon becomes
/// one single-ring polygon per stored ring, in order. A ring with an unpaired trailing value
/// cannot be written and fails with [`GeoDataError::InvalidCoordinates`].
pub fn denormalize_geometry(geometry: &Geometry) -> Result<geojson::Geometry, GeoDataError> {
    let value = match geometry {
        Geometry::Point { lon, lat } => Value::Point(vec![*lon, *lat]),
        Geometry::Polygon(ring) => Value::Polygon(vec![ring_positions(ring)?]),
        Geometry::MultiPolygon(rings) => Value::MultiPolygon(
            rings
                .iter()
                .map(|ring| Ok(vec![ring_positions(ring)?]))
                .collect::<Result<_, GeoDataError>>()?,
        ),
    };

    Ok(geojson::Geometry::new(value))
}

/// Converts a canonical value into a GeoJSON feature.
pub fn denormalize_feature(data: &GeoData, policy: &PropertyPolicy) -> Result<Feature, GeoDataError> {
    Ok(Feature {
        geometry: Some(
            denormalize_geometry(&data.geometry)
                .map_err(|err| GeoDataError::Geometry(Box::new(err)))?,
        ),
        properties: Some(policy.to_external_map(&data.properties)?),
        ..Default::default()
    })
}

/// Serializes values as a GeoJSON feature collection using the default [`PropertyPolicy`].
pub fn denormalize_collection(items: &[GeoData]) -> Result<Vec<u8>, GeoDataError> {
    denormalize_collection_with(items, &PropertyPolicy::default())
}

/// Serializes values as a GeoJSON feature collection.
///
/// The collection is either written completely or not at all: every feature is converted before
/// serialization starts, and the first failing feature aborts the whole batch.
pub fn denormalize_collection_with(
    items: &[GeoData],
    policy: &PropertyPolicy,
) -> Result<Vec<u8>, GeoDataError> {
    let features = items
        .iter()
        .enumerate()
        .map(|(index, data)| {
            denormalize_feature(data, policy).map_err(|err| GeoDataError::Feature {
                index,
                source: Box::new(err),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let collection = FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    };

    Ok(serde_json::to_vec(&collection)?)
}

/// Serializes a sequence of points as one line string feature using the default
/// [`PropertyPolicy`].
///
/// The line follows the points in input order. Only the properties of the first point are kept,
/// the whole sequence is treated as a single track. An empty input produces a feature without
/// geometry.
pub fn denormalize_points_to_polyline(items: &[GeoData]) -> Result<Vec<u8>, GeoDataError> {
    denormalize_points_to_polyline_with(items, &PropertyPolicy::default())
}

/// Serializes a sequence of points as one line string feature, mapping the properties of the
/// first point with the given policy.
pub fn denormalize_points_to_polyline_with(
    items: &[GeoData],
    policy: &PropertyPolicy,
) -> Result<Vec<u8>, GeoDataError> {
    let Some(first) = items.first() else {
        return Ok(serde_json::to_vec(&Feature::default())?);
    };

    let line = items
        .iter()
        .map(|data| match &data.geometry {
            Geometry::Point { lon, lat } => Ok(vec![*lon, *lat]),
            other => Err(GeoDataError::UnsupportedGeometryType(
                other.kind().to_string(),
            )),
        })
        .collect::<Result<Vec<Position>, _>>()?;

    let feature = Feature {
        geometry: Some(geojson::Geometry::new(Value::LineString(line))),
        properties: Some(
            policy
                .to_external_map(&first.properties)
                .map_err(|err| GeoDataError::Properties(Box::new(err)))?,
        ),
        ..Default::default()
    };

    Ok(serde_json::to_vec(&feature)?)
}

fn ring_positions(ring: &Ring) -> Result<Vec<Position>, GeoDataError> {
    if ring.len() % 2 != 0 {
        return Err(GeoDataError::InvalidCoordinates(format!(
            "ring has an odd number of coordinate values ({})",
            ring.len()
        )));
    }

    Ok(ring.positions().map(|(lon, lat)| vec![lon, lat]).collect())
}
