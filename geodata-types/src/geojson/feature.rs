use geojson::{Feature, FeatureCollection, GeoJson, Position, Value};
use log::debug;

use crate::attribute::Properties;
use crate::error::GeoDataError;
use crate::geo_data::GeoData;
use crate::geojson::properties::PropertyPolicy;
use crate::geometry::Geometry;

/// Converts a GeoJSON geometry into the canonical form.
///
/// Only points are accepted on this path. Any other geometry type, polygons included, fails with
/// [`GeoDataError::UnsupportedGeometryType`].
pub fn normalize_geometry(geometry: &geojson::Geometry) -> Result<Geometry, GeoDataError> {
    match &geometry.value {
        Value::Point(position) => point_from_position(position),
        other => Err(GeoDataError::UnsupportedGeometryType(
            other.type_name().to_string(),
        )),
    }
}

/// Converts a GeoJSON feature using the default [`PropertyPolicy`].
///
/// Properties are converted first. If they fail, the geometry is not looked at.
pub fn normalize_feature(feature: &Feature) -> Result<GeoData, GeoDataError> {
    normalize_feature_with(feature, &PropertyPolicy::default())
}

/// Converts a GeoJSON feature using the given property policy.
pub fn normalize_feature_with(
    feature: &Feature,
    policy: &PropertyPolicy,
) -> Result<GeoData, GeoDataError> {
    let properties = match &feature.properties {
        Some(properties) => policy
            .to_attribute_map(properties)
            .map_err(|err| GeoDataError::Properties(Box::new(err)))?,
        None => Properties::new(),
    };

    let geometry = feature
        .geometry
        .as_ref()
        .ok_or(GeoDataError::MissingGeometry)
        .and_then(normalize_geometry)
        .map_err(|err| GeoDataError::Geometry(Box::new(err)))?;

    Ok(GeoData::with_properties(geometry, properties))
}

/// Converts every feature of a collection. Fails on the first invalid feature.
pub fn normalize_collection(collection: &FeatureCollection) -> Result<Vec<GeoData>, GeoDataError> {
    collection
        .features
        .iter()
        .enumerate()
        .map(|(index, feature)| {
            normalize_feature(feature).map_err(|err| GeoDataError::Feature {
                index,
                source: Box::new(err),
            })
        })
        .collect()
}

/// Parses a GeoJSON document and converts its content.
///
/// A bare geometry produces a single value without properties.
pub fn normalize_document(document: &str) -> Result<Vec<GeoData>, GeoDataError> {
    match document.parse::<GeoJson>()? {
        GeoJson::Geometry(geometry) => {
            let geometry = normalize_geometry(&geometry)
                .map_err(|err| GeoDataError::Geometry(Box::new(err)))?;
            Ok(vec![GeoData::new(geometry)])
        }
        GeoJson::Feature(feature) => Ok(vec![normalize_feature(&feature)?]),
        GeoJson::FeatureCollection(collection) => normalize_collection(&collection),
    }
}

fn point_from_position(position: &Position) -> Result<Geometry, GeoDataError> {
    match position.as_slice() {
        [lon, lat, rest @ ..] => {
            if !rest.is_empty() {
                debug!("Dropping {} extra dimension(s) of a point", rest.len());
            }
            Ok(Geometry::point(*lon, *lat))
        }
        _ => Err(GeoDataError::InvalidCoordinates(
            "point must contain at least 2 dimensions".to_string(),
        )),
    }
}
