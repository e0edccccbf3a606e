//! Error type used by the crate.

use thiserror::Error;

/// Error enum.
#[derive(Debug, Error)]
pub enum GeoDataError {
    /// Geometry kind is not supported by the requested conversion.
    #[error("unsupported geometry type: {0}")]
    UnsupportedGeometryType(String),

    /// Attribute value has no canonical counterpart.
    #[error("unsupported type `{kind}` of property `{key}`")]
    UnsupportedPropertyType {
        /// Name of the offending property.
        key: String,
        /// Name of the value type that was found.
        kind: String,
    },

    /// Coordinates cannot be read as a position.
    #[error("invalid coordinates: {0}")]
    InvalidCoordinates(String),

    /// Feature carries no geometry.
    #[error("feature has no geometry")]
    MissingGeometry,

    /// Failure while converting the properties of a feature.
    #[error("failed to convert properties: {0}")]
    Properties(#[source] Box<GeoDataError>),

    /// Failure while converting the geometry of a feature.
    #[error("failed to convert geometry: {0}")]
    Geometry(#[source] Box<GeoDataError>),

    /// Failure while converting a member of a feature collection.
    #[error("failed to convert feature {index}: {source}")]
    Feature {
        /// Position of the feature in the collection.
        index: usize,
        /// Underlying error.
        #[source]
        source: Box<GeoDataError>,
    },

    /// Input document is not valid GeoJSON.
    #[cfg(feature = "geojson")]
    #[error("failed to parse GeoJSON: {0}")]
    Parse(#[from] geojson::Error),

    /// Output document could not be serialized.
    #[cfg(feature = "geojson")]
    #[error("failed to serialize GeoJSON: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl GeoDataError {
    /// Returns the error that started the chain, skipping context wrappers.
    pub fn root(&self) -> &GeoDataError {
        match self {
            Self::Properties(inner) | Self::Geometry(inner) => inner.root(),
            Self::Feature { source, .. } => source.root(),
            other => other,
        }
    }
}
