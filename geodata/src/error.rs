//! Error types used by the crate.

use thiserror::Error;

/// Reason a ring cannot be used as a loop fence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PolygonDefect {
    /// Less than six coordinate values, i.e. less than three vertices.
    #[error("ring has {0} coordinate values, at least 6 are required")]
    TooFewCoordinates(usize),
    /// Coordinate values do not form complete pairs.
    #[error("ring has an odd number of coordinate values ({0})")]
    OddCoordinateCount(usize),
    /// Less than three vertices remain after removing repeated ones.
    #[error("ring has fewer than 3 distinct vertices")]
    TooFewVertices,
    /// Loop encloses nothing.
    #[error("loop is empty")]
    EmptyLoop,
    /// Loop encloses the whole sphere.
    #[error("loop covers the full sphere")]
    FullLoop,
    /// Loop contains the reference origin point.
    #[error("loop contains the origin point")]
    ContainsOrigin,
}

/// Error enum.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoverError {
    /// Polygon ring is not valid.
    #[error("invalid polygon: {0}")]
    InvalidPolygon(PolygonDefect),

    /// One ring of a multipolygon is not valid.
    #[error("invalid polygon at ring {ring}: {defect}")]
    InvalidRing {
        /// Position of the ring in the multipolygon.
        ring: usize,
        /// What is wrong with the ring.
        defect: PolygonDefect,
    },

    /// Covering parameters are out of range.
    #[error("invalid covering configuration: {0}")]
    InvalidConfig(String),
}

impl CoverError {
    /// Defect of the offending ring, if the error is about polygon validity.
    pub fn defect(&self) -> Option<PolygonDefect> {
        match self {
            CoverError::InvalidPolygon(defect) | CoverError::InvalidRing { defect, .. } => {
                Some(*defect)
            }
            CoverError::InvalidConfig(_) => None,
        }
    }
}
