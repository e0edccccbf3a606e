//! Cell coverings of canonical geometries.

use geodata_types::{GeoData, Geometry, Ring};
use log::debug;
use s2::cellid::CellID;
use s2::cellunion::CellUnion;
use s2::latlng::LatLng;

use crate::config::{CoveringConfig, MAX_CELL_LEVEL};
use crate::error::{CoverError, PolygonDefect};
use crate::fence::build_loop_from_coordinates;
use crate::kernel::{LoopLike, RegionCovererLike};
use crate::loops::Loop;

/// Computes the cells used as index keys of a geometry.
///
/// * A point is indexed by the single cell containing it at the coverer's minimum level, capped
///   at the leaf level.
/// * A polygon is covered exactly, through the loop built from its ring.
/// * A multipolygon is covered ring by ring using the bounding rectangle of each loop, and the
///   cells of all rings are appended in ring order. These coverings are cheaper but looser than
///   exact ones, so they must not be used for exact containment tests.
///
/// Cells are returned in the order produced by the coverer, without sorting or deduplication.
pub fn cover(data: &GeoData, coverer: &impl RegionCovererLike) -> Result<CellUnion, CoverError> {
    match &data.geometry {
        Geometry::Point { lon, lat } => Ok(cover_point(*lon, *lat, coverer.min_level())),
        Geometry::Polygon(ring) => {
            let fence = fence_for_ring(ring).map_err(CoverError::InvalidPolygon)?;
            Ok(coverer.covering(&fence))
        }
        Geometry::MultiPolygon(rings) => {
            let mut cells = Vec::new();
            for (index, ring) in rings.iter().enumerate() {
                let fence = fence_for_ring(ring).map_err(|defect| CoverError::InvalidRing {
                    ring: index,
                    defect,
                })?;
                let covering = coverer.covering(fence.bound());
                debug!("Ring {index} covered by {} cells", covering.0.len());
                cells.extend(covering.0);
            }

            Ok(CellUnion(cells))
        }
    }
}

/// Covers every item, failing on the first geometry that cannot be covered.
pub fn cover_all(
    items: &[GeoData],
    coverer: &impl RegionCovererLike,
) -> Result<Vec<CellUnion>, CoverError> {
    items.iter().map(|data| cover(data, coverer)).collect()
}

impl CoveringConfig {
    /// Validates the configuration and covers the geometry with it.
    pub fn cover(&self, data: &GeoData) -> Result<CellUnion, CoverError> {
        cover(data, &self.region_coverer()?)
    }
}

/// Rejects loops the coverer cannot handle.
pub fn check_fence(fence: &impl LoopLike) -> Result<(), PolygonDefect> {
    if fence.is_empty() {
        Err(PolygonDefect::EmptyLoop)
    } else if fence.is_full() {
        Err(PolygonDefect::FullLoop)
    } else if fence.contains_origin() {
        Err(PolygonDefect::ContainsOrigin)
    } else {
        Ok(())
    }
}

fn cover_point(lon: f64, lat: f64, level: u8) -> CellUnion {
    let leaf = CellID::from(LatLng::from_degrees(lat, lon));
    CellUnion(vec![leaf.parent(u64::from(level.min(MAX_CELL_LEVEL)))])
}

fn fence_for_ring(ring: &Ring) -> Result<Loop, PolygonDefect> {
    let count = ring.len();
    if count < 6 {
        return Err(PolygonDefect::TooFewCoordinates(count));
    }
    if count % 2 != 0 {
        return Err(PolygonDefect::OddCoordinateCount(count));
    }

    let fence = build_loop_from_coordinates(ring.coordinates())?;
    check_fence(&fence)?;
    Ok(fence)
}
