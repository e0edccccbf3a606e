//! Seams to the spherical geometry kernel.
//!
//! Covering code only talks to loops and coverers through these traits, so either side can be
//! replaced or mocked.

use s2::cellunion::CellUnion;
use s2::region::{Region, RegionCoverer};

/// Closed spherical polygon that can be handed to a coverer.
///
/// The bounding rectangle comes from [`Region::rect_bound`].
pub trait LoopLike: Region {
    /// True if the loop encloses no points.
    fn is_empty(&self) -> bool;

    /// True if the loop encloses the whole sphere.
    fn is_full(&self) -> bool;

    /// True if the loop contains the kernel reference origin.
    fn contains_origin(&self) -> bool;
}

/// Computes cell coverings of regions.
pub trait RegionCovererLike {
    /// Level of the cell used for point geometries.
    fn min_level(&self) -> u8;

    /// Returns cells covering `region`.
    fn covering<R: Region + 'static>(&self, region: &R) -> CellUnion;
}

impl RegionCovererLike for RegionCoverer {
    fn min_level(&self) -> u8 {
        self.min_level
    }

    fn covering<R: Region + 'static>(&self, region: &R) -> CellUnion {
        RegionCoverer::covering(self, region)
    }
}
