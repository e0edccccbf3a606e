//! S2 cell coverings used as spatial index keys.
//!
//! A [`GeoData`](geodata_types::GeoData) geometry is turned into a set of S2 cells by [`cover`]:
//!
//! * points map to the single cell containing them at the coverer's minimum level;
//! * polygon rings are built into a [`Loop`] fence, oriented counter-clockwise, and covered
//!   exactly;
//! * multipolygons are covered ring by ring through the bounding rectangle of each fence.
//!
//! The coverer parameters are held by [`CoveringConfig`]:
//!
//! ```
//! use geodata::CoveringConfig;
//! use geodata_types::{GeoData, Geometry, Ring};
//!
//! let square = Ring::new(vec![10.0, 10.0, 10.01, 10.0, 10.01, 10.01, 10.0, 10.01, 10.0, 10.0]);
//! let config = CoveringConfig::default().with_levels(10, 16);
//!
//! let cells = config.cover(&GeoData::new(Geometry::Polygon(square))).unwrap();
//! assert!(!cells.0.is_empty());
//! assert!(cells.0.iter().all(|id| (10..=16).contains(&id.level())));
//! ```

pub mod config;
pub mod cover;
pub mod error;
pub mod fence;
pub mod kernel;
pub mod loops;

pub use config::CoveringConfig;
pub use cover::{check_fence, cover, cover_all};
pub use error::{CoverError, PolygonDefect};
pub use fence::{build_loop_from_coordinates, build_loop_from_points, winding, Winding};
pub use kernel::{LoopLike, RegionCovererLike};
pub use loops::Loop;
pub use s2::cellunion::CellUnion;

#[cfg(test)]
mod tests {
    use geodata_types::geojson::normalize_document;
    use geodata_types::{AttributeValue, Geometry};
    use s2::cell::Cell;
    use s2::latlng::LatLng;
    use s2::point::Point;

    use super::*;

    #[test]
    fn geojson_point_to_cell() {
        let document = r#"{
            "type": "Feature",
            "geometry": {"type": "Point", "coordinates": [-122.3321, 47.6062, 56.0]},
            "properties": {"name": "Seattle", "visited": true}
        }"#;

        let items = normalize_document(document).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].geometry, Geometry::point(-122.3321, 47.6062));
        assert_eq!(items[0].properties["visited"], AttributeValue::Bool(true));

        let config = CoveringConfig::default().with_levels(12, 18);
        let cells = config.cover(&items[0]).unwrap();
        assert_eq!(cells.0.len(), 1);

        let cell = Cell::from(cells.0[0]);
        assert_eq!(cell.level(), 12);
        assert!(cell.contains_point(&Point::from(LatLng::from_degrees(47.6062, -122.3321))));
    }

    #[test]
    fn shareable_between_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Loop>();
        assert_send_sync::<CoveringConfig>();
        assert_send_sync::<s2::region::RegionCoverer>();
        assert_send_sync::<geodata_types::GeoData>();
    }
}
