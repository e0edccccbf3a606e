//! Construction of loop fences from polygon rings.

use log::debug;
use s2::latlng::LatLng;
use s2::point::Point;
use s2::predicates::{robust_sign, Direction};

use crate::error::PolygonDefect;
use crate::loops::Loop;

/// Direction in which a ring is traversed, as seen from outside the sphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winding {
    /// Interior on the right of the edges.
    Clockwise,
    /// Interior on the left of the edges.
    CounterClockwise,
}

/// Determines the winding of a closed ring.
///
/// The ring is assumed to enclose less than a hemisphere. The sum of turning angles at the
/// vertices is positive for counter-clockwise rings and negative for clockwise ones. Unlike the
/// sign of a single vertex triple it does not depend on which vertex the ring starts at, so
/// concave rings are handled too. Degenerate rings with zero turning are reported as
/// counter-clockwise.
pub fn winding(vertices: &[Point]) -> Winding {
    let n = vertices.len();
    let turning: f64 = (0..n)
        .map(|i| {
            turn_angle(
                &vertices[(i + n - 1) % n],
                &vertices[i],
                &vertices[(i + 1) % n],
            )
        })
        .sum();

    if turning < 0.0 {
        Winding::Clockwise
    } else {
        Winding::CounterClockwise
    }
}

/// Builds a loop from a flat `[lon0, lat0, lon1, lat1, ...]` ring in degrees.
///
/// See [`build_loop_from_points`] for the rules applied to the vertices.
pub fn build_loop_from_coordinates(coordinates: &[f64]) -> Result<Loop, PolygonDefect> {
    if coordinates.len() % 2 != 0 {
        return Err(PolygonDefect::OddCoordinateCount(coordinates.len()));
    }

    let points = coordinates
        .chunks_exact(2)
        .map(|pair| Point::from(LatLng::from_degrees(pair[1], pair[0])))
        .collect();

    build_loop_from_points(points)
}

/// Builds a loop from an ordered ring of points.
///
/// The closing vertex, if repeated, and consecutive duplicates are removed. At least three
/// distinct vertices must remain. A clockwise ring is reversed, so the loop always encloses the
/// smaller region outlined by the ring.
///
/// A ring meant to enclose more than a hemisphere is therefore turned into its complement.
pub fn build_loop_from_points(mut points: Vec<Point>) -> Result<Loop, PolygonDefect> {
    points.dedup();
    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }

    if points.len() < 3 {
        return Err(PolygonDefect::TooFewVertices);
    }

    if winding(&points) == Winding::Clockwise {
        debug!("Ring of {} vertices is clockwise, reversing", points.len());
        points.reverse();
    }

    Ok(Loop::from_points(points))
}

fn turn_angle(a: &Point, b: &Point, c: &Point) -> f64 {
    let angle = a.cross(b).0.angle(&b.cross(c).0).rad();
    match robust_sign(a, b, c) {
        Direction::CounterClockwise => angle,
        _ => -angle,
    }
}
