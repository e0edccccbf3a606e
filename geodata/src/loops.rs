//! Closed polygons on the unit sphere.

use std::f64::consts::{FRAC_PI_2, PI};

use s2::cap::Cap;
use s2::cell::Cell;
use s2::latlng::LatLng;
use s2::point::{ordered_ccw, Point};
use s2::predicates::{robust_sign, Direction};
use s2::r1;
use s2::r3::vector::Vector;
use s2::rect::Rect;
use s2::region::Region;
use s2::s1;

use crate::kernel::LoopLike;

/// Closed polygon on the unit sphere. The interior lies to the left of the directed edges.
///
/// Point containment is decided by counting edge crossings from the kernel origin point, so
/// every loop remembers whether that origin is inside it. Empty and full loops are stored with a
/// single vertex.
#[derive(Debug, Clone)]
pub struct Loop {
    vertices: Vec<Point>,
    origin_inside: bool,
    bound: Rect,
}

impl Loop {
    /// Loop that contains no points.
    pub fn empty() -> Self {
        Self {
            vertices: vec![north_pole()],
            origin_inside: false,
            bound: Rect::empty(),
        }
    }

    /// Loop that contains the whole sphere.
    pub fn full() -> Self {
        Self {
            vertices: vec![south_pole()],
            origin_inside: true,
            bound: Rect::full(),
        }
    }

    /// Creates a loop from vertices in the given order.
    ///
    /// Orientation is taken as is: vertices listed clockwise describe the complement of the
    /// region they outline. Use [`build_loop_from_points`](crate::build_loop_from_points) to get
    /// the orientation corrected.
    ///
    /// A single vertex in the southern hemisphere gives the full loop, any other input with
    /// less than three vertices gives the empty loop.
    pub fn from_points(vertices: Vec<Point>) -> Self {
        if vertices.len() < 3 {
            return match vertices.as_slice() {
                [single] if single.0.z < 0.0 => Self::full(),
                _ => Self::empty(),
            };
        }

        let mut fence = Self {
            vertices,
            origin_inside: false,
            bound: Rect::full(),
        };

        // Vertex 1 is inside iff its wedge contains the fixed direction `v1.ortho()`. If the
        // crossing count with origin assumed outside disagrees, the origin is inside.
        let (v0, v1, v2) = (fence.vertices[0], fence.vertices[1], fence.vertices[2]);
        let v1_inside = ordered_ccw(&v1.ortho(), &v0, &v2, &v1);
        if v1_inside != fence.crossing_parity_contains(&v1) {
            fence.origin_inside = true;
        }

        fence.bound = fence.compute_bound();
        fence
    }

    /// Vertices of the loop.
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// True for the loop that contains no points.
    pub fn is_empty(&self) -> bool {
        self.vertices.len() == 1 && !self.origin_inside
    }

    /// True for the loop that contains the whole sphere.
    pub fn is_full(&self) -> bool {
        self.vertices.len() == 1 && self.origin_inside
    }

    /// True if the kernel origin point is inside the loop.
    pub fn contains_origin(&self) -> bool {
        self.origin_inside
    }

    /// Bounding latitude-longitude rectangle.
    pub fn bound(&self) -> &Rect {
        &self.bound
    }

    /// Checks whether the point is inside the loop.
    pub fn contains_point(&self, point: &Point) -> bool {
        if !self.bound.contains_point(point) {
            return false;
        }

        self.crossing_parity_contains(point)
    }

    fn crossing_parity_contains(&self, point: &Point) -> bool {
        let origin = Point::origin();
        self.edges()
            .filter(|(a, b)| edge_or_vertex_crossing(&origin, point, a, b))
            .fold(self.origin_inside, |inside, _| !inside)
    }

    fn edges(&self) -> impl Iterator<Item = (&Point, &Point)> + '_ {
        self.vertices
            .iter()
            .zip(self.vertices.iter().cycle().skip(1))
    }

    fn crosses_cell_boundary(&self, corners: &[Point; 4]) -> bool {
        self.edges().any(|(a, b)| {
            (0..4).any(|k| {
                crossing_sign(a, b, &corners[k], &corners[(k + 1) % 4]) != Crossing::DoNotCross
            })
        })
    }

    fn compute_bound(&self) -> Rect {
        let mut bounder = RectBounder::default();
        for vertex in self.vertices.iter().chain(self.vertices.first()) {
            bounder.add_point(*vertex);
        }
        let mut bound = bounder.finish();

        // Edges alone do not tell whether the loop wraps around a pole.
        if self.crossing_parity_contains(&north_pole()) {
            bound = Rect {
                lat: r1::interval::Interval::new(bound.lat.lo, FRAC_PI_2),
                lng: s1::interval::FULL,
            };
        }
        if bound.lng.is_full() && self.crossing_parity_contains(&south_pole()) {
            bound.lat.lo = -FRAC_PI_2;
        }

        bound
    }
}

impl Region for Loop {
    fn cap_bound(&self) -> Cap {
        self.bound.cap_bound()
    }

    fn rect_bound(&self) -> Rect {
        self.bound.clone()
    }

    fn contains_cell(&self, cell: &Cell) -> bool {
        if self.is_full() {
            return true;
        }
        if self.is_empty() || !self.bound.contains(&cell.rect_bound()) {
            return false;
        }

        let corners = cell.vertices();
        corners
            .iter()
            .all(|corner| self.crossing_parity_contains(corner))
            && !self.vertices.iter().any(|vertex| cell.contains_point(vertex))
            && !self.crosses_cell_boundary(&corners)
    }

    fn intersects_cell(&self, cell: &Cell) -> bool {
        if self.is_full() {
            return true;
        }
        if self.is_empty() || !self.bound.intersects(&cell.rect_bound()) {
            return false;
        }

        let corners = cell.vertices();
        corners
            .iter()
            .any(|corner| self.crossing_parity_contains(corner))
            || self.vertices.iter().any(|vertex| cell.contains_point(vertex))
            || self.crosses_cell_boundary(&corners)
    }
}

impl LoopLike for Loop {
    fn is_empty(&self) -> bool {
        Loop::is_empty(self)
    }

    fn is_full(&self) -> bool {
        Loop::is_full(self)
    }

    fn contains_origin(&self) -> bool {
        Loop::contains_origin(self)
    }
}

fn north_pole() -> Point {
    Point::from_coords(0.0, 0.0, 1.0)
}

fn south_pole() -> Point {
    Point::from_coords(0.0, 0.0, -1.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Crossing {
    /// Edges cross at a point interior to both.
    Cross,
    /// Edges share a vertex.
    Maybe,
    DoNotCross,
}

fn sign(a: &Point, b: &Point, c: &Point) -> i8 {
    match robust_sign(a, b, c) {
        Direction::CounterClockwise => 1,
        Direction::Clockwise => -1,
        Direction::Indeterminate => 0,
    }
}

/// Classifies the intersection of edges AB and CD.
fn crossing_sign(a: &Point, b: &Point, c: &Point, d: &Point) -> Crossing {
    if a == c || a == d || b == c || b == d {
        return Crossing::Maybe;
    }
    if a == b || c == d {
        return Crossing::DoNotCross;
    }

    // Triangles ACB, BDA, CBD and DAC must all have the same non-zero orientation.
    let acb = -sign(a, b, c);
    if acb == 0 {
        return Crossing::DoNotCross;
    }
    let bda = sign(a, b, d);
    let cbd = -sign(c, d, b);
    let dac = sign(c, d, a);
    if bda == acb && cbd == acb && dac == acb {
        Crossing::Cross
    } else {
        Crossing::DoNotCross
    }
}

/// Decides crossings for edges that share a vertex, consistently with the containment rule
/// used for loop vertices.
fn vertex_crossing(a: &Point, b: &Point, c: &Point, d: &Point) -> bool {
    if a == b || c == d {
        return false;
    }

    if a == c {
        b == d || ordered_ccw(&a.ortho(), d, b, a)
    } else if b == d {
        ordered_ccw(&b.ortho(), c, a, b)
    } else if a == d {
        b == c || ordered_ccw(&a.ortho(), c, b, a)
    } else if b == c {
        ordered_ccw(&b.ortho(), d, a, b)
    } else {
        false
    }
}

fn edge_or_vertex_crossing(a: &Point, b: &Point, c: &Point, d: &Point) -> bool {
    match crossing_sign(a, b, c, d) {
        Crossing::Cross => true,
        Crossing::DoNotCross => false,
        Crossing::Maybe => vertex_crossing(a, b, c, d),
    }
}

/// Accumulates the latitude-longitude bound of an edge chain.
///
/// Unlike the bound of the vertices, the bound of a great circle edge includes the latitude
/// extremum the edge may reach between its endpoints.
#[derive(Debug)]
struct RectBounder {
    previous: Option<(Point, LatLng)>,
    bound: Rect,
}

impl Default for RectBounder {
    fn default() -> Self {
        Self {
            previous: None,
            bound: Rect::empty(),
        }
    }
}

impl RectBounder {
    fn add_point(&mut self, b: Point) {
        let b_ll = LatLng::from(&b);
        let Some((a, a_ll)) = self.previous.replace((b, b_ll)) else {
            self.bound = &self.bound + &b_ll;
            return;
        };

        // n = 2 * (a x b), computed in a numerically stable way.
        let n = (a.0 - b.0).cross(&(a.0 + b.0));
        let n_norm = n.norm();
        if n_norm < 1.91346e-15 {
            self.bound = if a.0.dot(&b.0) < 0.0 {
                // Nearly antipodal, the edge can go anywhere.
                Rect::full()
            } else {
                self.bound.union(&(&Rect::from(a_ll) + &b_ll))
            };
            return;
        }

        let mut lng = s1::Interval::from_point_pair(a_ll.lng.rad(), b_ll.lng.rad());
        if lng.len() >= PI - 2.0 * f64::EPSILON {
            lng = s1::interval::FULL;
        }

        let mut lat = r1::interval::Interval::from_point(a_ll.lat.rad()) + b_ll.lat.rad();

        // The edge reaches its extreme latitude where it crosses the plane through n and the
        // z axis. m is normal to that plane.
        let m = n.cross(&Vector {
            x: 0.0,
            y: 0.0,
            z: 1.0,
        });
        let m_a = m.dot(&a.0);
        let m_b = m.dot(&b.0);
        let m_error = 6.06638e-16 * n_norm + 6.83174e-31;

        if m_a * m_b < 0.0 || m_a.abs() <= m_error || m_b.abs() <= m_error {
            let max_lat = ((n.x * n.x + n.y * n.y).sqrt().atan2(n.z.abs()) + 3.0 * f64::EPSILON)
                .min(FRAC_PI_2);
            let lat_budget = 2.0 * (0.5 * (a.0 - b.0).norm() * max_lat.sin()).asin();
            let max_delta = 0.5 * (lat_budget - lat.len()) + f64::EPSILON;

            if m_a <= m_error && m_b >= -m_error {
                lat.hi = max_lat.min(lat.hi + max_delta);
            }
            if m_b <= m_error && m_a >= -m_error {
                lat.lo = (-max_lat).max(lat.lo - max_delta);
            }
        }

        self.bound = self.bound.union(&Rect { lat, lng });
    }

    fn finish(self) -> Rect {
        let margin = LatLng::from_degrees((2.0 * f64::EPSILON).to_degrees(), 0.0);
        self.bound.expanded(&margin).polar_closure()
    }
}

#[cfg(test)]
mod tests {
    use s2::cellid::CellID;

    use super::*;

    fn point(lon: f64, lat: f64) -> Point {
        Point::from(LatLng::from_degrees(lat, lon))
    }

    fn square() -> Vec<Point> {
        vec![point(0.0, 0.0), point(1.0, 0.0), point(1.0, 1.0), point(0.0, 1.0)]
    }

    #[test]
    fn empty_and_full() {
        let empty = Loop::empty();
        assert!(empty.is_empty());
        assert!(!empty.is_full());
        assert!(!empty.contains_origin());
        assert!(!empty.contains_point(&point(10.0, 10.0)));

        let full = Loop::full();
        assert!(full.is_full());
        assert!(full.contains_origin());
        assert!(full.contains_point(&point(10.0, 10.0)));

        assert!(Loop::from_points(vec![]).is_empty());
        assert!(Loop::from_points(vec![point(0.0, 0.0), point(1.0, 0.0)]).is_empty());
        assert!(Loop::from_points(vec![point(0.0, -10.0)]).is_full());
    }

    #[test]
    fn counter_clockwise_square() {
        let fence = Loop::from_points(square());
        assert_eq!(fence.num_vertices(), 4);
        assert!(!fence.contains_origin());
        assert!(fence.contains_point(&point(0.5, 0.5)));
        assert!(!fence.contains_point(&point(1.5, 0.5)));
        assert!(!fence.contains_point(&point(-120.0, 40.0)));

        let bound = fence.bound();
        assert!(bound.lat.lo.to_degrees() > -1e-6);
        assert!(bound.lat.hi.to_degrees() > 1.0);
        assert!(bound.lat.hi.to_degrees() < 1.001);
        assert!(bound.lng.lo.to_degrees() > -1e-6);
        assert!(bound.lng.hi.to_degrees() < 1.0 + 1e-6);
    }

    #[test]
    fn clockwise_square_is_complement() {
        let mut vertices = square();
        vertices.reverse();
        let fence = Loop::from_points(vertices);

        assert!(fence.contains_origin());
        assert!(!fence.contains_point(&point(0.5, 0.5)));
        assert!(fence.contains_point(&point(1.5, 0.5)));
        assert!(fence.contains_point(&point(-120.0, 40.0)));
        assert!(fence.bound().is_full());
    }

    #[test]
    fn loop_around_the_pole() {
        let fence = Loop::from_points(vec![
            point(0.0, 80.0),
            point(90.0, 80.0),
            point(180.0, 80.0),
            point(-90.0, 80.0),
        ]);

        assert!(fence.contains_point(&north_pole()));
        assert!(!fence.contains_point(&point(0.0, 70.0)));
        assert!(fence.bound().lng.is_full());
        assert_eq!(fence.bound().lat.hi, FRAC_PI_2);
    }

    #[test]
    fn cells() {
        let fence = Loop::from_points(square());

        let inside = Cell::from(CellID::from(LatLng::from_degrees(0.5, 0.5)).parent(12));
        assert!(fence.intersects_cell(&inside));
        assert!(fence.contains_cell(&inside));

        let far = Cell::from(CellID::from(LatLng::from_degrees(30.0, 30.0)).parent(12));
        assert!(!fence.intersects_cell(&far));
        assert!(!fence.contains_cell(&far));

        let on_edge = Cell::from(CellID::from(LatLng::from_degrees(0.5, 1.0)).parent(12));
        assert!(fence.intersects_cell(&on_edge));
        assert!(!fence.contains_cell(&on_edge));

        // A cell much larger than the loop intersects it without containing a corner.
        let around = Cell::from(CellID::from(LatLng::from_degrees(0.5, 0.5)).parent(3));
        assert!(fence.intersects_cell(&around));
        assert!(!fence.contains_cell(&around));
    }

    #[test]
    fn crossings() {
        let (a, b) = (point(0.0, 0.0), point(2.0, 0.0));
        let (c, d) = (point(1.0, -1.0), point(1.0, 1.0));

        assert_eq!(crossing_sign(&a, &b, &c, &d), Crossing::Cross);
        assert_eq!(crossing_sign(&a, &b, &d, &c), Crossing::Cross);
        assert_eq!(crossing_sign(&a, &c, &b, &d), Crossing::DoNotCross);
        assert_eq!(crossing_sign(&a, &b, &b, &d), Crossing::Maybe);
        assert_eq!(crossing_sign(&a, &a, &c, &d), Crossing::DoNotCross);
    }
}
