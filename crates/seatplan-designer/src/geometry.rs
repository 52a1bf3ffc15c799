//! Geometry and spatial queries.
//!
//! Pure functions over world-space points: containment, bounding boxes,
//! intersection tests and snapping. Every predicate is total; degenerate input
//! (empty slices, zero-length segments, duplicate points) yields `false`, zero
//! or `None` instead of panicking.
//!
//! # Boundary rule
//!
//! [`point_in_polygon`] uses the half-open crossing rule: an edge is counted
//! when exactly one endpoint lies strictly above the horizontal ray, and the
//! crossing only counts when it lies strictly to the right of the query point.
//! For an axis-aligned square this puts the min-x and min-y edges inside and
//! the max-x and max-y edges outside. [`polygon_intersects_box`] treats the box
//! as closed and counts touching segments as intersecting.

use serde::{Deserialize, Serialize};

/// A point in world or screen space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Returns this point shifted by `(dx, dy)`.
    pub fn translated(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }

    /// Returns this point rotated by `degrees` around `pivot`.
    pub fn rotated_about(&self, pivot: &Point, degrees: f64) -> Point {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let dx = self.x - pivot.x;
        let dy = self.y - pivot.y;
        Point::new(pivot.x + dx * cos - dy * sin, pivot.y + dx * sin + dy * cos)
    }
}

/// Axis-aligned bounding box. Always derived from geometry, never cached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Builds the box spanned by two arbitrary corners.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self::new(a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y))
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Closed containment test.
    pub fn contains(&self, p: &Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    /// Corners in counter-clockwise order starting at the min corner.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.min_x, self.min_y),
            Point::new(self.max_x, self.min_y),
            Point::new(self.max_x, self.max_y),
            Point::new(self.min_x, self.max_y),
        ]
    }

    /// Smallest box containing both boxes.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox::new(
            self.min_x.min(other.min_x),
            self.min_y.min(other.min_y),
            self.max_x.max(other.max_x),
            self.max_y.max(other.max_y),
        )
    }
}

/// Min/max reduction over a point set. `None` for an empty set.
pub fn bounding_box(points: &[Point]) -> Option<BoundingBox> {
    let first = points.first()?;
    let mut bb = BoundingBox::new(first.x, first.y, first.x, first.y);
    for p in &points[1..] {
        bb.min_x = bb.min_x.min(p.x);
        bb.min_y = bb.min_y.min(p.y);
        bb.max_x = bb.max_x.max(p.x);
        bb.max_y = bb.max_y.max(p.y);
    }
    Some(bb)
}

/// Even-odd ray casting. Polygons with fewer than three vertices contain nothing.
pub fn point_in_polygon(p: &Point, polygon: &[Point]) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let pi = polygon[i];
        let pj = polygon[j];
        if (pi.y > p.y) != (pj.y > p.y) {
            let x_cross = (pj.x - pi.x) * (p.y - pi.y) / (pj.y - pi.y) + pi.x;
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Separating-axis test for two axis-aligned boxes (touching counts).
pub fn boxes_intersect(a: &BoundingBox, b: &BoundingBox) -> bool {
    a.min_x <= b.max_x && a.max_x >= b.min_x && a.min_y <= b.max_y && a.max_y >= b.min_y
}

/// Twice the signed area of the triangle `a b c`. Positive for counter-clockwise.
pub fn cross(a: &Point, b: &Point, c: &Point) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

fn orientation(a: &Point, b: &Point, c: &Point) -> i8 {
    let v = cross(a, b, c);
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}

fn on_segment(a: &Point, b: &Point, p: &Point) -> bool {
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

/// Segment/segment intersection using orientation signs, including touching
/// and collinear overlap.
pub fn segments_intersect(p1: &Point, p2: &Point, q1: &Point, q2: &Point) -> bool {
    let o1 = orientation(p1, p2, q1);
    let o2 = orientation(p1, p2, q2);
    let o3 = orientation(q1, q2, p1);
    let o4 = orientation(q1, q2, p2);

    if o1 != o2 && o3 != o4 {
        return true;
    }

    (o1 == 0 && on_segment(p1, p2, q1))
        || (o2 == 0 && on_segment(p1, p2, q2))
        || (o3 == 0 && on_segment(q1, q2, p1))
        || (o4 == 0 && on_segment(q1, q2, p2))
}

/// Precise polygon/box overlap.
///
/// True when a polygon vertex lies in the box, a box corner lies in the
/// polygon, or any polygon edge crosses any box edge.
pub fn polygon_intersects_box(polygon: &[Point], bbox: &BoundingBox) -> bool {
    if polygon.is_empty() {
        return false;
    }
    if let Some(poly_bb) = bounding_box(polygon) {
        if !boxes_intersect(&poly_bb, bbox) {
            return false;
        }
    }

    if polygon.iter().any(|p| bbox.contains(p)) {
        return true;
    }

    let corners = bbox.corners();
    if corners.iter().any(|c| point_in_polygon(c, polygon)) {
        return true;
    }

    let n = polygon.len();
    for i in 0..n {
        let a = &polygon[i];
        let b = &polygon[(i + 1) % n];
        for k in 0..4 {
            if segments_intersect(a, b, &corners[k], &corners[(k + 1) % 4]) {
                return true;
            }
        }
    }
    false
}

/// True when no consecutive triple of `points` turns by more than `epsilon`
/// (sine of the turning angle). Fewer than three points are collinear.
///
/// Repeated consecutive points should be removed first with
/// [`dedup_consecutive`]; a triple containing one has no turn and counts as
/// collinear.
pub fn is_collinear(points: &[Point], epsilon: f64) -> bool {
    points.windows(3).all(|w| {
        let area = cross(&w[0], &w[1], &w[2]).abs();
        let scale = w[0].distance_to(&w[1]) * w[0].distance_to(&w[2]);
        area <= epsilon * scale
    })
}

/// Drops points equal to their predecessor, including a closing point equal
/// to the first one.
pub fn dedup_consecutive(points: &[Point]) -> Vec<Point> {
    let mut out: Vec<Point> = Vec::with_capacity(points.len());
    for p in points {
        if out.last() != Some(p) {
            out.push(*p);
        }
    }
    while out.len() > 1 && out.first() == out.last() {
        out.pop();
    }
    out
}

/// Linear scan for the vertex closest to `p` within `radius`.
pub fn nearest_vertex<'a, I>(p: &Point, vertices: I, radius: f64) -> Option<Point>
where
    I: IntoIterator<Item = &'a Point>,
{
    let mut best: Option<(f64, Point)> = None;
    for v in vertices {
        let d = p.distance_to(v);
        if d <= radius && best.map_or(true, |(bd, _)| d < bd) {
            best = Some((d, *v));
        }
    }
    best.map(|(_, v)| v)
}

/// Rounds each coordinate to the nearest multiple of `cell`. A non-positive
/// cell size leaves the point unchanged.
pub fn snap_to_grid(p: &Point, cell: f64) -> Point {
    if !(cell > 0.0) {
        return *p;
    }
    Point::new((p.x / cell).round() * cell, (p.y / cell).round() * cell)
}
