//! Polygon and rectangle primitives shared by the navigation grid and preflight.
//!
//! All coordinates are scene (world) space floats. Boundary decisions go through
//! [`EPSILON`] so that a point sitting on an edge does not flicker between inside
//! and outside from rounding alone.

use glam::Vec2;

use crystal_data::PointDef;

/// Tolerance for boundary and collinearity tests, in scene units.
pub const EPSILON: f32 = 1e-3;

/// Convert a definition point into a world vector.
pub fn to_vec2(point: PointDef) -> Vec2 {
    Vec2::new(point.x, point.y)
}

/// Axis-aligned rectangle, `min` top-left and `max` bottom-right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(Vec2::new(x, y), Vec2::new(x + width, y + height))
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Inclusive containment; points on the edge are inside.
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x - EPSILON
            && p.x <= self.max.x + EPSILON
            && p.y >= self.min.y - EPSILON
            && p.y <= self.max.y + EPSILON
    }

    /// Distance from `p` to the rectangle; zero inside.
    pub fn distance_to(&self, p: Vec2) -> f32 {
        (p - p.clamp(self.min, self.max)).length()
    }

    /// True when `other` lies entirely inside this rectangle.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        self.contains(other.min) && self.contains(other.max)
    }

    /// Interior overlap. Rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min.x < other.max.x - EPSILON
            && other.min.x < self.max.x - EPSILON
            && self.min.y < other.max.y - EPSILON
            && other.min.y < self.max.y - EPSILON
    }

    /// Corners clockwise from the top-left.
    pub fn corners(&self) -> [Vec2; 4] {
        [
            self.min,
            Vec2::new(self.max.x, self.min.y),
            self.max,
            Vec2::new(self.min.x, self.max.y),
        ]
    }
}

/// Closed polygon; the last vertex connects back to the first.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Vec2>,
}

impl Polygon {
    pub fn new(vertices: Vec<Vec2>) -> Self {
        Self { vertices }
    }

    pub fn from_points(points: &[PointDef]) -> Self {
        Self::new(points.iter().copied().map(to_vec2).collect())
    }

    pub fn from_rect(rect: &Rect) -> Self {
        Self::new(rect.corners().to_vec())
    }

    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    /// A usable polygon has at least three vertices.
    pub fn is_valid(&self) -> bool {
        self.vertices.len() >= 3
    }

    /// Edges as `(start, end)` pairs, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    pub fn bounds(&self) -> Rect {
        let Some(first) = self.vertices.first() else {
            return Rect::new(Vec2::ZERO, Vec2::ZERO);
        };
        let (min, max) = self
            .vertices
            .iter()
            .fold((*first, *first), |(min, max), v| (min.min(*v), max.max(*v)));
        Rect { min, max }
    }

    /// Shoelace area; positive for clockwise winding in screen coordinates (y down).
    pub fn signed_area(&self) -> f32 {
        self.edges().map(|(a, b)| a.perp_dot(b)).sum::<f32>() * 0.5
    }

    pub fn area(&self) -> f32 {
        self.signed_area().abs()
    }

    /// Zero-area outline: too few vertices or all of them collinear.
    pub fn is_degenerate(&self) -> bool {
        !self.is_valid() || self.area() <= EPSILON
    }

    /// Area centroid, falling back to the vertex average for degenerate outlines.
    pub fn centroid(&self) -> Vec2 {
        let area = self.signed_area();
        if area.abs() <= EPSILON {
            if self.vertices.is_empty() {
                return Vec2::ZERO;
            }
            return self.vertices.iter().copied().sum::<Vec2>() / self.vertices.len() as f32;
        }
        let sum = self
            .edges()
            .map(|(a, b)| (a + b) * a.perp_dot(b))
            .sum::<Vec2>();
        sum / (6.0 * area)
    }

    /// Ray casting with an inclusive boundary: standing on the edge counts as inside.
    pub fn contains_point(&self, p: Vec2) -> bool {
        if !self.is_valid() {
            return false;
        }
        if self.on_boundary(p) {
            return true;
        }
        let mut inside = false;
        for (a, b) in self.edges() {
            // Half-open rule on y so a ray through a vertex is counted once.
            if (a.y > p.y) != (b.y > p.y) {
                let x_cross = a.x + (p.y - a.y) / (b.y - a.y) * (b.x - a.x);
                if p.x < x_cross {
                    inside = !inside;
                }
            }
        }
        inside
    }

    /// Strictly inside, away from the boundary by more than [`EPSILON`].
    pub fn contains_point_strict(&self, p: Vec2) -> bool {
        self.contains_point(p) && !self.on_boundary(p)
    }

    pub fn on_boundary(&self, p: Vec2) -> bool {
        self.distance_to_boundary(p) <= EPSILON
    }

    /// Shortest distance from `p` to any edge.
    pub fn distance_to_boundary(&self, p: Vec2) -> f32 {
        self.edges()
            .map(|(a, b)| point_segment_distance(p, a, b))
            .fold(f32::INFINITY, f32::min)
    }

    /// Distance from `p` to the polygon area: zero inside, boundary distance outside.
    pub fn distance_to(&self, p: Vec2) -> f32 {
        if self.contains_point(p) {
            0.0
        } else {
            self.distance_to_boundary(p)
        }
    }

    /// True when two non-adjacent edges touch or cross.
    pub fn is_self_intersecting(&self) -> bool {
        let n = self.vertices.len();
        if n < 4 {
            return false;
        }
        let edges: Vec<(Vec2, Vec2)> = self.edges().collect();
        for i in 0..n {
            for j in (i + 1)..n {
                let adjacent = j == i + 1 || (i == 0 && j == n - 1);
                if adjacent {
                    continue;
                }
                let (a1, a2) = edges[i];
                let (b1, b2) = edges[j];
                if segments_intersect(a1, a2, b1, b2) {
                    return true;
                }
            }
        }
        false
    }
}

/// Overlap test for interaction shapes.
///
/// Bounding boxes reject first; the precise pass looks for a proper edge
/// crossing, then for one shape's vertices or centroid strictly inside the
/// other. Shapes that only touch do not overlap.
pub fn polygons_overlap(a: &Polygon, b: &Polygon) -> bool {
    if !a.is_valid() || !b.is_valid() {
        return false;
    }
    if !a.bounds().intersects(&b.bounds()) {
        return false;
    }
    for (a1, a2) in a.edges() {
        for (b1, b2) in b.edges() {
            if segments_cross(a1, a2, b1, b2) {
                return true;
            }
        }
    }
    a.vertices().iter().any(|v| b.contains_point_strict(*v))
        || b.vertices().iter().any(|v| a.contains_point_strict(*v))
        || b.contains_point_strict(a.centroid())
        || a.contains_point_strict(b.centroid())
}

/// Distance from `p` to the segment `a`–`b`.
pub fn point_segment_distance(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Orientation of `c` relative to the directed line `a`→`b`: -1, 0 or 1.
fn orientation(a: Vec2, b: Vec2, c: Vec2) -> i8 {
    let cross = (b - a).perp_dot(c - a);
    // Scale the tolerance with segment length so long edges are not over-strict.
    let tolerance = EPSILON * (b - a).length().max(1.0);
    if cross > tolerance {
        1
    } else if cross < -tolerance {
        -1
    } else {
        0
    }
}

fn on_segment(a: Vec2, b: Vec2, p: Vec2) -> bool {
    point_segment_distance(p, a, b) <= EPSILON
}

/// Segments share at least one point (touching and collinear overlap included).
pub fn segments_intersect(a1: Vec2, a2: Vec2, b1: Vec2, b2: Vec2) -> bool {
    let o1 = orientation(a1, a2, b1);
    let o2 = orientation(a1, a2, b2);
    let o3 = orientation(b1, b2, a1);
    let o4 = orientation(b1, b2, a2);

    if o1 != o2 && o3 != o4 && o1 != 0 && o2 != 0 && o3 != 0 && o4 != 0 {
        return true;
    }
    on_segment(a1, a2, b1) || on_segment(a1, a2, b2) || on_segment(b1, b2, a1) || on_segment(b1, b2, a2)
}

/// Segments cross through each other's interiors.
pub fn segments_cross(a1: Vec2, a2: Vec2, b1: Vec2, b2: Vec2) -> bool {
    let o1 = orientation(a1, a2, b1);
    let o2 = orientation(a1, a2, b2);
    let o3 = orientation(b1, b2, a1);
    let o4 = orientation(b1, b2, a2);
    o1 * o2 < 0 && o3 * o4 < 0
}
