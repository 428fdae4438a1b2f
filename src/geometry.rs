//! # Geometry Primitives
//!
//! Points and axis-aligned rectangles.
//!
//! `Rect` stores `left`/`right`/`bottom`/`top` edges rather than an origin
//! plus extent, so the two predicates everything else is built on —
//! [`Rect::contains`] and [`Rect::overlaps`] — are plain O(1) comparisons.
//! The coordinate system is y-up, matching the level content.

use serde::{Deserialize, Serialize};

/// A point identified by `(x, y)` coordinates.
///
/// # Examples
///
/// ```
/// use delve::Point;
///
/// let a = Point::new(0, 0);
/// let b = Point::new(3, 4);
/// assert_eq!(a.distance_to(b), 5.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Creates a new point with the given coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(self, other: Point) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

impl std::ops::Add for Point {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for Point {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// An axis-aligned rectangle stored as its four edges.
///
/// Invariant: `left <= right` and `bottom <= top`. The constructors normalize
/// their input, so the invariant holds for every `Rect` ever built.
///
/// # Examples
///
/// ```
/// use delve::{Point, Rect};
///
/// let r = Rect::from_dimensions(10, 10, 30, 20);
/// assert_eq!(r.width(), 30);
/// assert!(r.contains(&Rect::from_dimensions(15, 15, 5, 5)));
/// assert!(r.overlaps(&Rect::from_dimensions(35, 25, 50, 50)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub left: i32,
    pub bottom: i32,
    pub right: i32,
    pub top: i32,
}

impl Rect {
    /// Creates a rectangle spanning two corner points, in any order.
    pub fn from_points(a: Point, b: Point) -> Self {
        Self {
            left: a.x.min(b.x),
            bottom: a.y.min(b.y),
            right: a.x.max(b.x),
            top: a.y.max(b.y),
        }
    }

    /// Creates a rectangle from an origin and a (non-negative) extent.
    pub fn from_dimensions(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self::from_points(Point::new(x, y), Point::new(x + w, y + h))
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.top - self.bottom
    }

    /// Bottom-left corner.
    pub fn origin(&self) -> Point {
        Point::new(self.left, self.bottom)
    }

    /// Center point, rounded toward the origin.
    pub fn center(&self) -> Point {
        Point::new(
            self.left + self.width() / 2,
            self.bottom + self.height() / 2,
        )
    }

    /// True if `other` is fully enclosed in this rectangle.
    ///
    /// Edges count as inside: a rectangle contains itself.
    pub fn contains(&self, other: &Rect) -> bool {
        self.left <= other.left
            && self.right >= other.right
            && self.bottom <= other.bottom
            && self.top >= other.top
    }

    /// True if a point lies inside this rectangle (edges included).
    pub fn contains_point(&self, p: Point) -> bool {
        self.left <= p.x && p.x <= self.right && self.bottom <= p.y && p.y <= self.top
    }

    /// True if the rectangles are not disjoint on either axis.
    ///
    /// Touching edges count as overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.right >= other.left
            && self.left <= other.right
            && self.top >= other.bottom
            && self.bottom <= other.top
    }

    /// Returns a rectangle with all four edges pushed outward by `n`.
    ///
    /// A negative `n` shrinks the rectangle; the result is re-normalized so
    /// the edge invariant survives over-shrinking.
    pub fn expanded_by(&self, n: i32) -> Self {
        Self::from_points(
            Point::new(self.left - n, self.bottom - n),
            Point::new(self.right + n, self.top + n),
        )
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{},{}]x[{},{}]",
            self.left, self.right, self.bottom, self.top
        )
    }
}
