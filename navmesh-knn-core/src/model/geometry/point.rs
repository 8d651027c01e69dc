use geo::{coord, Coord};
use std::fmt::Display;
use std::ops::{Add, Deref, DerefMut, Mul, Sub};

/// the absolute tolerance shared by every geometric predicate, dominance
/// test, and equality comparison in this crate. comparisons never mix this
/// with relative tolerances.
pub const EPSILON: f64 = 1e-8;

/// a point (or free vector) in the plane. wraps [`geo::Coord`] to add the
/// arithmetic and distance operations the search needs.
#[derive(Copy, Clone, Default, Debug, PartialEq)]
pub struct Point(pub Coord);

impl Point {
    pub fn new(x: f64, y: f64) -> Point {
        Point(coord! {x: x, y: y})
    }

    /// component-wise equality under the shared absolute epsilon
    pub fn approx_eq(&self, other: &Point) -> bool {
        (self.x - other.x).abs() < EPSILON && (self.y - other.y).abs() < EPSILON
    }

    pub fn distance(&self, other: &Point) -> f64 {
        self.distance_sq(other).sqrt()
    }

    pub fn distance_sq(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// z component of the cross product, treating both points as vectors
    pub fn cross(&self, other: &Point) -> f64 {
        self.x * other.y - self.y * other.x
    }

    pub fn dot(&self, other: &Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn magnitude_sq(&self) -> f64 {
        self.dot(self)
    }
}

impl Deref for Point {
    type Target = Coord;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Point {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
