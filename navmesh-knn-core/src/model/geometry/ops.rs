//! geometric predicates shared by the mesh and the search. every test in
//! this module uses the single absolute [`EPSILON`].

use super::{Point, EPSILON};
use std::f64::consts::TAU;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Orientation {
    Clockwise,
    Collinear,
    CounterClockwise,
}

/// orientation of c relative to the directed line a -> b
pub fn orientation(a: &Point, b: &Point, c: &Point) -> Orientation {
    let area = (*b - *a).cross(&(*c - *a));
    if area > EPSILON {
        Orientation::CounterClockwise
    } else if area < -EPSILON {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}

pub fn is_collinear(a: &Point, b: &Point, c: &Point) -> bool {
    orientation(a, b, c) == Orientation::Collinear
}

/// reflection of p across the line through l and r. when l and r coincide
/// the "line" degenerates and p is mirrored through that single point.
pub fn reflect_point(p: &Point, l: &Point, r: &Point) -> Point {
    let d = *r - *l;
    let len_sq = d.magnitude_sq();
    if len_sq < EPSILON * EPSILON {
        return Point::new(2.0 * l.x - p.x, 2.0 * l.y - p.y);
    }
    let t = (*p - *l).dot(&d) / len_sq;
    let foot = *l + d * t;
    Point::new(2.0 * foot.x - p.x, 2.0 * foot.y - p.y)
}

/// angle of the vector in [0, 2pi)
pub fn vector_angle(v: &Point) -> f64 {
    v.y.atan2(v.x).rem_euclid(TAU)
}

/// true when `angle` lies within the counterclockwise sector from `from`
/// to `to`, boundaries included
pub fn in_sector(angle: f64, from: f64, to: f64) -> bool {
    let span = (to - from).rem_euclid(TAU);
    let offset = (angle - from).rem_euclid(TAU);
    offset <= span + EPSILON || offset >= TAU - EPSILON
}

pub fn lerp(a: &Point, b: &Point, t: f64) -> Point {
    *a + (*b - *a) * t
}

/// distance from p to the closed segment [a, b]
pub fn point_segment_distance(p: &Point, a: &Point, b: &Point) -> f64 {
    let d = *b - *a;
    let len_sq = d.magnitude_sq();
    if len_sq < EPSILON * EPSILON {
        return p.distance(a);
    }
    let t = ((*p - *a).dot(&d) / len_sq).clamp(0.0, 1.0);
    p.distance(&(*a + d * t))
}

/// parameters (t, u) with p1 + t*(p2-p1) == p3 + u*(p4-p3), or None when the
/// lines are parallel within epsilon
pub fn line_intersection_params(
    p1: &Point,
    p2: &Point,
    p3: &Point,
    p4: &Point,
) -> Option<(f64, f64)> {
    let d1 = *p2 - *p1;
    let d2 = *p4 - *p3;
    let den = d1.cross(&d2);
    if den.abs() < EPSILON {
        return None;
    }
    let w = *p3 - *p1;
    let t = w.cross(&d2) / den;
    let u = w.cross(&d1) / den;
    Some((t, u))
}

/// inclusive segment intersection test: touching endpoints count
pub fn segments_intersect(p1: &Point, p2: &Point, p3: &Point, p4: &Point) -> bool {
    // cheap reject on bounding boxes, padded by epsilon
    let overlap = |a: f64, b: f64, c: f64, d: f64| {
        a.max(b) + EPSILON >= c.min(d) && c.max(d) + EPSILON >= a.min(b)
    };
    if !overlap(p1.x, p2.x, p3.x, p4.x) || !overlap(p1.y, p2.y, p3.y, p4.y) {
        return false;
    }
    let d12 = *p2 - *p1;
    let d34 = *p4 - *p3;
    let c1 = d34.cross(&(*p1 - *p3));
    let c2 = d34.cross(&(*p2 - *p3));
    let c3 = d12.cross(&(*p3 - *p1));
    let c4 = d12.cross(&(*p4 - *p1));
    let split_a = (c1 > EPSILON && c2 < -EPSILON)
        || (c1 < -EPSILON && c2 > EPSILON)
        || c1.abs() <= EPSILON
        || c2.abs() <= EPSILON;
    let split_b = (c3 > EPSILON && c4 < -EPSILON)
        || (c3 < -EPSILON && c4 > EPSILON)
        || c3.abs() <= EPSILON
        || c4.abs() <= EPSILON;
    split_a && split_b
}

/// shortest straight-line length from `root` to `goal` via the segment
/// [l, r]: the admissible interval heuristic. the goal is reflected across
/// the segment's line when it lies on the root's side; when the straight
/// shot misses the segment the path bends around the nearer endpoint.
pub fn h_value(root: &Point, goal: &Point, l: &Point, r: &Point) -> f64 {
    if l.approx_eq(r) {
        return root.distance(l) + l.distance(goal);
    }
    let lr = *r - *l;
    let side_root = lr.cross(&(*root - *l));
    let side_goal = lr.cross(&(*goal - *l));
    let target = if side_root.abs() > EPSILON
        && side_goal.abs() > EPSILON
        && (side_root > 0.0) == (side_goal > 0.0)
    {
        reflect_point(goal, l, r)
    } else {
        *goal
    };
    if segments_intersect(root, &target, l, r) {
        root.distance(&target)
    } else {
        (root.distance(l) + l.distance(goal)).min(root.distance(r) + r.distance(goal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_orientation() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(1.0, 0.0);
        assert_eq!(
            orientation(&a, &b, &Point::new(0.5, 1.0)),
            Orientation::CounterClockwise
        );
        assert_eq!(
            orientation(&a, &b, &Point::new(0.5, -1.0)),
            Orientation::Clockwise
        );
        assert_eq!(
            orientation(&a, &b, &Point::new(2.0, 0.0)),
            Orientation::Collinear
        );
    }

    #[test]
    fn test_reflect_point() {
        let p = Point::new(0.5, -1.0);
        let refl = reflect_point(&p, &Point::new(0.0, 0.0), &Point::new(1.0, 0.0));
        assert!(refl.approx_eq(&Point::new(0.5, 1.0)));
    }

    #[test]
    fn test_in_sector_wraps_around_zero() {
        // sector from 315 to 45 degrees contains 0 but not 180
        let from = 315.0_f64.to_radians();
        let to = 45.0_f64.to_radians();
        assert!(in_sector(0.0, from, to));
        assert!(!in_sector(std::f64::consts::PI, from, to));
    }

    #[test]
    fn test_point_segment_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(2.0, 0.0);
        assert_relative_eq!(
            point_segment_distance(&Point::new(1.0, 1.0), &a, &b),
            1.0,
            epsilon = 1e-12
        );
        // beyond the b endpoint: distance to the endpoint, not the line
        assert_relative_eq!(
            point_segment_distance(&Point::new(3.0, 0.0), &a, &b),
            1.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_segments_intersect() {
        let o = Point::new(0.0, 0.0);
        assert!(segments_intersect(
            &o,
            &Point::new(2.0, 2.0),
            &Point::new(0.0, 2.0),
            &Point::new(2.0, 0.0)
        ));
        // touching at an endpoint counts
        assert!(segments_intersect(
            &o,
            &Point::new(1.0, 1.0),
            &Point::new(1.0, 1.0),
            &Point::new(2.0, 0.0)
        ));
        assert!(!segments_intersect(
            &o,
            &Point::new(1.0, 0.0),
            &Point::new(0.0, 1.0),
            &Point::new(1.0, 1.0)
        ));
    }

    #[test]
    fn test_h_value_straight_shot() {
        // goal on the far side, visible through the window
        let h = h_value(
            &Point::new(0.0, -1.0),
            &Point::new(0.0, 1.0),
            &Point::new(-1.0, 0.0),
            &Point::new(1.0, 0.0),
        );
        assert_relative_eq!(h, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_h_value_reflects_near_side_goal() {
        // goal on the root's side: the path must pass through the window and
        // come back, which reflection turns into a straight line
        let root = Point::new(-1.0, -1.0);
        let goal = Point::new(1.0, -1.0);
        let h = h_value(&root, &goal, &Point::new(-1.0, 0.0), &Point::new(1.0, 0.0));
        // reflected goal is (1, 1), so h = |(-1,-1) -> (1,1)|
        assert_relative_eq!(h, 8.0_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_h_value_bends_around_endpoint() {
        // straight shot misses the window; path bends at the right endpoint
        let root = Point::new(0.0, -1.0);
        let goal = Point::new(5.0, 1.0);
        let l = Point::new(-1.0, 0.0);
        let r = Point::new(1.0, 0.0);
        let expected = root.distance(&r) + r.distance(&goal);
        assert_relative_eq!(h_value(&root, &goal, &l, &r), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_h_value_degenerate_window() {
        let h = h_value(
            &Point::new(0.0, 0.0),
            &Point::new(2.0, 0.0),
            &Point::new(1.0, 0.0),
            &Point::new(1.0, 0.0),
        );
        assert_relative_eq!(h, 2.0, epsilon = 1e-12);
    }
}
