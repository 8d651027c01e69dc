use crate::model::geometry::Point;

/// how a sub-interval of a far edge relates to the visibility cone of the
/// node being expanded
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SuccessorType {
    /// lies along the cone's right boundary ray
    RightCollinear,
    /// outside the cone on the right: reachable only by turning at the
    /// parent interval's right endpoint
    RightNonObservable,
    /// inside the cone: the root carries over unchanged
    Observable,
    LeftNonObservable,
    LeftCollinear,
}

/// one edge-traversal outcome of an expansion: a sub-interval of edge
/// `poly_left_ind` of the expanded polygon, oriented so `left` is the
/// endpoint nearer `vertices[poly_left_ind]`
#[derive(Copy, Clone, Debug)]
pub struct Successor {
    pub kind: SuccessorType,
    pub left: Point,
    pub right: Point,
    /// index into the expanded polygon's arrays: the far polygon is
    /// `polygons[poly_left_ind]` and the edge runs from
    /// `vertices[poly_left_ind - 1]` (right) to `vertices[poly_left_ind]`
    /// (left)
    pub poly_left_ind: usize,
}
