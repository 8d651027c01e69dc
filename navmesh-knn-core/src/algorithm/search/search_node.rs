use std::cmp::Ordering;
use std::fmt::Display;

use ordered_float::OrderedFloat;

use crate::model::geometry::Point;
use crate::model::mesh::{Mesh, PolygonId, VertexId};

use super::node_pool::NodeRef;

/// marks an interval that has collapsed to a collinear direction and
/// dictates where the next expansion turns: at the left endpoint, at the
/// right endpoint, or (for a fresh start seed) nowhere at all, generating
/// every side of the polygon.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Collinear {
    #[default]
    Not,
    Left,
    Right,
    Lazy,
}

/// the interval-propagation search record: a contiguous sub-segment
/// [left, right] of an edge of `next_polygon`, together with the root point
/// from which the shortest path to every point of the segment is a straight
/// line.
#[derive(Copy, Clone, Debug)]
pub struct SearchNode {
    /// back-reference for path reconstruction; dies with the pool
    pub parent: Option<NodeRef>,
    /// most recent turning point; `None` encodes the search start
    pub root: Option<VertexId>,
    pub left: Point,
    pub right: Point,
    /// set only when the matching interval endpoint coincides with that
    /// mesh vertex; an endpoint interior to an edge carries `None`
    pub left_vertex: Option<VertexId>,
    pub right_vertex: Option<VertexId>,
    /// the polygon that was expanded to produce this node, and the index of
    /// the crossed edge within that polygon's arrays. identifies the
    /// directed mesh edge the interval lies on; `None` for start seeds and
    /// goal-final nodes.
    pub prev_polygon: Option<PolygonId>,
    pub entry_edge: Option<usize>,
    /// the polygon the next expansion steps into
    pub next_polygon: PolygonId,
    /// cost from the start to the root, plus straight-line cost accumulated
    /// through prior roots
    pub g: f64,
    /// g plus an admissible lower bound on the remaining cost
    pub f: f64,
    pub col: Collinear,
    /// committed goal: set on the final node generated when the interval
    /// reaches the polygon containing that goal
    pub goal_id: Option<usize>,
}

impl SearchNode {
    pub fn root_point(&self, mesh: &Mesh, start: Point) -> Point {
        match self.root {
            Some(v) => mesh.point(v),
            None => start,
        }
    }
}

impl Display for SearchNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "root={:?}; left={}; right={}; f={}, g={}",
            self.root, self.left, self.right, self.f, self.g
        )
    }
}

/// open-list entry. orders by f ascending with larger g winning ties, so a
/// max-heap of these pops the most promising interval first.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct OpenEntry {
    pub f: OrderedFloat<f64>,
    pub g: OrderedFloat<f64>,
    pub node: NodeRef,
}

impl OpenEntry {
    pub fn new(f: f64, g: f64, node: NodeRef) -> OpenEntry {
        OpenEntry {
            f: OrderedFloat(f),
            g: OrderedFloat(g),
            node,
        }
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .cmp(&self.f)
            .then_with(|| self.g.cmp(&other.g))
            .then_with(|| self.node.cmp(&other.node))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BinaryHeap;

    #[test]
    fn test_open_entry_pops_smallest_f() {
        let mut heap = BinaryHeap::new();
        heap.push(OpenEntry::new(3.0, 1.0, NodeRef(0)));
        heap.push(OpenEntry::new(1.0, 0.5, NodeRef(1)));
        heap.push(OpenEntry::new(2.0, 2.0, NodeRef(2)));
        let order: Vec<u32> = std::iter::from_fn(|| heap.pop().map(|e| e.node.0)).collect();
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn test_open_entry_ties_prefer_larger_g() {
        let mut heap = BinaryHeap::new();
        heap.push(OpenEntry::new(1.0, 0.25, NodeRef(0)));
        heap.push(OpenEntry::new(1.0, 0.75, NodeRef(1)));
        assert_eq!(heap.pop().unwrap().node, NodeRef(1));
    }
}
