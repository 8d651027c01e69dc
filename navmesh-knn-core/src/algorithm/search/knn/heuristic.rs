use crate::algorithm::search::SearchNode;
use crate::model::geometry::Point;
use crate::model::mesh::Mesh;

/// the capability that distinguishes the kNN engines: a lower bound from an
/// interval to the nearest goal not yet sealed. the engine calls `reset`
/// when a search begins and `on_seal` as each goal is finalized.
pub trait GoalHeuristic: Send {
    fn reset(&mut self, mesh: &Mesh, goals: &[Point]);

    /// admissible lower bound on the cost from this interval to any goal
    /// still unreached, excluding the node's own g. `None` means no
    /// unreached goal is reachable through this node, which lets the engine
    /// drop it outright.
    fn estimate(&mut self, mesh: &Mesh, node: &SearchNode, root: Point) -> Option<f64>;

    fn on_seal(&mut self, gid: usize);
}

/// h = 0: the blind engine. pops then seal in true geodesic order, which
/// also makes this the optimality baseline for the other heuristics.
#[derive(Default)]
pub struct ZeroHeuristic;

impl GoalHeuristic for ZeroHeuristic {
    fn reset(&mut self, _mesh: &Mesh, _goals: &[Point]) {}

    fn estimate(&mut self, _mesh: &Mesh, _node: &SearchNode, _root: Point) -> Option<f64> {
        Some(0.0)
    }

    fn on_seal(&mut self, _gid: usize) {}
}
