use std::sync::Arc;

use super::dams::DamTable;
use super::heuristic::GoalHeuristic;
use crate::algorithm::search::SearchNode;
use crate::model::geometry::Point;
use crate::model::mesh::Mesh;

/// fence heuristic: reads the precomputed dam table back by the directed
/// edge a node crossed and returns the smallest lower bound among goals
/// still unreached. the table is rebuilt lazily whenever the goal set
/// changes, and can be supplied up front to share one precompute across
/// many searches.
pub struct FenceHeuristic {
    table: Option<Arc<DamTable>>,
    unreached: Vec<bool>,
}

impl FenceHeuristic {
    pub fn new() -> FenceHeuristic {
        FenceHeuristic {
            table: None,
            unreached: Vec::new(),
        }
    }

    pub fn with_table(table: Arc<DamTable>) -> FenceHeuristic {
        FenceHeuristic {
            table: Some(table),
            unreached: Vec::new(),
        }
    }

    pub fn table(&self) -> Option<&Arc<DamTable>> {
        self.table.as_ref()
    }
}

impl Default for FenceHeuristic {
    fn default() -> Self {
        FenceHeuristic::new()
    }
}

impl GoalHeuristic for FenceHeuristic {
    fn reset(&mut self, mesh: &Mesh, goals: &[Point]) {
        let stale = match &self.table {
            None => true,
            Some(t) => !t.matches_goals(goals),
        };
        if stale {
            log::debug!("rebuilding dam table for {} goals", goals.len());
            self.table = Some(Arc::new(DamTable::build(mesh, goals)));
        }
        self.unreached = vec![true; goals.len()];
    }

    fn estimate(&mut self, _mesh: &Mesh, node: &SearchNode, _root: Point) -> Option<f64> {
        let Some(table) = self.table.as_ref() else {
            return Some(0.0);
        };
        let (Some(prev), Some(edge)) = (node.prev_polygon, node.entry_edge) else {
            // start seeds cross no edge yet
            return Some(0.0);
        };
        let mut best = f64::INFINITY;
        for dam in table.dams(prev, edge) {
            if self.unreached[dam.gid] && dam.lb < best {
                best = dam.lb;
            }
        }
        if best.is_finite() {
            Some(best)
        } else if table.complete() {
            // no unreached goal is reachable through this edge at all
            None
        } else {
            Some(0.0)
        }
    }

    fn on_seal(&mut self, gid: usize) {
        self.unreached[gid] = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::search::Collinear;
    use crate::model::mesh::PolygonId;
    use crate::testing::fixtures;

    fn node_crossing(prev: PolygonId, edge: usize, next: PolygonId) -> SearchNode {
        SearchNode {
            parent: None,
            root: None,
            left: Point::new(0.5, 0.5),
            right: Point::new(0.5, 0.0),
            left_vertex: None,
            right_vertex: None,
            prev_polygon: Some(prev),
            entry_edge: Some(edge),
            next_polygon: next,
            g: 0.0,
            f: 0.0,
            col: Collinear::Not,
            goal_id: None,
        }
    }

    #[test]
    fn test_estimate_reads_dams_and_respects_sealing() {
        let mesh = fixtures::grid_mesh();
        let goals = [Point::new(0.9, 0.9), Point::new(0.9, 0.1)];
        let mut fh = FenceHeuristic::new();
        fh.reset(&mesh, &goals);

        // crossing from P0 into P1 (edge 2 of P0)
        let node = node_crossing(PolygonId(0), 2, PolygonId(1));
        let both = fh.estimate(&mesh, &node, Point::new(0.25, 0.25)).unwrap();
        // goal 1 sits just beyond that edge, goal 0 a polygon further
        assert!(both < 0.45);

        fh.on_seal(1);
        let only_far = fh.estimate(&mesh, &node, Point::new(0.25, 0.25)).unwrap();
        assert!(only_far > both);

        fh.on_seal(0);
        assert!(fh
            .estimate(&mesh, &node, Point::new(0.25, 0.25))
            .is_none());
    }

    #[test]
    fn test_seeds_estimate_zero() {
        let mesh = fixtures::grid_mesh();
        let goals = [Point::new(0.9, 0.9)];
        let mut fh = FenceHeuristic::new();
        fh.reset(&mesh, &goals);
        let seed = SearchNode {
            prev_polygon: None,
            entry_edge: None,
            ..node_crossing(PolygonId(0), 0, PolygonId(0))
        };
        assert_eq!(fh.estimate(&mesh, &seed, Point::new(0.1, 0.1)), Some(0.0));
    }

    #[test]
    fn test_reset_reuses_matching_table() {
        let mesh = fixtures::grid_mesh();
        let goals = [Point::new(0.9, 0.9)];
        let table = Arc::new(DamTable::build(&mesh, &goals));
        let mut fh = FenceHeuristic::with_table(table.clone());
        fh.reset(&mesh, &goals);
        assert!(Arc::ptr_eq(fh.table().unwrap(), &table));
        // a different goal set forces a rebuild
        fh.reset(&mesh, &[Point::new(0.1, 0.9)]);
        assert!(!Arc::ptr_eq(fh.table().unwrap(), &table));
    }
}
