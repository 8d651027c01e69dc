use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::time::Instant;

use ordered_float::OrderedFloat;

use crate::algorithm::search::expansion::{get_successors, succ_to_node};
use crate::algorithm::search::{Collinear, RootFilter, SearchNode, Successor};
use crate::model::geometry::{point_segment_distance, Point, EPSILON};
use crate::model::mesh::{Mesh, PolygonId, VertexId};
use crate::model::termination::TerminationModel;

/// per-edge, per-goal cost bounds: any path toward goal `gid` that crosses
/// the owning directed edge has remaining cost at least `lb`. `ub` is the
/// matching upper bound the flood fill uses to prune dominated records.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Dam {
    pub lb: f64,
    pub ub: f64,
    pub gid: usize,
}

/// the fence-heuristic tables: one multi-source flood fill from all goals
/// stamps every directed mesh edge with a Pareto front of dams per goal.
/// built once per (mesh, goal set); the fence heuristic reads it back by
/// (polygon, edge index) exactly as a forward search names the edge it
/// crosses.
pub struct DamTable {
    dams: Vec<Vec<Vec<Dam>>>,
    goals: Vec<Point>,
    complete: bool,
    build_micros: f64,
    pub nodes_generated: u64,
    pub nodes_pushed: u64,
    pub nodes_popped: u64,
    pub nodes_pruned: u64,
    pub dam_count: usize,
    pub edge_count: usize,
}

struct FloodEntry {
    lb: OrderedFloat<f64>,
    ub: OrderedFloat<f64>,
    gid: usize,
    /// where this node's dam was admitted; seeds have none
    dam_key: Option<(PolygonId, usize)>,
    node: SearchNode,
}

impl PartialEq for FloodEntry {
    fn eq(&self, other: &Self) -> bool {
        self.lb == other.lb && self.ub == other.ub
    }
}

impl Eq for FloodEntry {}

impl Ord for FloodEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // inverted so the binary heap pops the smallest (lb, ub) first
        other
            .lb
            .cmp(&self.lb)
            .then_with(|| other.ub.cmp(&self.ub))
    }
}

impl PartialOrd for FloodEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// root pruning for the flood fill is per goal: funnels of different goals
/// never dominate each other
struct FloodRoots {
    best: HashMap<(usize, usize), f64>,
    gid: usize,
}

impl RootFilter for FloodRoots {
    fn try_update(&mut self, v: VertexId, g: f64) -> bool {
        let entry = self.best.entry((self.gid, v.0)).or_insert(f64::INFINITY);
        if *entry + EPSILON < g {
            false
        } else {
            *entry = (*entry).min(g);
            true
        }
    }
}

impl DamTable {
    pub fn build(mesh: &Mesh, goals: &[Point]) -> DamTable {
        DamTable::build_with(mesh, goals, &TerminationModel::default())
    }

    /// flood-fill from every goal at once. expansion reuses the search's
    /// own successor machinery; each crossing is admitted as a dam unless an
    /// existing dam for the same goal dominates it (smaller-or-equal lb and
    /// ub), and admitted dams evict the records they dominate, leaving a
    /// Pareto front per (edge, goal).
    pub fn build_with(
        mesh: &Mesh,
        goals: &[Point],
        termination: &TerminationModel,
    ) -> DamTable {
        let timer = Instant::now();
        let mut table = DamTable {
            dams: mesh
                .polygons
                .iter()
                .map(|p| vec![Vec::new(); p.sides()])
                .collect(),
            goals: goals.to_vec(),
            complete: true,
            build_micros: 0.0,
            nodes_generated: 0,
            nodes_pushed: 0,
            nodes_popped: 0,
            nodes_pruned: 0,
            dam_count: 0,
            edge_count: mesh
                .polygons
                .iter()
                .flat_map(|p| p.polygons.iter())
                .filter(|n| n.is_some())
                .count()
                / 2,
        };

        let goal_polygons: Vec<Vec<PolygonId>> = goals
            .iter()
            .map(|g| mesh.containing_polygons(g))
            .collect();

        let mut open: BinaryHeap<FloodEntry> = BinaryHeap::new();
        for (gid, goal) in goals.iter().enumerate() {
            for poly in &goal_polygons[gid] {
                let seed = SearchNode {
                    parent: None,
                    root: None,
                    left: *goal,
                    right: *goal,
                    left_vertex: None,
                    right_vertex: None,
                    prev_polygon: None,
                    entry_edge: None,
                    next_polygon: *poly,
                    g: 0.0,
                    f: 0.0,
                    col: Collinear::Lazy,
                    goal_id: None,
                };
                open.push(FloodEntry {
                    lb: OrderedFloat(0.0),
                    ub: OrderedFloat(0.0),
                    gid,
                    dam_key: None,
                    node: seed,
                });
                table.nodes_generated += 1;
                table.nodes_pushed += 1;
            }
        }

        let mut roots = FloodRoots {
            best: HashMap::new(),
            gid: 0,
        };
        let mut succ_buf: Vec<Successor> = Vec::new();
        let mut node_buf: Vec<SearchNode> = Vec::new();
        let mut iterations: u64 = 0;

        while let Some(entry) = open.pop() {
            if termination.should_terminate(&timer, iterations) {
                log::warn!(
                    "dam flood fill stopped early after {} pops; fence bounds degrade to zero where missing",
                    table.nodes_popped
                );
                table.complete = false;
                break;
            }
            iterations += 1;
            table.nodes_popped += 1;
            let gid = entry.gid;

            // a dominating dam may have evicted this one since it was pushed
            if let Some((poly, edge)) = entry.dam_key {
                let alive = table.dams[poly.0][edge]
                    .iter()
                    .any(|d| d.gid == gid && d.lb == entry.lb.0 && d.ub == entry.ub.0);
                if !alive {
                    table.nodes_pruned += 1;
                    continue;
                }
            }

            let goal = goals[gid];
            get_successors(&entry.node, goal, mesh, &mut succ_buf);
            node_buf.clear();
            roots.gid = gid;
            let own_polys = &goal_polygons[gid];
            succ_to_node(
                &entry.node,
                &succ_buf,
                goal,
                mesh,
                &|p| own_polys.contains(&p),
                &mut roots,
                &mut node_buf,
            );

            for ns in node_buf.drain(..) {
                table.nodes_generated += 1;
                let Some(prev) = ns.prev_polygon else { continue };
                // key the dam the way the forward search names the crossing:
                // the polygon it expands (the far side from the goal) and
                // that polygon's index for the shared edge
                let Some(edge) = mesh.shared_edge_index(ns.next_polygon, prev) else {
                    continue;
                };
                let root = ns.root_point(mesh, goal);
                let lb = ns.g + point_segment_distance(&root, &ns.left, &ns.right);
                let ub = ns.g + root.distance(&ns.left).max(root.distance(&ns.right));
                let list = &mut table.dams[ns.next_polygon.0][edge];
                let dominated = list
                    .iter()
                    .any(|d| d.gid == gid && d.lb <= lb + EPSILON && d.ub <= ub + EPSILON);
                if dominated {
                    table.nodes_pruned += 1;
                    continue;
                }
                list.retain(|d| !(d.gid == gid && lb <= d.lb + EPSILON && ub <= d.ub + EPSILON));
                list.push(Dam { lb, ub, gid });
                open.push(FloodEntry {
                    lb: OrderedFloat(lb),
                    ub: OrderedFloat(ub),
                    gid,
                    dam_key: Some((ns.next_polygon, edge)),
                    node: ns,
                });
                table.nodes_pushed += 1;
            }
        }

        table.dam_count = table.dams.iter().flatten().map(Vec::len).sum();
        table.build_micros = timer.elapsed().as_secs_f64() * 1e6;
        log::debug!(
            "dam table built: {} goals, {} interior edges, {} dams, {} pops",
            goals.len(),
            table.edge_count,
            table.dam_count,
            table.nodes_popped
        );
        table
    }

    /// dams for the directed edge a search crosses when expanding `poly`
    /// across its edge `edge`
    pub fn dams(&self, poly: PolygonId, edge: usize) -> &[Dam] {
        &self.dams[poly.0][edge]
    }

    pub fn matches_goals(&self, goals: &[Point]) -> bool {
        self.goals.len() == goals.len()
            && self
                .goals
                .iter()
                .zip(goals.iter())
                .all(|(a, b)| a.approx_eq(b))
    }

    /// false when the build deadline tripped before the fill drained; the
    /// fence heuristic then treats missing dams as zero bounds
    pub fn complete(&self) -> bool {
        self.complete
    }

    pub fn build_micros(&self) -> f64 {
        self.build_micros
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[test]
    fn test_every_edge_toward_a_goal_carries_a_dam() {
        let mesh = fixtures::grid_mesh();
        let goals = [Point::new(0.9, 0.9)];
        let table = DamTable::build(&mesh, &goals);
        assert!(table.complete());
        assert!(table.dam_count > 0);
        // entering P3 (the goal polygon) from P1 must be covered
        let covered = (0..4).any(|e| {
            table
                .dams(PolygonId(1), e)
                .iter()
                .any(|d| d.gid == 0)
        });
        assert!(covered);
    }

    #[test]
    fn test_dam_lists_are_pareto_fronts() {
        let mesh = fixtures::ring_mesh();
        let goals = [Point::new(0.5, 0.5), Point::new(2.5, 2.5)];
        let table = DamTable::build(&mesh, &goals);
        for (pid, poly) in mesh.polygons.iter().enumerate() {
            for edge in 0..poly.sides() {
                let dams = table.dams(PolygonId(pid), edge);
                for (i, a) in dams.iter().enumerate() {
                    for (j, b) in dams.iter().enumerate() {
                        if i == j || a.gid != b.gid {
                            continue;
                        }
                        let dominates =
                            a.lb <= b.lb + EPSILON && a.ub <= b.ub + EPSILON;
                        assert!(
                            !dominates,
                            "dam {:?} dominates {:?} on polygon {} edge {}",
                            a, b, pid, edge
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_dam_bounds_are_admissible() {
        // on an obstacle-free mesh the true remaining cost from an edge to
        // the goal is the straight-line distance, so the smallest lb on
        // every covered edge must equal the goal-to-segment distance
        let mesh = fixtures::grid_mesh();
        let goal = Point::new(0.9, 0.9);
        let table = DamTable::build(&mesh, &[goal]);
        for (pid, poly) in mesh.polygons.iter().enumerate() {
            for edge in 0..poly.sides() {
                let dams = table.dams(PolygonId(pid), edge);
                if dams.is_empty() {
                    continue;
                }
                let (rv, lv) = poly.edge(edge);
                let a = mesh.point(rv);
                let b = mesh.point(lv);
                let exact = point_segment_distance(&goal, &a, &b);
                let min_lb = dams.iter().map(|d| d.lb).fold(f64::INFINITY, f64::min);
                assert!(
                    (min_lb - exact).abs() <= 1e-6,
                    "edge ({}, {}): min lb {} vs straight-line {}",
                    pid,
                    edge,
                    min_lb,
                    exact
                );
            }
        }
    }

    #[test]
    fn test_zero_deadline_leaves_table_incomplete() {
        let mesh = fixtures::grid_mesh();
        let table = DamTable::build_with(
            &mesh,
            &[Point::new(0.9, 0.9)],
            &TerminationModel::from_micros(0),
        );
        assert!(!table.complete());
    }

    #[test]
    fn test_goal_fingerprint() {
        let mesh = fixtures::grid_mesh();
        let goals = vec![Point::new(0.1, 0.1), Point::new(0.9, 0.9)];
        let table = DamTable::build(&mesh, &goals);
        assert!(table.matches_goals(&goals));
        assert!(!table.matches_goals(&goals[..1]));
        assert!(!table.matches_goals(&[Point::new(0.1, 0.1), Point::new(0.9, 0.8)]));
    }
}
