use std::collections::BinaryHeap;
use std::sync::Arc;
use std::time::Instant;

use super::dams::DamTable;
use super::fence::FenceHeuristic;
use super::heuristic::{GoalHeuristic, ZeroHeuristic};
use super::target::TargetHeuristic;
use crate::algorithm::search::expansion::{gen_initial_nodes, get_successors, succ_to_node};
use crate::algorithm::search::{
    Collinear, NodePool, NodeRef, OpenEntry, RootTable, SearchNode, Successor,
};
use crate::model::geometry::{h_value, Point, EPSILON};
use crate::model::mesh::{Mesh, PolygonId};
use crate::model::termination::TerminationModel;

/// k-nearest-neighbor interval search. one engine drives all heuristic
/// variants: the heuristic sees each interval before it is pushed and hears
/// about each sealed goal, and everything else (expansion, sealing order,
/// root pruning, the node arena) is shared.
///
/// goals seal in non-decreasing geodesic order; `search` returns how many
/// sealed before k was reached, the open list drained, or the termination
/// model tripped.
pub struct KnnSearch {
    mesh: Arc<Mesh>,
    heuristic: Box<dyn GoalHeuristic>,
    start: Point,
    goals: Vec<Point>,
    k: usize,
    end_polygons: Vec<Vec<usize>>,
    reached: Vec<Option<f64>>,
    final_nodes: Vec<NodeRef>,
    pool: NodePool,
    open: BinaryHeap<OpenEntry>,
    roots: RootTable,
    termination: TerminationModel,
    search_micros: f64,
    heuristic_micros: f64,
    succ_buf: Vec<Successor>,
    node_buf: Vec<SearchNode>,
    pub nodes_generated: u64,
    pub nodes_pushed: u64,
    pub nodes_popped: u64,
    pub nodes_pruned_post_pop: u64,
    pub successor_calls: u64,
    pub heuristic_calls: u64,
}

impl KnnSearch {
    pub fn new(mesh: Arc<Mesh>, heuristic: Box<dyn GoalHeuristic>) -> KnnSearch {
        let num_vertices = mesh.vertices.len();
        KnnSearch {
            mesh,
            heuristic,
            start: Point::default(),
            goals: Vec::new(),
            k: 1,
            end_polygons: Vec::new(),
            reached: Vec::new(),
            final_nodes: Vec::new(),
            pool: NodePool::new(),
            open: BinaryHeap::new(),
            roots: RootTable::new(num_vertices),
            termination: TerminationModel::default(),
            search_micros: 0.0,
            heuristic_micros: 0.0,
            succ_buf: Vec::new(),
            node_buf: Vec::new(),
            nodes_generated: 0,
            nodes_pushed: 0,
            nodes_popped: 0,
            nodes_pruned_post_pop: 0,
            successor_calls: 0,
            heuristic_calls: 0,
        }
    }

    /// no heuristic at all: goals seal in plain Dijkstra order
    pub fn blind(mesh: Arc<Mesh>) -> KnnSearch {
        KnnSearch::new(mesh, Box::new(ZeroHeuristic))
    }

    /// R*-tree of unreached goals supplies the bound
    pub fn target(mesh: Arc<Mesh>) -> KnnSearch {
        KnnSearch::new(mesh, Box::new(TargetHeuristic::new()))
    }

    /// precomputed per-edge dams supply the bound; the table builds on the
    /// first search and rebuilds when the goal set changes
    pub fn fence(mesh: Arc<Mesh>) -> KnnSearch {
        KnnSearch::new(mesh, Box::new(FenceHeuristic::new()))
    }

    /// fence variant sharing an existing dam table across engines
    pub fn fence_with_table(mesh: Arc<Mesh>, table: Arc<DamTable>) -> KnnSearch {
        KnnSearch::new(mesh, Box::new(FenceHeuristic::with_table(table)))
    }

    pub fn set_start(&mut self, start: Point) {
        self.start = start;
    }

    pub fn set_goals(&mut self, goals: &[Point]) {
        self.goals = goals.to_vec();
    }

    pub fn set_k(&mut self, k: usize) {
        self.k = k;
    }

    pub fn set_termination(&mut self, termination: TerminationModel) {
        self.termination = termination;
    }

    /// run the search; returns the number of goals sealed
    pub fn search(&mut self) -> usize {
        let timer = Instant::now();
        self.init_search();
        if self.k == 0 || self.goals.is_empty() {
            self.search_micros = micros_since(&timer);
            return 0;
        }

        let mut iterations: u64 = 0;
        while let Some(entry) = self.open.pop() {
            if self.termination.should_terminate(&timer, iterations) {
                log::debug!(
                    "knn search stopped early with {} of {} goals sealed: {}",
                    self.final_nodes.len(),
                    self.k,
                    self.termination
                        .explain(&timer, iterations)
                        .unwrap_or_default()
                );
                break;
            }
            iterations += 1;
            self.nodes_popped += 1;
            let node = *self.pool.get(entry.node);
            log::trace!("popped {}", node);

            if let Some(gid) = node.goal_id {
                if self.reached[gid].is_none() {
                    self.reached[gid] = Some(node.f);
                    self.final_nodes.push(entry.node);
                    self.heuristic.on_seal(gid);
                    log::trace!("sealed goal {} at cost {}", gid, node.f);
                    if self.final_nodes.len() >= self.k {
                        break;
                    }
                }
                continue;
            }

            if let Some(root) = node.root {
                if self.roots.dominated(root, node.g) {
                    self.nodes_pruned_post_pop += 1;
                    continue;
                }
            }

            self.gen_final_nodes(entry.node, &node);
            self.expand(entry.node, node);
        }

        self.search_micros = micros_since(&timer);
        self.final_nodes.len()
    }

    /// geodesic cost of the i-th sealed goal, ascending
    pub fn cost(&self, i: usize) -> Option<f64> {
        self.final_nodes.get(i).map(|r| self.pool.get(*r).f)
    }

    /// goal id of the i-th sealed goal
    pub fn gid(&self, i: usize) -> Option<usize> {
        self.final_nodes.get(i).and_then(|r| self.pool.get(*r).goal_id)
    }

    /// path to the i-th sealed goal, start first
    pub fn path(&self, i: usize) -> Vec<Point> {
        let Some(&final_ref) = self.final_nodes.get(i) else {
            return vec![];
        };
        let mut cur = final_ref;
        let mut out = vec![self.pool.get(final_ref).left];
        loop {
            let node = self.pool.get(cur);
            let root = node.root_point(&self.mesh, self.start);
            if !root.approx_eq(out.last().expect("path is never empty")) {
                out.push(root);
            }
            match node.parent {
                Some(p) => cur = p,
                None => break,
            }
        }
        out.reverse();
        out
    }

    pub fn sealed(&self) -> usize {
        self.final_nodes.len()
    }

    pub fn search_micros(&self) -> f64 {
        self.search_micros
    }

    pub fn heuristic_micros(&self) -> f64 {
        self.heuristic_micros
    }

    fn init_search(&mut self) {
        self.pool.reclaim();
        self.roots.next_epoch();
        self.open.clear();
        self.final_nodes.clear();
        self.reached = vec![None; self.goals.len()];
        self.search_micros = 0.0;
        self.heuristic_micros = 0.0;
        self.nodes_generated = 0;
        self.nodes_pushed = 0;
        self.nodes_popped = 0;
        self.nodes_pruned_post_pop = 0;
        self.successor_calls = 0;
        self.heuristic_calls = 0;

        self.heuristic.reset(&self.mesh, &self.goals);

        self.end_polygons = vec![Vec::new(); self.mesh.polygons.len()];
        for (gid, goal) in self.goals.iter().enumerate() {
            let polys = self.mesh.containing_polygons(goal);
            if polys.is_empty() {
                log::debug!("goal {} at {} is off-mesh and stays unreachable", gid, goal);
            }
            for poly in polys {
                self.end_polygons[poly.0].push(gid);
            }
        }

        let mut seeds = Vec::new();
        {
            let end_polygons = &self.end_polygons;
            gen_initial_nodes(
                self.start,
                &self.mesh,
                &|p: PolygonId| !end_polygons[p.0].is_empty(),
                &mut self.roots,
                &mut seeds,
            );
        }
        for seed in seeds {
            self.push_with_heuristic(seed, None);
        }
    }

    fn has_unreached_goal(&self, poly: PolygonId) -> bool {
        self.end_polygons[poly.0]
            .iter()
            .any(|gid| self.reached[*gid].is_none())
    }

    /// one final node per unreached goal in the entered polygon, carrying
    /// the exact cost through this interval. sealing happens when the final
    /// node pops, which keeps the output ordered by true distance.
    fn gen_final_nodes(&mut self, node_ref: NodeRef, node: &SearchNode) {
        if !self.has_unreached_goal(node.next_polygon) {
            return;
        }
        let gids: Vec<usize> = self.end_polygons[node.next_polygon.0]
            .iter()
            .copied()
            .filter(|gid| self.reached[*gid].is_none())
            .collect();
        for gid in gids {
            let goal = self.goals[gid];
            let root = node.root_point(&self.mesh, self.start);
            let cost = node.g + h_value(&root, &goal, &node.left, &node.right);
            let root_goal = goal - root;
            let final_root = if root_goal.cross(&(node.left - root)) < -EPSILON {
                node.left_vertex
            } else if (node.right - root).cross(&root_goal) < -EPSILON {
                node.right_vertex
            } else {
                node.root
            };
            let final_node = SearchNode {
                parent: Some(node_ref),
                root: final_root,
                left: goal,
                right: goal,
                left_vertex: None,
                right_vertex: None,
                prev_polygon: Some(node.next_polygon),
                entry_edge: None,
                next_polygon: node.next_polygon,
                g: cost,
                f: cost,
                col: Collinear::Not,
                goal_id: Some(gid),
            };
            let r = self.pool.allocate(final_node);
            self.open.push(OpenEntry::new(cost, cost, r));
            self.nodes_generated += 1;
            self.nodes_pushed += 1;
        }
    }

    fn expand(&mut self, node_ref: NodeRef, node: SearchNode) {
        let mut parent_ref = node_ref;
        let mut succ_buf = std::mem::take(&mut self.succ_buf);
        let mut pending = std::mem::take(&mut self.node_buf);
        pending.clear();
        pending.push(node);
        let mut first = true;

        loop {
            let cur = pending[0];
            // stop the inline chain at any polygon holding an unreached
            // goal so its final nodes are generated on pop; the node this
            // expansion started from already had its finals generated
            if !first && self.has_unreached_goal(cur.next_polygon) {
                break;
            }
            first = false;
            get_successors(&cur, self.start, &self.mesh, &mut succ_buf);
            self.successor_calls += 1;
            pending.clear();
            {
                let end_polygons = &self.end_polygons;
                let reached = &self.reached;
                succ_to_node(
                    &cur,
                    &succ_buf,
                    self.start,
                    &self.mesh,
                    &|p: PolygonId| {
                        end_polygons[p.0]
                            .iter()
                            .any(|gid| reached[*gid].is_none())
                    },
                    &mut self.roots,
                    &mut pending,
                );
            }
            match pending.len() {
                0 => break,
                1 => {
                    if pending[0].g != cur.g {
                        pending[0].parent = Some(parent_ref);
                        parent_ref = self.pool.allocate(pending[0]);
                        self.nodes_generated += 1;
                    }
                }
                _ => break,
            }
        }

        for n in pending.drain(..) {
            self.push_with_heuristic(n, Some(parent_ref));
        }

        self.succ_buf = succ_buf;
        self.node_buf = pending;
    }

    fn push_with_heuristic(&mut self, mut node: SearchNode, parent: Option<NodeRef>) {
        let root = node.root_point(&self.mesh, self.start);
        self.heuristic_calls += 1;
        let h_timer = Instant::now();
        let h = self.heuristic.estimate(&self.mesh, &node, root);
        self.heuristic_micros += micros_since(&h_timer);
        let Some(h) = h else {
            // no unreached goal is reachable through this interval
            return;
        };
        node.f = node.g + h;
        node.parent = parent;
        let f = node.f;
        let g = node.g;
        let r = self.pool.allocate(node);
        self.open.push(OpenEntry::new(f, g, r));
        self.nodes_generated += 1;
        self.nodes_pushed += 1;
    }
}

fn micros_since(timer: &Instant) -> f64 {
    timer.elapsed().as_secs_f64() * 1e6
}
