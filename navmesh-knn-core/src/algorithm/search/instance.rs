use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::Arc;
use std::time::Instant;

use crate::model::geometry::{h_value, Point, EPSILON};
use crate::model::mesh::{Mesh, PolygonId};
use crate::model::termination::TerminationModel;

use super::expansion::{gen_initial_nodes, get_successors, succ_to_node};
use super::node_pool::{NodePool, NodeRef};
use super::root_table::RootTable;
use super::search_node::{Collinear, OpenEntry, SearchNode};
use super::successor::Successor;

/// single-pair interval search: best-first over visibility intervals with
/// f = g + h, h being the straight-line length from the root to the goal
/// through the interval. one instance owns all of its transient state and
/// can be reused across queries; the mesh is shared read-only.
pub struct SearchInstance {
    mesh: Arc<Mesh>,
    start: Point,
    goal: Point,
    end_polygon: Option<PolygonId>,
    final_node: Option<NodeRef>,
    pool: NodePool,
    open: BinaryHeap<OpenEntry>,
    roots: RootTable,
    termination: TerminationModel,
    search_micros: f64,
    succ_buf: Vec<Successor>,
    node_buf: Vec<SearchNode>,
    pub nodes_generated: u64,
    pub nodes_pushed: u64,
    pub nodes_popped: u64,
    pub nodes_pruned_post_pop: u64,
    pub successor_calls: u64,
}

impl SearchInstance {
    pub fn new(mesh: Arc<Mesh>) -> SearchInstance {
        let num_vertices = mesh.vertices.len();
        SearchInstance {
            mesh,
            start: Point::default(),
            goal: Point::default(),
            end_polygon: None,
            final_node: None,
            pool: NodePool::new(),
            open: BinaryHeap::new(),
            roots: RootTable::new(num_vertices),
            termination: TerminationModel::default(),
            search_micros: 0.0,
            succ_buf: Vec::new(),
            node_buf: Vec::new(),
            nodes_generated: 0,
            nodes_pushed: 0,
            nodes_popped: 0,
            nodes_pruned_post_pop: 0,
            successor_calls: 0,
        }
    }

    pub fn set_start_goal(&mut self, start: Point, goal: Point) {
        self.start = start;
        self.goal = goal;
        self.final_node = None;
    }

    pub fn set_termination(&mut self, termination: TerminationModel) {
        self.termination = termination;
    }

    pub fn search(&mut self) -> bool {
        let timer = Instant::now();
        self.init_search();

        let Some(end_polygon) = self.end_polygon else {
            self.search_micros = micros_since(&timer);
            return false;
        };

        let mut iterations: u64 = 0;
        while let Some(entry) = self.open.pop() {
            if self.termination.should_terminate(&timer, iterations) {
                log::debug!(
                    "search stopped early: {}",
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

            if node.next_polygon == end_polygon {
                let final_ref = self.materialize_final(entry.node, &node);
                self.final_node = Some(final_ref);
                self.search_micros = micros_since(&timer);
                log::debug!(
                    "found goal after {} pops, {} nodes generated",
                    self.nodes_popped,
                    self.nodes_generated
                );
                return true;
            }

            if let Some(root) = node.root {
                if self.roots.dominated(root, node.g) {
                    self.nodes_pruned_post_pop += 1;
                    continue;
                }
            }

            self.expand(entry.node, node, end_polygon);
        }

        self.search_micros = micros_since(&timer);
        false
    }

    /// true geodesic cost of the last successful search
    pub fn cost(&self) -> Option<f64> {
        self.final_node.map(|r| self.pool.get(r).f)
    }

    /// path of the last successful search, start to goal. consecutive
    /// turning points are the roots along the final node's parent chain.
    pub fn path(&self) -> Vec<Point> {
        let Some(mut cur) = self.final_node else {
            return vec![];
        };
        let mut out = vec![self.goal];
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

    pub fn search_micros(&self) -> f64 {
        self.search_micros
    }

    /// kNN by exhaustion: one search per goal, sorted by cost. quadratic in
    /// the instance size and only meant as a reference oracle.
    pub fn brute_force(&mut self, start: Point, goals: &[Point], k: usize) -> Vec<(usize, f64)> {
        let mut results: Vec<(usize, f64)> = Vec::new();
        for (gid, goal) in goals.iter().enumerate() {
            self.set_start_goal(start, *goal);
            if self.search() {
                if let Some(cost) = self.cost() {
                    results.push((gid, cost));
                }
            }
        }
        results.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));
        results.truncate(k);
        results
    }

    fn init_search(&mut self) {
        self.pool.reclaim();
        self.roots.next_epoch();
        self.open.clear();
        self.final_node = None;
        self.nodes_generated = 0;
        self.nodes_pushed = 0;
        self.nodes_popped = 0;
        self.nodes_pruned_post_pop = 0;
        self.successor_calls = 0;

        self.end_polygon = self.mesh.get_point_location(&self.goal).primary_polygon();
        if self.end_polygon.is_none() {
            return;
        }
        let end = self.end_polygon;

        let mut seeds = Vec::new();
        gen_initial_nodes(
            self.start,
            &self.mesh,
            &|p| Some(p) == end,
            &mut self.roots,
            &mut seeds,
        );
        for mut seed in seeds {
            let root = seed.root_point(&self.mesh, self.start);
            seed.f = seed.g + h_value(&root, &self.goal, &seed.left, &seed.right);
            let f = seed.f;
            let g = seed.g;
            let r = self.pool.allocate(seed);
            self.open.push(OpenEntry::new(f, g, r));
            self.nodes_generated += 1;
            self.nodes_pushed += 1;
        }
    }

    /// walk no-branching chains inline, then push the frontier with h
    fn expand(&mut self, node_ref: NodeRef, node: SearchNode, end_polygon: PolygonId) {
        let mut parent_ref = node_ref;
        let mut succ_buf = std::mem::take(&mut self.succ_buf);
        let mut pending = std::mem::take(&mut self.node_buf);
        pending.clear();
        pending.push(node);

        loop {
            let cur = pending[0];
            if cur.next_polygon == end_polygon {
                break;
            }
            get_successors(&cur, self.start, &self.mesh, &mut succ_buf);
            self.successor_calls += 1;
            pending.clear();
            let end = Some(end_polygon);
            succ_to_node(
                &cur,
                &succ_buf,
                self.start,
                &self.mesh,
                &|p| Some(p) == end,
                &mut self.roots,
                &mut pending,
            );
            match pending.len() {
                0 => break,
                1 => {
                    if pending[0].g != cur.g {
                        // the chain turned: record an intermediate node so
                        // the path can be reconstructed through it
                        pending[0].parent = Some(parent_ref);
                        parent_ref = self.pool.allocate(pending[0]);
                        self.nodes_generated += 1;
                    }
                }
                _ => break,
            }
        }

        for mut n in pending.drain(..) {
            let root = n.root_point(&self.mesh, self.start);
            n.f = n.g + h_value(&root, &self.goal, &n.left, &n.right);
            n.parent = Some(parent_ref);
            let f = n.f;
            let g = n.g;
            let r = self.pool.allocate(n);
            self.open.push(OpenEntry::new(f, g, r));
            self.nodes_generated += 1;
            self.nodes_pushed += 1;
        }

        self.succ_buf = succ_buf;
        self.node_buf = pending;
    }

    /// orient the goal against the interval to decide whether the last leg
    /// turns at an endpoint or continues from the node's own root
    fn materialize_final(&mut self, node_ref: NodeRef, node: &SearchNode) -> NodeRef {
        let root = node.root_point(&self.mesh, self.start);
        let root_goal = self.goal - root;
        let final_root = if root_goal.cross(&(node.left - root)) < -EPSILON {
            node.left_vertex
        } else if (node.right - root).cross(&root_goal) < -EPSILON {
            node.right_vertex
        } else {
            node.root
        };
        self.nodes_generated += 1;
        self.pool.allocate(SearchNode {
            parent: Some(node_ref),
            root: final_root,
            left: self.goal,
            right: self.goal,
            left_vertex: None,
            right_vertex: None,
            prev_polygon: Some(node.next_polygon),
            entry_edge: None,
            next_polygon: node.next_polygon,
            g: node.g,
            f: node.f,
            col: Collinear::Not,
            goal_id: None,
        })
    }
}

fn micros_since(timer: &Instant) -> f64 {
    timer.elapsed().as_secs_f64() * 1e6
}
