//! successor generation: one step of interval propagation across a polygon.
//!
//! [`get_successors`] clips the far edges of a node's polygon against the
//! node's visibility cone and tags each sub-interval with how it relates to
//! the cone. [`succ_to_node`] turns those tags into search nodes, applying
//! the root-selection rule for each case in one place, and performs
//! root-level pruning.

use itertools::Itertools;

use crate::model::geometry::{
    is_collinear, lerp, line_intersection_params, Point, EPSILON,
};
use crate::model::mesh::{Mesh, MeshPolygon, PolygonId, VertexId};

use super::root_table::RootFilter;
use super::search_node::{Collinear, SearchNode};
use super::successor::{Successor, SuccessorType};

/// the effective root of a collapsed interval: LEFT and RIGHT pivot to the
/// matching endpoint, everything else keeps the node's own root
pub fn collinear_pivot(node: &SearchNode, root_point: Point) -> Point {
    match node.col {
        Collinear::Left => node.left,
        Collinear::Right => node.right,
        Collinear::Not | Collinear::Lazy => root_point,
    }
}

/// successors of `node` across the far edges of `node.next_polygon`
pub fn get_successors(node: &SearchNode, start: Point, mesh: &Mesh, out: &mut Vec<Successor>) {
    out.clear();
    let polygon = mesh.polygon(node.next_polygon);
    if node.col == Collinear::Lazy {
        generate_all(node, polygon, mesh, out);
        return;
    }
    let root = node.root_point(mesh, start);
    let entry = node
        .prev_polygon
        .and_then(|prev| mesh.shared_edge_index(node.next_polygon, prev));
    let Some(entry) = entry else {
        debug_assert!(false, "non-lazy node entered {} without an entry edge", node.next_polygon);
        generate_all(node, polygon, mesh, out);
        return;
    };
    let degenerate =
        node.left.approx_eq(&node.right) || is_collinear(&root, &node.left, &node.right);
    if degenerate {
        ray_successors(node, root, polygon, entry, mesh, out);
    } else {
        cone_successors(node, root, polygon, entry, mesh, out);
    }
}

/// every side of the polygon, skipping the seed's own edge when the start
/// lies on one. used for lazy start seeds.
fn generate_all(node: &SearchNode, polygon: &MeshPolygon, mesh: &Mesh, out: &mut Vec<Successor>) {
    for i in 0..polygon.sides() {
        let (right_id, left_id) = polygon.edge(i);
        if let (Some(lv), Some(rv)) = (node.left_vertex, node.right_vertex) {
            if (left_id == lv && right_id == rv) || (left_id == rv && right_id == lv) {
                continue;
            }
        }
        out.push(Successor {
            kind: SuccessorType::Observable,
            left: mesh.point(left_id),
            right: mesh.point(right_id),
            poly_left_ind: i,
        });
    }
}

fn all_far_edges(polygon: &MeshPolygon, entry: usize, mesh: &Mesh, out: &mut Vec<Successor>) {
    for i in 0..polygon.sides() {
        if i == entry {
            continue;
        }
        let (right_id, left_id) = polygon.edge(i);
        out.push(Successor {
            kind: SuccessorType::Observable,
            left: mesh.point(left_id),
            right: mesh.point(right_id),
            poly_left_ind: i,
        });
    }
}

/// proper cone: clip each far edge against the rays root->right and
/// root->left. walking the far boundary counterclockwise from the entry
/// edge's right end sweeps the cone from its right boundary to its left.
fn cone_successors(
    node: &SearchNode,
    root: Point,
    polygon: &MeshPolygon,
    entry: usize,
    mesh: &Mesh,
    out: &mut Vec<Successor>,
) {
    let n = polygon.sides();
    let mut i = (entry + 1) % n;
    while i != entry {
        let (a_id, b_id) = polygon.edge(i);
        clip_far_edge(
            &root,
            &node.left,
            &node.right,
            &mesh.point(a_id),
            &mesh.point(b_id),
            i,
            out,
        );
        i = (i + 1) % n;
    }
}

fn clip_far_edge(
    root: &Point,
    l: &Point,
    r: &Point,
    a: &Point,
    b: &Point,
    i: usize,
    out: &mut Vec<Successor>,
) {
    // signed area of each endpoint against the cone boundary rays;
    // positive = left of the ray
    let right_a = (*r - *root).cross(&(*a - *root));
    let right_b = (*r - *root).cross(&(*b - *root));
    let left_a = (*l - *root).cross(&(*a - *root));
    let left_b = (*l - *root).cross(&(*b - *root));

    // a far edge lying along a boundary ray collapses the cone there
    if right_a.abs() <= EPSILON && right_b.abs() <= EPSILON {
        out.push(Successor {
            kind: SuccessorType::RightCollinear,
            left: *b,
            right: *a,
            poly_left_ind: i,
        });
        return;
    }
    if left_a.abs() <= EPSILON && left_b.abs() <= EPSILON {
        out.push(Successor {
            kind: SuccessorType::LeftCollinear,
            left: *b,
            right: *a,
            poly_left_ind: i,
        });
        return;
    }

    // walking a -> b leaves the right-outside region first and enters the
    // left-outside region last
    let t_enter = if right_a < -EPSILON {
        if right_b > EPSILON {
            ray_param(root, r, a, b).unwrap_or(1.0)
        } else {
            1.0
        }
    } else {
        0.0
    };
    let t_exit = if left_b > EPSILON {
        if left_a < -EPSILON {
            ray_param(root, l, a, b).unwrap_or(0.0)
        } else {
            0.0
        }
    } else {
        1.0
    };
    let t_enter = t_enter.clamp(0.0, 1.0);
    let t_exit = t_exit.clamp(t_enter, 1.0);
    let enter_p = lerp(a, b, t_enter);
    let exit_p = lerp(a, b, t_exit);

    if t_enter > 0.0 && enter_p.distance(a) > EPSILON {
        out.push(Successor {
            kind: SuccessorType::RightNonObservable,
            left: enter_p,
            right: *a,
            poly_left_ind: i,
        });
    }
    if exit_p.distance(&enter_p) > EPSILON {
        out.push(Successor {
            kind: SuccessorType::Observable,
            left: exit_p,
            right: enter_p,
            poly_left_ind: i,
        });
    }
    if t_exit < 1.0 && b.distance(&exit_p) > EPSILON {
        out.push(Successor {
            kind: SuccessorType::LeftNonObservable,
            left: *b,
            right: exit_p,
            poly_left_ind: i,
        });
    }
}

/// collapsed funnel: the root is collinear with the interval, so light
/// passes only along one ray. far edges split at the ray; the off-ray
/// portions are reachable only by turning at an interval endpoint vertex,
/// which succ_to_node validates.
fn ray_successors(
    node: &SearchNode,
    root: Point,
    polygon: &MeshPolygon,
    entry: usize,
    mesh: &Mesh,
    out: &mut Vec<Successor>,
) {
    let tip = if node.left.approx_eq(&node.right) {
        node.left
    } else if root.distance_sq(&node.left) >= root.distance_sq(&node.right) {
        node.left
    } else {
        node.right
    };
    if root.approx_eq(&tip) {
        // the root sits on the window itself and sees the whole convex
        // polygon
        all_far_edges(polygon, entry, mesh, out);
        return;
    }
    let dir = tip - root;
    let n = polygon.sides();
    let mut i = (entry + 1) % n;
    while i != entry {
        let (a_id, b_id) = polygon.edge(i);
        let a = mesh.point(a_id);
        let b = mesh.point(b_id);
        let sa = dir.cross(&(a - root));
        let sb = dir.cross(&(b - root));
        let forward = |x: &Point| (*x - root).dot(&dir) > 0.0;
        let side = |s: f64, left: Point, right: Point| Successor {
            kind: if s > 0.0 {
                SuccessorType::LeftNonObservable
            } else {
                SuccessorType::RightNonObservable
            },
            left,
            right,
            poly_left_ind: i,
        };
        if sa.abs() <= EPSILON && sb.abs() <= EPSILON {
            out.push(Successor {
                kind: SuccessorType::Observable,
                left: b,
                right: a,
                poly_left_ind: i,
            });
        } else if sa.abs() <= EPSILON {
            if forward(&a) {
                out.push(Successor {
                    kind: SuccessorType::Observable,
                    left: a,
                    right: a,
                    poly_left_ind: i,
                });
            }
            out.push(side(sb, b, a));
        } else if sb.abs() <= EPSILON {
            if forward(&b) {
                out.push(Successor {
                    kind: SuccessorType::Observable,
                    left: b,
                    right: b,
                    poly_left_ind: i,
                });
            }
            out.push(side(sa, b, a));
        } else if (sa > 0.0) != (sb > 0.0) {
            if let Some(u) = ray_param(&root, &tip, &a, &b) {
                let x = lerp(&a, &b, u.clamp(0.0, 1.0));
                if forward(&x) {
                    out.push(Successor {
                        kind: SuccessorType::Observable,
                        left: x,
                        right: x,
                        poly_left_ind: i,
                    });
                }
                out.push(side(sa, x, a));
                out.push(side(sb, b, x));
            }
        } else {
            out.push(side(sa, b, a));
        }
        i = (i + 1) % n;
    }
}

fn ray_param(o: &Point, through: &Point, a: &Point, b: &Point) -> Option<f64> {
    line_intersection_params(o, through, a, b).map(|(_, u)| u)
}

/// convert successors of `parent` into search nodes, choosing each node's
/// root per its classification and pruning against the per-vertex best-g
/// table. new nodes carry f == g; the caller adds its heuristic before
/// pushing.
#[allow(clippy::too_many_arguments)]
pub fn succ_to_node(
    parent: &SearchNode,
    successors: &[Successor],
    start: Point,
    mesh: &Mesh,
    is_goal_polygon: &dyn Fn(PolygonId) -> bool,
    roots: &mut dyn RootFilter,
    out: &mut Vec<SearchNode>,
) {
    let polygon = mesh.polygon(parent.next_polygon);
    let v = &polygon.vertices;
    let p = &polygon.polygons;
    let n = v.len();
    let parent_root = parent.root_point(mesh, start);

    let mut left_g: Option<f64> = None;
    let mut right_g: Option<f64> = None;

    for succ in successors {
        let Some(next_polygon) = p[succ.poly_left_ind] else {
            continue;
        };
        // a one-way polygon is only worth entering when a goal is inside
        if mesh.polygon(next_polygon).is_one_way && !is_goal_polygon(next_polygon) {
            continue;
        }
        let left_vertex_id = v[succ.poly_left_ind];
        let right_vertex_id = v[(succ.poly_left_ind + n - 1) % n];
        let left_vertex =
            succ.left.approx_eq(&mesh.point(left_vertex_id)).then_some(left_vertex_id);
        let right_vertex = succ
            .right
            .approx_eq(&mesh.point(right_vertex_id))
            .then_some(right_vertex_id);

        let push = |roots: &mut dyn RootFilter,
                        out: &mut Vec<SearchNode>,
                        root: Option<VertexId>,
                        g: f64,
                        col: Collinear| {
            if let Some(r) = root {
                if !roots.try_update(r, g) {
                    return;
                }
            }
            out.push(SearchNode {
                parent: None,
                root,
                left: succ.left,
                right: succ.right,
                left_vertex,
                right_vertex,
                prev_polygon: Some(parent.next_polygon),
                entry_edge: Some(succ.poly_left_ind),
                next_polygon,
                g,
                f: g,
                col,
                goal_id: None,
            });
        };

        if parent.col != Collinear::Not {
            // the parent travels along a ray; a successor still on that ray
            // re-anchors at the nearer parent endpoint instead of turning
            let pivot = collinear_pivot(parent, parent_root);
            let root_l = succ.left - pivot;
            let root_r = succ.right - pivot;
            let root_eq_l = root_l.x.abs() < EPSILON && root_l.y.abs() < EPSILON;
            let root_eq_r = root_r.x.abs() < EPSILON && root_r.y.abs() < EPSILON;
            if root_eq_l
                || root_eq_r
                || (mesh.max_poly_sides != 3 && is_collinear(&pivot, &succ.right, &succ.left))
            {
                let at_left = root_eq_l
                    || (!root_eq_r
                        && if (root_l.x - root_r.x).abs() < EPSILON {
                            root_l.y.abs() < root_r.y.abs()
                        } else {
                            root_l.x.abs() < root_r.x.abs()
                        });
                if at_left {
                    match parent.left_vertex {
                        Some(lv) => {
                            if !mesh.vertex(lv).is_corner {
                                continue;
                            }
                            let g = *left_g.get_or_insert_with(|| {
                                parent.g + parent_root.distance(&parent.left)
                            });
                            push(roots, out, Some(lv), g, Collinear::Left);
                        }
                        // lazy seeds anchor at the start itself; an interior
                        // endpoint keeps the current root, distances along
                        // the ray being straight either way
                        None if parent.col == Collinear::Lazy => {
                            push(roots, out, None, parent.g, Collinear::Left)
                        }
                        None => push(roots, out, parent.root, parent.g, Collinear::Left),
                    }
                } else {
                    match parent.right_vertex {
                        Some(rv) => {
                            if !mesh.vertex(rv).is_corner {
                                continue;
                            }
                            let g = *right_g.get_or_insert_with(|| {
                                parent.g + parent_root.distance(&parent.right)
                            });
                            push(roots, out, Some(rv), g, Collinear::Right);
                        }
                        None if parent.col == Collinear::Lazy => {
                            push(roots, out, None, parent.g, Collinear::Right)
                        }
                        None => push(roots, out, parent.root, parent.g, Collinear::Right),
                    }
                }
                continue;
            }
        }

        match succ.kind {
            SuccessorType::RightCollinear | SuccessorType::RightNonObservable => {
                match parent.right_vertex {
                    Some(rv) => {
                        if succ.kind == SuccessorType::RightNonObservable
                            && !mesh.vertex(rv).is_corner
                        {
                            continue;
                        }
                        let g = *right_g
                            .get_or_insert_with(|| parent.g + parent_root.distance(&parent.right));
                        let col = if succ.kind == SuccessorType::RightCollinear {
                            Collinear::Right
                        } else {
                            Collinear::Not
                        };
                        push(roots, out, Some(rv), g, col);
                    }
                    None => {
                        // turning requires a vertex; the collinear case
                        // stays on the old root's ray and needs no turn
                        if succ.kind == SuccessorType::RightCollinear {
                            push(roots, out, parent.root, parent.g, Collinear::Right);
                        }
                    }
                }
            }
            SuccessorType::Observable => push(roots, out, parent.root, parent.g, Collinear::Not),
            SuccessorType::LeftCollinear | SuccessorType::LeftNonObservable => {
                match parent.left_vertex {
                    Some(lv) => {
                        if succ.kind == SuccessorType::LeftNonObservable
                            && !mesh.vertex(lv).is_corner
                        {
                            continue;
                        }
                        let g = *left_g
                            .get_or_insert_with(|| parent.g + parent_root.distance(&parent.left));
                        let col = if succ.kind == SuccessorType::LeftCollinear {
                            Collinear::Left
                        } else {
                            Collinear::Not
                        };
                        push(roots, out, Some(lv), g, col);
                    }
                    None => {
                        if succ.kind == SuccessorType::LeftCollinear {
                            push(roots, out, parent.root, parent.g, Collinear::Left);
                        }
                    }
                }
            }
        }
    }
}

/// seed nodes for a search starting at `start`, one lazy node per polygon
/// the start can see into. handles every point-location class, including
/// the ambiguous corner vertex (one seed per surrounding polygon) and the
/// interior vertex (manual successor generation that skips the edges
/// incident to the vertex).
pub fn gen_initial_nodes(
    start: Point,
    mesh: &Mesh,
    is_goal_polygon: &dyn Fn(PolygonId) -> bool,
    roots: &mut dyn RootFilter,
    out: &mut Vec<SearchNode>,
) {
    use crate::model::mesh::PointLocation as PL;

    let lazy = |poly: PolygonId, lv: Option<VertexId>, rv: Option<VertexId>| SearchNode {
        parent: None,
        root: None,
        left: start,
        right: start,
        left_vertex: lv,
        right_vertex: rv,
        prev_polygon: None,
        entry_edge: None,
        next_polygon: poly,
        g: 0.0,
        f: 0.0,
        col: Collinear::Lazy,
        goal_id: None,
    };

    match mesh.get_point_location(&start) {
        PL::NotOnMesh => {}
        PL::InPolygon(poly)
        | PL::OnMeshBorder { poly, .. }
        | PL::OnCornerVertexUnambig { poly, .. } => out.push(lazy(poly, None, None)),
        PL::OnCornerVertexAmbig { vertex, resolved } => {
            let polys: Vec<PolygonId> = mesh.vertex(vertex).traversable_polygons().unique().collect();
            for poly in &polys {
                out.push(lazy(*poly, None, None));
            }
            if polys.is_empty() {
                if let Some(poly) = resolved {
                    out.push(lazy(poly, None, None));
                }
            }
        }
        PL::OnEdge {
            poly1,
            poly2,
            v1,
            v2,
        } => {
            out.push(lazy(poly2, Some(v1), Some(v2)));
            out.push(lazy(poly1, Some(v2), Some(v1)));
        }
        PL::OnNonCornerVertex { vertex, .. } => {
            let polys: Vec<PolygonId> = mesh.vertex(vertex).traversable_polygons().unique().collect();
            for poly in polys {
                if is_goal_polygon(poly) {
                    // trivial case: a goal shares a polygon with the start
                    out.push(lazy(poly, None, None));
                    continue;
                }
                let dummy = lazy(poly, None, None);
                let polygon = mesh.polygon(poly);
                let mut successors = Vec::with_capacity(polygon.sides());
                for i in 0..polygon.sides() {
                    let (right_id, left_id) = polygon.edge(i);
                    if left_id == vertex || right_id == vertex {
                        continue;
                    }
                    successors.push(Successor {
                        kind: SuccessorType::Observable,
                        left: mesh.point(left_id),
                        right: mesh.point(right_id),
                        poly_left_ind: i,
                    });
                }
                succ_to_node(&dummy, &successors, start, mesh, is_goal_polygon, roots, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::search::RootTable;
    use crate::testing::fixtures;

    fn node_into(
        mesh: &Mesh,
        prev: PolygonId,
        entry: usize,
        root: Option<VertexId>,
        left: Point,
        right: Point,
    ) -> SearchNode {
        let next = mesh.polygon(prev).polygons[entry].expect("entry edge must be interior");
        SearchNode {
            parent: None,
            root,
            left,
            right,
            left_vertex: None,
            right_vertex: None,
            prev_polygon: Some(prev),
            entry_edge: Some(entry),
            next_polygon: next,
            g: 0.0,
            f: 0.0,
            col: Collinear::Not,
            goal_id: None,
        }
    }

    fn lazy_seed(poly: PolygonId, start: Point) -> SearchNode {
        SearchNode {
            parent: None,
            root: None,
            left: start,
            right: start,
            left_vertex: None,
            right_vertex: None,
            prev_polygon: None,
            entry_edge: None,
            next_polygon: poly,
            g: 0.0,
            f: 0.0,
            col: Collinear::Lazy,
            goal_id: None,
        }
    }

    #[test]
    fn test_lazy_seed_generates_every_side() {
        let mesh = fixtures::grid_mesh();
        let start = Point::new(0.25, 0.25);
        let node = lazy_seed(PolygonId(0), start);
        let mut out = vec![];
        get_successors(&node, start, &mesh, &mut out);
        assert_eq!(out.len(), 4);
        assert!(out.iter().all(|s| s.kind == SuccessorType::Observable));
    }

    #[test]
    fn test_cone_clips_far_edges() {
        let mesh = fixtures::grid_mesh();
        // expand from inside P0 through the full edge into P1: the window is
        // the segment x = 0.5, y in [0, 0.5] seen from (0.25, 0.25)
        let start = Point::new(0.25, 0.25);
        let node = node_into(
            &mesh,
            PolygonId(0),
            2,
            None,
            Point::new(0.5, 0.5),
            Point::new(0.5, 0.0),
        );
        let mut out = vec![];
        get_successors(&node, start, &mesh, &mut out);
        // every successor lies on one of P1's three other edges
        assert!(!out.is_empty());
        for s in &out {
            assert_ne!(s.poly_left_ind, 0);
            assert!(s.left.x >= 0.5 - EPSILON);
        }
        // the whole window is visible, so at least one observable successor
        // appears and non-observable ones may flank it
        assert!(out.iter().any(|s| s.kind == SuccessorType::Observable));
    }

    #[test]
    fn test_narrow_cone_splits_an_edge() {
        let mesh = fixtures::grid_mesh();
        // a narrow window in the middle of the shared edge: parts of P1's
        // far edges fall outside the cone on both sides
        let start = Point::new(0.25, 0.25);
        let node = node_into(
            &mesh,
            PolygonId(0),
            2,
            None,
            Point::new(0.5, 0.3),
            Point::new(0.5, 0.2),
        );
        let mut out = vec![];
        get_successors(&node, start, &mesh, &mut out);
        let observable: Vec<_> = out
            .iter()
            .filter(|s| s.kind == SuccessorType::Observable)
            .collect();
        assert!(!observable.is_empty());
        // interval endpoints of observable parts stay inside the cone
        for s in observable {
            for p in [s.left, s.right] {
                let to_l = (Point::new(0.5, 0.3) - start).cross(&(p - start));
                let to_r = (Point::new(0.5, 0.2) - start).cross(&(p - start));
                assert!(to_l <= EPSILON, "point {} left of the left ray", p);
                assert!(to_r >= -EPSILON, "point {} right of the right ray", p);
            }
        }
    }

    #[test]
    fn test_succ_to_node_drops_obstacle_sides() {
        let mesh = fixtures::grid_mesh();
        let start = Point::new(0.25, 0.25);
        let node = lazy_seed(PolygonId(0), start);
        let mut succ = vec![];
        get_successors(&node, start, &mesh, &mut succ);
        let mut roots = RootTable::new(mesh.vertices.len());
        roots.next_epoch();
        let mut out = vec![];
        succ_to_node(&node, &succ, start, &mesh, &|_| false, &mut roots, &mut out);
        // P0 borders obstacles on two sides; only the two interior edges
        // produce nodes
        assert_eq!(out.len(), 2);
        let targets: Vec<PolygonId> = out.iter().map(|n| n.next_polygon).collect();
        assert!(targets.contains(&PolygonId(1)));
        assert!(targets.contains(&PolygonId(2)));
        for n in &out {
            assert_eq!(n.prev_polygon, Some(PolygonId(0)));
            assert_eq!(n.g, 0.0);
        }
    }

    #[test]
    fn test_root_pruning_drops_worse_duplicate() {
        let mesh = fixtures::l_room_mesh();
        let start = Point::new(0.1, 0.5);
        // an interval on the P0/P1 boundary whose right endpoint is the
        // reflex corner (vertex 2); a right-non-observable successor on
        // P1's east edge must turn there
        let node = node_into(
            &mesh,
            PolygonId(0),
            3,
            None,
            Point::new(0.0, 0.6),
            mesh.point(VertexId(2)),
        );
        let node = SearchNode {
            left_vertex: Some(VertexId(3)),
            right_vertex: Some(VertexId(2)),
            ..node
        };
        // P1's edge 2 runs from vertex 2 up to vertex 7 at x = 0.4
        let succ = Successor {
            kind: SuccessorType::RightNonObservable,
            left: Point::new(0.4, 1.0),
            right: Point::new(0.4, 0.6),
            poly_left_ind: 2,
        };
        let mut roots = RootTable::new(mesh.vertices.len());
        roots.next_epoch();
        let mut out = vec![];
        succ_to_node(&node, &[succ], start, &mesh, &|_| true, &mut roots, &mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].root, Some(VertexId(2)));
        assert_eq!(out[0].next_polygon, PolygonId(2));

        // a second arrival at the same pivot with a worse g gets dropped
        let worse = SearchNode {
            g: 1.0,
            f: 1.0,
            ..node
        };
        let mut out2 = vec![];
        succ_to_node(&worse, &[succ], start, &mesh, &|_| true, &mut roots, &mut out2);
        assert!(out2.is_empty());
    }

    #[test]
    fn test_initial_nodes_on_edge_start() {
        let mesh = fixtures::grid_mesh();
        let mut roots = RootTable::new(mesh.vertices.len());
        roots.next_epoch();
        let mut out = vec![];
        gen_initial_nodes(
            Point::new(0.5, 0.25),
            &mesh,
            &|_| false,
            &mut roots,
            &mut out,
        );
        assert_eq!(out.len(), 2);
        let targets: Vec<PolygonId> = out.iter().map(|n| n.next_polygon).collect();
        assert!(targets.contains(&PolygonId(0)));
        assert!(targets.contains(&PolygonId(1)));
    }

    #[test]
    fn test_initial_nodes_interior_vertex_start() {
        let mesh = fixtures::grid_mesh();
        let mut roots = RootTable::new(mesh.vertices.len());
        roots.next_epoch();
        // in the grid fixture every edge not incident to the center vertex
        // borders the outside, so manual generation yields nodes only for
        // polygons that hold a goal, via the trivial lazy seed
        let mut out = vec![];
        gen_initial_nodes(
            Point::new(0.5, 0.5),
            &mesh,
            &|_| false,
            &mut roots,
            &mut out,
        );
        assert!(out.is_empty());

        let mut seeded = vec![];
        gen_initial_nodes(
            Point::new(0.5, 0.5),
            &mesh,
            &|p| p == PolygonId(3),
            &mut roots,
            &mut seeded,
        );
        assert_eq!(seeded.len(), 1);
        assert_eq!(seeded[0].next_polygon, PolygonId(3));
        assert_eq!(seeded[0].col, Collinear::Lazy);
    }

    #[test]
    fn test_initial_nodes_ambiguous_vertex_seeds_every_room() {
        let mesh = fixtures::pinch_mesh();
        let mut roots = RootTable::new(mesh.vertices.len());
        roots.next_epoch();
        let mut out = vec![];
        gen_initial_nodes(
            Point::new(1.0, 1.0),
            &mesh,
            &|_| false,
            &mut roots,
            &mut out,
        );
        assert_eq!(out.len(), 4);
        assert!(out.iter().all(|n| n.col == Collinear::Lazy));
    }

    #[test]
    fn test_initial_nodes_off_mesh() {
        let mesh = fixtures::grid_mesh();
        let mut roots = RootTable::new(mesh.vertices.len());
        roots.next_epoch();
        let mut out = vec![];
        gen_initial_nodes(
            Point::new(5.0, 5.0),
            &mesh,
            &|_| false,
            &mut roots,
            &mut out,
        );
        assert!(out.is_empty());
    }
}
