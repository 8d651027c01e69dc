use std::io::Read;
use std::str::FromStr;

use itertools::Itertools;
use rstar::{RTree, AABB};

use super::{
    MeshError, MeshPolygon, MeshVertex, PointLocation, PolygonId, PolygonRTreeObject, VertexId,
};
use crate::model::geometry::{Point, EPSILON};

/// an immutable convex-polygon partition of the traversable region.
///
/// built once from the text format below and shared read-only between any
/// number of search engines (each engine keeps its own transient state):
///
/// ```text
/// mesh
/// 2
/// V P
/// x y n p1 ... pn        (V vertex lines; -1 marks an obstacle side)
/// m v1 ... vm n q1 ... qn (P polygon lines; vertices counterclockwise,
///                          q_i borders the edge from v_{i-1} to v_i)
/// ```
#[derive(Debug)]
pub struct Mesh {
    pub vertices: Box<[MeshVertex]>,
    pub polygons: Box<[MeshPolygon]>,
    pub max_poly_sides: usize,
    rtree: RTree<PolygonRTreeObject>,
}

enum Containment {
    Outside,
    Inside,
    OnEdge(usize),
    OnVertex(usize),
}

impl Mesh {
    pub fn from_reader(mut reader: impl Read) -> Result<Mesh, MeshError> {
        let mut buf = String::new();
        reader.read_to_string(&mut buf)?;
        buf.parse()
    }

    pub fn vertex(&self, id: VertexId) -> &MeshVertex {
        &self.vertices[id.0]
    }

    pub fn polygon(&self, id: PolygonId) -> &MeshPolygon {
        &self.polygons[id.0]
    }

    pub fn point(&self, id: VertexId) -> Point {
        self.vertices[id.0].p
    }

    /// index of the edge of `of` that borders `with`. two convex polygons
    /// share at most one edge, so the result is unambiguous.
    pub fn shared_edge_index(&self, of: PolygonId, with: PolygonId) -> Option<usize> {
        self.polygons[of.0]
            .polygons
            .iter()
            .position(|n| *n == Some(with))
    }

    /// classify a query point against the mesh. an ambiguous corner vertex
    /// is retried after a (10 epsilon, 10 epsilon) nudge; if the nudged
    /// point still fails to identify a polygon the `resolved` field stays
    /// `None` and single-polygon consumers treat the point as off-mesh.
    pub fn get_point_location(&self, p: &Point) -> PointLocation {
        let raw = self.locate(p);
        if let PointLocation::OnCornerVertexAmbig { vertex, .. } = raw {
            let nudged = *p + Point::new(10.0 * EPSILON, 10.0 * EPSILON);
            let resolved = match self.locate(&nudged) {
                PointLocation::InPolygon(q) => Some(q),
                PointLocation::OnMeshBorder { poly, .. } => Some(poly),
                PointLocation::OnEdge { poly1, .. } => Some(poly1),
                other => {
                    log::debug!("nudged ambiguous point {} still locates as {:?}", p, other);
                    None
                }
            };
            return PointLocation::OnCornerVertexAmbig { vertex, resolved };
        }
        raw
    }

    /// every polygon that contains the point, including all polygons around
    /// a vertex and both sides of a shared edge. used to register goals.
    pub fn containing_polygons(&self, p: &Point) -> Vec<PolygonId> {
        match self.get_point_location(p) {
            PointLocation::NotOnMesh => vec![],
            PointLocation::InPolygon(poly) | PointLocation::OnMeshBorder { poly, .. } => {
                vec![poly]
            }
            PointLocation::OnEdge { poly1, poly2, .. } => vec![poly1, poly2],
            PointLocation::OnNonCornerVertex { vertex, .. }
            | PointLocation::OnCornerVertexUnambig { vertex, .. }
            | PointLocation::OnCornerVertexAmbig { vertex, .. } => self.vertices[vertex.0]
                .traversable_polygons()
                .unique()
                .collect(),
        }
    }

    fn locate(&self, p: &Point) -> PointLocation {
        let query = AABB::from_point([p.x, p.y]);
        for candidate in self.rtree.locate_in_envelope_intersecting(&query) {
            let pid = candidate.poly;
            match self.classify(pid, p) {
                Containment::Outside => continue,
                Containment::Inside => return PointLocation::InPolygon(pid),
                Containment::OnVertex(i) => {
                    let vid = self.polygons[pid.0].vertices[i];
                    let vertex = &self.vertices[vid.0];
                    return if !vertex.is_corner {
                        PointLocation::OnNonCornerVertex {
                            vertex: vid,
                            poly: pid,
                        }
                    } else if vertex.is_ambiguous {
                        PointLocation::OnCornerVertexAmbig {
                            vertex: vid,
                            resolved: None,
                        }
                    } else {
                        PointLocation::OnCornerVertexUnambig {
                            vertex: vid,
                            poly: pid,
                        }
                    };
                }
                Containment::OnEdge(i) => {
                    let (v1, v2) = self.polygons[pid.0].edge(i);
                    return match self.polygons[pid.0].polygons[i] {
                        Some(poly2) => PointLocation::OnEdge {
                            poly1: pid,
                            poly2,
                            v1,
                            v2,
                        },
                        None => PointLocation::OnMeshBorder { poly: pid, v1, v2 },
                    };
                }
            }
        }
        PointLocation::NotOnMesh
    }

    fn classify(&self, pid: PolygonId, p: &Point) -> Containment {
        let poly = &self.polygons[pid.0];
        let n = poly.vertices.len();
        for (i, v) in poly.vertices.iter().enumerate() {
            if self.vertices[v.0].p.approx_eq(p) {
                return Containment::OnVertex(i);
            }
        }
        let mut on_edge = None;
        for i in 0..n {
            let a = self.point(poly.vertices[(i + n - 1) % n]);
            let b = self.point(poly.vertices[i]);
            let cr = (b - a).cross(&(*p - a));
            if cr < -EPSILON {
                return Containment::Outside;
            }
            if cr <= EPSILON {
                // on the edge's line; it only counts when inside the span.
                // beyond the span another edge of the (convex) polygon
                // rejects the point, including split collinear boundaries.
                let within =
                    (*p - a).dot(&(b - a)) >= -EPSILON && (*p - b).dot(&(a - b)) >= -EPSILON;
                if within {
                    on_edge = Some(i);
                }
            }
        }
        match on_edge {
            Some(i) => Containment::OnEdge(i),
            None => Containment::Inside,
        }
    }
}

impl FromStr for Mesh {
    type Err = MeshError;

    fn from_str(input: &str) -> Result<Mesh, MeshError> {
        let mut tokens = Tokens::new(input);
        if tokens.next("header")? != "mesh" {
            return Err(MeshError::MissingHeader);
        }
        let version = tokens.next("version")?;
        if version != "2" {
            return Err(MeshError::UnsupportedVersion(version.to_string()));
        }
        let num_vertices: usize = tokens.parse("vertex count")?;
        let num_polygons: usize = tokens.parse("polygon count")?;

        let mut vertices = Vec::with_capacity(num_vertices);
        for v in 0..num_vertices {
            let x: f64 = tokens.parse(&format!("vertex {} x", v))?;
            let y: f64 = tokens.parse(&format!("vertex {} y", v))?;
            let degree: usize = tokens.parse(&format!("vertex {} degree", v))?;
            let mut polygons = Vec::with_capacity(degree);
            for _ in 0..degree {
                polygons.push(
                    tokens
                        .parse_id(&format!("vertex {} polygon", v), num_polygons)?
                        .map(PolygonId),
                );
            }
            let obstacle_wedges = polygons.iter().filter(|p| p.is_none()).count();
            vertices.push(MeshVertex {
                p: Point::new(x, y),
                polygons,
                is_corner: obstacle_wedges >= 1,
                is_ambiguous: obstacle_wedges >= 2,
            });
        }

        let mut polygons = Vec::with_capacity(num_polygons);
        for pi in 0..num_polygons {
            let sides: usize = tokens.parse(&format!("polygon {} side count", pi))?;
            if sides < 3 {
                return Err(MeshError::DegeneratePolygon(pi));
            }
            let mut poly_vertices = Vec::with_capacity(sides);
            for _ in 0..sides {
                let id = tokens.parse_id(&format!("polygon {} vertex", pi), num_vertices)?;
                match id {
                    Some(v) => poly_vertices.push(VertexId(v)),
                    None => {
                        return Err(MeshError::IdOutOfRange {
                            field: format!("polygon {} vertex", pi),
                            value: -1,
                            limit: num_vertices,
                        })
                    }
                }
            }
            let neighbor_count: usize = tokens.parse(&format!("polygon {} neighbor count", pi))?;
            if neighbor_count != sides {
                return Err(MeshError::NeighborCountMismatch(pi, sides, neighbor_count));
            }
            let mut neighbors = Vec::with_capacity(neighbor_count);
            for _ in 0..neighbor_count {
                neighbors.push(
                    tokens
                        .parse_id(&format!("polygon {} neighbor", pi), num_polygons)?
                        .map(PolygonId),
                );
            }
            let distinct = neighbors.iter().flatten().unique().count();
            polygons.push(MeshPolygon {
                vertices: poly_vertices,
                polygons: neighbors,
                is_one_way: distinct <= 1,
            });
        }

        if let Ok(extra) = tokens.next("end of file") {
            return Err(MeshError::TrailingInput(extra.to_string()));
        }

        let max_poly_sides = polygons.iter().map(MeshPolygon::sides).max().unwrap_or(0);
        let entries = polygons
            .iter()
            .enumerate()
            .map(|(i, poly)| {
                let mut min = [f64::INFINITY; 2];
                let mut max = [f64::NEG_INFINITY; 2];
                for v in &poly.vertices {
                    let p = vertices[v.0].p;
                    min[0] = min[0].min(p.x);
                    min[1] = min[1].min(p.y);
                    max[0] = max[0].max(p.x);
                    max[1] = max[1].max(p.y);
                }
                // pad so on-border queries survive float noise
                PolygonRTreeObject::new(
                    PolygonId(i),
                    [min[0] - EPSILON, min[1] - EPSILON],
                    [max[0] + EPSILON, max[1] + EPSILON],
                )
            })
            .collect();

        log::debug!(
            "loaded mesh with {} vertices, {} polygons, max sides {}",
            vertices.len(),
            polygons.len(),
            max_poly_sides
        );

        Ok(Mesh {
            vertices: vertices.into_boxed_slice(),
            polygons: polygons.into_boxed_slice(),
            max_poly_sides,
            rtree: RTree::bulk_load(entries),
        })
    }
}

struct Tokens<'a> {
    iter: std::str::SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn new(input: &'a str) -> Self {
        Tokens {
            iter: input.split_whitespace(),
        }
    }

    fn next(&mut self, field: &str) -> Result<&'a str, MeshError> {
        self.iter
            .next()
            .ok_or_else(|| MeshError::UnexpectedEof(field.to_string()))
    }

    fn parse<T: FromStr>(&mut self, field: &str) -> Result<T, MeshError> {
        let token = self.next(field)?;
        token.parse().map_err(|_| MeshError::ParseField {
            field: field.to_string(),
            value: token.to_string(),
        })
    }

    /// an id field where -1 encodes the obstacle sentinel
    fn parse_id(&mut self, field: &str, limit: usize) -> Result<Option<usize>, MeshError> {
        let value: i64 = self.parse(field)?;
        match value {
            -1 => Ok(None),
            v if v >= 0 && (v as usize) < limit => Ok(Some(v as usize)),
            v => Err(MeshError::IdOutOfRange {
                field: field.to_string(),
                value: v,
                limit,
            }),
        }
    }
}
